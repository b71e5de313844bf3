//! Run configuration.
//!
//! A run is described by a molecule and the adaptive settings. Both halves
//! deserialize from YAML with every field optional; missing fields take the
//! defaults below, which reproduce the H3+ walkthrough.
//!
//! ```yaml
//! molecule:
//!   symbols: [H, H]
//!   geometry: [0.0, 0.0, 0.0, 0.0, 0.0, 1.4]
//! adaptive:
//!   doubles_threshold: 1.0e-5
//!   final_steps: 20
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use qadapt_chem::MoleculeSpec;
use qadapt_sim::GradientMethod;
use serde::{Deserialize, Serialize};

use crate::error::{VqeError, VqeResult};
use crate::optimizer::GradientDescent;
use crate::selector::validate_threshold;

/// Which gates the sparse stage optimises.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SparsePool {
    /// The gates the two-stage driver selected.
    #[default]
    Selected,
    /// Every double, then every single, without selection.
    Full,
}

impl SparsePool {
    /// Config spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            SparsePool::Selected => "selected",
            SparsePool::Full => "full",
        }
    }
}

impl fmt::Display for SparsePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SparsePool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "selected" => Ok(SparsePool::Selected),
            "full" => Ok(SparsePool::Full),
            other => Err(format!(
                "unknown sparse pool '{other}' (expected 'selected' or 'full')"
            )),
        }
    }
}

/// Settings of the selection and optimisation stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveConfig {
    /// Gradient threshold for double excitations.
    pub doubles_threshold: f64,
    /// Gradient threshold for single excitations.
    pub singles_threshold: f64,
    /// Gradient-descent step size.
    pub stepsize: f64,
    /// Steps spent on the selected doubles alone.
    pub doubles_steps: usize,
    /// Steps spent on doubles and singles together.
    pub final_steps: usize,
    /// Steps of the sparse re-optimisation.
    pub sparse_steps: usize,
    /// Gradient method of the dense stages.
    pub gradient: GradientMethod,
    /// Gradient method of the sparse stage.
    pub sparse_gradient: GradientMethod,
    /// Gate list of the sparse stage.
    pub sparse_pool: SparsePool,
    /// Spin projection change of the enumerated excitations.
    pub delta_sz: i32,
    /// Also diagonalise the Hamiltonian for a reference energy.
    pub exact: bool,
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self {
            doubles_threshold: 1e-3,
            singles_threshold: 1e-3,
            stepsize: 0.5,
            doubles_steps: 10,
            final_steps: 10,
            sparse_steps: 10,
            gradient: GradientMethod::Adjoint,
            sparse_gradient: GradientMethod::Adjoint,
            sparse_pool: SparsePool::Selected,
            delta_sz: 0,
            exact: true,
        }
    }
}

impl AdaptiveConfig {
    /// Set both thresholds.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.doubles_threshold = threshold;
        self.singles_threshold = threshold;
        self
    }

    /// Set every stage's step count.
    #[must_use]
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.doubles_steps = steps;
        self.final_steps = steps;
        self.sparse_steps = steps;
        self
    }

    /// The configured optimizer.
    pub fn optimizer(&self) -> VqeResult<GradientDescent> {
        GradientDescent::new(self.stepsize)
    }

    /// Reject settings that would fail mid-run.
    pub fn validate(&self) -> VqeResult<()> {
        validate_threshold(self.doubles_threshold)?;
        validate_threshold(self.singles_threshold)?;
        self.optimizer()?;
        for steps in [self.doubles_steps, self.final_steps, self.sparse_steps] {
            if steps == 0 {
                return Err(VqeError::InvalidStepCount(steps));
            }
        }
        if !(-2..=2).contains(&self.delta_sz) {
            return Err(qadapt_chem::ChemError::InvalidDeltaSz(self.delta_sz).into());
        }
        Ok(())
    }
}

/// A complete run: molecule plus adaptive settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Molecule and active space.
    pub molecule: MoleculeSpec,
    /// Selection and optimisation settings.
    pub adaptive: AdaptiveConfig,
}

impl RunConfig {
    /// Parse YAML and validate.
    pub fn from_yaml(contents: &str) -> VqeResult<Self> {
        let config: RunConfig = serde_yaml_ng::from_str(contents)
            .map_err(|e| VqeError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML file and validate.
    pub fn from_file<P: AsRef<Path>>(path: P) -> VqeResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| VqeError::ConfigIo(format!("{}: {e}", path.display())))?;
        Self::from_yaml(&contents)
    }

    /// Serialise to YAML.
    pub fn to_yaml(&self) -> VqeResult<String> {
        serde_yaml_ng::to_string(self).map_err(|e| VqeError::ConfigParse(e.to_string()))
    }

    /// Check the molecule and the adaptive settings.
    pub fn validate(&self) -> VqeResult<()> {
        self.molecule.validate()?;
        self.adaptive.validate()
    }
}
