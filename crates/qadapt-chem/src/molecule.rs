//! Molecule description: atoms, geometry, charge, basis and active space.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChemError, ChemResult};

/// Bohr radii per ångström.
pub const BOHR_PER_ANGSTROM: f64 = 1.889_726_124_6;

/// Closest two nuclei may approach, in bohr.
pub const MIN_SEPARATION: f64 = 1e-8;

/// Supported chemical elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    /// Hydrogen.
    H,
    /// Helium.
    He,
}

impl Element {
    /// Nuclear charge.
    pub fn atomic_number(self) -> u32 {
        match self {
            Element::H => 1,
            Element::He => 2,
        }
    }

    /// Chemical symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Element::H => "H",
            Element::He => "He",
        }
    }
}

impl FromStr for Element {
    type Err = ChemError;

    fn from_str(s: &str) -> ChemResult<Self> {
        match s.trim() {
            "H" | "h" => Ok(Element::H),
            "He" | "HE" | "he" => Ok(Element::He),
            other => Err(ChemError::UnsupportedElement(other.to_string())),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Length unit of the geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Atomic units (default).
    #[default]
    Bohr,
    /// Ångström, converted to bohr on load.
    Angstrom,
}

/// An atom with its position in bohr.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atom {
    /// Element.
    pub element: Element,
    /// Cartesian position in bohr.
    pub position: [f64; 3],
}

impl Atom {
    /// Squared distance to another atom.
    pub fn distance_sqr(&self, other: &Atom) -> f64 {
        dist_sqr(&self.position, &other.position)
    }
}

pub(crate) fn dist_sqr(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    (0..3).map(|k| (a[k] - b[k]).powi(2)).sum()
}

/// Everything needed to build a molecular qubit Hamiltonian.
///
/// The default is the trihydrogen cation H3+ in STO-3G with two active
/// electrons in three active orbitals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoleculeSpec {
    /// Element symbols, one per atom.
    pub symbols: Vec<String>,
    /// Flat coordinates `[x0, y0, z0, x1, ...]`.
    pub geometry: Vec<f64>,
    /// Unit of `geometry`.
    pub units: Units,
    /// Net charge.
    pub charge: i32,
    /// Spin multiplicity `2S + 1`.
    pub multiplicity: u32,
    /// Basis set name (`sto-3g` or `6-31g`).
    pub basis: String,
    /// Active electrons (all when absent).
    pub active_electrons: Option<usize>,
    /// Active spatial orbitals (all when absent).
    pub active_orbitals: Option<usize>,
}

impl Default for MoleculeSpec {
    fn default() -> Self {
        Self::h3_plus()
    }
}

impl MoleculeSpec {
    /// H3+ near its equilibrium geometry, two electrons in three orbitals.
    pub fn h3_plus() -> Self {
        Self {
            symbols: vec!["H".into(), "H".into(), "H".into()],
            geometry: vec![
                0.010_763_41,
                0.044_498_77,
                0.0,
                0.987_295_11,
                1.630_590_90,
                0.0,
                1.872_624_11,
                -0.008_158_42,
                0.0,
            ],
            units: Units::Bohr,
            charge: 1,
            multiplicity: 1,
            basis: "sto-3g".into(),
            active_electrons: Some(2),
            active_orbitals: Some(3),
        }
    }

    /// H2 along z with bond length `r` bohr, STO-3G, full space.
    pub fn h2(r: f64) -> Self {
        Self {
            symbols: vec!["H".into(), "H".into()],
            geometry: vec![0.0, 0.0, 0.0, 0.0, 0.0, r],
            units: Units::Bohr,
            charge: 0,
            multiplicity: 1,
            basis: "sto-3g".into(),
            active_electrons: None,
            active_orbitals: None,
        }
    }

    /// Replace the basis set name.
    #[must_use]
    pub fn with_basis(mut self, basis: impl Into<String>) -> Self {
        self.basis = basis.into();
        self
    }

    /// Restrict to an active space.
    #[must_use]
    pub fn with_active_space(mut self, electrons: usize, orbitals: usize) -> Self {
        self.active_electrons = Some(electrons);
        self.active_orbitals = Some(orbitals);
        self
    }

    /// Parsed atoms with positions converted to bohr.
    pub fn atoms(&self) -> ChemResult<Vec<Atom>> {
        if self.symbols.is_empty() {
            return Err(ChemError::EmptyMolecule);
        }
        let expected = 3 * self.symbols.len();
        if self.geometry.len() != expected {
            return Err(ChemError::GeometryLength {
                expected,
                got: self.geometry.len(),
            });
        }
        if let Some(i) = self.geometry.iter().position(|x| !x.is_finite()) {
            return Err(ChemError::NonFiniteCoordinate(i));
        }
        let scale = match self.units {
            Units::Bohr => 1.0,
            Units::Angstrom => BOHR_PER_ANGSTROM,
        };
        self.symbols
            .iter()
            .zip(self.geometry.chunks_exact(3))
            .map(|(symbol, xyz)| {
                Ok(Atom {
                    element: symbol.parse()?,
                    position: [xyz[0] * scale, xyz[1] * scale, xyz[2] * scale],
                })
            })
            .collect()
    }

    /// Total electron count after applying the charge.
    pub fn n_electrons(&self) -> ChemResult<usize> {
        let nuclear: i64 = self
            .atoms()?
            .iter()
            .map(|a| i64::from(a.element.atomic_number()))
            .sum();
        let electrons = nuclear - i64::from(self.charge);
        if electrons <= 0 {
            return Err(ChemError::InvalidCharge {
                charge: self.charge,
                electrons,
            });
        }
        Ok(electrons as usize)
    }

    /// Check the molecule before any integral is computed.
    pub fn validate(&self) -> ChemResult<()> {
        let electrons = self.n_electrons()?;
        let atoms = self.atoms()?;
        for (first, a) in atoms.iter().enumerate() {
            for (offset, b) in atoms[first + 1..].iter().enumerate() {
                if a.distance_sqr(b) < MIN_SEPARATION * MIN_SEPARATION {
                    return Err(ChemError::CoincidentAtoms {
                        first,
                        second: first + 1 + offset,
                    });
                }
            }
        }
        crate::basis::BasisSet::from_str(&self.basis)?;
        if self.multiplicity != 1 || electrons % 2 != 0 {
            return Err(ChemError::OpenShell {
                multiplicity: self.multiplicity,
                electrons,
            });
        }
        if let Some(active) = self.active_electrons {
            if active == 0 || active > electrons {
                return Err(ChemError::InvalidActiveSpace(format!(
                    "active_electrons = {active} must be in 1..={electrons}"
                )));
            }
            if (electrons - active) % 2 != 0 {
                return Err(ChemError::InvalidActiveSpace(format!(
                    "{} core electrons cannot fill doubly occupied orbitals",
                    electrons - active
                )));
            }
        }
        if self.active_orbitals == Some(0) {
            return Err(ChemError::InvalidActiveSpace(
                "active_orbitals must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Point-charge repulsion between all nuclei.
pub fn nuclear_repulsion(atoms: &[Atom]) -> f64 {
    let mut energy = 0.0;
    for (i, a) in atoms.iter().enumerate() {
        for b in &atoms[i + 1..] {
            let r = a.distance_sqr(b).sqrt();
            energy += f64::from(a.element.atomic_number() * b.element.atomic_number()) / r;
        }
    }
    energy
}
