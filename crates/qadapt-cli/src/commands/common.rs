//! Shared helpers for CLI commands.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use qadapt_chem::{MoleculeSpec, Units};
use qadapt_sim::Excitation;
use qadapt_vqe::RunConfig;

/// Load a run configuration, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<RunConfig> {
    match path {
        Some(path) => RunConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(RunConfig::default()),
    }
}

/// Built-in molecule by name.
pub fn molecule_preset(name: &str) -> Result<MoleculeSpec> {
    match name.to_lowercase().as_str() {
        "h3+" | "h3plus" | "h3" => Ok(MoleculeSpec::h3_plus()),
        "h2" => Ok(MoleculeSpec::h2(1.4)),
        "heh+" | "hehplus" | "heh" => Ok(MoleculeSpec {
            symbols: vec!["He".into(), "H".into()],
            geometry: vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.4632],
            units: Units::Bohr,
            charge: 1,
            multiplicity: 1,
            basis: "sto-3g".into(),
            active_electrons: None,
            active_orbitals: None,
        }),
        other => {
            anyhow::bail!("Unknown molecule: '{other}'. Available: h3+, h2, heh+");
        }
    }
}

/// Config file, then molecule preset on top.
pub fn resolve_config(path: Option<&Path>, molecule: Option<&str>) -> Result<RunConfig> {
    let mut config = load_config(path)?;
    if let Some(name) = molecule {
        config.molecule = molecule_preset(name)?;
    }
    Ok(config)
}

/// Spinner shown while a long stage runs.
pub fn spinner(msg: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

/// Gate list as `D[0, 1, 2, 3], S[0, 2]`.
pub fn format_gates(gates: &[Excitation]) -> String {
    if gates.is_empty() {
        return "none".to_string();
    }
    gates
        .iter()
        .map(|g| format!("{}{g}", if g.is_single() { "S" } else { "D" }))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn print_header(title: &str) {
    let line = "═".repeat(60);
    println!();
    println!("{}", style(&line).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style(&line).cyan());
    println!();
}

pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        for name in ["h3+", "H2", "heh+"] {
            molecule_preset(name).unwrap().validate().unwrap();
        }
        assert!(molecule_preset("lih").is_err());
    }

    #[test]
    fn test_resolve_without_file() {
        let config = resolve_config(None, Some("h2")).unwrap();
        assert_eq!(config.molecule, MoleculeSpec::h2(1.4));
        assert_eq!(config.adaptive.stepsize, 0.5);
    }

    #[test]
    fn test_missing_file() {
        assert!(load_config(Some(Path::new("/nonexistent/qadapt.yaml"))).is_err());
    }

    #[test]
    fn test_format_gates() {
        let gates = [Excitation::Double([0, 1, 2, 3]), Excitation::Single([0, 2])];
        assert_eq!(format_gates(&gates), "D[0, 1, 2, 3], S[0, 2]");
        assert_eq!(format_gates(&[]), "none");
    }
}
