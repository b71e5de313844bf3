//! Config command implementation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use qadapt_vqe::RunConfig;

/// Execute the config command.
pub fn execute(output: Option<&Path>) -> Result<()> {
    let yaml = RunConfig::default().to_yaml()?;
    match output {
        Some(path) => {
            fs::write(path, &yaml)
                .with_context(|| format!("Failed to write config: {}", path.display()))?;
            eprintln!(
                "{} Config written to {}",
                style("OK").green().bold(),
                path.display()
            );
        }
        None => print!("{yaml}"),
    }
    Ok(())
}
