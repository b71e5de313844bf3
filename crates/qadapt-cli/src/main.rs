//! qadapt command-line interface.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use qadapt_sim::GradientMethod;
use qadapt_vqe::SparsePool;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "qadapt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an adaptive ansatz and optimise it
    Run {
        /// YAML run configuration
        #[arg(short, long, env = "QADAPT_CONFIG")]
        config: Option<PathBuf>,

        /// Built-in molecule (h3+, h2, heh+), replaces the configured one
        #[arg(short, long)]
        molecule: Option<String>,

        /// Gradient threshold for both doubles and singles
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Optimisation steps for every stage
        #[arg(short, long)]
        steps: Option<usize>,

        /// Gradient-descent step size
        #[arg(long)]
        stepsize: Option<f64>,

        /// Gradient method of the selection and optimisation stages
        #[arg(short, long)]
        gradient: Option<GradientMethod>,

        /// Gate list of the sparse stage (selected, full)
        #[arg(long)]
        sparse_pool: Option<SparsePool>,

        /// Gradient method of the sparse stage
        #[arg(long)]
        sparse_gradient: Option<GradientMethod>,

        /// Skip exact diagonalisation
        #[arg(long)]
        no_exact: bool,

        /// Write the full report as JSON
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// Print the qubit Hamiltonian of a molecule
    Hamiltonian {
        /// YAML run configuration
        #[arg(short, long, env = "QADAPT_CONFIG")]
        config: Option<PathBuf>,

        /// Built-in molecule (h3+, h2, heh+)
        #[arg(short, long)]
        molecule: Option<String>,

        /// Number of terms to list, largest first (0 lists all)
        #[arg(short, long, default_value = "20")]
        terms: usize,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// List single and double excitations
    Excitations {
        /// Active electrons
        #[arg(short, long)]
        electrons: usize,

        /// Qubits (active spin orbitals)
        #[arg(short, long)]
        qubits: usize,

        /// Spin projection change
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        delta_sz: i32,
    },

    /// Print the default run configuration
    Config {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Run {
            config,
            molecule,
            threshold,
            steps,
            stepsize,
            gradient,
            sparse_pool,
            sparse_gradient,
            no_exact,
            export,
        } => commands::run::execute(
            config.as_deref(),
            &commands::run::Overrides {
                molecule,
                threshold,
                steps,
                stepsize,
                gradient,
                sparse_pool,
                sparse_gradient,
                no_exact,
            },
            export.as_deref(),
        ),
        Commands::Hamiltonian {
            config,
            molecule,
            terms,
            format,
        } => commands::hamiltonian::execute(
            config.as_deref(),
            molecule.as_deref(),
            terms,
            &format,
        ),
        Commands::Excitations {
            electrons,
            qubits,
            delta_sz,
        } => commands::excitations::execute(electrons, qubits, delta_sz),
        Commands::Config { output } => commands::config::execute(output.as_deref()),
        Commands::Version => {
            commands::version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_defaults() {
        let cli = Cli::try_parse_from(["qadapt", "run"]).unwrap();
        match cli.command {
            Commands::Run {
                threshold,
                steps,
                no_exact,
                export,
                ..
            } => {
                assert!(threshold.is_none());
                assert!(steps.is_none());
                assert!(!no_exact);
                assert!(export.is_none());
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_run_overrides() {
        let cli = Cli::try_parse_from([
            "qadapt",
            "-vv",
            "run",
            "--molecule",
            "h2",
            "--threshold",
            "1e-5",
            "--gradient",
            "parameter-shift",
            "--sparse-pool",
            "full",
            "--export",
            "out.json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Run {
                molecule,
                threshold,
                gradient,
                sparse_pool,
                export,
                ..
            } => {
                assert_eq!(molecule.as_deref(), Some("h2"));
                assert_eq!(threshold, Some(1e-5));
                assert_eq!(gradient, Some(GradientMethod::ParameterShift));
                assert_eq!(sparse_pool, Some(SparsePool::Full));
                assert_eq!(export, Some(PathBuf::from("out.json")));
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_rejects_unknown_pool() {
        assert!(Cli::try_parse_from(["qadapt", "run", "--sparse-pool", "some"]).is_err());
    }

    #[test]
    fn test_excitations_args() {
        let cli = Cli::try_parse_from([
            "qadapt",
            "excitations",
            "-e",
            "2",
            "-q",
            "6",
            "--delta-sz",
            "-1",
        ])
        .unwrap();
        match cli.command {
            Commands::Excitations {
                electrons,
                qubits,
                delta_sz,
            } => assert_eq!((electrons, qubits, delta_sz), (2, 6, -1)),
            _ => panic!("expected excitations"),
        }
    }

    #[test]
    fn test_excitations_requires_sizes() {
        assert!(Cli::try_parse_from(["qadapt", "excitations", "-e", "2"]).is_err());
    }
}
