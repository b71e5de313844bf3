//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - adaptive ansatz construction for VQE",
        style("qadapt").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qadapt-sim   Statevector simulator, excitation gates, gradients");
    println!("  qadapt-chem  Integrals, RHF and Jordan-Wigner Hamiltonians");
    println!("  qadapt-vqe   Gate selection, gradient descent, two-stage driver");
    println!("  qadapt-cli   Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style(env!("CARGO_PKG_REPOSITORY")).underlined()
    );
    println!("License:    {}", style("Apache-2.0").dim());
}
