//! Excitations command implementation.

use anyhow::Result;
use qadapt_chem::{excitations, hf_state};

use super::common::{format_gates, print_header, print_result, print_section};

/// Execute the excitations command.
pub fn execute(electrons: usize, qubits: usize, delta_sz: i32) -> Result<()> {
    let (singles, doubles) = excitations(electrons, qubits, delta_sz)?;
    let reference = hf_state(electrons, qubits)?;

    print_header(&format!("Excitations: {electrons} electrons, {qubits} qubits"));
    let occupation: String = reference.iter().map(u8::to_string).collect();
    print_result("HF state", format!("|{occupation}⟩"));
    print_result("Δsz", delta_sz);

    print_section(&format!("Singles ({})", singles.len()));
    println!("  {}", format_gates(&singles));
    print_section(&format!("Doubles ({})", doubles.len()));
    println!("  {}", format_gates(&doubles));
    Ok(())
}
