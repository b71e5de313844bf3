//! CLI command implementations.

pub mod common;
pub mod config;
pub mod excitations;
pub mod hamiltonian;
pub mod run;
pub mod version;
