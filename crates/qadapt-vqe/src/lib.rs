//! qadapt-vqe - adaptive ansatz construction for VQE.
//!
//! Gates are chosen greedily by the size of their energy gradient at zero
//! and then trained by plain gradient descent:
//!
//! - [`select_gates`] keeps the pool gates with `|∂E/∂θ| > threshold`
//! - [`optimize`] runs a fixed number of [`GradientDescent`] steps
//! - [`AdaptiveDriver`] selects doubles, optimises them, selects singles on
//!   top, then optimises everything together
//! - [`run_adaptive`] adds molecule setup and a sparse-matrix re-run
//!
//! # Quick start
//!
//! ```rust,no_run
//! use qadapt_vqe::{RunConfig, run_adaptive};
//!
//! let report = run_adaptive(&RunConfig::default()).unwrap();
//! println!("E = {:.8} Ha", report.final_energy());
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod estimator;
pub mod exact;
pub mod optimizer;
pub mod report;
pub mod selector;

pub use config::{AdaptiveConfig, RunConfig, SparsePool};
pub use driver::{AdaptiveDriver, TwoStageResult, run_adaptive};
pub use error::{VqeError, VqeResult};
pub use estimator::{Estimator, StatevectorEstimator};
pub use exact::{MAX_EXACT_DIM, exact_ground_energy};
pub use optimizer::{
    CostFunction, EnergyCost, FnCost, GradientDescent, OptimizationResult, optimize,
};
pub use report::{AdaptiveReport, MoleculeSummary, StageTimings};
pub use selector::{Selection, filter_by_gradient, select_gates};
