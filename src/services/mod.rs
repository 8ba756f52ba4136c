//! Service layer modules.
//!
//! Contains the job validator, the estimation engine and the simulated
//! analysis step the wizard runs before showing an estimate.

pub mod analysis;
pub mod estimator;
pub mod validator;

pub use analysis::{AnalysisOutcome, AnalysisTicket};
