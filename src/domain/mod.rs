//! Domain types
//!
//! Catalog, job specification, cost estimate and photo types for the roof
//! estimator.

pub mod catalog;
pub mod estimate;
pub mod job;
pub mod photos;

// Re-export commonly used types
pub use catalog::*;
pub use estimate::*;
pub use job::*;
pub use photos::*;
