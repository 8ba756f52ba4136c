//! Roof covering cost estimator.
//!
//! Validates a raw job, prices it and walks a client through the photo,
//! dimension and analysis steps of an estimate.

pub mod api;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod services;
pub mod wizard;
