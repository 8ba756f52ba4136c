//! Output documents printed for the presentation layer.

pub mod response;

pub use response::{DataResponse, QuoteDocument};
