use std::sync::Arc;

use crate::config::Settings;
use crate::domain::{CostEstimate, JobSpecificationDefaults, RawJobInput};
use crate::error::ValidationError;
use crate::services::{estimator, validator};
use crate::wizard::Wizard;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
}

impl AppState {
    pub fn new(settings: Settings) -> Arc<Self> {
        Arc::new(Self { settings })
    }

    /// Validator and engine in one call, as run when the wizard leaves the
    /// analysis step.
    pub fn validate_and_estimate(
        &self,
        raw: &RawJobInput,
    ) -> Result<CostEstimate, ValidationError> {
        validator::validate(raw).map(|spec| estimator::estimate(&spec))
    }

    /// Initial form values for a new job
    pub fn reset_job(&self) -> JobSpecificationDefaults {
        RawJobInput::with_location(self.settings.default_location.clone())
    }
}

/// Start a new estimate session
pub fn create_wizard(state: &Arc<AppState>) -> Wizard {
    Wizard::new(Arc::clone(state))
}
