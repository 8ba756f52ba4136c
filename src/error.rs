//! Validation and wizard errors
//!
//! Provides consistent error documents for the presentation layer.

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::JobField;
use crate::wizard::WizardStep;

/// Why a dimension field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionIssue {
    Missing,
    NotANumber,
    NotFinite,
    NotPositive,
    TooSmall,
    TooLarge,
}

impl std::fmt::Display for DimensionIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DimensionIssue::Missing => write!(f, "is missing"),
            DimensionIssue::NotANumber => write!(f, "is not a number"),
            DimensionIssue::NotFinite => write!(f, "is not finite"),
            DimensionIssue::NotPositive => write!(f, "must be greater than zero"),
            DimensionIssue::TooSmall => write!(f, "is too small to price"),
            DimensionIssue::TooLarge => write!(f, "is too large to price"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid dimension: {field} {issue}")]
    InvalidDimension { field: JobField, issue: DimensionIssue },

    #[error("Invalid value for {field}: '{value}'")]
    InvalidEnum { field: JobField, value: String },
}

impl ValidationError {
    pub fn field(&self) -> JobField {
        match self {
            Self::InvalidDimension { field, .. } | Self::InvalidEnum { field, .. } => *field,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidDimension { .. } => "INVALID_DIMENSION",
            Self::InvalidEnum { .. } => "INVALID_ENUM",
        }
    }

    /// Dimension errors are fixed by re-prompting the user. An enum error means
    /// the caller sent data the form cannot produce.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidDimension { .. })
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.code().to_string(),
            message: self.to_string(),
            field: Some(self.field()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("At least one photo is required")]
    NoPhotos,

    #[error("Length and width are required")]
    DimensionsIncomplete,

    #[error("Photo not found: {0}")]
    PhotoNotFound(Uuid),

    #[error("Cannot {action} while {step}")]
    InvalidTransition {
        step: WizardStep,
        action: &'static str,
    },

    #[error("An estimate is already being generated")]
    AnalysisInProgress,

    #[error("Analysis result discarded")]
    AnalysisDiscarded,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl WizardError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoPhotos => "NO_PHOTOS",
            Self::DimensionsIncomplete => "DIMENSIONS_INCOMPLETE",
            Self::PhotoNotFound(_) => "PHOTO_NOT_FOUND",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::AnalysisInProgress => "ANALYSIS_IN_PROGRESS",
            Self::AnalysisDiscarded => "ANALYSIS_DISCARDED",
            Self::Validation(e) => e.code(),
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        match self {
            Self::Validation(e) => e.to_response(),
            _ => ErrorResponse {
                code: self.code().to_string(),
                message: self.to_string(),
                field: None,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<JobField>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_codes() {
        let dim = ValidationError::InvalidDimension {
            field: JobField::Length,
            issue: DimensionIssue::NotANumber,
        };
        assert_eq!(dim.code(), "INVALID_DIMENSION");
        assert!(dim.is_recoverable());
        assert_eq!(dim.to_string(), "Invalid dimension: length is not a number");

        let enum_err = ValidationError::InvalidEnum {
            field: JobField::Urgency,
            value: "asap".to_string(),
        };
        assert_eq!(enum_err.code(), "INVALID_ENUM");
        assert!(!enum_err.is_recoverable());
        assert_eq!(enum_err.field(), JobField::Urgency);
    }

    #[test]
    fn test_wizard_error_response_keeps_field() {
        let err = WizardError::from(ValidationError::InvalidDimension {
            field: JobField::Width,
            issue: DimensionIssue::Missing,
        });
        let response = err.to_response();
        assert_eq!(response.code, "INVALID_DIMENSION");
        assert_eq!(response.field, Some(JobField::Width));

        let json = serde_json::to_value(WizardError::NoPhotos.to_response()).unwrap();
        assert_eq!(json["code"], "NO_PHOTOS");
        assert!(json.get("field").is_none());
    }
}
