//! Job specification domain types
//!
//! `RawJobInput` is the editable draft the form works on. `JobSpecification`
//! is only ever produced by the validator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::config::Settings;
use crate::domain::catalog::RoofType;
use crate::error::ValidationError;
use crate::services::validator;

/// Current state of the existing roof
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Good,
    Fair,
    Poor,
}

impl Condition {
    pub const ALL: [Condition; 3] = [Condition::Good, Condition::Fair, Condition::Poor];

    pub fn key(&self) -> &'static str {
        match self {
            Condition::Good => "good",
            Condition::Fair => "fair",
            Condition::Poor => "poor",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Applied to the material cost only
    pub fn multiplier(&self) -> Decimal {
        match self {
            Condition::Good => Decimal::ONE,
            Condition::Fair => Decimal::new(11, 1),
            Condition::Poor => Decimal::new(13, 1),
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Job urgency
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Normal,
    Urgent,
}

impl Urgency {
    pub const ALL: [Urgency; 2] = [Urgency::Normal, Urgency::Urgent];

    pub fn key(&self) -> &'static str {
        match self {
            Urgency::Normal => "normal",
            Urgency::Urgent => "urgent",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL.into_iter().find(|u| u.key() == key)
    }

    /// Applied to the sum of all cost components
    pub fn multiplier(&self) -> Decimal {
        match self {
            Urgency::Normal => Decimal::ONE,
            Urgency::Urgent => Decimal::new(12, 1),
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Form field identifiers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum JobField {
    Length,
    Width,
    #[serde(alias = "roofType")]
    RoofType,
    Condition,
    Urgency,
    Location,
}

impl std::fmt::Display for JobField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobField::Length => write!(f, "length"),
            JobField::Width => write!(f, "width"),
            JobField::RoofType => write!(f, "roof_type"),
            JobField::Condition => write!(f, "condition"),
            JobField::Urgency => write!(f, "urgency"),
            JobField::Location => write!(f, "location"),
        }
    }
}

impl FromStr for JobField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "length" => Ok(JobField::Length),
            "width" => Ok(JobField::Width),
            "roof_type" | "roofType" => Ok(JobField::RoofType),
            "condition" => Ok(JobField::Condition),
            "urgency" => Ok(JobField::Urgency),
            "location" => Ok(JobField::Location),
            other => Err(format!("unknown job field '{}'", other)),
        }
    }
}

/// A single key/value edit coming from the form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldEdit {
    pub field: JobField,
    pub value: String,
}

impl FieldEdit {
    pub fn new(field: JobField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

/// Unvalidated job form state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RawJobInput {
    pub length: String,
    pub width: String,
    #[serde(alias = "roofType")]
    pub roof_type: String,
    pub condition: String,
    pub urgency: String,
    pub location: String,
}

/// What the form is repopulated with after a reset
pub type JobSpecificationDefaults = RawJobInput;

impl Default for RawJobInput {
    fn default() -> Self {
        Self::with_location(Settings::DEFAULT_LOCATION)
    }
}

impl RawJobInput {
    /// Default draft with the given location
    pub fn with_location(location: impl Into<String>) -> Self {
        Self {
            length: String::new(),
            width: String::new(),
            roof_type: RoofType::Tuile.key().to_string(),
            condition: Condition::Good.key().to_string(),
            urgency: Urgency::Normal.key().to_string(),
            location: location.into(),
        }
    }

    /// Both dimensions filled in. Says nothing about whether they parse.
    pub fn has_dimensions(&self) -> bool {
        !self.length.trim().is_empty() && !self.width.trim().is_empty()
    }

    pub fn set_length(&mut self, value: impl Into<String>) -> Result<(), ValidationError> {
        self.length = value.into();
        validator::check_dimension(JobField::Length, &self.length).map(|_| ())
    }

    pub fn set_width(&mut self, value: impl Into<String>) -> Result<(), ValidationError> {
        self.width = value.into();
        validator::check_dimension(JobField::Width, &self.width).map(|_| ())
    }

    pub fn set_roof_type(&mut self, value: impl Into<String>) -> Result<(), ValidationError> {
        self.roof_type = value.into();
        validator::check_roof_type(&self.roof_type).map(|_| ())
    }

    pub fn set_condition(&mut self, value: impl Into<String>) -> Result<(), ValidationError> {
        self.condition = value.into();
        validator::check_condition(&self.condition).map(|_| ())
    }

    pub fn set_urgency(&mut self, value: impl Into<String>) -> Result<(), ValidationError> {
        self.urgency = value.into();
        validator::check_urgency(&self.urgency).map(|_| ())
    }

    pub fn set_location(&mut self, value: impl Into<String>) {
        self.location = value.into();
    }

    /// Store the edit and report the early check for that field
    pub fn apply(&mut self, edit: FieldEdit) -> Result<(), ValidationError> {
        match edit.field {
            JobField::Length => self.set_length(edit.value),
            JobField::Width => self.set_width(edit.value),
            JobField::RoofType => self.set_roof_type(edit.value),
            JobField::Condition => self.set_condition(edit.value),
            JobField::Urgency => self.set_urgency(edit.value),
            JobField::Location => {
                self.set_location(edit.value);
                Ok(())
            }
        }
    }
}

/// Validated, immutable job to be priced
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JobSpecification {
    length: Decimal,
    width: Decimal,
    roof_type: RoofType,
    condition: Condition,
    urgency: Urgency,
    location: String,
}

impl JobSpecification {
    /// Only the validator builds these; callers go through `validator::validate`.
    pub(crate) fn new(
        length: Decimal,
        width: Decimal,
        roof_type: RoofType,
        condition: Condition,
        urgency: Urgency,
        location: String,
    ) -> Self {
        Self {
            length,
            width,
            roof_type,
            condition,
            urgency,
            location,
        }
    }

    pub fn length(&self) -> Decimal {
        self.length
    }

    pub fn width(&self) -> Decimal {
        self.width
    }

    pub fn roof_type(&self) -> RoofType {
        self.roof_type
    }

    pub fn condition(&self) -> Condition {
        self.condition
    }

    pub fn urgency(&self) -> Urgency {
        self.urgency
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}
