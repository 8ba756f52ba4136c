//! Job specification validator.
//!
//! Trust boundary between the form and the estimation engine. The wizard only
//! checks that the dimension fields are non-empty; everything else happens here.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::domain::{Condition, JobField, JobSpecification, RawJobInput, RoofType, Urgency};
use crate::error::{DimensionIssue, ValidationError};
use crate::services::estimator::{CONTINGENCY_RATE, LABOR_RATE};

/// Validate a raw job draft.
///
/// Fields are checked in form order and the first failure is returned.
pub fn validate(raw: &RawJobInput) -> Result<JobSpecification, ValidationError> {
    let result = build_specification(raw);

    if let Err(e) = &result {
        tracing::debug!(error = %e, field = %e.field(), "Job input rejected");
    }

    result
}

fn build_specification(raw: &RawJobInput) -> Result<JobSpecification, ValidationError> {
    let length = check_dimension(JobField::Length, &raw.length)?;
    let width = check_dimension(JobField::Width, &raw.width)?;
    check_surface(length, width)?;
    let roof_type = check_roof_type(&raw.roof_type)?;
    let condition = check_condition(&raw.condition)?;
    let urgency = check_urgency(&raw.urgency)?;

    Ok(JobSpecification::new(
        length,
        width,
        roof_type,
        condition,
        urgency,
        raw.location.trim().to_string(),
    ))
}

/// Parse a length or width: finite and strictly positive.
pub fn check_dimension(field: JobField, raw: &str) -> Result<Decimal, ValidationError> {
    let invalid = |issue| ValidationError::InvalidDimension { field, issue };

    let raw = raw.trim();
    if raw.is_empty() {
        return Err(invalid(DimensionIssue::Missing));
    }

    let value: f64 = raw.parse().map_err(|_| invalid(DimensionIssue::NotANumber))?;
    if !value.is_finite() {
        return Err(invalid(DimensionIssue::NotFinite));
    }
    if value <= 0.0 {
        return Err(invalid(DimensionIssue::NotPositive));
    }

    // Keep the decimal digits the user typed rather than the f64 approximation.
    // The number is valid at this point, so a failed conversion means it is
    // outside what a Decimal can hold.
    let exact = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| {
            if value < 1.0 {
                invalid(DimensionIssue::TooSmall)
            } else {
                invalid(DimensionIssue::TooLarge)
            }
        })?;

    // Underflow to zero in the decimal conversion
    if exact <= Decimal::ZERO {
        return Err(invalid(DimensionIssue::TooSmall));
    }

    Ok(exact)
}

/// Reject dimensions whose most expensive possible quote would not fit a
/// `Decimal`, so the engine never overflows.
pub fn check_surface(length: Decimal, width: Decimal) -> Result<Decimal, ValidationError> {
    let too_large = ValidationError::InvalidDimension {
        field: JobField::Width,
        issue: DimensionIssue::TooLarge,
    };

    let max_unit_price = RoofType::ALL
        .iter()
        .map(RoofType::unit_price)
        .max()
        .unwrap_or(Decimal::ZERO);

    // (material × (1 + contingency) + labor) × urgency, per m²
    let worst_rate_per_square_metre = (max_unit_price
        * Condition::Poor.multiplier()
        * (Decimal::ONE + CONTINGENCY_RATE)
        + LABOR_RATE)
        * Urgency::Urgent.multiplier();

    let surface_area = length.checked_mul(width).ok_or_else(|| too_large.clone())?;
    surface_area
        .checked_mul(worst_rate_per_square_metre)
        .ok_or(too_large)?;

    Ok(surface_area)
}

pub fn check_roof_type(raw: &str) -> Result<RoofType, ValidationError> {
    RoofType::from_key(raw).ok_or_else(|| ValidationError::InvalidEnum {
        field: JobField::RoofType,
        value: raw.to_string(),
    })
}

pub fn check_condition(raw: &str) -> Result<Condition, ValidationError> {
    Condition::from_key(raw).ok_or_else(|| ValidationError::InvalidEnum {
        field: JobField::Condition,
        value: raw.to_string(),
    })
}

pub fn check_urgency(raw: &str) -> Result<Urgency, ValidationError> {
    Urgency::from_key(raw).ok_or_else(|| ValidationError::InvalidEnum {
        field: JobField::Urgency,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(length: &str, width: &str) -> RawJobInput {
        RawJobInput {
            length: length.to_string(),
            width: width.to_string(),
            ..RawJobInput::default()
        }
    }

    fn dimension_issue(input: &RawJobInput) -> (JobField, DimensionIssue) {
        match validate(input) {
            Err(ValidationError::InvalidDimension { field, issue }) => (field, issue),
            other => panic!("expected InvalidDimension, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_input() {
        let mut input = raw("12", "8");
        input.roof_type = "ardoise".to_string();
        input.condition = "fair".to_string();
        input.urgency = "urgent".to_string();
        input.location = "  Lyon ".to_string();

        let spec = validate(&input).unwrap();
        assert_eq!(spec.length(), Decimal::from(12));
        assert_eq!(spec.width(), Decimal::from(8));
        assert_eq!(spec.roof_type(), RoofType::Ardoise);
        assert_eq!(spec.condition(), Condition::Fair);
        assert_eq!(spec.urgency(), Urgency::Urgent);
        assert_eq!(spec.location(), "Lyon");
    }

    #[test]
    fn test_rejects_non_numeric_length() {
        assert_eq!(
            dimension_issue(&raw("abc", "5")),
            (JobField::Length, DimensionIssue::NotANumber)
        );
    }

    #[test]
    fn test_rejects_zero_length() {
        assert_eq!(
            dimension_issue(&raw("0", "5")),
            (JobField::Length, DimensionIssue::NotPositive)
        );
    }

    #[test]
    fn test_rejects_bad_width() {
        assert_eq!(
            dimension_issue(&raw("5", "")),
            (JobField::Width, DimensionIssue::Missing)
        );
        assert_eq!(
            dimension_issue(&raw("5", "-2.5")),
            (JobField::Width, DimensionIssue::NotPositive)
        );
        assert_eq!(
            dimension_issue(&raw("5", "inf")),
            (JobField::Width, DimensionIssue::NotFinite)
        );
        assert_eq!(
            dimension_issue(&raw("5", "NaN")),
            (JobField::Width, DimensionIssue::NotFinite)
        );
        assert_eq!(
            dimension_issue(&raw("5", "12m")),
            (JobField::Width, DimensionIssue::NotANumber)
        );
    }

    #[test]
    fn test_length_checked_before_width() {
        assert_eq!(dimension_issue(&raw("", "")).0, JobField::Length);
    }

    #[test]
    fn test_decimal_and_scientific_dimensions() {
        assert_eq!(
            check_dimension(JobField::Length, " 12.5 ").unwrap(),
            Decimal::new(125, 1)
        );
        assert_eq!(
            check_dimension(JobField::Length, "1.2e1").unwrap(),
            Decimal::from(12)
        );
        assert_eq!(
            check_dimension(JobField::Length, "0.1").unwrap(),
            Decimal::new(1, 1)
        );
    }

    #[test]
    fn test_rejects_dimensions_outside_decimal_range() {
        assert_eq!(
            check_dimension(JobField::Length, "1e-30"),
            Err(ValidationError::InvalidDimension {
                field: JobField::Length,
                issue: DimensionIssue::TooSmall,
            })
        );
        assert_eq!(
            check_dimension(JobField::Width, "1e30"),
            Err(ValidationError::InvalidDimension {
                field: JobField::Width,
                issue: DimensionIssue::TooLarge,
            })
        );
    }

    #[test]
    fn test_rejects_surface_that_would_overflow_the_quote() {
        assert_eq!(
            dimension_issue(&raw("1e15", "1e15")),
            (JobField::Width, DimensionIssue::TooLarge)
        );
    }

    #[test]
    fn test_largest_accepted_surface_still_prices() {
        let mut input = raw("1e13", "1e13");
        input.roof_type = "ardoise".to_string();
        input.condition = "poor".to_string();
        input.urgency = "urgent".to_string();

        let spec = validate(&input).unwrap();
        let estimate = crate::services::estimator::estimate(&spec);
        assert!(estimate.total_cost > estimate.material_cost);
    }

    #[test]
    fn test_rejects_unknown_enums() {
        let mut input = raw("12", "8");
        input.roof_type = "thatch".to_string();
        assert_eq!(
            validate(&input),
            Err(ValidationError::InvalidEnum {
                field: JobField::RoofType,
                value: "thatch".to_string(),
            })
        );

        let mut input = raw("12", "8");
        input.condition = "terrible".to_string();
        assert_eq!(validate(&input).unwrap_err().field(), JobField::Condition);

        let mut input = raw("12", "8");
        input.urgency = "".to_string();
        assert_eq!(validate(&input).unwrap_err().field(), JobField::Urgency);
    }
}
