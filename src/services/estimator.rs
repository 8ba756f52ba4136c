//! Roof cost estimation engine.
//!
//! Pure and total: a validated `JobSpecification` always prices. The order of
//! operations matters. The 15% contingency is taken on the material cost alone,
//! and the urgency multiplier scales the sum of all three components.

use rust_decimal::Decimal;
use tracing::instrument;

use crate::domain::{CostEstimate, JobSpecification, LineItem, Timeline, Unit, Urgency};

/// Labor cost per m²
pub const LABOR_RATE: Decimal = Decimal::from_parts(35, 0, 0, false, 0);
/// Contingency on material cost (15%)
pub const CONTINGENCY_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);
/// Covering and underlay ordered with 10% waste
pub const WASTE_FACTOR: Decimal = Decimal::from_parts(11, 0, 0, false, 1);
/// Linear metres of batten per m² of roof
pub const BATTENS_PER_SQUARE_METRE: Decimal = Decimal::from_parts(3, 0, 0, false, 0);
pub const BATTEN_PRICE: Decimal = Decimal::from_parts(45, 0, 0, false, 1);
pub const UNDERLAY_PRICE: Decimal = Decimal::from_parts(32, 0, 0, false, 1);
/// Flat price for the lot of nails and fixings
pub const FIXINGS_LOT_PRICE: Decimal = Decimal::from_parts(150, 0, 0, false, 0);

/// Price a validated job.
#[instrument(skip_all, fields(roof_type = %spec.roof_type(), condition = %spec.condition(), urgency = %spec.urgency()))]
pub fn estimate(spec: &JobSpecification) -> CostEstimate {
    let surface_area = spec.length() * spec.width();
    let base_price = spec.roof_type().unit_price();

    let material_cost = surface_area * base_price * spec.condition().multiplier();
    let labor_cost = surface_area * LABOR_RATE;
    let additional_costs = material_cost * CONTINGENCY_RATE;
    let total_cost =
        (material_cost + labor_cost + additional_costs) * spec.urgency().multiplier();

    let timeline = match spec.urgency() {
        Urgency::Urgent => Timeline::TwoToThreeDays,
        Urgency::Normal => Timeline::OneToTwoWeeks,
    };

    let estimate = CostEstimate {
        surface_area,
        material_cost,
        labor_cost,
        additional_costs,
        total_cost,
        timeline,
        bill_of_materials: bill_of_materials(spec, surface_area),
    };

    tracing::debug!(
        surface_area = %estimate.surface_area,
        total_cost = %estimate.total_cost,
        "Estimate computed"
    );

    estimate
}

fn bill_of_materials(spec: &JobSpecification, surface_area: Decimal) -> Vec<LineItem> {
    let covered_area = (surface_area * WASTE_FACTOR).ceil();

    vec![
        LineItem {
            name: spec.roof_type().material().name.to_string(),
            quantity: covered_area,
            unit: Unit::SquareMetre,
            unit_price: spec.roof_type().unit_price(),
        },
        LineItem {
            name: "Battens".to_string(),
            quantity: (surface_area * BATTENS_PER_SQUARE_METRE).ceil(),
            unit: Unit::LinearMetre,
            unit_price: BATTEN_PRICE,
        },
        LineItem {
            name: "Underlay membrane".to_string(),
            quantity: covered_area,
            unit: Unit::SquareMetre,
            unit_price: UNDERLAY_PRICE,
        },
        LineItem {
            name: "Nails and fixings".to_string(),
            quantity: Decimal::ONE,
            unit: Unit::Lot,
            unit_price: FIXINGS_LOT_PRICE,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Condition, RawJobInput, RoofType};
    use crate::services::validator::validate;

    fn spec(length: &str, width: &str, roof_type: &str, condition: &str, urgency: &str) -> JobSpecification {
        validate(&RawJobInput {
            length: length.to_string(),
            width: width.to_string(),
            roof_type: roof_type.to_string(),
            condition: condition.to_string(),
            urgency: urgency.to_string(),
            location: "Paris".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_tuile_good_normal_scenario() {
        let estimate = estimate(&spec("12", "8", "tuile", "good", "normal"));

        assert_eq!(estimate.surface_area, Decimal::from(96));
        assert_eq!(estimate.material_cost, Decimal::from(4320));
        assert_eq!(estimate.labor_cost, Decimal::from(3360));
        assert_eq!(estimate.additional_costs, Decimal::from(648));
        assert_eq!(estimate.total_cost, Decimal::from(8328));
        assert_eq!(estimate.timeline_label(), "1-2 weeks");

        let covering = &estimate.bill_of_materials[0];
        assert_eq!(covering.name, "Clay tile");
        assert_eq!(covering.quantity, Decimal::from(106));
        assert_eq!(covering.unit, Unit::SquareMetre);
        assert_eq!(covering.unit_price, Decimal::from(45));
    }

    #[test]
    fn test_tuile_poor_urgent_scenario() {
        let estimate = estimate(&spec("12", "8", "tuile", "poor", "urgent"));

        assert_eq!(estimate.material_cost, Decimal::from(5616));
        assert_eq!(estimate.labor_cost, Decimal::from(3360));
        assert_eq!(estimate.additional_costs, Decimal::new(8424, 1));
        assert_eq!(estimate.total_cost, Decimal::new(1178208, 2));
        assert_eq!(estimate.timeline_label(), "2-3 days");
    }

    #[test]
    fn test_bill_of_materials() {
        let estimate = estimate(&spec("12", "8", "zinc", "fair", "normal"));
        let bom = &estimate.bill_of_materials;

        assert_eq!(bom.len(), 4);
        assert_eq!(bom[0].name, "Zinc");
        assert_eq!(bom[0].unit_price, Decimal::from(65));

        assert_eq!(bom[1].name, "Battens");
        assert_eq!(bom[1].quantity, Decimal::from(288));
        assert_eq!(bom[1].unit, Unit::LinearMetre);
        assert_eq!(bom[1].unit_price, Decimal::new(45, 1));

        assert_eq!(bom[2].name, "Underlay membrane");
        assert_eq!(bom[2].quantity, Decimal::from(106));
        assert_eq!(bom[2].unit_price, Decimal::new(32, 1));

        assert_eq!(bom[3].quantity, Decimal::ONE);
        assert_eq!(bom[3].unit, Unit::Lot);
        assert_eq!(bom[3].unit_price, Decimal::from(150));
    }

    #[test]
    fn test_quantities_round_up() {
        // 2.5 × 2.1 = 5.25 m²; ×1.1 = 5.775; ×3 = 15.75
        let estimate = estimate(&spec("2.5", "2.1", "shingle", "good", "normal"));
        assert_eq!(estimate.surface_area, Decimal::new(525, 2));
        assert_eq!(estimate.bill_of_materials[0].quantity, Decimal::from(6));
        assert_eq!(estimate.bill_of_materials[1].quantity, Decimal::from(16));
        assert_eq!(estimate.bill_of_materials[2].quantity, Decimal::from(6));
    }

    #[test]
    fn test_surface_area_is_length_times_width() {
        for (length, width) in [("1", "1"), ("3.5", "4"), ("0.25", "10"), ("100", "7.3")] {
            let s = spec(length, width, "tuile", "good", "normal");
            assert_eq!(estimate(&s).surface_area, s.length() * s.width());
        }
    }

    #[test]
    fn test_covering_price_matches_catalog() {
        for roof_type in RoofType::ALL {
            let estimate = estimate(&spec("10", "6", roof_type.key(), "good", "normal"));
            assert_eq!(
                estimate.bill_of_materials[0].unit_price,
                roof_type.material().unit_price
            );
            assert_eq!(estimate.bill_of_materials[0].name, roof_type.material().name);
        }
    }

    #[test]
    fn test_condition_monotonicity() {
        for roof_type in RoofType::ALL {
            let estimates: Vec<CostEstimate> = Condition::ALL
                .iter()
                .map(|c| estimate(&spec("9.5", "7", roof_type.key(), c.key(), "normal")))
                .collect();

            for pair in estimates.windows(2) {
                assert!(pair[1].material_cost > pair[0].material_cost);
                assert!(pair[1].total_cost > pair[0].total_cost);
                assert_eq!(pair[1].labor_cost, pair[0].labor_cost);
            }
        }
    }

    #[test]
    fn test_urgency_scales_total_by_one_point_two() {
        for condition in Condition::ALL {
            let normal = estimate(&spec("11.3", "6.7", "ardoise", condition.key(), "normal"));
            let urgent = estimate(&spec("11.3", "6.7", "ardoise", condition.key(), "urgent"));

            assert_eq!(urgent.total_cost, normal.total_cost * Decimal::new(12, 1));
            assert_eq!(urgent.material_cost, normal.material_cost);
            assert_eq!(urgent.additional_costs, normal.additional_costs);
            assert_eq!(urgent.bill_of_materials, normal.bill_of_materials);
        }
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let s = spec("12.75", "8.4", "ardoise", "fair", "urgent");
        assert_eq!(estimate(&s), estimate(&s));
    }
}
