//! Cost estimate domain types
//!
//! All amounts stay exact until `CostEstimate::summary`, which is the only
//! place anything gets rounded.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};

/// Unit of a bill-of-materials line
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    SquareMetre,
    LinearMetre,
    Lot,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::SquareMetre => "m²",
            Unit::LinearMetre => "ml",
            Unit::Lot => "lot",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Expected lead time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeline {
    OneToTwoWeeks,
    TwoToThreeDays,
}

impl Timeline {
    pub fn label(&self) -> &'static str {
        match self {
            Timeline::OneToTwoWeeks => "1-2 weeks",
            Timeline::TwoToThreeDays => "2-3 days",
        }
    }
}

impl std::fmt::Display for Timeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for Timeline {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Bill-of-materials line
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LineItem {
    pub name: String,
    pub quantity: Decimal,
    pub unit: Unit,
    pub unit_price: Decimal,
}

impl LineItem {
    pub fn line_total(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

/// Complete pricing result for one job
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CostEstimate {
    pub surface_area: Decimal,
    pub material_cost: Decimal,
    pub labor_cost: Decimal,
    pub additional_costs: Decimal,
    pub total_cost: Decimal,
    pub timeline: Timeline,
    pub bill_of_materials: Vec<LineItem>,
}

impl CostEstimate {
    pub fn timeline_label(&self) -> &'static str {
        self.timeline.label()
    }

    /// Whole-currency figures for display
    pub fn summary(&self) -> QuoteSummary {
        QuoteSummary {
            surface_area: self.surface_area.normalize(),
            timeline: self.timeline,
            material_cost: round_currency(self.material_cost),
            labor_cost: round_currency(self.labor_cost),
            additional_costs: round_currency(self.additional_costs),
            total_cost: round_currency(self.total_cost),
            lines: self
                .bill_of_materials
                .iter()
                .map(|item| QuoteLine {
                    name: item.name.clone(),
                    quantity: item.quantity,
                    unit: item.unit,
                    unit_price: item.unit_price.normalize(),
                    total: round_currency(item.line_total()),
                })
                .collect(),
        }
    }
}

/// Rounded view of a `CostEstimate`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct QuoteSummary {
    pub surface_area: Decimal,
    pub timeline: Timeline,
    pub material_cost: Decimal,
    pub labor_cost: Decimal,
    pub additional_costs: Decimal,
    pub total_cost: Decimal,
    pub lines: Vec<QuoteLine>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct QuoteLine {
    pub name: String,
    pub quantity: Decimal,
    pub unit: Unit,
    pub unit_price: Decimal,
    pub total: Decimal,
}

/// Round to whole currency units, halves away from zero
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
