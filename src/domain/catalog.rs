//! Roof covering catalog
//!
//! Fixed at build time. Every `RoofType` variant has exactly one entry, so a
//! lookup can never miss.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Roof covering type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RoofType {
    Tuile,
    Ardoise,
    Zinc,
    Shingle,
}

impl RoofType {
    pub const ALL: [RoofType; 4] = [
        RoofType::Tuile,
        RoofType::Ardoise,
        RoofType::Zinc,
        RoofType::Shingle,
    ];

    /// Catalog key, as sent by the form
    pub fn key(&self) -> &'static str {
        match self {
            RoofType::Tuile => "tuile",
            RoofType::Ardoise => "ardoise",
            RoofType::Zinc => "zinc",
            RoofType::Shingle => "shingle",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL.into_iter().find(|t| t.key() == key)
    }

    pub fn material(&self) -> &'static RoofMaterial {
        let index = match self {
            RoofType::Tuile => 0,
            RoofType::Ardoise => 1,
            RoofType::Zinc => 2,
            RoofType::Shingle => 3,
        };
        &CATALOG[index]
    }

    pub fn unit_price(&self) -> Decimal {
        self.material().unit_price
    }
}

impl std::fmt::Display for RoofType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for RoofType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or(())
    }
}

/// Catalog entry for a roof covering
#[derive(Debug, Clone, Serialize)]
pub struct RoofMaterial {
    pub roof_type: RoofType,
    pub name: &'static str,
    /// Trade label used on French quotes
    pub local_name: &'static str,
    /// Material price per m²
    pub unit_price: Decimal,
}

pub static CATALOG: [RoofMaterial; 4] = [
    RoofMaterial {
        roof_type: RoofType::Tuile,
        name: "Clay tile",
        local_name: "Tuile en terre cuite",
        unit_price: Decimal::from_parts(45, 0, 0, false, 0),
    },
    RoofMaterial {
        roof_type: RoofType::Ardoise,
        name: "Natural slate",
        local_name: "Ardoise naturelle",
        unit_price: Decimal::from_parts(85, 0, 0, false, 0),
    },
    RoofMaterial {
        roof_type: RoofType::Zinc,
        name: "Zinc",
        local_name: "Zinc",
        unit_price: Decimal::from_parts(65, 0, 0, false, 0),
    },
    RoofMaterial {
        roof_type: RoofType::Shingle,
        name: "Bitumen shingle",
        local_name: "Shingle bitumineux",
        unit_price: Decimal::from_parts(25, 0, 0, false, 0),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_prices() {
        assert_eq!(RoofType::Tuile.unit_price(), Decimal::from(45));
        assert_eq!(RoofType::Ardoise.unit_price(), Decimal::from(85));
        assert_eq!(RoofType::Zinc.unit_price(), Decimal::from(65));
        assert_eq!(RoofType::Shingle.unit_price(), Decimal::from(25));
    }

    #[test]
    fn test_catalog_entries_match_their_type() {
        for roof_type in RoofType::ALL {
            assert_eq!(roof_type.material().roof_type, roof_type);
        }
    }

    #[test]
    fn test_from_key() {
        assert_eq!(RoofType::from_key("tuile"), Some(RoofType::Tuile));
        assert_eq!(RoofType::from_key(" zinc "), Some(RoofType::Zinc));
        assert_eq!("ardoise".parse::<RoofType>(), Ok(RoofType::Ardoise));
        assert_eq!(RoofType::from_key("Tuile"), None);
        assert_eq!(RoofType::from_key("thatch"), None);
        assert_eq!(RoofType::from_key(""), None);
    }
}
