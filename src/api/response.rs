//! Standard output document types

use serde::Serialize;

use crate::domain::{CostEstimate, Photo, QuoteSummary, RawJobInput};
use crate::wizard::{Wizard, WizardStep};

/// Response for single data item
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Everything the quote screen shows
#[derive(Debug, Serialize)]
pub struct QuoteDocument<'a> {
    pub step: WizardStep,
    pub job: &'a RawJobInput,
    pub photos: &'a [Photo],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<&'a CostEstimate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<QuoteSummary>,
}

impl<'a> QuoteDocument<'a> {
    pub fn from_wizard(wizard: &'a Wizard) -> Self {
        let estimate = wizard.estimate();
        Self {
            step: wizard.step(),
            job: wizard.draft(),
            photos: wizard.photos(),
            estimate,
            summary: estimate.map(CostEstimate::summary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{create_wizard, AppState};
    use crate::config::Settings;

    #[test]
    fn test_document_before_estimate() {
        let state = AppState::new(Settings::default());
        let mut wizard = create_wizard(&state);
        wizard.attach_photo("roof.jpg", vec![0xff, 0xd8]).unwrap();

        let json = serde_json::to_value(DataResponse::new(QuoteDocument::from_wizard(&wizard)))
            .unwrap();
        assert_eq!(json["data"]["step"], "collecting_photos");
        assert_eq!(json["data"]["job"]["roof_type"], "tuile");
        assert_eq!(json["data"]["photos"][0]["name"], "roof.jpg");
        // photo bytes never leave the process
        assert!(json["data"]["photos"][0].get("data").is_none());
        assert!(json["data"].get("estimate").is_none());
    }
}
