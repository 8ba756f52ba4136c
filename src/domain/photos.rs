use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Roof photo attached during the first wizard step.
///
/// Held for display only; nothing in the estimate depends on its content.
#[derive(Debug, Clone, Serialize)]
pub struct Photo {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing)]
    pub data: Vec<u8>,
    pub attached_at: DateTime<Utc>,
}

impl Photo {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            data,
            attached_at: Utc::now(),
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}
