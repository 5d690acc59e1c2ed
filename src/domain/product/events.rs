use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Product Domain Events
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCreatedData {
    pub id: String,
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCreatedEvent {
    pub occurred_at: DateTime<Utc>,
    pub data: ProductCreatedData,
}

impl ProductCreatedEvent {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            occurred_at: Utc::now(),
            data: ProductCreatedData {
                id: id.into(),
                name: name.into(),
                price,
            },
        }
    }
}
