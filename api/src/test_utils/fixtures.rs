//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use chrono::Utc;

use crate::domain::entities::{
    Account, AccountId, Shipment, ShipmentDraft, ShipmentId, ShipmentStatus,
};

/// Token accepted by `StaticTokenValidator::accepting(VALID_TOKEN)`
pub const VALID_TOKEN: &str = "test-token";

/// Create a test shipment with default values
pub fn test_shipment(id: i64) -> Shipment {
    Shipment {
        id: ShipmentId(id),
        weight: 2.5,
        box_colour: Some("brown".to_string()),
        receiver: format!("Receiver {}", id),
        source_country: "Sweden".to_string(),
        destination_country: "Norway".to_string(),
        shipment_status: ShipmentStatus::Created,
        account_id: None,
        created_at: Utc::now(),
    }
}

/// Create a test shipment in a specific status
pub fn test_shipment_with_status(id: i64, status: ShipmentStatus) -> Shipment {
    Shipment {
        shipment_status: status,
        ..test_shipment(id)
    }
}

/// A complete creation request
pub fn test_draft() -> ShipmentDraft {
    ShipmentDraft {
        weight: Some(1.75),
        box_colour: Some("blue".to_string()),
        receiver: Some("Ada Lovelace".to_string()),
        source_country: Some("United Kingdom".to_string()),
        destination_country: Some("Italy".to_string()),
        shipment_status: None,
        account_id: None,
    }
}

/// Create an account owning the given shipment IDs
pub fn test_account(id: i64, shipment_ids: &[i64]) -> Account {
    Account {
        id: AccountId(id),
        shipment_ids: shipment_ids.iter().copied().map(ShipmentId).collect(),
    }
}
