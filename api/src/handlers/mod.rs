//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod envelope;
pub mod shipments;

pub use envelope::Envelope;
pub use shipments::{
    create_shipment, delete_shipment, get_account_shipment, get_shipment,
    list_account_shipments, list_shipments, list_shipments_by_status, update_shipment,
};
