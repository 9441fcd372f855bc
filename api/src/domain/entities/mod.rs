//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod account;
pub mod shipment;

pub use account::{Account, AccountId};
pub use shipment::{
    NewShipment, Shipment, ShipmentDraft, ShipmentId, ShipmentPatch, ShipmentStatus,
    ShipmentSummary,
};
