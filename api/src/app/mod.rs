//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and external systems.

pub mod shipment_service;

pub use shipment_service::ShipmentService;
