//! SeaORM entities
//!
//! Table models used by the database adapters. Domain code never sees these.

pub mod accounts;
pub mod shipments;
