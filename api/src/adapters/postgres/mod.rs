//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM. Production runs on
//! PostgreSQL; the tests drive the same code against in-memory SQLite.

pub mod account_repo;
pub mod shipment_repo;


pub use account_repo::PostgresAccountLookup;
pub use shipment_repo::PostgresShipmentRepository;
