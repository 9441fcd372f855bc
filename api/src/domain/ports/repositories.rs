//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use crate::domain::entities::{
    Account, AccountId, NewShipment, Shipment, ShipmentId, ShipmentStatus,
};
use crate::error::DomainError;

/// Repository for Shipment entities
///
/// List operations return rows in store order; no sort is guaranteed.
#[async_trait]
pub trait ShipmentRepository: Send + Sync {
    /// Find a shipment by ID
    async fn find_by_id(&self, id: &ShipmentId) -> Result<Option<Shipment>, DomainError>;

    /// Every stored shipment
    async fn find_all(&self) -> Result<Vec<Shipment>, DomainError>;

    /// Shipments matching any of the given IDs; unknown IDs are skipped
    async fn find_by_ids(&self, ids: &[ShipmentId]) -> Result<Vec<Shipment>, DomainError>;

    /// Shipments currently in the given status
    async fn find_by_status(&self, status: ShipmentStatus) -> Result<Vec<Shipment>, DomainError>;

    /// Insert a new shipment; the store assigns the ID
    ///
    /// Constraint violations surface as `DomainError::Validation`.
    async fn create(&self, shipment: &NewShipment) -> Result<Shipment, DomainError>;

    /// Overwrite every mutable field of an existing shipment in one write
    ///
    /// Returns `DomainError::NotFound` when the row no longer exists.
    async fn save(&self, shipment: &Shipment) -> Result<Shipment, DomainError>;

    /// Delete a shipment, returning whether a row was removed
    async fn delete(&self, id: &ShipmentId) -> Result<bool, DomainError>;
}

/// Read access to the account store
#[async_trait]
pub trait AccountLookup: Send + Sync {
    /// Resolve an account and the IDs of the shipments it owns
    async fn find_account(&self, id: &AccountId) -> Result<Option<Account>, DomainError>;
}
