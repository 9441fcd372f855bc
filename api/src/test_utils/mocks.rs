//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    Account, AccountId, NewShipment, Shipment, ShipmentId, ShipmentStatus,
};
use crate::domain::ports::{AccountLookup, ShipmentRepository, TokenCheck, TokenValidator};
use crate::error::DomainError;

// ============================================================================
// In-Memory Shipment Repository
// ============================================================================

#[derive(Clone)]
pub struct InMemoryShipmentRepository {
    shipments: Arc<RwLock<BTreeMap<ShipmentId, Shipment>>>,
    next_id: Arc<AtomicI64>,
    fail_all: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    save_calls: Arc<AtomicUsize>,
}

impl Default for InMemoryShipmentRepository {
    fn default() -> Self {
        Self {
            shipments: Arc::default(),
            next_id: Arc::new(AtomicI64::new(1)),
            fail_all: Arc::default(),
            fail_writes: Arc::default(),
            save_calls: Arc::default(),
        }
    }
}

impl InMemoryShipmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose every call fails with a database error
    pub fn failing() -> Self {
        let repo = Self::default();
        repo.fail_all.store(true, Ordering::SeqCst);
        repo
    }

    /// Pre-populate with a shipment for testing
    pub fn with_shipment(self, shipment: Shipment) -> Self {
        self.next_id.fetch_max(shipment.id.0 + 1, Ordering::SeqCst);
        self.shipments
            .write()
            .unwrap()
            .insert(shipment.id, shipment);
        self
    }

    /// Make create, save and delete fail while reads keep working
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn is_empty(&self) -> bool {
        self.shipments.read().unwrap().is_empty()
    }

    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    fn check_read(&self) -> Result<(), DomainError> {
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(DomainError::Database("Mock failure".to_string()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), DomainError> {
        self.check_read()?;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Database("Mock write failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ShipmentRepository for InMemoryShipmentRepository {
    async fn find_by_id(&self, id: &ShipmentId) -> Result<Option<Shipment>, DomainError> {
        self.check_read()?;
        Ok(self.shipments.read().unwrap().get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Shipment>, DomainError> {
        self.check_read()?;
        Ok(self.shipments.read().unwrap().values().cloned().collect())
    }

    async fn find_by_ids(&self, ids: &[ShipmentId]) -> Result<Vec<Shipment>, DomainError> {
        self.check_read()?;
        let shipments = self.shipments.read().unwrap();
        Ok(ids.iter().filter_map(|id| shipments.get(id).cloned()).collect())
    }

    async fn find_by_status(&self, status: ShipmentStatus) -> Result<Vec<Shipment>, DomainError> {
        self.check_read()?;
        Ok(self
            .shipments
            .read()
            .unwrap()
            .values()
            .filter(|s| s.shipment_status == status)
            .cloned()
            .collect())
    }

    async fn create(&self, shipment: &NewShipment) -> Result<Shipment, DomainError> {
        self.check_write()?;
        let id = ShipmentId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let created = Shipment {
            id,
            weight: shipment.weight,
            box_colour: shipment.box_colour.clone(),
            receiver: shipment.receiver.clone(),
            source_country: shipment.source_country.clone(),
            destination_country: shipment.destination_country.clone(),
            shipment_status: shipment.shipment_status,
            account_id: shipment.account_id,
            created_at: Utc::now(),
        };
        self.shipments.write().unwrap().insert(id, created.clone());
        Ok(created)
    }

    async fn save(&self, shipment: &Shipment) -> Result<Shipment, DomainError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        self.check_write()?;
        let mut shipments = self.shipments.write().unwrap();
        match shipments.get_mut(&shipment.id) {
            Some(stored) => {
                *stored = shipment.clone();
                Ok(shipment.clone())
            }
            None => Err(DomainError::NotFound(format!(
                "Shipment with id: {} was not found.",
                shipment.id
            ))),
        }
    }

    async fn delete(&self, id: &ShipmentId) -> Result<bool, DomainError> {
        self.check_write()?;
        Ok(self.shipments.write().unwrap().remove(id).is_some())
    }
}

// ============================================================================
// In-Memory Account Lookup
// ============================================================================

#[derive(Clone, Default)]
pub struct InMemoryAccountLookup {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
}

impl InMemoryAccountLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with an account for testing
    pub fn with_account(self, account: Account) -> Self {
        self.accounts
            .write()
            .unwrap()
            .insert(account.id, account);
        self
    }
}

#[async_trait]
impl AccountLookup for InMemoryAccountLookup {
    async fn find_account(&self, id: &AccountId) -> Result<Option<Account>, DomainError> {
        Ok(self.accounts.read().unwrap().get(id).cloned())
    }
}

// ============================================================================
// Static Token Validator
// ============================================================================

/// Accepts a fixed token and rejects everything else
pub struct StaticTokenValidator {
    accepted: Option<String>,
}

impl StaticTokenValidator {
    pub const REJECTION: &'static str = "Token is not recognised";

    pub fn accepting(token: &str) -> Self {
        Self {
            accepted: Some(token.to_string()),
        }
    }

    /// A validator that cannot be reached
    pub fn unavailable() -> Self {
        Self { accepted: None }
    }
}

#[async_trait]
impl TokenValidator for StaticTokenValidator {
    async fn validate(&self, token: &str) -> Result<TokenCheck, DomainError> {
        match &self.accepted {
            None => Err(DomainError::Internal(
                "Identity service unavailable".to_string(),
            )),
            Some(accepted) if accepted == token => Ok(TokenCheck::Valid),
            Some(_) => Ok(TokenCheck::Invalid(Self::REJECTION.to_string())),
        }
    }
}
