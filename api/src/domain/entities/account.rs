//! Account domain entity
//!
//! Accounts are owned by the account store; this service only reads them to
//! resolve which shipments belong to a customer.

use serde::{Deserialize, Serialize};

use super::shipment::ShipmentId;

/// Account identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(pub i64);

impl From<i64> for AccountId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A customer account and the shipments it owns
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: AccountId,
    pub shipment_ids: Vec<ShipmentId>,
}
