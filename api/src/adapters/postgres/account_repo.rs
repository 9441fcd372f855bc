//! PostgreSQL adapter for AccountLookup

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect};

use crate::domain::entities::{Account, AccountId, ShipmentId};
use crate::domain::ports::AccountLookup;
use crate::entity::{accounts, shipments};
use crate::error::DomainError;

/// PostgreSQL implementation of AccountLookup
pub struct PostgresAccountLookup {
    db: DatabaseConnection,
}

impl PostgresAccountLookup {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountLookup for PostgresAccountLookup {
    async fn find_account(&self, id: &AccountId) -> Result<Option<Account>, DomainError> {
        let Some(account) = accounts::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
        else {
            return Ok(None);
        };

        let shipment_ids: Vec<i64> = shipments::Entity::find()
            .select_only()
            .column(shipments::Column::Id)
            .filter(shipments::Column::AccountId.eq(account.id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(Some(Account {
            id: AccountId(account.id),
            shipment_ids: shipment_ids.into_iter().map(ShipmentId).collect(),
        }))
    }
}
