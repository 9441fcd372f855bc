//! PostgreSQL adapter for ShipmentRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    Set, SqlErr,
};

use crate::domain::entities::{
    AccountId, NewShipment, Shipment, ShipmentId, ShipmentStatus,
};
use crate::domain::ports::ShipmentRepository;
use crate::entity::shipments;
use crate::error::DomainError;

/// PostgreSQL implementation of ShipmentRepository
pub struct PostgresShipmentRepository {
    db: DatabaseConnection,
}

impl PostgresShipmentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Constraint violations are the caller's fault; everything else is the store's
fn insert_error(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg))
        | Some(SqlErr::ForeignKeyConstraintViolation(msg)) => DomainError::Validation(format!(
            "Some required field might be missing or invalid: {}",
            msg
        )),
        _ => DomainError::Database(e.to_string()),
    }
}

fn into_shipments(models: Vec<shipments::Model>) -> Result<Vec<Shipment>, DomainError> {
    models.into_iter().map(Shipment::try_from).collect()
}

#[async_trait]
impl ShipmentRepository for PostgresShipmentRepository {
    async fn find_by_id(&self, id: &ShipmentId) -> Result<Option<Shipment>, DomainError> {
        let result = shipments::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result.map(Shipment::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Shipment>, DomainError> {
        let results = shipments::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        into_shipments(results)
    }

    async fn find_by_ids(&self, ids: &[ShipmentId]) -> Result<Vec<Shipment>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = shipments::Entity::find()
            .filter(shipments::Column::Id.is_in(ids.iter().map(|id| id.0)))
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        into_shipments(results)
    }

    async fn find_by_status(&self, status: ShipmentStatus) -> Result<Vec<Shipment>, DomainError> {
        let results = shipments::Entity::find()
            .filter(shipments::Column::ShipmentStatus.eq(status.code()))
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        into_shipments(results)
    }

    async fn create(&self, shipment: &NewShipment) -> Result<Shipment, DomainError> {
        let now = Utc::now().fixed_offset();

        let model = shipments::ActiveModel {
            id: NotSet,
            weight: Set(shipment.weight),
            box_colour: Set(shipment.box_colour.clone()),
            receiver: Set(shipment.receiver.clone()),
            source_country: Set(shipment.source_country.clone()),
            destination_country: Set(shipment.destination_country.clone()),
            shipment_status: Set(shipment.shipment_status.code()),
            account_id: Set(shipment.account_id.map(|a| a.0)),
            created_at: Set(now),
        };

        let result = model.insert(&self.db).await.map_err(insert_error)?;

        result.try_into()
    }

    async fn save(&self, shipment: &Shipment) -> Result<Shipment, DomainError> {
        // Single UPDATE statement: either every field lands or none does.
        let result = shipments::ActiveModel {
            id: Set(shipment.id.0),
            weight: Set(shipment.weight),
            box_colour: Set(shipment.box_colour.clone()),
            receiver: Set(shipment.receiver.clone()),
            source_country: Set(shipment.source_country.clone()),
            destination_country: Set(shipment.destination_country.clone()),
            shipment_status: Set(shipment.shipment_status.code()),
            ..Default::default()
        }
        .update(&self.db)
        .await;

        match result {
            Ok(model) => model.try_into(),
            Err(DbErr::RecordNotUpdated) => Err(DomainError::NotFound(format!(
                "Shipment with id: {} was not found.",
                shipment.id
            ))),
            Err(e) => Err(DomainError::Database(e.to_string())),
        }
    }

    async fn delete(&self, id: &ShipmentId) -> Result<bool, DomainError> {
        let result = shipments::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}

/// Convert SeaORM model to domain entity
///
/// A status code outside the table means the row was written by something
/// else; it is reported instead of guessed.
impl TryFrom<shipments::Model> for Shipment {
    type Error = DomainError;

    fn try_from(model: shipments::Model) -> Result<Self, Self::Error> {
        let shipment_status = ShipmentStatus::from_code(model.shipment_status.into())
            .ok_or_else(|| {
                DomainError::Internal(format!(
                    "Shipment {} has unknown status code {}",
                    model.id, model.shipment_status
                ))
            })?;

        Ok(Shipment {
            id: ShipmentId(model.id),
            weight: model.weight,
            box_colour: model.box_colour,
            receiver: model.receiver,
            source_country: model.source_country,
            destination_country: model.destination_country,
            shipment_status,
            account_id: model.account_id.map(AccountId),
            created_at: model.created_at.with_timezone(&Utc),
        })
    }
}
