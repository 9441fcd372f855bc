//! Shipment service
//!
//! Owns the shipment lifecycle: creation, lookup, partial updates, deletion
//! and the status and account queries. Mutations require a bearer token that
//! the configured `TokenValidator` accepts; reads are open.

use std::sync::Arc;

use crate::domain::entities::{
    AccountId, Shipment, ShipmentDraft, ShipmentId, ShipmentPatch, ShipmentStatus,
    ShipmentSummary,
};
use crate::domain::ports::{AccountLookup, ShipmentRepository, TokenCheck, TokenValidator};
use crate::error::{AppError, DomainError};

/// Service for managing shipments
pub struct ShipmentService<SR, AL, TV>
where
    SR: ShipmentRepository + ?Sized,
    AL: AccountLookup + ?Sized,
    TV: TokenValidator + ?Sized,
{
    shipments: Arc<SR>,
    accounts: Arc<AL>,
    tokens: Arc<TV>,
}

/// Resolve a 1-based status code
pub fn resolve_status(code: i64) -> Result<ShipmentStatus, AppError> {
    ShipmentStatus::from_code(code).ok_or_else(|| AppError::InvalidStatusCode(code.to_string()))
}

fn account_not_found(id: &AccountId) -> AppError {
    AppError::NotFound(format!("The specific account {} could not be found.", id))
}

impl<SR, AL, TV> ShipmentService<SR, AL, TV>
where
    SR: ShipmentRepository + ?Sized,
    AL: AccountLookup + ?Sized,
    TV: TokenValidator + ?Sized,
{
    pub fn new(shipments: Arc<SR>, accounts: Arc<AL>, tokens: Arc<TV>) -> Self {
        Self {
            shipments,
            accounts,
            tokens,
        }
    }

    /// Reject the call unless the token is present and accepted
    async fn authorize(&self, token: Option<&str>) -> Result<(), AppError> {
        let Some(token) = token else {
            return Err(AppError::Unauthorized {
                diagnostic: "Missing bearer token".to_string(),
            });
        };

        match self.tokens.validate(token).await? {
            TokenCheck::Valid => Ok(()),
            TokenCheck::Invalid(diagnostic) => {
                tracing::warn!(reason = %diagnostic, "Rejected bearer token");
                Err(AppError::Unauthorized { diagnostic })
            }
        }
    }

    /// Create a shipment; the store assigns its ID
    pub async fn create(
        &self,
        draft: ShipmentDraft,
        token: Option<&str>,
    ) -> Result<Shipment, AppError> {
        self.authorize(token).await?;

        let new_shipment = draft.validate().map_err(|e| match e {
            DomainError::Validation(msg) => AppError::Validation(msg),
            e => AppError::Domain(e),
        })?;

        let shipment = self
            .shipments
            .create(&new_shipment)
            .await
            .map_err(|e| match e {
                DomainError::Validation(msg) => AppError::Validation(msg),
                e => AppError::Creation(e.to_string()),
            })?;

        tracing::info!(shipment_id = %shipment.id, "Shipment created");
        Ok(shipment)
    }

    /// Get a shipment by ID
    pub async fn get(&self, id: &ShipmentId) -> Result<Shipment, AppError> {
        self.shipments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Shipment with id: {} was not found.", id)))
    }

    /// Apply a partial update and persist the merged shipment
    ///
    /// The merge is computed on a copy; the store is written once, so a failed
    /// save leaves the stored record as it was.
    pub async fn update(
        &self,
        id: &ShipmentId,
        patch: ShipmentPatch,
        token: Option<&str>,
    ) -> Result<Shipment, AppError> {
        self.authorize(token).await?;

        patch.validate().map_err(|e| match e {
            DomainError::Validation(msg) => AppError::Validation(msg),
            e => AppError::Domain(e),
        })?;

        let existing = self.get(id).await?;
        let merged = existing.merged(&patch);

        let saved = self.shipments.save(&merged).await.map_err(|e| match e {
            DomainError::NotFound(msg) => AppError::NotFound(msg),
            e => AppError::Update(e.to_string()),
        })?;

        tracing::info!(shipment_id = %id, "Shipment updated");
        Ok(saved)
    }

    /// Delete a shipment
    ///
    /// Returns the deleted shipment, or `None` when there was nothing to
    /// delete. Deleting an absent ID is not an error.
    pub async fn delete(
        &self,
        id: &ShipmentId,
        token: Option<&str>,
    ) -> Result<Option<Shipment>, AppError> {
        self.authorize(token).await?;

        let existing = self
            .shipments
            .find_by_id(id)
            .await
            .map_err(|e| AppError::Deletion(e.to_string()))?;

        let Some(existing) = existing else {
            tracing::debug!(shipment_id = %id, "Delete requested for absent shipment");
            return Ok(None);
        };

        let removed = self
            .shipments
            .delete(id)
            .await
            .map_err(|e| AppError::Deletion(e.to_string()))?;

        if removed {
            tracing::info!(shipment_id = %id, "Shipment deleted");
            Ok(Some(existing))
        } else {
            // Removed concurrently between the lookup and the delete
            Ok(None)
        }
    }

    /// Every shipment, in store order
    pub async fn list_all(&self) -> Result<Vec<Shipment>, AppError> {
        Ok(self.shipments.find_all().await?)
    }

    /// Shipments owned by an account, optionally narrowed to one status code
    pub async fn list_by_account(
        &self,
        account_id: &AccountId,
        status_code: Option<i64>,
    ) -> Result<Vec<Shipment>, AppError> {
        let status = status_code.map(resolve_status).transpose()?;

        let account = self
            .accounts
            .find_account(account_id)
            .await?
            .ok_or_else(|| account_not_found(account_id))?;

        let shipments = self.shipments.find_by_ids(&account.shipment_ids).await?;

        Ok(match status {
            Some(status) => shipments
                .into_iter()
                .filter(|s| s.shipment_status == status)
                .collect(),
            None => shipments,
        })
    }

    /// Shipments in the status addressed by a 1-based code
    pub async fn list_by_status(
        &self,
        status_code: i64,
    ) -> Result<(ShipmentStatus, Vec<Shipment>), AppError> {
        let status = resolve_status(status_code)?;
        let shipments = self.shipments.find_by_status(status).await?;
        Ok((status, shipments))
    }

    /// Customer view of one shipment
    ///
    /// The account is checked before the shipment so a missing account is
    /// reported regardless of the shipment ID.
    pub async fn get_for_account(
        &self,
        account_id: &AccountId,
        shipment_id: &ShipmentId,
    ) -> Result<ShipmentSummary, AppError> {
        if self.accounts.find_account(account_id).await?.is_none() {
            return Err(account_not_found(account_id));
        }

        let shipment = self.shipments.find_by_id(shipment_id).await?.ok_or_else(|| {
            AppError::NotFound(format!(
                "The specific shipment {} could not be found.",
                shipment_id
            ))
        })?;

        Ok(shipment.summary())
    }
}
