//! Shipment handlers
//!
//! Endpoints for creating, reading, updating and deleting shipments.
//! Path segments arrive as strings and are parsed here, and extractor
//! rejections are taken as `Result`s, so malformed input is still answered
//! with an envelope.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::auth::BearerToken;
use crate::domain::entities::{
    AccountId, Shipment, ShipmentDraft, ShipmentId, ShipmentPatch, ShipmentSummary,
};
use crate::error::AppError;
use crate::handlers::Envelope;
use crate::AppState;

/// Query parameters for listing an account's shipments
#[derive(Debug, Deserialize)]
pub struct AccountShipmentsQuery {
    /// Numeric status code to filter by
    pub status: Option<String>,
}

fn parse_id(raw: &str, kind: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid {} id: {}", kind, raw)))
}

fn parse_status_code(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::InvalidStatusCode(raw.to_string()))
}

/// POST /shipment/create
///
/// Create a shipment. Requires a bearer token.
pub async fn create_shipment(
    State(state): State<AppState>,
    token: BearerToken,
    payload: Result<Json<ShipmentDraft>, JsonRejection>,
) -> Result<Envelope<Shipment>, AppError> {
    let Json(draft) = payload?;

    let shipment = state
        .shipment_service
        .create(draft, token.as_deref())
        .await?;

    Ok(Envelope::created("Shipment created", shipment))
}

/// GET /shipment/:id
pub async fn get_shipment(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Envelope<Shipment>, AppError> {
    let Path(id) = path?;
    let id = ShipmentId(parse_id(&id, "shipment")?);
    let shipment = state.shipment_service.get(&id).await?;

    Ok(Envelope::ok("Shipment found", shipment))
}

/// PATCH /shipment/:id
///
/// Apply a partial update. Requires a bearer token.
pub async fn update_shipment(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    token: BearerToken,
    payload: Result<Json<ShipmentPatch>, JsonRejection>,
) -> Result<Envelope<Shipment>, AppError> {
    let Path(id) = path?;
    let id = ShipmentId(parse_id(&id, "shipment")?);
    let Json(patch) = payload?;

    let shipment = state
        .shipment_service
        .update(&id, patch, token.as_deref())
        .await?;

    Ok(Envelope::created("Shipment details have been updated.", shipment))
}

/// DELETE /shipment/:id
///
/// 201 with the deleted shipment, or 200 with no data when there was nothing
/// to delete.
pub async fn delete_shipment(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    token: BearerToken,
) -> Result<Envelope<Shipment>, AppError> {
    let Path(id) = path?;
    let id = ShipmentId(parse_id(&id, "shipment")?);

    let deleted = state
        .shipment_service
        .delete(&id, token.as_deref())
        .await?;

    Ok(match deleted {
        Some(shipment) => Envelope::created("Shipment deleted", shipment),
        None => Envelope::new(
            StatusCode::OK,
            format!("Shipment with id: {} does not exist, nothing was deleted.", id),
            None,
        ),
    })
}

/// GET /shipment/all
pub async fn list_shipments(
    State(state): State<AppState>,
) -> Result<Envelope<Vec<Shipment>>, AppError> {
    let shipments = state.shipment_service.list_all().await?;

    Ok(Envelope::ok("All shipments found", shipments))
}

/// GET /shipment/all/:id
///
/// Shipments owned by an account, optionally filtered with `?status=N`.
pub async fn list_account_shipments(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<AccountShipmentsQuery>, QueryRejection>,
) -> Result<Envelope<Vec<Shipment>>, AppError> {
    let Path(account_id) = path?;
    let Query(query) = query?;
    let account_id = AccountId(parse_id(&account_id, "account")?);
    let status_code = query.status.as_deref().map(parse_status_code).transpose()?;

    let shipments = state
        .shipment_service
        .list_by_account(&account_id, status_code)
        .await?;

    Ok(Envelope::ok("All shipments found for customer", shipments))
}

/// GET /shipment/status/:code
pub async fn list_shipments_by_status(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Envelope<Vec<Shipment>>, AppError> {
    let Path(code) = path?;
    let code = parse_status_code(&code)?;
    let (status, shipments) = state.shipment_service.list_by_status(code).await?;

    Ok(Envelope::ok(
        format!("List of all shipments with status: {}", status),
        shipments,
    ))
}

/// GET /shipment/:id/:shipment_id
///
/// One shipment as seen by the owning account.
pub async fn get_account_shipment(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Envelope<ShipmentSummary>, AppError> {
    let Path((account_id, shipment_id)) = path?;
    let account_id = AccountId(parse_id(&account_id, "account")?);
    let shipment_id = ShipmentId(parse_id(&shipment_id, "shipment")?);

    let summary = state
        .shipment_service
        .get_for_account(&account_id, &shipment_id)
        .await?;

    Ok(Envelope::ok(
        format!(
            "Specific shipment {} for account {} found",
            shipment_id, account_id
        ),
        summary,
    ))
}
