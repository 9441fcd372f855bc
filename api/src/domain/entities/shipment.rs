//! Shipment domain entity
//!
//! A trackable parcel with a route, a receiver and a lifecycle status.

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use super::account::AccountId;
use crate::error::DomainError;

/// Store-assigned shipment identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShipmentId(pub i64);

impl From<i64> for ShipmentId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ShipmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shipment lifecycle status
///
/// Clients address statuses by a 1-based numeric code. The code table below is
/// the wire contract: codes are contiguous and must never be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipmentStatus {
    Created,
    InvoiceSent,
    InTransit,
    Complete,
    Cancelled,
}

impl ShipmentStatus {
    /// Every status, in code order (`ALL[code - 1]`)
    pub const ALL: [ShipmentStatus; 5] = [
        ShipmentStatus::Created,
        ShipmentStatus::InvoiceSent,
        ShipmentStatus::InTransit,
        ShipmentStatus::Complete,
        ShipmentStatus::Cancelled,
    ];

    pub fn code(self) -> i32 {
        match self {
            ShipmentStatus::Created => 1,
            ShipmentStatus::InvoiceSent => 2,
            ShipmentStatus::InTransit => 3,
            ShipmentStatus::Complete => 4,
            ShipmentStatus::Cancelled => 5,
        }
    }

    /// Resolve a numeric status code, `None` when out of range
    pub fn from_code(code: i64) -> Option<Self> {
        let index = usize::try_from(code.checked_sub(1)?).ok()?;
        Self::ALL.get(index).copied()
    }
}

impl std::fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShipmentStatus::Created => write!(f, "CREATED"),
            ShipmentStatus::InvoiceSent => write!(f, "INVOICE_SENT"),
            ShipmentStatus::InTransit => write!(f, "IN_TRANSIT"),
            ShipmentStatus::Complete => write!(f, "COMPLETE"),
            ShipmentStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

impl std::str::FromStr for ShipmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CREATED" => Ok(ShipmentStatus::Created),
            "INVOICE_SENT" | "INVOICESENT" => Ok(ShipmentStatus::InvoiceSent),
            "IN_TRANSIT" | "INTRANSIT" => Ok(ShipmentStatus::InTransit),
            "COMPLETE" | "COMPLETED" => Ok(ShipmentStatus::Complete),
            "CANCELLED" | "CANCELED" => Ok(ShipmentStatus::Cancelled),
            _ => Err(format!("Unknown shipment status: {}", s)),
        }
    }
}

/// Accepts either the status name (`"IN_TRANSIT"`) or its numeric code (`3`)
impl<'de> Deserialize<'de> for ShipmentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Code(i64),
            Name(String),
        }

        match Wire::deserialize(deserializer)? {
            Wire::Code(code) => ShipmentStatus::from_code(code).ok_or_else(|| {
                de::Error::custom(format!("Unknown shipment status code: {}", code))
            }),
            Wire::Name(name) => name.parse().map_err(de::Error::custom),
        }
    }
}

/// A persisted shipment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub id: ShipmentId,
    /// Weight in kilograms, always positive
    pub weight: f64,
    pub box_colour: Option<String>,
    pub receiver: String,
    pub source_country: String,
    pub destination_country: String,
    pub shipment_status: ShipmentStatus,
    /// Owning account, if any
    pub account_id: Option<AccountId>,
    pub created_at: DateTime<Utc>,
}

impl Shipment {
    /// Build the updated shipment without touching `self`.
    ///
    /// Only fields present in the patch are taken over; everything else keeps
    /// its stored value. A zero weight counts as not supplied.
    pub fn merged(&self, patch: &ShipmentPatch) -> Shipment {
        Shipment {
            id: self.id,
            weight: patch
                .weight
                .filter(|w| *w != 0.0)
                .unwrap_or(self.weight),
            box_colour: patch
                .box_colour
                .clone()
                .or_else(|| self.box_colour.clone()),
            receiver: patch
                .receiver
                .clone()
                .unwrap_or_else(|| self.receiver.clone()),
            source_country: patch
                .source_country
                .clone()
                .unwrap_or_else(|| self.source_country.clone()),
            destination_country: patch
                .destination_country
                .clone()
                .unwrap_or_else(|| self.destination_country.clone()),
            shipment_status: patch.shipment_status.unwrap_or(self.shipment_status),
            account_id: self.account_id,
            created_at: self.created_at,
        }
    }

    /// Customer-facing projection, without the account link
    pub fn summary(&self) -> ShipmentSummary {
        ShipmentSummary {
            id: self.id,
            weight: self.weight,
            box_colour: self.box_colour.clone(),
            receiver: self.receiver.clone(),
            source_country: self.source_country.clone(),
            destination_country: self.destination_country.clone(),
            shipment_status: self.shipment_status,
        }
    }
}

/// Read-only view of a shipment returned to account holders
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentSummary {
    pub id: ShipmentId,
    pub weight: f64,
    pub box_colour: Option<String>,
    pub receiver: String,
    pub source_country: String,
    pub destination_country: String,
    pub shipment_status: ShipmentStatus,
}

/// Shipment fields as submitted by a client, before validation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentDraft {
    pub weight: Option<f64>,
    pub box_colour: Option<String>,
    pub receiver: Option<String>,
    pub source_country: Option<String>,
    pub destination_country: Option<String>,
    pub shipment_status: Option<ShipmentStatus>,
    pub account_id: Option<AccountId>,
}

impl ShipmentDraft {
    /// Check required fields and turn the draft into a storable shipment.
    ///
    /// A missing status defaults to `CREATED`.
    pub fn validate(self) -> Result<NewShipment, DomainError> {
        let mut missing = Vec::new();
        if self.weight.is_none() {
            missing.push("weight");
        }
        if is_blank(&self.receiver) {
            missing.push("receiver");
        }
        if is_blank(&self.source_country) {
            missing.push("sourceCountry");
        }
        if is_blank(&self.destination_country) {
            missing.push("destinationCountry");
        }
        if !missing.is_empty() {
            return Err(DomainError::Validation(format!(
                "Some required field might be missing: {}",
                missing.join(", ")
            )));
        }

        let weight = self.weight.unwrap_or_default();
        if !(weight.is_finite() && weight > 0.0) {
            return Err(DomainError::Validation(
                "Weight must be a positive number".to_string(),
            ));
        }

        Ok(NewShipment {
            weight,
            box_colour: self.box_colour,
            receiver: self.receiver.unwrap_or_default(),
            source_country: self.source_country.unwrap_or_default(),
            destination_country: self.destination_country.unwrap_or_default(),
            shipment_status: self.shipment_status.unwrap_or(ShipmentStatus::Created),
            account_id: self.account_id,
        })
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// Data needed to create a new shipment
#[derive(Debug, Clone, PartialEq)]
pub struct NewShipment {
    pub weight: f64,
    pub box_colour: Option<String>,
    pub receiver: String,
    pub source_country: String,
    pub destination_country: String,
    pub shipment_status: ShipmentStatus,
    pub account_id: Option<AccountId>,
}

/// Partial update: `None` means "keep the stored value"
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentPatch {
    pub weight: Option<f64>,
    pub box_colour: Option<String>,
    pub receiver: Option<String>,
    pub destination_country: Option<String>,
    pub source_country: Option<String>,
    pub shipment_status: Option<ShipmentStatus>,
}

impl ShipmentPatch {
    pub fn validate(&self) -> Result<(), DomainError> {
        match self.weight {
            Some(w) if !w.is_finite() || w < 0.0 => Err(DomainError::Validation(
                "Weight must be a positive number".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
