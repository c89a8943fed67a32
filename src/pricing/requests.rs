//! Request DTOs for pricing API endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

/// Query for the ranked vehicle search
#[derive(Debug, Deserialize)]
pub struct AutoTransferQuery {
    pub origin: String,
    pub destination: String,
    #[serde(default)]
    pub passengers: Option<i32>,
}

/// Query for a season-scoped transfer quote
#[derive(Debug, Deserialize)]
pub struct TransferQuoteQuery {
    pub vehicle_id: Uuid,
    pub distance: Decimal,
    pub date: NaiveDate,
}

/// Query for a season-scoped disposal quote
#[derive(Debug, Deserialize)]
pub struct DisposalQuoteQuery {
    pub vehicle_id: Uuid,
    pub hours: i32,
    pub date: NaiveDate,
}
