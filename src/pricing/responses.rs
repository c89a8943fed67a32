//! Response DTOs for pricing API endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::distance::DistanceResult;
use super::models::Vehicle;
use super::services::{DisposalQuote, TransferQuote};
use super::zones::GeographicZone;

/// Per-vehicle price decomposition shown to the customer
#[derive(Debug, Clone, Serialize)]
pub struct PriceBreakdown {
    #[serde(with = "rust_decimal::serde::str")]
    pub base_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_per_km: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub distance_km: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
}

/// A vehicle with its computed price for the searched trip
#[derive(Debug, Clone, Serialize)]
pub struct RankedVehicle {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    #[serde(with = "rust_decimal::serde::str")]
    pub calculated_price: Decimal,
    pub price_breakdown: PriceBreakdown,
}

/// Zones resolved from the searched addresses
#[derive(Debug, Clone, Serialize)]
pub struct ZoneResolution {
    pub origin: Option<GeographicZone>,
    pub destination: Option<GeographicZone>,
}

/// Echo of the search parameters
#[derive(Debug, Clone, Serialize)]
pub struct SearchCriteria {
    pub origin: String,
    pub destination: String,
    pub passengers: i32,
}

/// Response for the ranked vehicle search
#[derive(Debug, Serialize)]
pub struct AutoTransferResponse {
    pub distance: DistanceResult,
    pub vehicles: Vec<RankedVehicle>,
    pub zones: ZoneResolution,
    pub search_criteria: SearchCriteria,
}

/// Response for a season-scoped transfer quote
#[derive(Debug, Serialize)]
pub struct TransferCostResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub base_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_per_km: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub distance_km: Decimal,
    pub season: String,
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
}

impl From<TransferQuote> for TransferCostResponse {
    fn from(quote: TransferQuote) -> Self {
        Self {
            total: quote.total,
            base_price: quote.base_price,
            price_per_km: quote.price_per_km,
            distance_km: quote.distance_km,
            season: quote.season,
            valid_from: quote.valid_from,
            valid_to: quote.valid_to,
        }
    }
}

/// Response for a season-scoped disposal quote
#[derive(Debug, Serialize)]
pub struct DisposalCostResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_per_hour: Decimal,
    pub hours: i32,
    pub minimum_hours: i32,
    pub season: String,
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
}

impl From<DisposalQuote> for DisposalCostResponse {
    fn from(quote: DisposalQuote) -> Self {
        Self {
            total: quote.total,
            price_per_hour: quote.price_per_hour,
            hours: quote.hours,
            minimum_hours: quote.minimum_hours,
            season: quote.season,
            valid_from: quote.valid_from,
            valid_to: quote.valid_to,
        }
    }
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error: String,
}
