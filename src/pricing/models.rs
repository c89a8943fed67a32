//! Database models for the pricing engine.
//!
//! These models use sqlx's FromRow derive for direct database deserialization.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Vehicle from the vehicles table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vehicle {
    pub id: Uuid,
    pub provider_id: Option<Uuid>,
    pub name: String,
    pub vehicle_type: String,
    pub capacity: i32,
    pub luggage: i32,
    #[serde(with = "rust_decimal::serde::str")]
    pub base_price: Decimal,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub price_per_km: Option<Decimal>,
    pub is_available: bool,
}

impl Vehicle {
    /// Check if the vehicle can take the requested passenger count.
    ///
    /// A passenger count of zero means "not specified" and never filters.
    pub fn fits_passengers(&self, passengers: i32) -> bool {
        passengers <= 0 || self.capacity >= passengers
    }
}

/// Provider (transport company/agency) from the providers table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Provider {
    pub id: Uuid,
    pub name: String,
    /// Zones served by this provider. `None`/empty means "serves everywhere".
    pub service_zones: Option<Vec<String>>,
    pub is_active: bool,
}

/// Seasonal per-km rate from vehicle_seasonal_prices.
///
/// `start_date`/`end_date` are recurring "MM-DD" windows, not calendar
/// dates; a window whose end sorts before its start wraps year-end.
#[derive(Debug, Clone, FromRow)]
pub struct SeasonalRate {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub season_name: String,
    pub start_date: String,
    pub end_date: String,
    pub base_price: Decimal,
    pub price_per_km: Decimal,
}

/// Seasonal hourly rate from vehicle_hourly_prices
#[derive(Debug, Clone, FromRow)]
pub struct HourlyRate {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub season_name: String,
    pub start_date: String,
    pub end_date: String,
    pub price_per_hour: Decimal,
    pub minimum_hours: i32,
}

/// Common view over the two seasonal rate kinds, consumed by the
/// season resolver.
pub trait SeasonRange {
    fn season_name(&self) -> &str;
    fn start_date(&self) -> &str;
    fn end_date(&self) -> &str;
}

impl SeasonRange for SeasonalRate {
    fn season_name(&self) -> &str {
        &self.season_name
    }

    fn start_date(&self) -> &str {
        &self.start_date
    }

    fn end_date(&self) -> &str {
        &self.end_date
    }
}

impl SeasonRange for HourlyRate {
    fn season_name(&self) -> &str {
        &self.season_name
    }

    fn start_date(&self) -> &str {
        &self.start_date
    }

    fn end_date(&self) -> &str {
        &self.end_date
    }
}
