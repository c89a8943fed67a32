//! Database queries for the pricing engine.
//!
//! All reads, no writes: the engine computes quotes over externally
//! owned vehicle, provider and rate records.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;

use super::models::{HourlyRate, Provider, SeasonalRate, Vehicle};

/// Get all vehicles, cheapest base fare first
pub async fn get_all_vehicles(pool: &PgPool) -> Result<Vec<Vehicle>, AppError> {
    let vehicles = sqlx::query_as::<_, Vehicle>(
        r#"
        SELECT
            id, provider_id, name, type AS vehicle_type,
            capacity, luggage, base_price, price_per_km, is_available
        FROM vehicles
        ORDER BY base_price ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(vehicles)
}

/// Get all providers, including inactive ones.
///
/// Zone filtering needs every provider's declared zones: a provider
/// missing from the lookup map would be scored as unrestricted.
pub async fn get_all_providers(pool: &PgPool) -> Result<Vec<Provider>, AppError> {
    let providers = sqlx::query_as::<_, Provider>(
        r#"
        SELECT id, name, service_zones, is_active
        FROM providers
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(providers)
}

/// Get a vehicle's seasonal per-km rates, season start first.
///
/// The resolver takes the first active match, so the ordering here is
/// the overlap tie-break.
pub async fn get_vehicle_seasonal_prices(
    pool: &PgPool,
    vehicle_id: Uuid,
) -> Result<Vec<SeasonalRate>, AppError> {
    let rates = sqlx::query_as::<_, SeasonalRate>(
        r#"
        SELECT id, vehicle_id, season_name, start_date, end_date, base_price, price_per_km
        FROM vehicle_seasonal_prices
        WHERE vehicle_id = $1
        ORDER BY start_date ASC
        "#,
    )
    .bind(vehicle_id)
    .fetch_all(pool)
    .await?;

    Ok(rates)
}

/// Get a vehicle's seasonal hourly rates, season start first
pub async fn get_vehicle_hourly_prices(
    pool: &PgPool,
    vehicle_id: Uuid,
) -> Result<Vec<HourlyRate>, AppError> {
    let rates = sqlx::query_as::<_, HourlyRate>(
        r#"
        SELECT id, vehicle_id, season_name, start_date, end_date, price_per_hour, minimum_hours
        FROM vehicle_hourly_prices
        WHERE vehicle_id = $1
        ORDER BY start_date ASC
        "#,
    )
    .bind(vehicle_id)
    .fetch_all(pool)
    .await?;

    Ok(rates)
}
