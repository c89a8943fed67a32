//! Pricing service functions with database access.
//!
//! These functions tie the pure pieces together: they fetch rate and
//! provider reference data (through the cache), resolve the active
//! season, and assemble quotes. "No active season" and "no matching
//! vehicles" are normal outcomes and surface as `None`/empty, never as
//! errors.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::cache::{AppCache, PROVIDERS_KEY};
use crate::error::AppError;
use crate::AppState;

use super::calculators::{disposal_price, transfer_price};
use super::distance::DistanceResult;
use super::models::{HourlyRate, Provider, SeasonalRate, Vehicle};
use super::queries;
use super::responses::{
    AutoTransferResponse, PriceBreakdown, RankedVehicle, SearchCriteria, ZoneResolution,
};
use super::seasons::{find_active_season, season_window};
use super::zones::{classify_zone, filter_and_rank_by_zones};

/// The per-km rate in force for a vehicle on a date, with its concrete
/// validity window.
#[derive(Debug, Clone)]
pub struct ActiveTransferRate {
    pub season: String,
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
    pub base_price: Decimal,
    pub price_per_km: Decimal,
}

/// The hourly rate in force for a vehicle on a date
#[derive(Debug, Clone)]
pub struct ActiveHourlyRate {
    pub season: String,
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
    pub price_per_hour: Decimal,
    pub minimum_hours: i32,
}

/// A season-scoped transfer quote for a single vehicle
#[derive(Debug, Clone)]
pub struct TransferQuote {
    pub total: Decimal,
    pub base_price: Decimal,
    pub price_per_km: Decimal,
    pub distance_km: Decimal,
    pub season: String,
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
}

/// A season-scoped disposal quote for a single vehicle
#[derive(Debug, Clone)]
pub struct DisposalQuote {
    pub total: Decimal,
    pub price_per_hour: Decimal,
    pub hours: i32,
    pub minimum_hours: i32,
    pub season: String,
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
}

/// Resolve the seasonal per-km rate active for a vehicle on a date.
///
/// Returns `None` when the vehicle has no seasonal rates or none covers
/// the date.
pub async fn seasonal_transfer_rate(
    pool: &PgPool,
    cache: &AppCache,
    vehicle_id: Uuid,
    on: NaiveDate,
) -> Result<Option<ActiveTransferRate>, AppError> {
    let rates = cached_seasonal_rates(pool, cache, vehicle_id).await?;

    let active = match find_active_season(rates.as_slice(), on)? {
        Some(rate) => rate,
        None => return Ok(None),
    };
    let window = season_window(active, on)?;

    Ok(Some(ActiveTransferRate {
        season: active.season_name.clone(),
        valid_from: window.valid_from,
        valid_to: window.valid_to,
        base_price: active.base_price,
        price_per_km: active.price_per_km,
    }))
}

/// Resolve the seasonal hourly rate active for a vehicle on a date
pub async fn seasonal_hourly_rate(
    pool: &PgPool,
    cache: &AppCache,
    vehicle_id: Uuid,
    on: NaiveDate,
) -> Result<Option<ActiveHourlyRate>, AppError> {
    let rates = cached_hourly_rates(pool, cache, vehicle_id).await?;

    let active = match find_active_season(rates.as_slice(), on)? {
        Some(rate) => rate,
        None => return Ok(None),
    };
    let window = season_window(active, on)?;

    Ok(Some(ActiveHourlyRate {
        season: active.season_name.clone(),
        valid_from: window.valid_from,
        valid_to: window.valid_to,
        price_per_hour: active.price_per_hour,
        minimum_hours: active.minimum_hours,
    }))
}

/// Quote a transfer for one vehicle on a date.
///
/// `None` means no pricing is available for that vehicle and date - the
/// caller decides whether that is a 404 or a fallback to the vehicle's
/// non-seasonal rate.
pub async fn transfer_cost(
    pool: &PgPool,
    cache: &AppCache,
    vehicle_id: Uuid,
    distance_km: Decimal,
    on: NaiveDate,
) -> Result<Option<TransferQuote>, AppError> {
    let rate = match seasonal_transfer_rate(pool, cache, vehicle_id, on).await? {
        Some(rate) => rate,
        None => return Ok(None),
    };

    let total = transfer_price(rate.base_price, rate.price_per_km, distance_km);

    Ok(Some(TransferQuote {
        total,
        base_price: rate.base_price,
        price_per_km: rate.price_per_km,
        distance_km,
        season: rate.season,
        valid_from: rate.valid_from,
        valid_to: rate.valid_to,
    }))
}

/// Quote a disposal (hourly rental with driver) for one vehicle on a
/// date.
pub async fn disposal_cost(
    pool: &PgPool,
    cache: &AppCache,
    vehicle_id: Uuid,
    hours: i32,
    on: NaiveDate,
) -> Result<Option<DisposalQuote>, AppError> {
    let rate = match seasonal_hourly_rate(pool, cache, vehicle_id, on).await? {
        Some(rate) => rate,
        None => return Ok(None),
    };

    let total = disposal_price(rate.price_per_hour, Decimal::from(hours));

    Ok(Some(DisposalQuote {
        total,
        price_per_hour: rate.price_per_hour,
        hours,
        minimum_hours: rate.minimum_hours,
        season: rate.season,
        valid_from: rate.valid_from,
        valid_to: rate.valid_to,
    }))
}

/// Compute ranked priced vehicles for a transfer search.
///
/// The full quote flow: driving distance (degrading to the fixed
/// estimate when the provider is unreachable), zone classification of
/// both endpoints, a price per candidate vehicle, then the zone
/// relevance filter and sort.
pub async fn auto_transfer_quote(
    state: &AppState,
    origin: &str,
    destination: &str,
    passengers: i32,
) -> Result<AutoTransferResponse, AppError> {
    let distance = match cached_distance(state, origin, destination).await {
        Some(distance) => distance,
        None => {
            warn!(
                "Distance provider unavailable, using fallback estimate for {} -> {}",
                origin, destination
            );
            DistanceResult::fallback()
        }
    };

    let origin_zone = classify_zone(origin);
    let destination_zone = classify_zone(destination);
    debug!(?origin_zone, ?destination_zone, "Resolved geographic zones");

    let providers = cached_providers(&state.db, &state.cache).await?;
    let provider_zones: HashMap<Uuid, Option<Vec<String>>> = providers
        .iter()
        .map(|p| (p.id, p.service_zones.clone()))
        .collect();

    let vehicles = queries::get_all_vehicles(&state.db).await?;
    let priced: Vec<RankedVehicle> = vehicles
        .into_iter()
        .filter(|v| v.is_available && v.fits_passengers(passengers))
        .map(|v| price_vehicle(v, distance.distance_km))
        .collect();

    let ranked = filter_and_rank_by_zones(
        priced,
        &provider_zones,
        |rv| rv.vehicle.provider_id,
        |rv| rv.calculated_price,
        origin_zone,
        destination_zone,
    );

    Ok(AutoTransferResponse {
        distance,
        vehicles: ranked,
        zones: ZoneResolution {
            origin: origin_zone,
            destination: destination_zone,
        },
        search_criteria: SearchCriteria {
            origin: origin.to_string(),
            destination: destination.to_string(),
            passengers,
        },
    })
}

/// Attach a computed transfer price to a vehicle.
///
/// Vehicles without a per-km rate price at the base fare alone.
fn price_vehicle(vehicle: Vehicle, distance_km: Decimal) -> RankedVehicle {
    let base_price = vehicle.base_price;
    let price_per_km = vehicle.price_per_km.unwrap_or(Decimal::ZERO);
    let total = transfer_price(base_price, price_per_km, distance_km);

    RankedVehicle {
        vehicle,
        calculated_price: total,
        price_breakdown: PriceBreakdown {
            base_price,
            price_per_km,
            distance_km,
            total,
        },
    }
}

async fn cached_distance(
    state: &AppState,
    origin: &str,
    destination: &str,
) -> Option<DistanceResult> {
    let key = AppCache::distance_key(origin, destination);

    if let Some(hit) = state.cache.distances.get(&key).await {
        return Some((*hit).clone());
    }

    let result = state.maps.lookup(origin, destination).await?;
    state
        .cache
        .distances
        .insert(key, Arc::new(result.clone()))
        .await;

    Some(result)
}

async fn cached_providers(
    pool: &PgPool,
    cache: &AppCache,
) -> Result<Arc<Vec<Provider>>, AppError> {
    if let Some(hit) = cache.providers.get(PROVIDERS_KEY).await {
        return Ok(hit);
    }

    let providers = Arc::new(queries::get_all_providers(pool).await?);
    cache
        .providers
        .insert(PROVIDERS_KEY.to_string(), providers.clone())
        .await;

    Ok(providers)
}

async fn cached_seasonal_rates(
    pool: &PgPool,
    cache: &AppCache,
    vehicle_id: Uuid,
) -> Result<Arc<Vec<SeasonalRate>>, AppError> {
    if let Some(hit) = cache.seasonal_rates.get(&vehicle_id).await {
        return Ok(hit);
    }

    let rates = Arc::new(queries::get_vehicle_seasonal_prices(pool, vehicle_id).await?);
    cache.seasonal_rates.insert(vehicle_id, rates.clone()).await;

    Ok(rates)
}

async fn cached_hourly_rates(
    pool: &PgPool,
    cache: &AppCache,
    vehicle_id: Uuid,
) -> Result<Arc<Vec<HourlyRate>>, AppError> {
    if let Some(hit) = cache.hourly_rates.get(&vehicle_id).await {
        return Ok(hit);
    }

    let rates = Arc::new(queries::get_vehicle_hourly_prices(pool, vehicle_id).await?);
    cache.hourly_rates.insert(vehicle_id, rates.clone()).await;

    Ok(rates)
}
