//! In-memory caching using moka
//!
//! Quote computation re-reads the same reference data on every search:
//! the provider list, per-vehicle seasonal rate lists, and driving
//! distances between popular address pairs. All of it changes rarely,
//! so short TTLs keep quotes fresh while absorbing the read load.

use moka::future::Cache;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};
use uuid::Uuid;

use crate::pricing::distance::DistanceResult;
use crate::pricing::models::{HourlyRate, Provider, SeasonalRate};
use crate::pricing::queries;

/// Cache key for the singleton provider list
pub const PROVIDERS_KEY: &str = "all";

/// Application cache holding pricing reference data
#[derive(Clone)]
pub struct AppCache {
    /// Provider list (singleton under PROVIDERS_KEY)
    pub providers: Cache<String, Arc<Vec<Provider>>>,
    /// Seasonal per-km rates (vehicle id -> rates)
    pub seasonal_rates: Cache<Uuid, Arc<Vec<SeasonalRate>>>,
    /// Seasonal hourly rates (vehicle id -> rates)
    pub hourly_rates: Cache<Uuid, Arc<Vec<HourlyRate>>>,
    /// Distance lookups (origin|destination -> result)
    pub distances: Cache<String, Arc<DistanceResult>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Providers: a single list, 10 min TTL
            providers: Cache::builder()
                .max_capacity(1)
                .time_to_live(Duration::from_secs(10 * 60))
                .build(),

            // Rate lists: 1000 vehicles, 15 min TTL, 5 min idle
            seasonal_rates: Cache::builder()
                .max_capacity(1000)
                .time_to_live(Duration::from_secs(15 * 60))
                .time_to_idle(Duration::from_secs(5 * 60))
                .build(),

            hourly_rates: Cache::builder()
                .max_capacity(1000)
                .time_to_live(Duration::from_secs(15 * 60))
                .time_to_idle(Duration::from_secs(5 * 60))
                .build(),

            // Distances: road distances between fixed addresses are
            // stable, 1 hour TTL
            distances: Cache::builder()
                .max_capacity(2000)
                .time_to_live(Duration::from_secs(60 * 60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            providers_cached: self.providers.entry_count() > 0,
            seasonal_rates_size: self.seasonal_rates.entry_count(),
            hourly_rates_size: self.hourly_rates.entry_count(),
            distances_size: self.distances.entry_count(),
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.providers.invalidate_all();
        self.seasonal_rates.invalidate_all();
        self.hourly_rates.invalidate_all();
        self.distances.invalidate_all();
        info!("All caches invalidated");
    }

    /// Invalidate the cached rates for one vehicle
    pub async fn invalidate_vehicle(&self, vehicle_id: Uuid) {
        self.seasonal_rates.invalidate(&vehicle_id).await;
        self.hourly_rates.invalidate(&vehicle_id).await;
        info!("Rate caches invalidated for vehicle: {}", vehicle_id);
    }

    /// Generate cache key for a distance lookup
    pub fn distance_key(origin: &str, destination: &str) -> String {
        format!(
            "{}|{}",
            origin.trim().to_lowercase(),
            destination.trim().to_lowercase()
        )
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub providers_cached: bool,
    pub seasonal_rates_size: u64,
    pub hourly_rates_size: u64,
    pub distances_size: u64,
}

/// Start background cache warmer
///
/// Warms the provider list on startup and refreshes every 10 minutes.
pub async fn start_cache_warmer(cache: AppCache, db: PgPool) {
    warm_cache(&cache, &db).await;

    let mut interval = interval(Duration::from_secs(10 * 60));
    loop {
        interval.tick().await;
        warm_cache(&cache, &db).await;
    }
}

/// Warm the cache with commonly accessed data
async fn warm_cache(cache: &AppCache, db: &PgPool) {
    info!("Starting cache warm-up...");

    match queries::get_all_providers(db).await {
        Ok(providers) => {
            cache
                .providers
                .insert(PROVIDERS_KEY.to_string(), Arc::new(providers))
                .await;
        }
        Err(e) => warn!("Failed to warm provider cache: {}", e),
    }

    info!("Cache warm-up complete. Stats: {:?}", cache.stats());
}
