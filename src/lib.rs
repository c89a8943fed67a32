//! TunisTransfer pricing engine.
//!
//! Backend service computing transfer and disposal quotes for the
//! booking platform. Bookings, auth and payments live elsewhere; this
//! service only reads reference data and prices trips.

pub mod cache;
pub mod error;
pub mod pricing;

use sqlx::PgPool;

use crate::cache::AppCache;
use crate::pricing::distance::DistanceClient;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
    pub maps: DistanceClient,
}
