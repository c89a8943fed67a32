//! Pricing and vehicle-matching engine.
//!
//! Computes transfer and disposal quotes over externally owned vehicle,
//! provider and rate data: season resolution, driving-distance lookup,
//! geographic zone classification, price calculation, and the zone
//! relevance ranking of search results.

pub mod calculators;
pub mod distance;
pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod seasons;
pub mod services;
pub mod zones;

// Re-export commonly used items
pub use calculators::round_money;
pub use routes::router;
pub use zones::{classify_zone, GeographicZone};
