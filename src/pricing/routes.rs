//! Pricing route handlers

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use rust_decimal::Decimal;

use crate::error::{AppError, Result};
use crate::AppState;

use super::requests::{AutoTransferQuery, DisposalQuoteQuery, TransferQuoteQuery};
use super::responses::{AutoTransferResponse, DisposalCostResponse, TransferCostResponse};
use super::services;

/// Build the pricing API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/pricing/auto-transfer", get(auto_transfer))
        .route("/api/pricing/transfer", get(transfer_quote))
        .route("/api/pricing/disposal", get(disposal_quote))
}

/// Ranked vehicle search with automatic distance calculation
async fn auto_transfer(
    State(state): State<AppState>,
    Query(query): Query<AutoTransferQuery>,
) -> Result<Json<AutoTransferResponse>> {
    if query.origin.trim().is_empty() || query.destination.trim().is_empty() {
        return Err(AppError::BadRequest(
            "origin and destination are required".to_string(),
        ));
    }

    let passengers = query.passengers.unwrap_or(0);
    let response =
        services::auto_transfer_quote(&state, &query.origin, &query.destination, passengers)
            .await?;

    Ok(Json(response))
}

/// Season-scoped transfer quote for one vehicle
async fn transfer_quote(
    State(state): State<AppState>,
    Query(query): Query<TransferQuoteQuery>,
) -> Result<Json<TransferCostResponse>> {
    if query.distance <= Decimal::ZERO {
        return Err(AppError::BadRequest("Invalid distance value".to_string()));
    }

    let quote = services::transfer_cost(
        &state.db,
        &state.cache,
        query.vehicle_id,
        query.distance,
        query.date,
    )
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(Json(quote.into()))
}

/// Season-scoped disposal quote for one vehicle
async fn disposal_quote(
    State(state): State<AppState>,
    Query(query): Query<DisposalQuoteQuery>,
) -> Result<Json<DisposalCostResponse>> {
    if query.hours <= 0 {
        return Err(AppError::BadRequest("Invalid hours value".to_string()));
    }

    let quote = services::disposal_cost(
        &state.db,
        &state.cache,
        query.vehicle_id,
        query.hours,
        query.date,
    )
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(Json(quote.into()))
}
