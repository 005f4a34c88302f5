//! Shipping API route handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use deferred_shipping_core::{Money, OrderId};

use crate::error::{AppError, Result};
use crate::models::is_deposit_complete;
use crate::shipping::calculate_final_shipping_cost;
use crate::state::AppState;

/// Request body for the final-cost endpoint.
#[derive(Debug, Deserialize)]
pub struct FinalCostRequest {
    pub order_id: i64,
    /// Single-use token issued by the shipping-methods listing.
    pub nonce: String,
}

/// Successful final-cost payload.
#[derive(Debug, Serialize)]
pub struct FinalCostResponse {
    pub cost: Money,
    pub formatted_cost: String,
}

/// Calculate the final shipping cost for an order.
///
/// POST /api/shipping/final-cost
///
/// Recomputes candidates and cost from the order contents and the current
/// zone configuration; the stored provisional selection is not consulted.
/// Stateless apart from nonce consumption, so safe to call repeatedly
/// with fresh nonces.
///
/// # Errors
///
/// Returns `AppError::InvalidNonce` when the nonce is unknown, expired or
/// already used, and `AppError::Repository` when the order id does not
/// resolve.
#[instrument(skip(state, request), fields(order_id = request.order_id))]
pub async fn final_cost(
    State(state): State<AppState>,
    Json(request): Json<FinalCostRequest>,
) -> Result<Json<FinalCostResponse>> {
    if !state.nonces().consume(&request.nonce).await {
        return Err(AppError::InvalidNonce);
    }

    let order_id = OrderId::new(request.order_id);
    let order = state.orders().get_required(order_id).await?;

    let children = state.orders().children_of(order_id).await;
    if order.has_deferred_items() && !is_deposit_complete(&order, &children) {
        tracing::warn!(
            order_id = %order_id,
            "Final shipping cost requested before deposit completion"
        );
    }

    let cost = calculate_final_shipping_cost(&order, state.catalog(), state.products());

    Ok(Json(FinalCostResponse {
        cost,
        formatted_cost: cost.formatted(),
    }))
}
