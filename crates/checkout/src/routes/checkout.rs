//! Checkout route handlers.
//!
//! The provisional shipping form itself is rendered by the host checkout;
//! these handlers feed it (method listing plus nonce) and consume its
//! submission.

use axum::{Form, Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use deferred_shipping_core::{Money, OrderId};

use crate::error::{AppError, Result};
use crate::services::{SelectionInput, provisional};
use crate::state::AppState;

/// One selectable method in the listing.
#[derive(Debug, Serialize)]
pub struct MethodView {
    pub id: String,
    pub title: String,
    pub cost: Money,
    pub zone_name: String,
}

/// Response for the shipping-methods listing.
#[derive(Debug, Serialize)]
pub struct ShippingMethodsResponse {
    pub methods: Vec<MethodView>,
    /// Single-use token for the final-cost endpoint.
    pub nonce: String,
}

/// List every configured shipping method for provisional selection.
///
/// The listing spans all zones because the shopper has not committed a
/// destination address yet; costs shown are base costs only.
#[instrument(skip(state))]
pub async fn shipping_methods(State(state): State<AppState>) -> Json<ShippingMethodsResponse> {
    let methods = state
        .catalog()
        .all_methods()
        .into_iter()
        .flat_map(|group| {
            let zone_name = group.zone_label.to_string();
            group
                .methods
                .into_iter()
                .map(move |method| MethodView {
                    id: method.id.clone(),
                    title: method.title.clone(),
                    cost: method.base_cost(),
                    zone_name: zone_name.clone(),
                })
                .collect::<Vec<_>>()
        })
        .collect();

    let nonce = state.nonces().issue().await;

    Json(ShippingMethodsResponse { methods, nonce })
}

/// Checkout submission form fields.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    pub order_id: i64,
    #[serde(default)]
    pub provisional_shipping_method: Option<String>,
    #[serde(default)]
    pub provisional_shipping_cost: Option<String>,
    /// Checkbox: presence means accepted.
    #[serde(default)]
    pub shipping_terms_accepted: Option<String>,
}

/// Checkout submission outcome.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    /// Whether a provisional selection was recorded on the order.
    pub recorded: bool,
}

/// Handle a checkout submission.
///
/// For orders without deposit lines this is a no-op. For deferred orders
/// the provisional fields are validated (blocking the checkout on
/// failure, with nothing written) and then persisted to order metadata
/// with an audit note.
#[instrument(skip(state, form), fields(order_id = form.order_id))]
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<CheckoutForm>,
) -> Result<Json<CheckoutResponse>> {
    let order_id = OrderId::new(form.order_id);
    let order = state.orders().get_required(order_id).await?;

    if !order.has_deferred_items() {
        return Ok(Json(CheckoutResponse { recorded: false }));
    }

    let input = SelectionInput {
        method: form.provisional_shipping_method,
        cost: form.provisional_shipping_cost,
        terms_accepted: form.shipping_terms_accepted.is_some(),
    };

    let selection = provisional::validate(&input).map_err(AppError::Validation)?;
    provisional::record(state.orders(), order_id, &selection).await?;

    Ok(Json(CheckoutResponse { recorded: true }))
}
