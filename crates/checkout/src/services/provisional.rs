//! Provisional shipping selection.
//!
//! At checkout the shopper picks a shipping method and sees an estimated
//! cost; the pair is stored on the order as metadata, pending the final
//! calculation once the deposit or payment plan completes.

use thiserror::Error;

use deferred_shipping_core::{Money, OrderId};

use crate::models::{Order, meta_keys};
use crate::store::{OrderRepository, RepositoryError};

/// Blocking, user-facing checkout validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a provisional shipping method.")]
    MethodRequired,
    #[error("You must accept the provisional shipping terms to continue.")]
    TermsRequired,
}

/// Raw provisional shipping fields from the checkout form.
#[derive(Debug, Clone, Default)]
pub struct SelectionInput {
    pub method: Option<String>,
    pub cost: Option<String>,
    /// Checkbox semantics: present means accepted.
    pub terms_accepted: bool,
}

/// A validated provisional shipping selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionalSelection {
    pub method_id: String,
    pub cost: Money,
    pub terms_accepted: bool,
}

/// Validate the submitted fields for a deferred cart.
///
/// Both checks run so the shopper sees every problem at once. On any
/// error nothing is persisted.
///
/// # Errors
///
/// Returns every failed check: a missing/empty method id, a missing terms
/// acceptance, or both.
pub fn validate(input: &SelectionInput) -> Result<ProvisionalSelection, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let method_id = match input.method.as_deref() {
        Some(method) if !method.is_empty() => Some(method.to_string()),
        _ => {
            errors.push(ValidationError::MethodRequired);
            None
        }
    };

    if !input.terms_accepted {
        errors.push(ValidationError::TermsRequired);
    }

    match (method_id, errors.is_empty()) {
        (Some(method_id), true) => Ok(ProvisionalSelection {
            method_id,
            cost: input
                .cost
                .as_deref()
                .map_or(Money::ZERO, Money::parse_lossy),
            terms_accepted: input.terms_accepted,
        }),
        _ => Err(errors),
    }
}

/// Persist a validated selection onto the order and append an audit note.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` for unknown orders.
pub async fn record(
    repo: &OrderRepository,
    order_id: OrderId,
    selection: &ProvisionalSelection,
) -> Result<Order, RepositoryError> {
    let order = repo
        .update(order_id, |order| {
            order.update_meta(meta_keys::PROVISIONAL_METHOD, &selection.method_id);
            order.update_meta(meta_keys::PROVISIONAL_COST, selection.cost.to_string());
            order.update_meta(
                meta_keys::TERMS_ACCEPTED,
                if selection.terms_accepted { "yes" } else { "no" },
            );
            order.add_note(format!(
                "Provisional shipping selected: {} (estimated cost: {}). \
                 Full shipping cost will be calculated and charged upon \
                 completion of deposit or payment plan.",
                selection.method_id,
                selection.cost.formatted()
            ));
        })
        .await?;

    tracing::info!(
        order_id = %order_id,
        method = %selection.method_id,
        cost = %selection.cost,
        "Recorded provisional shipping selection"
    );

    Ok(order)
}

/// Read a previously stored selection back from order metadata.
#[must_use]
pub fn read(order: &Order) -> Option<ProvisionalSelection> {
    let method_id = order.meta(meta_keys::PROVISIONAL_METHOD)?.to_string();
    let cost = order
        .meta(meta_keys::PROVISIONAL_COST)
        .map_or(Money::ZERO, Money::parse_lossy);
    let terms_accepted = order.meta(meta_keys::TERMS_ACCEPTED) == Some("yes");

    Some(ProvisionalSelection {
        method_id,
        cost,
        terms_accepted,
    })
}
