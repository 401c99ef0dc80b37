//! Handler for the read-only `/products` catalog endpoint.

use axum::{Json, extract::State};
use mermelada_core::{contact::Product, mailer::ReminderMailer, store::CrmStore};

use crate::{AppState, error::ApiError};

/// `GET /products` — the full catalog, ordered by name.
pub async fn list<S, M>(
  State(state): State<AppState<S, M>>,
) -> Result<Json<Vec<Product>>, ApiError>
where
  S: CrmStore,
  M: ReminderMailer,
{
  let products = state
    .store
    .list_products()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(products))
}
