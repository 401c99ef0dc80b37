//! Handlers for `/interests` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/interests` | Body: [`NewInterest`]; 404 if the contact is unknown |
//! | `GET`  | `/interests/:contact_id` | All interests recorded for the contact |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use mermelada_core::{
  contact::{NewInterest, ProductInterest},
  mailer::ReminderMailer,
  store::CrmStore,
};
use serde_json::json;

use crate::{AppState, contacts::resolve_contact, error::ApiError};

/// `POST /interests` — body: `{"contactId": 1, "productName": "...", ...}`
pub async fn create<S, M>(
  State(state): State<AppState<S, M>>,
  Json(body): Json<NewInterest>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CrmStore,
  M: ReminderMailer,
{
  resolve_contact(&state, body.contact_id).await?;

  let interest = state
    .store
    .add_interest(body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(json!({ "id": interest.id }))))
}

/// `GET /interests/:contact_id`
pub async fn list_for_contact<S, M>(
  State(state): State<AppState<S, M>>,
  Path(contact_id): Path<i64>,
) -> Result<Json<Vec<ProductInterest>>, ApiError>
where
  S: CrmStore,
  M: ReminderMailer,
{
  let interests = state
    .store
    .list_interests(contact_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(interests))
}
