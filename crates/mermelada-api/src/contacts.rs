//! Handlers for `/contacts` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/contacts` | Ordered by name |
//! | `POST` | `/contacts` | Body: [`NewContact`]; returns 201 + `{id}` |
//! | `GET`  | `/contacts/:id` | 404 if not found |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use mermelada_core::{
  contact::{Contact, NewContact},
  mailer::ReminderMailer,
  store::CrmStore,
};
use serde_json::json;

use crate::{AppState, error::ApiError};

/// `GET /contacts`
pub async fn list<S, M>(
  State(state): State<AppState<S, M>>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: CrmStore,
  M: ReminderMailer,
{
  let contacts = state
    .store
    .list_contacts()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(contacts))
}

/// `POST /contacts` — body: `{"name": "...", "email": ..., ...}`
pub async fn create<S, M>(
  State(state): State<AppState<S, M>>,
  Json(body): Json<NewContact>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CrmStore,
  M: ReminderMailer,
{
  body
    .validate()
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

  let contact = state
    .store
    .add_contact(body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(json!({ "id": contact.id }))))
}

/// `GET /contacts/:id`
pub async fn get_one<S, M>(
  State(state): State<AppState<S, M>>,
  Path(id): Path<i64>,
) -> Result<Json<Contact>, ApiError>
where
  S: CrmStore,
  M: ReminderMailer,
{
  let contact = state
    .store
    .get_contact(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("contact {id} not found")))?;
  Ok(Json(contact))
}

/// Resolve a contact id or fail with a 404. Shared by the interest and
/// follow-up creation handlers so an unknown id is a clean `NotFound` rather
/// than a backend-specific constraint error.
pub(crate) async fn resolve_contact<S, M>(
  state: &AppState<S, M>,
  contact_id: i64,
) -> Result<(), ApiError>
where
  S: CrmStore,
  M: ReminderMailer,
{
  state
    .store
    .get_contact(contact_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("contact {contact_id} not found")))?;
  Ok(())
}
