//! Handlers for `/follow-ups` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/follow-ups` | Body: [`NewFollowUp`]; 404 if the contact is unknown |
//! | `POST` | `/follow-ups/:id/resend` | Re-dispatch the reminder on demand |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use mermelada_core::{
  follow_up::NewFollowUp,
  mailer::{Reminder, ReminderMailer},
  store::CrmStore,
};
use serde_json::json;

use crate::{AppState, contacts::resolve_contact, error::ApiError};

/// `POST /follow-ups` — body: `{"contactId": 1, "dueDate": "2024-01-15", ...}`
pub async fn create<S, M>(
  State(state): State<AppState<S, M>>,
  Json(body): Json<NewFollowUp>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CrmStore,
  M: ReminderMailer,
{
  resolve_contact(&state, body.contact_id).await?;

  let follow_up = state
    .store
    .add_follow_up(body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(json!({ "id": follow_up.id }))))
}

/// `POST /follow-ups/:id/resend`
///
/// Purely an on-demand re-trigger of the same message the daily sweep would
/// send: resolve, dispatch once, persist nothing either way. A transport
/// failure surfaces to the caller as 502; it never touches the registry.
pub async fn resend<S, M>(
  State(state): State<AppState<S, M>>,
  Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CrmStore,
  M: ReminderMailer,
{
  let due = state
    .store
    .get_follow_up_with_contact(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("follow-up {id} not found")))?;

  state
    .mailer
    .send_reminder(&Reminder::from(&due))
    .await
    .map_err(|e| {
      tracing::warn!(follow_up = id, error = %e, "manual resend failed");
      ApiError::Delivery(e.to_string())
    })?;

  Ok((
    StatusCode::OK,
    Json(json!({ "message": "Follow-up email resent successfully" })),
  ))
}
