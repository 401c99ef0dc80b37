//! JSON REST API for the Mermelada CRM.
//!
//! Exposes an axum [`Router`] backed by any [`CrmStore`] and
//! [`ReminderMailer`] pair. TLS and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", mermelada_api::api_router(state.clone()))
//! ```

pub mod contacts;
pub mod error;
pub mod follow_ups;
pub mod interests;
pub mod products;
pub mod trigger;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use mermelada_core::{mailer::ReminderMailer, store::CrmStore};
use mermelada_mailer::SmtpConfig;
use serde::Deserialize;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

fn default_sweep_hour() -> u32 { 9 }

/// Runtime server configuration, deserialised from `config.toml` layered
/// with `MERMELADA`-prefixed environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  /// Local wall-clock hour (0–23) at which the daily sweep fires.
  #[serde(default = "default_sweep_hour")]
  pub sweep_hour: u32,
  pub smtp:       SmtpConfig,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S, M> {
  pub store:  Arc<S>,
  pub mailer: Arc<M>,
}

// Manual impl: `S` and `M` themselves need not be `Clone`.
impl<S, M> Clone for AppState<S, M> {
  fn clone(&self) -> Self {
    Self {
      store:  Arc::clone(&self.store),
      mailer: Arc::clone(&self.mailer),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, M>(state: AppState<S, M>) -> Router<()>
where
  S: CrmStore + 'static,
  M: ReminderMailer + 'static,
{
  Router::new()
    // Contacts
    .route(
      "/contacts",
      get(contacts::list::<S, M>).post(contacts::create::<S, M>),
    )
    .route("/contacts/{id}", get(contacts::get_one::<S, M>))
    // Product catalog
    .route("/products", get(products::list::<S, M>))
    // Interests
    .route("/interests", post(interests::create::<S, M>))
    .route("/interests/{contact_id}", get(interests::list_for_contact::<S, M>))
    // Follow-ups
    .route("/follow-ups", post(follow_ups::create::<S, M>))
    .route("/follow-ups/{id}/resend", post(follow_ups::resend::<S, M>))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
