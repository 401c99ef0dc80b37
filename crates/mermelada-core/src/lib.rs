//! Core types and trait definitions for the Mermelada CRM.
//!
//! This crate is deliberately free of HTTP, database, and SMTP dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod contact;
pub mod error;
pub mod follow_up;
pub mod mailer;
pub mod store;
pub mod sweep;

pub use error::{Error, Result};
