//! The `CrmStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `mermelada-store-sqlite`). Higher layers (`mermelada-api`, the sweep)
//! depend on this abstraction, not on any concrete backend.

use std::future::Future;

use chrono::NaiveDate;

use crate::{
  contact::{Contact, NewContact, NewInterest, Product, ProductInterest},
  follow_up::{DueFollowUp, FollowUp, NewFollowUp},
};

/// Abstraction over a Mermelada storage backend.
///
/// Contacts and interests are append-only in this slice; follow-ups gain a
/// single optional transition (`mark_completed`), driven only by the sweep's
/// completion policy.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait CrmStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Contacts ──────────────────────────────────────────────────────────

  /// Validate and persist a new contact. The store assigns the id and the
  /// `created_at` timestamp. Fails if the name is empty.
  fn add_contact(
    &self,
    input: NewContact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Retrieve a contact by id. Returns `None` if not found.
  fn get_contact(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// List all contacts, ordered by name.
  fn list_contacts(
    &self,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  // ── Product catalog ───────────────────────────────────────────────────

  /// List all catalog products, ordered by name.
  fn list_products(
    &self,
  ) -> impl Future<Output = Result<Vec<Product>, Self::Error>> + Send + '_;

  // ── Interests ─────────────────────────────────────────────────────────

  /// Record a product interest. Fails if the contact id does not resolve.
  fn add_interest(
    &self,
    input: NewInterest,
  ) -> impl Future<Output = Result<ProductInterest, Self::Error>> + Send + '_;

  /// All interests recorded for a contact.
  fn list_interests(
    &self,
    contact_id: i64,
  ) -> impl Future<Output = Result<Vec<ProductInterest>, Self::Error>> + Send + '_;

  // ── Follow-ups ────────────────────────────────────────────────────────

  /// Schedule a follow-up with `completed = false`. Fails if the contact id
  /// does not resolve.
  fn add_follow_up(
    &self,
    input: NewFollowUp,
  ) -> impl Future<Output = Result<FollowUp, Self::Error>> + Send + '_;

  /// A follow-up joined with its contact's name and email. Returns `None`
  /// if no such follow-up exists.
  fn get_follow_up_with_contact(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<DueFollowUp>, Self::Error>> + Send + '_;

  /// All incomplete follow-ups due on the given calendar date, joined with
  /// their contacts. Date-only comparison; empty when nothing is due;
  /// ordering unspecified.
  fn due_on(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Vec<DueFollowUp>, Self::Error>> + Send + '_;

  /// Set `completed = true` on a follow-up. Only invoked when the sweep
  /// runs with [`CompletionPolicy::CompleteAfterSend`].
  ///
  /// [`CompletionPolicy::CompleteAfterSend`]: crate::sweep::CompletionPolicy::CompleteAfterSend
  fn mark_completed(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
