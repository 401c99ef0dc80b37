//! The reminder message and the `ReminderMailer` trait.
//!
//! The mailer owns no state beyond its transport configuration; it is a
//! stateless transform from a [`Reminder`] to a sent-or-failed outcome. The
//! recipient is always the business's fixed administrative address — the
//! reminder notifies the business, not the customer.

use std::future::Future;

use chrono::NaiveDate;

use crate::follow_up::DueFollowUp;

// ─── Reminder ────────────────────────────────────────────────────────────────

/// The composed content of one reminder email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
  pub contact_name: String,
  pub due_date:     NaiveDate,
  pub notes:        Option<String>,
}

impl Reminder {
  /// `"Follow-up Reminder: {contact_name}"`
  pub fn subject(&self) -> String {
    format!("Follow-up Reminder: {}", self.contact_name)
  }

  /// Fixed plaintext template carrying the name, due date, and notes.
  pub fn body(&self) -> String {
    format!(
      "Don't forget to follow up with {} (due: {})!\nNotes: {}",
      self.contact_name,
      self.due_date,
      self.notes.as_deref().unwrap_or("-"),
    )
  }
}

impl From<&DueFollowUp> for Reminder {
  fn from(due: &DueFollowUp) -> Self {
    Reminder {
      contact_name: due.contact_name.clone(),
      due_date:     due.follow_up.due_date,
      notes:        due.follow_up.notes.clone(),
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the outbound reminder transport.
///
/// Implementations never retry internally; a transport failure surfaces as
/// `Self::Error` and the caller decides whether it is user-visible (manual
/// resend) or logged-and-skipped (daily sweep).
pub trait ReminderMailer: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Send one reminder to the fixed administrative recipient.
  fn send_reminder(
    &self,
    reminder: &Reminder,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
