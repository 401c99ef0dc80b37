//! Follow-up reminders — scheduled re-engagement records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A scheduled reminder to re-engage a contact by a given date.
///
/// `due_date` is date-only; time-of-day never participates in due-ness. The
/// daily sweep and the manual resend path share that semantics, otherwise
/// reminders silently drift by a day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUp {
  pub id:         i64,
  pub contact_id: i64,
  pub due_date:   NaiveDate,
  pub completed:  bool,
  pub notes:      Option<String>,
}

/// Input for scheduling a follow-up. `completed` starts false.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFollowUp {
  pub contact_id: i64,
  pub due_date:   NaiveDate,
  pub notes:      Option<String>,
}

/// A follow-up joined with its owning contact's name and email — the read
/// model consumed by the sweep and the resend path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DueFollowUp {
  pub follow_up:     FollowUp,
  pub contact_name:  String,
  pub contact_email: Option<String>,
}
