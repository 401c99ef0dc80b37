//! The daily sweep — finds due, incomplete follow-ups and dispatches one
//! reminder per row.
//!
//! The sweep is generic over [`CrmStore`] and [`ReminderMailer`] and takes
//! the calendar date as an argument, so tests drive it synchronously with a
//! controlled "today" and a mailer double. The periodic trigger that invokes
//! it on a real clock lives in the server crate.

use chrono::NaiveDate;

use crate::{
  follow_up::DueFollowUp,
  mailer::{Reminder, ReminderMailer},
  store::CrmStore,
};

// ─── Policy ──────────────────────────────────────────────────────────────────

/// What happens to a follow-up after its reminder is sent.
///
/// The observed workflow never transitions `completed`, so a follow-up due
/// today is re-reminded on every sweep until the row is otherwise resolved.
/// That behavior is preserved as the default; `CompleteAfterSend` is the
/// opt-in hardened variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionPolicy {
  /// Leave `completed` untouched; the same reminder is sent again on the
  /// next sweep of the same date.
  #[default]
  AlwaysRemind,
  /// Mark the follow-up completed after a successful send.
  CompleteAfterSend,
}

// ─── Report ──────────────────────────────────────────────────────────────────

/// Outcome of one sweep item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepOutcome {
  Sent,
  /// The contact has no email address; skipped without error.
  SkippedNoEmail,
  /// The dispatch (or the follow-on completion mark) failed; the failure is
  /// captured here and never aborts the remaining items.
  Failed(String),
}

/// One row of a [`SweepReport`].
#[derive(Debug, Clone)]
pub struct SweepItem {
  pub follow_up_id: i64,
  pub contact_name: String,
  pub outcome:      SweepOutcome,
}

/// Per-item result capture for one sweep run.
#[derive(Debug, Clone, Default)]
pub struct SweepReport {
  pub items: Vec<SweepItem>,
}

impl SweepReport {
  pub fn sent(&self) -> usize {
    self.count(|o| matches!(o, SweepOutcome::Sent))
  }

  pub fn skipped(&self) -> usize {
    self.count(|o| matches!(o, SweepOutcome::SkippedNoEmail))
  }

  pub fn failed(&self) -> usize {
    self.count(|o| matches!(o, SweepOutcome::Failed(_)))
  }

  fn count(&self, pred: impl Fn(&SweepOutcome) -> bool) -> usize {
    self.items.iter().filter(|i| pred(&i.outcome)).count()
  }
}

// ─── Sweep ───────────────────────────────────────────────────────────────────

/// Run one sweep for the given calendar date.
///
/// Reads the due-set once (snapshot semantics — rows inserted mid-sweep are
/// not picked up), then processes items sequentially with independent error
/// capture per item. Only the initial read can fail the sweep as a whole.
pub async fn run_sweep<S, M>(
  store:  &S,
  mailer: &M,
  today:  NaiveDate,
  policy: CompletionPolicy,
) -> Result<SweepReport, S::Error>
where
  S: CrmStore,
  M: ReminderMailer,
{
  let due = store.due_on(today).await?;
  tracing::debug!(date = %today, due = due.len(), "sweep: due-set fetched");

  let mut report = SweepReport::default();
  for item in &due {
    let outcome = dispatch_one(store, mailer, item, policy).await;
    report.items.push(SweepItem {
      follow_up_id: item.follow_up.id,
      contact_name: item.contact_name.clone(),
      outcome,
    });
  }

  tracing::info!(
    date = %today,
    sent = report.sent(),
    skipped = report.skipped(),
    failed = report.failed(),
    "sweep finished"
  );
  Ok(report)
}

async fn dispatch_one<S, M>(
  store:  &S,
  mailer: &M,
  due:    &DueFollowUp,
  policy: CompletionPolicy,
) -> SweepOutcome
where
  S: CrmStore,
  M: ReminderMailer,
{
  if due.contact_email.is_none() {
    tracing::debug!(
      follow_up = due.follow_up.id,
      contact = %due.contact_name,
      "sweep: contact has no email, skipping"
    );
    return SweepOutcome::SkippedNoEmail;
  }

  if let Err(e) = mailer.send_reminder(&Reminder::from(due)).await {
    tracing::warn!(
      follow_up = due.follow_up.id,
      contact = %due.contact_name,
      error = %e,
      "sweep: reminder dispatch failed"
    );
    return SweepOutcome::Failed(e.to_string());
  }

  if policy == CompletionPolicy::CompleteAfterSend {
    if let Err(e) = store.mark_completed(due.follow_up.id).await {
      tracing::warn!(
        follow_up = due.follow_up.id,
        error = %e,
        "sweep: sent but failed to mark completed"
      );
      return SweepOutcome::Failed(e.to_string());
    }
  }

  SweepOutcome::Sent
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::{
    convert::Infallible,
    sync::Mutex,
  };

  use chrono::NaiveDate;
  use thiserror::Error;

  use super::*;
  use crate::follow_up::FollowUp;

  fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
  }

  fn due(id: i64, name: &str, email: Option<&str>) -> DueFollowUp {
    DueFollowUp {
      follow_up:     FollowUp {
        id,
        contact_id: id,
        due_date: date(),
        completed: false,
        notes: Some(format!("notes for {name}")),
      },
      contact_name:  name.to_string(),
      contact_email: email.map(str::to_string),
    }
  }

  /// Store double: serves a fixed due-set and records completion marks.
  #[derive(Default)]
  struct StubStore {
    due:       Vec<DueFollowUp>,
    completed: Mutex<Vec<i64>>,
  }

  impl CrmStore for StubStore {
    type Error = Infallible;

    async fn add_contact(
      &self,
      _: crate::contact::NewContact,
    ) -> Result<crate::contact::Contact, Infallible> {
      unreachable!("not exercised by sweep tests")
    }

    async fn get_contact(
      &self,
      _: i64,
    ) -> Result<Option<crate::contact::Contact>, Infallible> {
      unreachable!("not exercised by sweep tests")
    }

    async fn list_contacts(&self) -> Result<Vec<crate::contact::Contact>, Infallible> {
      unreachable!("not exercised by sweep tests")
    }

    async fn list_products(&self) -> Result<Vec<crate::contact::Product>, Infallible> {
      unreachable!("not exercised by sweep tests")
    }

    async fn add_interest(
      &self,
      _: crate::contact::NewInterest,
    ) -> Result<crate::contact::ProductInterest, Infallible> {
      unreachable!("not exercised by sweep tests")
    }

    async fn list_interests(
      &self,
      _: i64,
    ) -> Result<Vec<crate::contact::ProductInterest>, Infallible> {
      unreachable!("not exercised by sweep tests")
    }

    async fn add_follow_up(
      &self,
      _: crate::follow_up::NewFollowUp,
    ) -> Result<FollowUp, Infallible> {
      unreachable!("not exercised by sweep tests")
    }

    async fn get_follow_up_with_contact(
      &self,
      _: i64,
    ) -> Result<Option<DueFollowUp>, Infallible> {
      unreachable!("not exercised by sweep tests")
    }

    async fn due_on(&self, _: NaiveDate) -> Result<Vec<DueFollowUp>, Infallible> {
      Ok(self.due.clone())
    }

    async fn mark_completed(&self, id: i64) -> Result<(), Infallible> {
      self.completed.lock().unwrap().push(id);
      Ok(())
    }
  }

  #[derive(Debug, Error)]
  #[error("smtp refused the message")]
  struct SendRefused;

  /// Mailer double: records dispatched reminders; fails for one contact.
  #[derive(Default)]
  struct StubMailer {
    sent:     Mutex<Vec<Reminder>>,
    fail_for: Option<String>,
  }

  impl ReminderMailer for StubMailer {
    type Error = SendRefused;

    async fn send_reminder(&self, reminder: &Reminder) -> Result<(), SendRefused> {
      if self.fail_for.as_deref() == Some(reminder.contact_name.as_str()) {
        return Err(SendRefused);
      }
      self.sent.lock().unwrap().push(reminder.clone());
      Ok(())
    }
  }

  #[tokio::test]
  async fn sends_one_reminder_per_due_row_with_email() {
    let store = StubStore {
      due: vec![
        due(1, "Ben Ortiz", Some("ben@x.com")),
        due(2, "Emma Rodriguez", Some("emma.r@example.com")),
      ],
      ..Default::default()
    };
    let mailer = StubMailer::default();

    let report = run_sweep(&store, &mailer, date(), CompletionPolicy::AlwaysRemind)
      .await
      .unwrap();

    assert_eq!(report.sent(), 2);
    assert_eq!(report.failed(), 0);

    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 2);
    assert!(sent[0].subject().contains("Ben Ortiz"));
    assert!(sent[0].body().contains("notes for Ben Ortiz"));
  }

  #[tokio::test]
  async fn absent_email_is_skipped_without_error() {
    let store = StubStore {
      due: vec![due(1, "Ana Silva", None)],
      ..Default::default()
    };
    let mailer = StubMailer::default();

    let report = run_sweep(&store, &mailer, date(), CompletionPolicy::AlwaysRemind)
      .await
      .unwrap();

    assert_eq!(report.sent(), 0);
    assert_eq!(report.skipped(), 1);
    assert!(mailer.sent.lock().unwrap().is_empty());
  }

  #[tokio::test]
  async fn one_failure_does_not_abort_the_rest() {
    let store = StubStore {
      due: vec![
        due(1, "Sarah Johnson", Some("sarah.j@example.com")),
        due(2, "Michael Chen", Some("mchen@example.com")),
        due(3, "David Kim", Some("david.k@example.com")),
      ],
      ..Default::default()
    };
    let mailer = StubMailer {
      fail_for: Some("Michael Chen".to_string()),
      ..Default::default()
    };

    let report = run_sweep(&store, &mailer, date(), CompletionPolicy::AlwaysRemind)
      .await
      .unwrap();

    assert_eq!(report.sent(), 2);
    assert_eq!(report.failed(), 1);
    assert!(matches!(report.items[1].outcome, SweepOutcome::Failed(_)));

    let sent = mailer.sent.lock().unwrap();
    let names: Vec<_> = sent.iter().map(|r| r.contact_name.as_str()).collect();
    assert_eq!(names, ["Sarah Johnson", "David Kim"]);
  }

  #[tokio::test]
  async fn always_remind_never_marks_completed() {
    let store = StubStore {
      due: vec![due(1, "Ben Ortiz", Some("ben@x.com"))],
      ..Default::default()
    };
    let mailer = StubMailer::default();

    run_sweep(&store, &mailer, date(), CompletionPolicy::AlwaysRemind)
      .await
      .unwrap();

    assert!(store.completed.lock().unwrap().is_empty());
  }

  #[tokio::test]
  async fn complete_after_send_marks_only_sent_items() {
    let store = StubStore {
      due: vec![
        due(1, "Ben Ortiz", Some("ben@x.com")),
        due(2, "Ana Silva", None),
        due(3, "Michael Chen", Some("mchen@example.com")),
      ],
      ..Default::default()
    };
    let mailer = StubMailer {
      fail_for: Some("Michael Chen".to_string()),
      ..Default::default()
    };

    let report = run_sweep(&store, &mailer, date(), CompletionPolicy::CompleteAfterSend)
      .await
      .unwrap();

    assert_eq!(report.sent(), 1);
    assert_eq!(*store.completed.lock().unwrap(), vec![1]);
  }

  #[tokio::test]
  async fn empty_due_set_produces_empty_report() {
    let store = StubStore::default();
    let mailer = StubMailer::default();

    let report = run_sweep(&store, &mailer, date(), CompletionPolicy::AlwaysRemind)
      .await
      .unwrap();

    assert!(report.items.is_empty());
    assert_eq!(report.sent() + report.skipped() + report.failed(), 0);
  }
}
