//! The daily sweep trigger — fires once per calendar day at a fixed local
//! wall-clock time.
//!
//! The trigger owns no sweep logic; it computes the next firing instant,
//! sleeps, and hands the local calendar date to
//! [`run_sweep`](mermelada_core::sweep::run_sweep). No explicit timezone
//! handling: behavior follows the host clock.

use std::sync::Arc;

use chrono::{Local, NaiveDateTime, NaiveTime};
use mermelada_core::{
  mailer::ReminderMailer,
  store::CrmStore,
  sweep::{run_sweep, CompletionPolicy},
};
use tokio::task::JoinHandle;

/// The next strictly-future occurrence of `at`: later today if the time is
/// still ahead, otherwise the same time tomorrow.
pub fn next_trigger(after: NaiveDateTime, at: NaiveTime) -> NaiveDateTime {
  let candidate = after.date().and_time(at);
  if candidate > after {
    candidate
  } else {
    candidate + chrono::Duration::days(1)
  }
}

/// Spawn the daily sweep loop on the current tokio runtime.
///
/// Each iteration sleeps until the next trigger instant, runs one sweep for
/// the local calendar date, and logs the report. Sweep items are processed
/// sequentially; a due-set read failure is logged and the loop waits for the
/// next day rather than exiting.
pub fn spawn_daily_sweep<S, M>(
  store:  Arc<S>,
  mailer: Arc<M>,
  at:     NaiveTime,
  policy: CompletionPolicy,
) -> JoinHandle<()>
where
  S: CrmStore + 'static,
  M: ReminderMailer + 'static,
{
  tokio::spawn(async move {
    loop {
      let now = Local::now().naive_local();
      let next = next_trigger(now, at);
      let wait = (next - now).to_std().unwrap_or_default();
      tracing::info!(at = %next, "daily sweep scheduled");
      tokio::time::sleep(wait).await;

      let today = Local::now().date_naive();
      match run_sweep(store.as_ref(), mailer.as_ref(), today, policy).await {
        Ok(report) => {
          if report.failed() > 0 {
            tracing::warn!(
              date = %today,
              failed = report.failed(),
              "daily sweep finished with failures"
            );
          }
        }
        Err(e) => {
          tracing::error!(date = %today, error = %e, "daily sweep could not read due follow-ups");
        }
      }
    }
  })
}
