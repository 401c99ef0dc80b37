//! SMTP reminder mailer for the Mermelada CRM.
//!
//! Implements [`ReminderMailer`] over [`lettre`]'s async SMTP transport
//! (STARTTLS, authenticated). The transport is configured once at startup
//! and shared; every reminder goes to the single fixed administrative
//! recipient, never to the contact.

pub mod error;

pub use error::{Error, Result};

use lettre::{
  AsyncSmtpTransport, AsyncTransport as _, Message, Tokio1Executor,
  message::Mailbox,
  transport::smtp::authentication::Credentials,
};
use mermelada_core::mailer::{Reminder, ReminderMailer};
use serde::Deserialize;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Outbound-mail settings, deserialised from the `[smtp]` config section.
/// `username` and `password` are opaque secrets supplied externally.
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
  pub host:        String,
  pub port:        u16,
  pub username:    String,
  pub password:    String,
  /// Authenticated sender identity, e.g. `"crm@example.com"`.
  pub from:        String,
  /// The fixed administrative recipient for every reminder.
  pub admin_email: String,
}

// ─── Mailer ──────────────────────────────────────────────────────────────────

/// A [`ReminderMailer`] backed by an authenticated SMTP relay.
///
/// Stateless across calls apart from the transport's connection pooling.
/// Never retries; a transport failure surfaces as [`Error::Transport`] and
/// the caller decides what to do with it.
#[derive(Clone)]
pub struct SmtpMailer {
  transport: AsyncSmtpTransport<Tokio1Executor>,
  from:      Mailbox,
  admin:     Mailbox,
}

impl SmtpMailer {
  /// Build the transport from configuration. Addresses are parsed here so
  /// the send path cannot fail on malformed configuration.
  pub fn new(cfg: &SmtpConfig) -> Result<Self> {
    let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&cfg.host)?
      .port(cfg.port)
      .credentials(Credentials::new(cfg.username.clone(), cfg.password.clone()))
      .build();

    Ok(Self {
      transport,
      from: cfg.from.parse()?,
      admin: cfg.admin_email.parse()?,
    })
  }
}

impl ReminderMailer for SmtpMailer {
  type Error = Error;

  async fn send_reminder(&self, reminder: &Reminder) -> Result<()> {
    let message = Message::builder()
      .from(self.from.clone())
      .to(self.admin.clone())
      .subject(reminder.subject())
      .body(reminder.body())?;

    self.transport.send(message).await?;
    tracing::debug!(contact = %reminder.contact_name, "reminder email sent");
    Ok(())
  }
}
