//! [`SqliteStore`] — the SQLite implementation of [`CrmStore`].

use std::path::Path;

use chrono::{NaiveDate, Utc};
use rusqlite::OptionalExtension as _;

use mermelada_core::{
  contact::{Contact, NewContact, NewInterest, Product, ProductInterest},
  follow_up::{DueFollowUp, FollowUp, NewFollowUp},
  store::CrmStore,
};

use crate::{
  encode::{
    encode_date, encode_dt, encode_interest_level, RawContact, RawDueFollowUp,
    RawInterest, RawProduct,
  },
  schema::SCHEMA,
  seed::seed_if_empty,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Mermelada CRM store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert the demonstration dataset if the store is empty. One-time
  /// bootstrap behavior; a no-op on a populated database.
  pub async fn seed_demo_data(&self) -> Result<()> {
    let seeded = self.conn.call(|conn| Ok(seed_if_empty(conn)?)).await?;
    if seeded {
      tracing::info!("seeded demonstration products and contacts");
    }
    Ok(())
  }

  async fn contact_exists(&self, id: i64) -> Result<bool> {
    let exists = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM contacts WHERE id = ?1",
              rusqlite::params![id],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(exists)
  }
}

// ─── CrmStore impl ───────────────────────────────────────────────────────────

impl CrmStore for SqliteStore {
  type Error = Error;

  // ── Contacts ──────────────────────────────────────────────────────────────

  async fn add_contact(&self, input: NewContact) -> Result<Contact> {
    input.validate().map_err(Error::Core)?;

    let created_at = Utc::now();
    let at_str = encode_dt(created_at);
    let next_str = input.next_follow_up.map(encode_date);
    let NewContact { name, email, phone, company, next_follow_up, notes } = input;

    let (id, name, email, phone, company, notes) = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contacts (name, email, phone, company, next_follow_up, notes, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![name, email, phone, company, next_str, notes, at_str],
        )?;
        Ok((conn.last_insert_rowid(), name, email, phone, company, notes))
      })
      .await?;

    Ok(Contact {
      id,
      name,
      email,
      phone,
      company,
      next_follow_up,
      notes,
      created_at,
    })
  }

  async fn get_contact(&self, id: i64) -> Result<Option<Contact>> {
    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, name, email, phone, company, next_follow_up, notes, created_at
               FROM contacts WHERE id = ?1",
              rusqlite::params![id],
              |row| {
                Ok(RawContact {
                  id:             row.get(0)?,
                  name:           row.get(1)?,
                  email:          row.get(2)?,
                  phone:          row.get(3)?,
                  company:        row.get(4)?,
                  next_follow_up: row.get(5)?,
                  notes:          row.get(6)?,
                  created_at:     row.get(7)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn list_contacts(&self) -> Result<Vec<Contact>> {
    let raws: Vec<RawContact> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, name, email, phone, company, next_follow_up, notes, created_at
           FROM contacts ORDER BY name",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawContact {
              id:             row.get(0)?,
              name:           row.get(1)?,
              email:          row.get(2)?,
              phone:          row.get(3)?,
              company:        row.get(4)?,
              next_follow_up: row.get(5)?,
              notes:          row.get(6)?,
              created_at:     row.get(7)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }

  // ── Product catalog ───────────────────────────────────────────────────────

  async fn list_products(&self) -> Result<Vec<Product>> {
    let raws: Vec<RawProduct> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, name, description, category FROM products ORDER BY name",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawProduct {
              id:          row.get(0)?,
              name:        row.get(1)?,
              description: row.get(2)?,
              category:    row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(raws.into_iter().map(RawProduct::into_product).collect())
  }

  // ── Interests ─────────────────────────────────────────────────────────────

  async fn add_interest(&self, input: NewInterest) -> Result<ProductInterest> {
    if !self.contact_exists(input.contact_id).await? {
      return Err(Error::ContactNotFound(input.contact_id));
    }

    let created_at = Utc::now();
    let at_str = encode_dt(created_at);
    let level_str = input.interest_level.map(encode_interest_level);
    let NewInterest { contact_id, product_name, interest_level, notes } = input;

    let (id, product_name, notes) = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO product_interests (contact_id, product_name, interest_level, notes, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![contact_id, product_name, level_str, notes, at_str],
        )?;
        Ok((conn.last_insert_rowid(), product_name, notes))
      })
      .await?;

    Ok(ProductInterest {
      id,
      contact_id,
      product_name,
      interest_level,
      notes,
      created_at,
    })
  }

  async fn list_interests(&self, contact_id: i64) -> Result<Vec<ProductInterest>> {
    let raws: Vec<RawInterest> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, contact_id, product_name, interest_level, notes, created_at
           FROM product_interests WHERE contact_id = ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![contact_id], |row| {
            Ok(RawInterest {
              id:             row.get(0)?,
              contact_id:     row.get(1)?,
              product_name:   row.get(2)?,
              interest_level: row.get(3)?,
              notes:          row.get(4)?,
              created_at:     row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawInterest::into_interest).collect()
  }

  // ── Follow-ups ────────────────────────────────────────────────────────────

  async fn add_follow_up(&self, input: NewFollowUp) -> Result<FollowUp> {
    if !self.contact_exists(input.contact_id).await? {
      return Err(Error::ContactNotFound(input.contact_id));
    }

    let due_str = encode_date(input.due_date);
    let NewFollowUp { contact_id, due_date, notes } = input;

    let (id, notes) = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO follow_ups (contact_id, due_date, completed, notes)
           VALUES (?1, ?2, 0, ?3)",
          rusqlite::params![contact_id, due_str, notes],
        )?;
        Ok((conn.last_insert_rowid(), notes))
      })
      .await?;

    Ok(FollowUp { id, contact_id, due_date, completed: false, notes })
  }

  async fn get_follow_up_with_contact(&self, id: i64) -> Result<Option<DueFollowUp>> {
    let raw: Option<RawDueFollowUp> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT f.id, f.contact_id, f.due_date, f.completed, f.notes,
                      c.name, c.email
               FROM follow_ups f
               JOIN contacts c ON f.contact_id = c.id
               WHERE f.id = ?1",
              rusqlite::params![id],
              |row| {
                Ok(RawDueFollowUp {
                  id:            row.get(0)?,
                  contact_id:    row.get(1)?,
                  due_date:      row.get(2)?,
                  completed:     row.get(3)?,
                  notes:         row.get(4)?,
                  contact_name:  row.get(5)?,
                  contact_email: row.get(6)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawDueFollowUp::into_due).transpose()
  }

  async fn due_on(&self, date: NaiveDate) -> Result<Vec<DueFollowUp>> {
    let date_str = encode_date(date);

    let raws: Vec<RawDueFollowUp> = self
      .conn
      .call(move |conn| {
        // DATE() on both sides keeps the comparison date-only even when a
        // legacy row carries a time component.
        let mut stmt = conn.prepare(
          "SELECT f.id, f.contact_id, f.due_date, f.completed, f.notes,
                  c.name, c.email
           FROM follow_ups f
           JOIN contacts c ON f.contact_id = c.id
           WHERE DATE(f.due_date) = DATE(?1) AND f.completed = 0",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![date_str], |row| {
            Ok(RawDueFollowUp {
              id:            row.get(0)?,
              contact_id:    row.get(1)?,
              due_date:      row.get(2)?,
              completed:     row.get(3)?,
              notes:         row.get(4)?,
              contact_name:  row.get(5)?,
              contact_email: row.get(6)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawDueFollowUp::into_due).collect()
  }

  async fn mark_completed(&self, id: i64) -> Result<()> {
    let updated = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE follow_ups SET completed = 1 WHERE id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;

    if updated == 0 {
      return Err(Error::FollowUpNotFound(id));
    }
    Ok(())
  }
}
