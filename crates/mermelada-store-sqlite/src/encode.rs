//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings; date-only values as
//! `YYYY-MM-DD`. Interest levels are stored by their canonical label.

use chrono::{DateTime, NaiveDate, Utc};
use mermelada_core::{
  contact::{Contact, InterestLevel, Product, ProductInterest},
  follow_up::{DueFollowUp, FollowUp},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  // Tolerate a trailing time component in legacy rows; due-ness is date-only.
  let date_part = s.split_whitespace().next().unwrap_or(s);
  let date_part = date_part.split('T').next().unwrap_or(date_part);
  NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── InterestLevel ───────────────────────────────────────────────────────────

pub fn encode_interest_level(l: InterestLevel) -> &'static str { l.as_str() }

pub fn decode_interest_level(s: &str) -> Result<InterestLevel> {
  Ok(InterestLevel::parse(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `contacts` row.
pub struct RawContact {
  pub id:             i64,
  pub name:           String,
  pub email:          Option<String>,
  pub phone:          Option<String>,
  pub company:        Option<String>,
  pub next_follow_up: Option<String>,
  pub notes:          Option<String>,
  pub created_at:     String,
}

impl RawContact {
  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      id:             self.id,
      name:           self.name,
      email:          self.email,
      phone:          self.phone,
      company:        self.company,
      next_follow_up: self
        .next_follow_up
        .as_deref()
        .map(decode_date)
        .transpose()?,
      notes:          self.notes,
      created_at:     decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read directly from a `product_interests` row.
pub struct RawInterest {
  pub id:             i64,
  pub contact_id:     i64,
  pub product_name:   String,
  pub interest_level: Option<String>,
  pub notes:          Option<String>,
  pub created_at:     String,
}

impl RawInterest {
  pub fn into_interest(self) -> Result<ProductInterest> {
    Ok(ProductInterest {
      id:             self.id,
      contact_id:     self.contact_id,
      product_name:   self.product_name,
      interest_level: self
        .interest_level
        .as_deref()
        .map(decode_interest_level)
        .transpose()?,
      notes:          self.notes,
      created_at:     decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read from a `follow_ups` row joined with its contact.
pub struct RawDueFollowUp {
  pub id:            i64,
  pub contact_id:    i64,
  pub due_date:      String,
  pub completed:     bool,
  pub notes:         Option<String>,
  pub contact_name:  String,
  pub contact_email: Option<String>,
}

impl RawDueFollowUp {
  pub fn into_due(self) -> Result<DueFollowUp> {
    Ok(DueFollowUp {
      follow_up:     FollowUp {
        id:         self.id,
        contact_id: self.contact_id,
        due_date:   decode_date(&self.due_date)?,
        completed:  self.completed,
        notes:      self.notes,
      },
      contact_name:  self.contact_name,
      contact_email: self.contact_email,
    })
  }
}

/// Raw values read directly from a `products` row.
pub struct RawProduct {
  pub id:          i64,
  pub name:        String,
  pub description: Option<String>,
  pub category:    Option<String>,
}

impl RawProduct {
  pub fn into_product(self) -> Product {
    Product {
      id:          self.id,
      name:        self.name,
      description: self.description,
      category:    self.category,
    }
  }
}
