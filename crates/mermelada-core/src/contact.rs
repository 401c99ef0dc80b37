//! Contacts, the product catalog, and the product-interest ledger.
//!
//! A contact is the person or organization the business is courting. All
//! meaningful activity (interests, follow-ups) hangs off a contact by id.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Contact ─────────────────────────────────────────────────────────────────

/// A person or organization tracked by the business.
///
/// `next_follow_up` is informational only; the follow-up registry is the
/// scheduling source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
  pub id:             i64,
  pub name:           String,
  pub email:          Option<String>,
  pub phone:          Option<String>,
  pub company:        Option<String>,
  pub next_follow_up: Option<NaiveDate>,
  pub notes:          Option<String>,
  /// Server-assigned at insert time.
  pub created_at:     DateTime<Utc>,
}

/// Input for creating a contact. The store assigns `id` and `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
  pub name:           String,
  pub email:          Option<String>,
  pub phone:          Option<String>,
  pub company:        Option<String>,
  pub next_follow_up: Option<NaiveDate>,
  pub notes:          Option<String>,
}

impl NewContact {
  /// A name-only contact; the rest of the fields default to `None`.
  pub fn named(name: impl Into<String>) -> Self {
    Self {
      name:           name.into(),
      email:          None,
      phone:          None,
      company:        None,
      next_follow_up: None,
      notes:          None,
    }
  }

  /// Reject empty or whitespace-only names.
  pub fn validate(&self) -> Result<()> {
    if self.name.trim().is_empty() {
      return Err(Error::EmptyName);
    }
    Ok(())
  }
}

// ─── Product catalog ─────────────────────────────────────────────────────────

/// A sellable item. Static reference data, read-only from the workflow's
/// perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id:          i64,
  pub name:        String,
  pub description: Option<String>,
  pub category:    Option<String>,
}

// ─── Product interests ───────────────────────────────────────────────────────

/// Qualitative strength of a recorded interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterestLevel {
  Low,
  Medium,
  High,
}

impl InterestLevel {
  pub fn as_str(self) -> &'static str {
    match self {
      InterestLevel::Low => "Low",
      InterestLevel::Medium => "Medium",
      InterestLevel::High => "High",
    }
  }

  pub fn parse(s: &str) -> Result<Self> {
    match s {
      "Low" => Ok(InterestLevel::Low),
      "Medium" => Ok(InterestLevel::Medium),
      "High" => Ok(InterestLevel::High),
      other => Err(Error::UnknownInterestLevel(other.to_string())),
    }
  }
}

/// A recorded signal that a contact wants a given product.
///
/// `product_name` is a denormalized string, not a reference into the product
/// catalog: a renamed catalog product does not rewrite historical interests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInterest {
  pub id:             i64,
  pub contact_id:     i64,
  pub product_name:   String,
  pub interest_level: Option<InterestLevel>,
  pub notes:          Option<String>,
  pub created_at:     DateTime<Utc>,
}

/// Input for recording an interest. Append-only; never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInterest {
  pub contact_id:     i64,
  pub product_name:   String,
  pub interest_level: Option<InterestLevel>,
  pub notes:          Option<String>,
}
