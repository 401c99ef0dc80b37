//! One-time demonstration dataset, inserted the first time the store is
//! empty. Not part of the steady-state workflow: a populated database is
//! never touched.

use chrono::Utc;
use rusqlite::Connection;

use crate::encode::encode_dt;

struct SeedProduct {
  name:        &'static str,
  description: &'static str,
  category:    &'static str,
}

const PRODUCTS: &[SeedProduct] = &[
  SeedProduct {
    name:        "Premium Jam",
    description: "Artisanal fruit jam",
    category:    "Preserves",
  },
  SeedProduct {
    name:        "Organic Honey",
    description: "Pure organic honey",
    category:    "Natural",
  },
  SeedProduct {
    name:        "Fruit Spread",
    description: "Low sugar fruit spread",
    category:    "Preserves",
  },
  SeedProduct {
    name:        "Gift Basket",
    description: "Assorted products gift basket",
    category:    "Gifts",
  },
  SeedProduct {
    name:        "Seasonal Box",
    description: "Seasonal product collection",
    category:    "Special",
  },
];

struct SeedContact {
  name:           &'static str,
  email:          &'static str,
  phone:          &'static str,
  company:        &'static str,
  next_follow_up: &'static str,
  notes:          &'static str,
  // (product, level, notes) pairs recorded for this contact
  interests:      &'static [(&'static str, &'static str, &'static str)],
}

const CONTACTS: &[SeedContact] = &[
  SeedContact {
    name:           "Sarah Johnson",
    email:          "sarah.j@example.com",
    phone:          "555-0123",
    company:        "Gourmet Foods Inc.",
    next_follow_up: "2024-01-15",
    notes:          "Interested in wholesale Premium Jam orders",
    interests:      &[("Premium Jam", "High", "Interested in bulk orders")],
  },
  SeedContact {
    name:           "Michael Chen",
    email:          "mchen@example.com",
    phone:          "555-0124",
    company:        "Natural Markets",
    next_follow_up: "2024-01-10",
    notes:          "Looking for organic product line",
    interests:      &[("Organic Honey", "Medium", "Requesting samples")],
  },
  SeedContact {
    name:           "Emma Rodriguez",
    email:          "emma.r@example.com",
    phone:          "555-0125",
    company:        "Sweet Delights Bakery",
    next_follow_up: "2024-01-20",
    notes:          "Regular buyer of Fruit Spread",
    interests:      &[("Fruit Spread", "High", "Monthly recurring order")],
  },
  SeedContact {
    name:           "David Kim",
    email:          "david.k@example.com",
    phone:          "555-0126",
    company:        "Gift Box Co.",
    next_follow_up: "2024-01-12",
    notes:          "Interested in custom gift baskets",
    interests:      &[("Gift Basket", "High", "Seasonal orders")],
  },
  SeedContact {
    name:           "Lisa Thompson",
    email:          "lisa.t@example.com",
    phone:          "555-0127",
    company:        "Wellness Store",
    next_follow_up: "2024-01-18",
    notes:          "Regular orders of Organic Honey",
    interests:      &[
      ("Organic Honey", "High", "Regular customer"),
      ("Premium Jam", "Medium", "Interested in new flavors"),
    ],
  },
];

/// Insert the demo dataset into empty tables. Returns `true` if anything was
/// inserted. Runs on the connection thread inside a `conn.call`.
pub fn seed_if_empty(conn: &Connection) -> rusqlite::Result<bool> {
  let mut seeded = false;
  let now = encode_dt(Utc::now());

  let product_count: i64 =
    conn.query_row("SELECT COUNT(*) FROM products", [], |r| r.get(0))?;
  if product_count == 0 {
    let mut insert = conn.prepare(
      "INSERT INTO products (name, description, category) VALUES (?1, ?2, ?3)",
    )?;
    for p in PRODUCTS {
      insert.execute(rusqlite::params![p.name, p.description, p.category])?;
    }
    seeded = true;
  }

  let contact_count: i64 =
    conn.query_row("SELECT COUNT(*) FROM contacts", [], |r| r.get(0))?;
  if contact_count == 0 {
    let mut insert_contact = conn.prepare(
      "INSERT INTO contacts (name, email, phone, company, next_follow_up, notes, created_at)
       VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?;
    let mut insert_interest = conn.prepare(
      "INSERT INTO product_interests (contact_id, product_name, interest_level, notes, created_at)
       VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;

    for c in CONTACTS {
      insert_contact.execute(rusqlite::params![
        c.name,
        c.email,
        c.phone,
        c.company,
        c.next_follow_up,
        c.notes,
        now,
      ])?;
      let contact_id = conn.last_insert_rowid();

      for (product, level, notes) in c.interests {
        insert_interest.execute(rusqlite::params![
          contact_id, product, level, notes, now,
        ])?;
      }
    }
    seeded = true;
  }

  Ok(seeded)
}
