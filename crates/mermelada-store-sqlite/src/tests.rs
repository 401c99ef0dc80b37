//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use mermelada_core::{
  contact::{InterestLevel, NewContact, NewInterest},
  follow_up::NewFollowUp,
  store::CrmStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn jan_15() -> NaiveDate {
  NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

fn contact_with_email(name: &str, email: &str) -> NewContact {
  NewContact {
    email: Some(email.to_string()),
    ..NewContact::named(name)
  }
}

// ─── Contacts ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_contact() {
  let s = store().await;

  let contact = s
    .add_contact(contact_with_email("Ben Ortiz", "ben@x.com"))
    .await
    .unwrap();
  assert_eq!(contact.name, "Ben Ortiz");

  let fetched = s.get_contact(contact.id).await.unwrap().unwrap();
  assert_eq!(fetched.id, contact.id);
  assert_eq!(fetched.name, "Ben Ortiz");
  assert_eq!(fetched.email.as_deref(), Some("ben@x.com"));
}

#[tokio::test]
async fn name_only_contact_is_accepted() {
  let s = store().await;
  let contact = s.add_contact(NewContact::named("Ana Silva")).await.unwrap();

  let fetched = s.get_contact(contact.id).await.unwrap().unwrap();
  assert_eq!(fetched.name, "Ana Silva");
  assert!(fetched.email.is_none());
  assert!(fetched.company.is_none());
}

#[tokio::test]
async fn empty_name_is_rejected() {
  let s = store().await;
  let err = s.add_contact(NewContact::named("  ")).await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(mermelada_core::Error::EmptyName)
  ));
}

#[tokio::test]
async fn get_contact_missing_returns_none() {
  let s = store().await;
  assert!(s.get_contact(404).await.unwrap().is_none());
}

#[tokio::test]
async fn list_contacts_ordered_by_name() {
  let s = store().await;
  s.add_contact(NewContact::named("Zoe")).await.unwrap();
  s.add_contact(NewContact::named("Ana")).await.unwrap();
  s.add_contact(NewContact::named("Mia")).await.unwrap();

  let names: Vec<_> = s
    .list_contacts()
    .await
    .unwrap()
    .into_iter()
    .map(|c| c.name)
    .collect();
  assert_eq!(names, ["Ana", "Mia", "Zoe"]);
}

#[tokio::test]
async fn next_follow_up_round_trips() {
  let s = store().await;
  let contact = s
    .add_contact(NewContact {
      next_follow_up: Some(jan_15()),
      ..NewContact::named("Sarah Johnson")
    })
    .await
    .unwrap();

  let fetched = s.get_contact(contact.id).await.unwrap().unwrap();
  assert_eq!(fetched.next_follow_up, Some(jan_15()));
}

// ─── Interests ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_list_interests() {
  let s = store().await;
  let contact = s.add_contact(NewContact::named("Lisa Thompson")).await.unwrap();

  s.add_interest(NewInterest {
    contact_id:     contact.id,
    product_name:   "Organic Honey".to_string(),
    interest_level: Some(InterestLevel::High),
    notes:          Some("Regular customer".to_string()),
  })
  .await
  .unwrap();
  s.add_interest(NewInterest {
    contact_id:     contact.id,
    product_name:   "Premium Jam".to_string(),
    interest_level: None,
    notes:          None,
  })
  .await
  .unwrap();

  let interests = s.list_interests(contact.id).await.unwrap();
  assert_eq!(interests.len(), 2);
  assert_eq!(interests[0].product_name, "Organic Honey");
  assert_eq!(interests[0].interest_level, Some(InterestLevel::High));
  assert_eq!(interests[1].interest_level, None);
}

#[tokio::test]
async fn interest_for_unknown_contact_errors() {
  let s = store().await;
  let err = s
    .add_interest(NewInterest {
      contact_id:     999,
      product_name:   "Gift Basket".to_string(),
      interest_level: None,
      notes:          None,
    })
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::ContactNotFound(999)));
}

#[tokio::test]
async fn list_interests_empty_for_contact_without_any() {
  let s = store().await;
  let contact = s.add_contact(NewContact::named("Ana Silva")).await.unwrap();
  assert!(s.list_interests(contact.id).await.unwrap().is_empty());
}

// ─── Follow-ups ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_follow_up_starts_incomplete() {
  let s = store().await;
  let contact = s.add_contact(NewContact::named("Ben Ortiz")).await.unwrap();

  let follow_up = s
    .add_follow_up(NewFollowUp {
      contact_id: contact.id,
      due_date:   jan_15(),
      notes:      Some("call re: order".to_string()),
    })
    .await
    .unwrap();

  assert!(!follow_up.completed);
  assert_eq!(follow_up.due_date, jan_15());
}

#[tokio::test]
async fn follow_up_for_unknown_contact_errors() {
  let s = store().await;
  let err = s
    .add_follow_up(NewFollowUp {
      contact_id: 7,
      due_date:   jan_15(),
      notes:      None,
    })
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::ContactNotFound(7)));
}

#[tokio::test]
async fn get_follow_up_with_contact_joins_name_and_email() {
  let s = store().await;
  let contact = s
    .add_contact(contact_with_email("Ben Ortiz", "ben@x.com"))
    .await
    .unwrap();
  let follow_up = s
    .add_follow_up(NewFollowUp {
      contact_id: contact.id,
      due_date:   jan_15(),
      notes:      None,
    })
    .await
    .unwrap();

  let due = s
    .get_follow_up_with_contact(follow_up.id)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(due.follow_up.id, follow_up.id);
  assert_eq!(due.contact_name, "Ben Ortiz");
  assert_eq!(due.contact_email.as_deref(), Some("ben@x.com"));
}

#[tokio::test]
async fn get_follow_up_missing_returns_none() {
  let s = store().await;
  assert!(s.get_follow_up_with_contact(42).await.unwrap().is_none());
}

// ─── due_on ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn due_on_matches_only_the_given_date() {
  let s = store().await;
  let contact = s.add_contact(NewContact::named("Emma Rodriguez")).await.unwrap();

  s.add_follow_up(NewFollowUp {
    contact_id: contact.id,
    due_date:   jan_15(),
    notes:      None,
  })
  .await
  .unwrap();
  s.add_follow_up(NewFollowUp {
    contact_id: contact.id,
    due_date:   NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(),
    notes:      None,
  })
  .await
  .unwrap();

  let due = s.due_on(jan_15()).await.unwrap();
  assert_eq!(due.len(), 1);
  assert_eq!(due[0].follow_up.due_date, jan_15());
}

#[tokio::test]
async fn due_on_ignores_time_of_day_in_stored_values() {
  // A legacy row whose due_date carries a time component still matches its
  // calendar date.
  let s = store().await;
  let contact = s.add_contact(NewContact::named("David Kim")).await.unwrap();
  let contact_id = contact.id;

  s.conn
    .call(move |conn| {
      conn.execute(
        "INSERT INTO follow_ups (contact_id, due_date, completed, notes)
         VALUES (?1, '2024-01-15 14:30:00', 0, NULL)",
        rusqlite::params![contact_id],
      )?;
      Ok(())
    })
    .await
    .unwrap();

  let due = s.due_on(jan_15()).await.unwrap();
  assert_eq!(due.len(), 1);
  assert_eq!(due[0].follow_up.due_date, jan_15());
}

#[tokio::test]
async fn due_on_excludes_completed_rows() {
  let s = store().await;
  let contact = s.add_contact(NewContact::named("Ben Ortiz")).await.unwrap();

  let open = s
    .add_follow_up(NewFollowUp {
      contact_id: contact.id,
      due_date:   jan_15(),
      notes:      None,
    })
    .await
    .unwrap();
  let done = s
    .add_follow_up(NewFollowUp {
      contact_id: contact.id,
      due_date:   jan_15(),
      notes:      None,
    })
    .await
    .unwrap();
  s.mark_completed(done.id).await.unwrap();

  let due = s.due_on(jan_15()).await.unwrap();
  assert_eq!(due.len(), 1);
  assert_eq!(due[0].follow_up.id, open.id);
}

#[tokio::test]
async fn due_on_empty_when_nothing_due() {
  let s = store().await;
  assert!(s.due_on(jan_15()).await.unwrap().is_empty());
}

// ─── mark_completed ──────────────────────────────────────────────────────────

#[tokio::test]
async fn mark_completed_missing_errors() {
  let s = store().await;
  let err = s.mark_completed(13).await.unwrap_err();
  assert!(matches!(err, crate::Error::FollowUpNotFound(13)));
}

// ─── Seed ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn seed_populates_empty_store_once() {
  let s = store().await;
  s.seed_demo_data().await.unwrap();

  let products = s.list_products().await.unwrap();
  assert_eq!(products.len(), 5);
  assert_eq!(products[0].name, "Fruit Spread"); // ordered by name

  let contacts = s.list_contacts().await.unwrap();
  assert_eq!(contacts.len(), 5);

  // Lisa Thompson carries two interests; everyone else one.
  let lisa = contacts.iter().find(|c| c.name == "Lisa Thompson").unwrap();
  assert_eq!(s.list_interests(lisa.id).await.unwrap().len(), 2);

  // Second invocation is a no-op.
  s.seed_demo_data().await.unwrap();
  assert_eq!(s.list_products().await.unwrap().len(), 5);
  assert_eq!(s.list_contacts().await.unwrap().len(), 5);
}

#[tokio::test]
async fn seed_skips_populated_store() {
  let s = store().await;
  s.add_contact(NewContact::named("Existing Customer")).await.unwrap();
  s.seed_demo_data().await.unwrap();

  // Products were empty and get seeded; contacts are left alone.
  assert_eq!(s.list_products().await.unwrap().len(), 5);
  assert_eq!(s.list_contacts().await.unwrap().len(), 1);
}
