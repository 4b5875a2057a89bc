//! The fixed CRUD sequence.
//!
//! Eleven steps executed strictly in order, each awaited before the
//! next. Error policy by class: single-record creates recover from
//! conflicts locally and the sequence continues; bulk operations report
//! counts instead of failing on duplicates; keyed updates, upserts, and
//! deletes propagate and abort the remaining steps. The caller owns the
//! store session and releases it on either outcome.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{error, info};

use userctl_core::{Email, NewUser, StoreResult, UserChanges, UserRepo};

/// Caller-level adult cutoff; the store enforces no age range.
const ADULT_AGE: i32 = 18;

/// Run the demo sequence against the store.
pub async fn run_sequence(repo: &UserRepo<'_>) -> StoreResult<()> {
    info!("starting crud sequence");

    // Create
    create_logged(
        repo,
        NewUser {
            name: "Alice".to_string(),
            email: Email::parse("alice@email.com")?,
            age: 30,
            balance: None,
        },
    )
    .await;

    create_logged(
        repo,
        NewUser {
            name: "Bianca".to_string(),
            email: Email::parse("bianca@email.com")?,
            age: 30,
            balance: None,
        },
    )
    .await;

    let batch = seed_batch()?;
    info!(size = batch.len(), "bulk creating users, skipping duplicates");
    match repo.create_many(&batch).await {
        Ok(count) => info!(count, "bulk create finished"),
        Err(err) => error!(%err, "failed to bulk create users"),
    }

    // Read
    info!(email = "alice@email.com", "finding user by email");
    let found = repo.find_by_email(&Email::parse("alice@email.com")?).await?;
    info!(result = %render(&found), "find unique finished");

    info!(fragment = "Bianca", "finding first user by name fragment");
    let found = repo.find_first_by_name("Bianca").await?;
    info!(result = %render(&found), "find first finished");

    info!(min_age = ADULT_AGE, "listing users of age");
    let adults = repo.list_from_age(ADULT_AGE).await?;
    info!(count = adults.len(), result = %render(&adults), "find many finished");

    // Update
    info!(email = "alice@email.com", "updating user");
    let updated = repo
        .update_by_email(
            &Email::parse("alice@email.com")?,
            UserChanges {
                name: Some("Alice Updated".to_string()),
                age: None,
                balance: Some(Decimal::new(10_050, 2)),
            },
        )
        .await?;
    info!(result = %render(&updated), "update finished");

    info!(below_age = ADULT_AGE, "deactivating minors");
    let count = repo.deactivate_below_age(ADULT_AGE).await?;
    info!(count, "update many finished");

    // Upsert
    info!(email = "david@email.com", "upserting user");
    let upserted = repo
        .upsert(
            NewUser {
                name: "David".to_string(),
                email: Email::parse("david@email.com")?,
                age: 28,
                balance: Some(Decimal::new(10_000, 2)),
            },
            UserChanges {
                name: Some("David Updated".to_string()),
                age: Some(40),
                balance: Some(Decimal::new(20_000, 2)),
            },
        )
        .await?;
    info!(result = %render(&upserted), "upsert finished");

    // Delete
    info!(email = "bianca@email.com", "deleting user");
    let deleted = repo.delete_by_email(&Email::parse("bianca@email.com")?).await?;
    info!(result = %render(&deleted), "delete finished");

    info!(below_age = ADULT_AGE, "deleting minors");
    let count = repo.delete_below_age(ADULT_AGE).await?;
    info!(count, "delete many finished");

    Ok(())
}

/// Single-record create: conflicts are logged and the sequence continues.
async fn create_logged(repo: &UserRepo<'_>, user: NewUser) {
    let name = user.name.clone();
    info!(user = %name, "creating user");
    match repo.create(user).await {
        Ok(created) => info!(id = created.id, user = %name, "created user"),
        Err(err) => error!(%err, user = %name, "failed to create user"),
    }
}

/// The four-user batch for the bulk-create step.
fn seed_batch() -> StoreResult<Vec<NewUser>> {
    Ok(vec![
        NewUser {
            name: "Charlie".to_string(),
            email: Email::parse("charlie@email.com")?,
            age: 27,
            balance: None,
        },
        NewUser {
            name: "David".to_string(),
            email: Email::parse("david@email.com")?,
            age: 17,
            balance: None,
        },
        NewUser {
            name: "Eve".to_string(),
            email: Email::parse("eve@email.com")?,
            age: 26,
            balance: None,
        },
        NewUser {
            name: "Frank".to_string(),
            email: Email::parse("frank@email.com")?,
            age: 16,
            balance: None,
        },
    ])
}

/// Render a query result as JSON for the step log line.
fn render<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| format!("<unserializable: {err}>"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_batch_has_four_distinct_emails() {
        let batch = seed_batch().unwrap();
        assert_eq!(batch.len(), 4);

        let mut emails: Vec<&str> = batch.iter().map(|u| u.email.as_str()).collect();
        emails.sort();
        emails.dedup();
        assert_eq!(emails.len(), 4);
    }

    #[test]
    fn seed_batch_spans_the_adult_cutoff() {
        let batch = seed_batch().unwrap();
        assert!(batch.iter().any(|u| u.age >= ADULT_AGE));
        assert!(batch.iter().any(|u| u.age < ADULT_AGE));
    }

    #[test]
    fn render_handles_options_and_sequences() {
        let nothing: Option<i32> = None;
        assert_eq!(render(&nothing), "null");
        assert_eq!(render(&vec![1, 2]), "[1,2]");
    }
}
