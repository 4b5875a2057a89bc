//! User repository
//!
//! One method per operation of the data-access contract. Conflicts are
//! handled at the database (`ON CONFLICT`), never by check-then-insert;
//! key-based mutations use `RETURNING` so a missed key surfaces as
//! `StoreError::NotFound` instead of a silent zero-row update.

use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

use crate::error::{is_unique_violation, StoreError, StoreResult};
use crate::models::{Email, NewUser, User, UserChanges, UserSummary};

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a single user.
    ///
    /// A duplicate email maps to [`StoreError::Conflict`]; callers decide
    /// whether that aborts anything.
    pub async fn create(&self, user: NewUser) -> StoreResult<User> {
        let created: User = sqlx::query_as(
            r#"
            INSERT INTO users (name, email, age, balance)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, age, balance, is_active
            "#,
        )
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(user.age)
        .bind(user.balance)
        .fetch_one(self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                StoreError::conflict(user.email.as_str())
            } else {
                StoreError::from(err)
            }
        })?;

        Ok(created)
    }

    /// Insert a batch in one statement, skipping rows whose email already
    /// exists. Returns the number of rows actually inserted; partial
    /// success is success.
    pub async fn create_many(&self, users: &[NewUser]) -> StoreResult<u64> {
        if users.is_empty() {
            return Ok(0);
        }

        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO users (name, email, age, balance) ");
        query.push_values(users, |mut row, user| {
            row.push_bind(&user.name)
                .push_bind(user.email.as_str())
                .push_bind(user.age)
                .push_bind(user.balance);
        });
        query.push(" ON CONFLICT (email) DO NOTHING");

        let inserted = query.build().execute(self.pool).await?.rows_affected();
        if inserted < users.len() as u64 {
            debug!(
                skipped = users.len() as u64 - inserted,
                "bulk insert skipped duplicate emails"
            );
        }

        Ok(inserted)
    }

    /// Look up exactly one user by email. Absent is `Ok(None)`, not an error.
    pub async fn find_by_email(&self, email: &Email) -> StoreResult<Option<UserSummary>> {
        let summary: Option<UserSummary> = sqlx::query_as(
            r#"
            SELECT id, name, email, age
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(summary)
    }

    /// First user whose name contains the fragment (case-sensitive,
    /// store-defined ordering when multiple match).
    pub async fn find_first_by_name(&self, fragment: &str) -> StoreResult<Option<UserSummary>> {
        let summary: Option<UserSummary> = sqlx::query_as(
            r#"
            SELECT id, name, email, age
            FROM users
            WHERE name LIKE '%' || $1 || '%' ESCAPE '\'
            LIMIT 1
            "#,
        )
        .bind(escape_like(fragment))
        .fetch_optional(self.pool)
        .await?;

        Ok(summary)
    }

    /// All users with `age >= min_age`, ascending by name.
    pub async fn list_from_age(&self, min_age: i32) -> StoreResult<Vec<User>> {
        let users: Vec<User> = sqlx::query_as(
            r#"
            SELECT id, name, email, age, balance, is_active
            FROM users
            WHERE age >= $1
            ORDER BY name ASC
            "#,
        )
        .bind(min_age)
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    /// Apply the set fields of `changes` to the user with this email.
    ///
    /// Unset fields are left untouched. A missed key is
    /// [`StoreError::NotFound`].
    pub async fn update_by_email(
        &self,
        email: &Email,
        changes: UserChanges,
    ) -> StoreResult<User> {
        let updated: Option<User> = sqlx::query_as(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                age = COALESCE($3, age),
                balance = COALESCE($4, balance)
            WHERE email = $1
            RETURNING id, name, email, age, balance, is_active
            "#,
        )
        .bind(email.as_str())
        .bind(changes.name)
        .bind(changes.age)
        .bind(changes.balance)
        .fetch_optional(self.pool)
        .await?;

        updated.ok_or_else(|| StoreError::not_found("user", email.as_str()))
    }

    /// Deactivate every user with `age < cutoff`.
    ///
    /// Returns the number of matched rows; zero is a valid outcome, and
    /// re-running against the same set reports the same count.
    pub async fn deactivate_below_age(&self, cutoff: i32) -> StoreResult<u64> {
        let affected = sqlx::query("UPDATE users SET is_active = FALSE WHERE age < $1")
            .bind(cutoff)
            .execute(self.pool)
            .await?
            .rows_affected();

        Ok(affected)
    }

    /// Insert-or-update keyed on the payload's email.
    ///
    /// On conflict only the set fields of `update` are applied; everything
    /// else on the existing row stays untouched.
    pub async fn upsert(&self, create: NewUser, update: UserChanges) -> StoreResult<User> {
        let user: User = sqlx::query_as(
            r#"
            INSERT INTO users (name, email, age, balance)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO UPDATE
            SET name = COALESCE($5, users.name),
                age = COALESCE($6, users.age),
                balance = COALESCE($7, users.balance)
            RETURNING id, name, email, age, balance, is_active
            "#,
        )
        .bind(&create.name)
        .bind(create.email.as_str())
        .bind(create.age)
        .bind(create.balance)
        .bind(update.name)
        .bind(update.age)
        .bind(update.balance)
        .fetch_one(self.pool)
        .await?;

        Ok(user)
    }

    /// Remove the user with this email. A missed key is
    /// [`StoreError::NotFound`].
    pub async fn delete_by_email(&self, email: &Email) -> StoreResult<User> {
        let deleted: Option<User> = sqlx::query_as(
            r#"
            DELETE FROM users
            WHERE email = $1
            RETURNING id, name, email, age, balance, is_active
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        deleted.ok_or_else(|| StoreError::not_found("user", email.as_str()))
    }

    /// Remove every user with `age < cutoff`, returning the removed count.
    pub async fn delete_below_age(&self, cutoff: i32) -> StoreResult<u64> {
        let removed = sqlx::query("DELETE FROM users WHERE age < $1")
            .bind(cutoff)
            .execute(self.pool)
            .await?
            .rows_affected();

        Ok(removed)
    }
}

/// Escape LIKE wildcards so containment matching stays literal.
fn escape_like(fragment: &str) -> String {
    fragment
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_passes_plain_fragments() {
        assert_eq!(escape_like("Bianca"), "Bianca");
    }

    #[test]
    fn escape_like_neutralizes_wildcards() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }
}
