//! User record and its operation payloads

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Email;

/// Full user row.
///
/// `id` is store-assigned and immutable. `balance` stays absent until a
/// mutation sets it. `is_active` is a deactivation flag, not a stored
/// constraint on reads.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub balance: Option<Decimal>,
    pub is_active: bool,
}

/// Projection returned by the single-record read operations.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i32,
}

/// Insert payload.
///
/// `is_active` is left to the store default (active).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub age: i32,
    pub balance: Option<Decimal>,
}

/// Partial update payload; unset fields are left untouched by the store.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub balance: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_serializes_projected_fields_only() {
        let summary = UserSummary {
            id: 1,
            name: "Alice".to_string(),
            email: "alice@email.com".to_string(),
            age: 30,
        };

        let json = serde_json::to_value(&summary).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 4);
        assert_eq!(object["email"], "alice@email.com");
    }

    #[test]
    fn balance_serializes_as_decimal_string() {
        let user = User {
            id: 1,
            name: "Alice".to_string(),
            email: "alice@email.com".to_string(),
            age: 30,
            balance: Some(Decimal::new(10_050, 2)),
            is_active: true,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["balance"], "100.50");
    }

    #[test]
    fn default_changes_touch_nothing() {
        let changes = UserChanges::default();
        assert!(changes.name.is_none());
        assert!(changes.age.is_none());
        assert!(changes.balance.is_none());
    }
}
