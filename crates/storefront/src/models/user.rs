//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use tamarind_core::{Email, UserId};

/// A storefront user (domain type).
///
/// The password hash never leaves the repository layer; see
/// `UserRepository::get_password_hash`.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Full display name.
    pub name: String,
    pub username: String,
    /// Completed-order count feeding the loyalty tiers.
    pub reward_progress: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// First word of the display name, used as the delivery first name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("Customer")
    }

    /// Everything after the first word of the display name.
    #[must_use]
    pub fn last_name(&self) -> String {
        self.name
            .split_whitespace()
            .skip(1)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn user(name: &str) -> User {
        User {
            id: UserId::new(1),
            email: Email::parse("a@b.c").unwrap(),
            name: name.to_string(),
            username: "tester".to_string(),
            reward_progress: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_name_split() {
        let u = user("Ada Obi Lovelace");
        assert_eq!(u.first_name(), "Ada");
        assert_eq!(u.last_name(), "Obi Lovelace");
    }

    #[test]
    fn test_single_word_name() {
        let u = user("Ada");
        assert_eq!(u.first_name(), "Ada");
        assert_eq!(u.last_name(), "");
    }

    #[test]
    fn test_empty_name_falls_back() {
        let u = user("");
        assert_eq!(u.first_name(), "Customer");
        assert_eq!(u.last_name(), "");
    }
}
