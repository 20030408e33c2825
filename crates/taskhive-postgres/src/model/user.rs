//! User account model for PostgreSQL database operations.

use diesel::prelude::*;
use jiff_diesel::Timestamp;

use crate::schema::users;
use crate::types::{HasCreatedAt, HasUpdatedAt};

/// User account that owns saved filters.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    /// Unique user identifier.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Presentation name (may be empty).
    pub display_name: String,
    /// Email address.
    pub email: String,
    /// Timestamp when the user was created.
    pub created_at: Timestamp,
    /// Timestamp when the user was last updated.
    pub updated_at: Timestamp,
}

/// Data for creating a new user.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewUser {
    /// Login name.
    pub username: String,
    /// Presentation name.
    pub display_name: Option<String>,
    /// Email address.
    pub email: String,
}

/// Data for updating a user.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateUser {
    /// Login name.
    pub username: Option<String>,
    /// Presentation name.
    pub display_name: Option<String>,
    /// Email address.
    pub email: Option<String>,
}

impl User {
    /// Returns the presentation name, falling back to the username.
    pub fn name(&self) -> &str {
        if self.display_name.is_empty() {
            &self.username
        } else {
            &self.display_name
        }
    }

    /// Returns whether the user has a presentation name.
    pub fn has_display_name(&self) -> bool {
        !self.display_name.is_empty()
    }
}

impl HasCreatedAt for User {
    fn created_at(&self) -> jiff::Timestamp {
        self.created_at.into()
    }
}

impl HasUpdatedAt for User {
    fn updated_at(&self) -> jiff::Timestamp {
        self.updated_at.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(display_name: &str) -> User {
        let now = Timestamp::from(jiff::Timestamp::now());
        User {
            id: 1,
            username: "ada".to_owned(),
            display_name: display_name.to_owned(),
            email: "ada@example.com".to_owned(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn name_falls_back_to_username() {
        assert_eq!(user("").name(), "ada");
        assert_eq!(user("Ada Lovelace").name(), "Ada Lovelace");
    }

    #[test]
    fn display_name_presence() {
        assert!(!user("").has_display_name());
        assert!(user("Ada Lovelace").has_display_name());
    }
}
