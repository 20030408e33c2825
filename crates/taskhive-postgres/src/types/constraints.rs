//! Database constraint violations organized by table.
//!
//! Constraint names raised by PostgreSQL are parsed into typed violations so
//! callers can map them to user-facing messages instead of string-matching
//! database errors. The names here must stay in sync with the migrations.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Categories of database constraint violations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintCategory {
    /// Data validation constraints (format, length, range checks).
    Validation,
    /// Chronological integrity constraints (timestamp relationships).
    Chronological,
    /// Uniqueness constraints (primary keys, unique indexes).
    Uniqueness,
    /// Referential integrity constraints (foreign keys).
    Reference,
}

/// Users table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum UserConstraints {
    // User validation constraints
    #[strum(serialize = "users_username_not_empty")]
    UsernameNotEmpty,
    #[strum(serialize = "users_username_length_max")]
    UsernameLengthMax,
    #[strum(serialize = "users_email_length_max")]
    EmailLengthMax,

    // User chronological constraints
    #[strum(serialize = "users_updated_after_created")]
    UpdatedAfterCreated,

    // User unique constraints
    #[strum(serialize = "users_username_unique_idx")]
    UsernameUnique,
    #[strum(serialize = "users_email_unique_idx")]
    EmailUnique,
}

impl UserConstraints {
    /// Creates a new [`UserConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            UserConstraints::UsernameNotEmpty
            | UserConstraints::UsernameLengthMax
            | UserConstraints::EmailLengthMax => ConstraintCategory::Validation,

            UserConstraints::UpdatedAfterCreated => ConstraintCategory::Chronological,

            UserConstraints::UsernameUnique | UserConstraints::EmailUnique => {
                ConstraintCategory::Uniqueness
            }
        }
    }
}

impl From<UserConstraints> for String {
    #[inline]
    fn from(val: UserConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for UserConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Saved-filters table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum SavedFilterConstraints {
    // Saved-filter validation constraints
    #[strum(serialize = "saved_filters_title_not_empty")]
    TitleNotEmpty,
    #[strum(serialize = "saved_filters_title_length_max")]
    TitleLengthMax,

    // Saved-filter chronological constraints
    #[strum(serialize = "saved_filters_updated_after_created")]
    UpdatedAfterCreated,

    // Saved-filter reference constraints
    #[strum(serialize = "saved_filters_owner_fkey")]
    OwnerFk,
}

impl SavedFilterConstraints {
    /// Creates a new [`SavedFilterConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            SavedFilterConstraints::TitleNotEmpty | SavedFilterConstraints::TitleLengthMax => {
                ConstraintCategory::Validation
            }

            SavedFilterConstraints::UpdatedAfterCreated => ConstraintCategory::Chronological,

            SavedFilterConstraints::OwnerFk => ConstraintCategory::Reference,
        }
    }
}

impl From<SavedFilterConstraints> for String {
    #[inline]
    fn from(val: SavedFilterConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for SavedFilterConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Unified constraint violation enum that can represent any database constraint.
///
/// This enum wraps the per-table constraint types, providing a single
/// interface for handling any constraint violation raised by a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ConstraintViolation {
    /// A constraint on the `users` table.
    User(UserConstraints),
    /// A constraint on the `saved_filters` table.
    SavedFilter(SavedFilterConstraints),
}

impl ConstraintViolation {
    /// Creates a new [`ConstraintViolation`] from the constraint name.
    ///
    /// Returns `None` if the constraint name is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskhive_postgres::types::ConstraintViolation;
    ///
    /// let violation = ConstraintViolation::new("users_username_unique_idx");
    /// assert!(violation.is_some());
    ///
    /// let unknown = ConstraintViolation::new("unknown_constraint");
    /// assert!(unknown.is_none());
    /// ```
    pub fn new(constraint: &str) -> Option<Self> {
        // Route based on constraint name prefix to avoid parsing
        // against every table's constraint set.
        if constraint.starts_with("users_") {
            if let Some(c) = UserConstraints::new(constraint) {
                return Some(ConstraintViolation::User(c));
            }
        } else if constraint.starts_with("saved_filters_")
            && let Some(c) = SavedFilterConstraints::new(constraint)
        {
            return Some(ConstraintViolation::SavedFilter(c));
        }

        None
    }

    /// Returns the table name associated with this constraint.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConstraintViolation::User(_) => "users",
            ConstraintViolation::SavedFilter(_) => "saved_filters",
        }
    }

    /// Returns the category of this constraint violation.
    pub fn constraint_category(&self) -> ConstraintCategory {
        match self {
            ConstraintViolation::User(c) => c.categorize(),
            ConstraintViolation::SavedFilter(c) => c.categorize(),
        }
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintViolation::User(c) => c.fmt(f),
            ConstraintViolation::SavedFilter(c) => c.fmt(f),
        }
    }
}

impl From<ConstraintViolation> for String {
    #[inline]
    fn from(val: ConstraintViolation) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for ConstraintViolation {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ConstraintViolation::new(&value).ok_or(strum::ParseError::VariantNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_constraint_names() {
        assert_eq!(
            ConstraintViolation::new("users_username_unique_idx"),
            Some(ConstraintViolation::User(UserConstraints::UsernameUnique))
        );
        assert_eq!(
            ConstraintViolation::new("saved_filters_owner_fkey"),
            Some(ConstraintViolation::SavedFilter(
                SavedFilterConstraints::OwnerFk
            ))
        );
    }

    #[test]
    fn rejects_unknown_constraint_names() {
        assert_eq!(ConstraintViolation::new("unknown_constraint"), None);
        assert_eq!(ConstraintViolation::new("users_unknown"), None);
        assert_eq!(ConstraintViolation::new("saved_filters_unknown"), None);
    }

    #[test]
    fn categorizes_violations() {
        let violation = ConstraintViolation::new("saved_filters_title_not_empty").unwrap();
        assert_eq!(
            violation.constraint_category(),
            ConstraintCategory::Validation
        );
        assert_eq!(violation.table_name(), "saved_filters");

        let violation = ConstraintViolation::new("saved_filters_owner_fkey").unwrap();
        assert_eq!(
            violation.constraint_category(),
            ConstraintCategory::Reference
        );

        let violation = ConstraintViolation::new("users_updated_after_created").unwrap();
        assert_eq!(
            violation.constraint_category(),
            ConstraintCategory::Chronological
        );
    }

    #[test]
    fn round_trips_through_strings() {
        let violation = ConstraintViolation::new("users_email_unique_idx").unwrap();
        let name = String::from(violation.clone());
        assert_eq!(name, "users_email_unique_idx");
        assert_eq!(ConstraintViolation::try_from(name).unwrap(), violation);
    }
}
