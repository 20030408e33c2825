//! Saved-filter model for PostgreSQL database operations.

use diesel::prelude::*;
use jiff_diesel::Timestamp;

use crate::schema::saved_filters;
use crate::types::{FilterSpec, HasCreatedAt, HasUpdatedAt, InvalidFilterSpec};

/// A persisted, user-owned bundle of task sort, filter, and search parameters.
///
/// The parameter bundle is stored as a jsonb payload; use
/// [`filter_spec`](SavedFilter::filter_spec) for the typed view. The owner is
/// referenced by id only — materializing the owning [`User`] is the job of
/// [`find_saved_filter_with_owner`].
///
/// [`User`]: crate::model::User
/// [`find_saved_filter_with_owner`]: crate::query::SavedFilterRepository::find_saved_filter_with_owner
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = saved_filters)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SavedFilter {
    /// Unique saved-filter identifier.
    pub id: i64,
    /// Short human-readable label.
    pub title: String,
    /// Free-text description (may be empty).
    pub description: String,
    /// Filter parameters as stored.
    pub filters: serde_json::Value,
    /// User that owns this filter.
    pub owner_id: i64,
    /// Timestamp when the filter was created.
    pub created_at: Timestamp,
    /// Timestamp when the filter was last updated.
    pub updated_at: Timestamp,
}

/// Data for creating a new saved filter.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = saved_filters)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewSavedFilter {
    /// Filter title.
    pub title: String,
    /// Filter description.
    pub description: Option<String>,
    /// Filter parameters payload.
    pub filters: serde_json::Value,
    /// Owning user.
    pub owner_id: i64,
}

/// Data for updating a saved filter.
///
/// Timestamps are maintained by the database and are deliberately absent.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = saved_filters)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateSavedFilter {
    /// Title.
    pub title: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Filter parameters payload.
    pub filters: Option<serde_json::Value>,
}

impl NewSavedFilter {
    /// Creates an insert payload from a validated filter spec.
    pub fn new(
        title: impl Into<String>,
        owner_id: i64,
        spec: &FilterSpec,
    ) -> Result<Self, InvalidFilterSpec> {
        Ok(Self {
            title: title.into(),
            description: None,
            filters: spec.to_value()?,
            owner_id,
        })
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl UpdateSavedFilter {
    /// Creates an update that replaces the filter parameters.
    pub fn replace_spec(spec: &FilterSpec) -> Result<Self, InvalidFilterSpec> {
        Ok(Self {
            filters: Some(spec.to_value()?),
            ..Self::default()
        })
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl SavedFilter {
    /// Returns the typed view of the stored filter parameters.
    ///
    /// Fails if the stored payload does not decode into a valid
    /// [`FilterSpec`], which indicates the row was written by a newer or
    /// foreign schema version.
    pub fn filter_spec(&self) -> Result<FilterSpec, InvalidFilterSpec> {
        FilterSpec::from_value(self.filters.clone())
    }

    /// Returns whether the filter has a non-empty description.
    pub fn has_description(&self) -> bool {
        !self.description.is_empty()
    }

    /// Returns whether the given user owns this filter.
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.owner_id == user_id
    }
}

impl HasCreatedAt for SavedFilter {
    fn created_at(&self) -> jiff::Timestamp {
        self.created_at.into()
    }
}

impl HasUpdatedAt for SavedFilter {
    fn updated_at(&self) -> jiff::Timestamp {
        self.updated_at.into()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::{SortOrder, TaskSortField};

    fn saved_filter(filters: serde_json::Value) -> SavedFilter {
        let now = Timestamp::from(jiff::Timestamp::now());
        SavedFilter {
            id: 1,
            title: "Upcoming".to_owned(),
            description: String::new(),
            filters,
            owner_id: 7,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn filter_spec_round_trips_through_storage() {
        let spec = FilterSpec::new()
            .with_sort(TaskSortField::StartDate, SortOrder::Asc)
            .with_filter("done = false");

        let row = saved_filter(spec.to_value().unwrap());
        assert_eq!(row.filter_spec().unwrap(), spec);
    }

    #[test]
    fn filter_spec_rejects_foreign_payloads() {
        let row = saved_filter(json!({ "sort_by": ["due_date"] }));
        assert!(row.filter_spec().is_err());
    }

    #[test]
    fn new_saved_filter_validates_the_spec() {
        let spec = FilterSpec {
            sort_by: vec![TaskSortField::Id],
            order_by: vec![SortOrder::Asc, SortOrder::Desc],
            ..FilterSpec::default()
        };

        assert!(NewSavedFilter::new("Broken", 7, &spec).is_err());

        let spec = FilterSpec::new().with_search("groceries");
        let new_filter = NewSavedFilter::new("Groceries", 7, &spec)
            .unwrap()
            .with_description("Errands board");
        assert_eq!(new_filter.owner_id, 7);
        assert_eq!(new_filter.description.as_deref(), Some("Errands board"));
    }

    #[test]
    fn ownership_check() {
        let row = saved_filter(json!({}));
        assert!(row.is_owned_by(7));
        assert!(!row.is_owned_by(8));
    }
}
