//! Sorting options for database queries.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Sort order direction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Ascending order (A-Z, oldest first, smallest first).
    #[default]
    Asc,
    /// Descending order (Z-A, newest first, largest first).
    Desc,
}

impl SortOrder {
    /// Returns the opposite direction.
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Generic sort specification with field and order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SortBy<F> {
    /// The field to sort by.
    pub field: F,
    /// The sort order direction.
    #[serde(default)]
    pub order: SortOrder,
}

impl<F: Default> Default for SortBy<F> {
    fn default() -> Self {
        Self {
            field: F::default(),
            order: SortOrder::default(),
        }
    }
}

impl<F> SortBy<F> {
    /// Creates a new sort specification with the given field and order.
    #[inline]
    pub fn new(field: F, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Creates a new sort specification with ascending order.
    #[inline]
    pub fn asc(field: F) -> Self {
        Self {
            field,
            order: SortOrder::Asc,
        }
    }

    /// Creates a new sort specification with descending order.
    #[inline]
    pub fn desc(field: F) -> Self {
        Self {
            field,
            order: SortOrder::Desc,
        }
    }

    /// Returns whether the sort order is ascending.
    #[inline]
    pub fn is_asc(&self) -> bool {
        matches!(self.order, SortOrder::Asc)
    }

    /// Returns whether the sort order is descending.
    #[inline]
    pub fn is_desc(&self) -> bool {
        matches!(self.order, SortOrder::Desc)
    }
}

/// Fields available for sorting saved-filter listings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum SavedFilterSortField {
    /// Sort by filter title.
    Title,
    /// Sort by creation date.
    Created,
    /// Sort by last modification date.
    #[default]
    Updated,
}

/// Sorting specification for saved-filter listings.
pub type SavedFilterSortBy = SortBy<SavedFilterSortField>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_by_constructors() {
        let sort = SavedFilterSortBy::asc(SavedFilterSortField::Title);
        assert!(sort.is_asc());
        assert_eq!(sort.field, SavedFilterSortField::Title);

        let sort = SavedFilterSortBy::desc(SavedFilterSortField::Created);
        assert!(sort.is_desc());
    }

    #[test]
    fn sort_by_default() {
        let sort = SavedFilterSortBy::default();
        assert_eq!(sort.field, SavedFilterSortField::Updated);
        assert!(sort.is_asc());
    }

    #[test]
    fn sort_order_reversed() {
        assert_eq!(SortOrder::Asc.reversed(), SortOrder::Desc);
        assert_eq!(SortOrder::Desc.reversed(), SortOrder::Asc);
    }

    #[test]
    fn sort_order_tokens() {
        let json = serde_json::to_string(&SortOrder::Asc).unwrap();
        assert_eq!(json, "\"asc\"");
        let json = serde_json::to_string(&SortOrder::Desc).unwrap();
        assert_eq!(json, "\"desc\"");
    }
}
