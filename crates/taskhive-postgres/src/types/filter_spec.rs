//! Typed view of the saved-filter jsonb payload.
//!
//! A saved filter bundles the sort, filter, and search parameters of a task
//! listing so the same view can be restored later. The bundle is persisted
//! as a jsonb column on the `saved_filters` table; [`FilterSpec`] is its
//! typed shape on the Rust side.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::sorting::{SortBy, SortOrder};

/// Task fields a saved filter can sort by.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum TaskSortField {
    /// Sort by the task start date.
    StartDate,
    /// Sort by completion state.
    Done,
    /// Sort by task identifier.
    Id,
    /// Sort by manual position.
    #[default]
    Position,
}

/// Error produced when decoding or validating a filter spec.
#[derive(Debug, thiserror::Error)]
pub enum InvalidFilterSpec {
    /// The payload does not decode into a filter spec.
    ///
    /// This covers unknown sort tokens, non-boolean `filter_include_nulls`
    /// values, and structurally malformed json.
    #[error("malformed filter payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// More sort directions than sort keys.
    #[error("{orders} sort directions given for {sort_keys} sort keys")]
    UnpairedOrder {
        /// Number of entries in `sort_by`.
        sort_keys: usize,
        /// Number of entries in `order_by`.
        orders: usize,
    },
}

/// Sort, filter, and search parameters of a saved task view.
///
/// `sort_by` and `order_by` pair positionally: the direction at index `i`
/// applies to the sort key at index `i`. Directions may be omitted from the
/// tail (missing directions sort ascending, see [`sort_pairs`]) but a
/// direction without a matching sort key is rejected by [`validate`].
///
/// The `filter` expression and the `s` search string are distinct inputs:
/// `filter` is a structured expression owned by the task query engine, `s`
/// is matched as plain text. Both are stored verbatim.
///
/// [`sort_pairs`]: FilterSpec::sort_pairs
/// [`validate`]: FilterSpec::validate
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct FilterSpec {
    /// Sort keys in precedence order.
    #[serde(default)]
    pub sort_by: Vec<TaskSortField>,
    /// Sort directions, paired positionally with `sort_by`.
    #[serde(default)]
    pub order_by: Vec<SortOrder>,
    /// Filter expression in the task query language.
    #[serde(default)]
    pub filter: String,
    /// Whether null-valued fields pass the filter.
    #[serde(default)]
    pub filter_include_nulls: bool,
    /// Free-text search string.
    #[serde(default)]
    pub s: String,
}

impl FilterSpec {
    /// Creates an empty filter spec.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sort key with an explicit direction.
    #[inline]
    pub fn with_sort(mut self, field: TaskSortField, order: SortOrder) -> Self {
        self.sort_by.push(field);
        self.order_by.push(order);
        self
    }

    /// Sets the filter expression.
    #[inline]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Sets the free-text search string.
    #[inline]
    pub fn with_search(mut self, s: impl Into<String>) -> Self {
        self.s = s.into();
        self
    }

    /// Lets null-valued fields pass the filter.
    #[inline]
    pub fn include_nulls(mut self) -> Self {
        self.filter_include_nulls = true;
        self
    }

    /// Returns whether the spec applies no sorting, filtering, or search.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sort_by.is_empty() && self.filter.is_empty() && self.s.is_empty()
    }

    /// Checks the positional pairing invariant.
    ///
    /// `order_by` may be shorter than `sort_by` but never longer: a surplus
    /// direction has no sort key to apply to.
    pub fn validate(&self) -> Result<(), InvalidFilterSpec> {
        if self.order_by.len() > self.sort_by.len() {
            return Err(InvalidFilterSpec::UnpairedOrder {
                sort_keys: self.sort_by.len(),
                orders: self.order_by.len(),
            });
        }

        Ok(())
    }

    /// Returns the sort keys paired with their directions.
    ///
    /// Keys without an explicit direction sort ascending.
    pub fn sort_pairs(&self) -> impl Iterator<Item = SortBy<TaskSortField>> + '_ {
        self.sort_by.iter().enumerate().map(|(idx, field)| SortBy {
            field: *field,
            order: self.order_by.get(idx).copied().unwrap_or(SortOrder::Asc),
        })
    }

    /// Decodes a spec from a stored jsonb payload and validates it.
    pub fn from_value(value: serde_json::Value) -> Result<Self, InvalidFilterSpec> {
        let spec: Self = serde_json::from_value(value)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Encodes the spec into a jsonb payload for storage.
    pub fn to_value(&self) -> Result<serde_json::Value, InvalidFilterSpec> {
        self.validate()?;
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn round_trip_identity() {
        let spec = FilterSpec {
            sort_by: vec![TaskSortField::Position],
            order_by: vec![SortOrder::Asc],
            filter: String::new(),
            filter_include_nulls: false,
            s: String::new(),
        };

        let decoded = FilterSpec::from_value(spec.to_value().unwrap()).unwrap();
        assert_eq!(decoded, spec);
    }

    #[test]
    fn round_trip_full_spec() {
        let spec = FilterSpec::new()
            .with_sort(TaskSortField::Done, SortOrder::Asc)
            .with_sort(TaskSortField::StartDate, SortOrder::Desc)
            .with_filter("done = false && start_date > now")
            .with_search("groceries")
            .include_nulls();

        let decoded = FilterSpec::from_value(spec.to_value().unwrap()).unwrap();
        assert_eq!(decoded, spec);
    }

    #[test]
    fn sort_tokens_are_closed() {
        let result = FilterSpec::from_value(json!({ "sort_by": ["due_date"] }));
        assert!(matches!(result, Err(InvalidFilterSpec::Payload(_))));

        let result = FilterSpec::from_value(json!({
            "sort_by": ["start_date", "done", "id", "position"],
        }));
        assert!(result.is_ok());
    }

    #[test]
    fn order_tokens_are_closed() {
        let result = FilterSpec::from_value(json!({
            "sort_by": ["id"],
            "order_by": ["descending"],
        }));
        assert!(matches!(result, Err(InvalidFilterSpec::Payload(_))));
    }

    #[test]
    fn include_nulls_must_be_boolean() {
        let result = FilterSpec::from_value(json!({ "filter_include_nulls": 1 }));
        assert!(matches!(result, Err(InvalidFilterSpec::Payload(_))));

        let spec = FilterSpec::from_value(json!({ "filter_include_nulls": true })).unwrap();
        assert!(spec.filter_include_nulls);
    }

    #[test]
    fn serialized_tokens_are_snake_case() {
        let spec = FilterSpec::new().with_sort(TaskSortField::StartDate, SortOrder::Desc);
        let value = spec.to_value().unwrap();

        assert_eq!(value["sort_by"], json!(["start_date"]));
        assert_eq!(value["order_by"], json!(["desc"]));
    }

    #[test]
    fn missing_directions_sort_ascending() {
        let spec = FilterSpec::from_value(json!({
            "sort_by": ["done", "id"],
            "order_by": ["desc"],
        }))
        .unwrap();

        let pairs: Vec<_> = spec.sort_pairs().collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], SortBy::desc(TaskSortField::Done));
        assert_eq!(pairs[1], SortBy::asc(TaskSortField::Id));
    }

    #[test]
    fn surplus_directions_are_rejected() {
        let result = FilterSpec::from_value(json!({
            "sort_by": ["id"],
            "order_by": ["asc", "desc"],
        }));

        assert!(matches!(
            result,
            Err(InvalidFilterSpec::UnpairedOrder {
                sort_keys: 1,
                orders: 2,
            })
        ));
    }

    #[test]
    fn empty_payload_decodes_to_defaults() {
        let spec = FilterSpec::from_value(json!({})).unwrap();
        assert_eq!(spec, FilterSpec::default());
        assert!(spec.is_empty());
    }
}
