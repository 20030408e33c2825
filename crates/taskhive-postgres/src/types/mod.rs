//! Contains filter specs, sorting, pagination, and other custom types.

mod constraints;
mod filter_spec;
mod pagination;
mod sorting;
mod time_helpers;

pub use constraints::{
    ConstraintCategory, ConstraintViolation, SavedFilterConstraints, UserConstraints,
};
pub use filter_spec::{FilterSpec, InvalidFilterSpec, TaskSortField};
pub use pagination::{MAX_LIMIT, OffsetPagination};
pub use sorting::{SavedFilterSortBy, SavedFilterSortField, SortBy, SortOrder};
pub use time_helpers::{HasCreatedAt, HasUpdatedAt};
