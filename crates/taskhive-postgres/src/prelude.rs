//! Prelude module for taskhive-postgres.
//!
//! This module re-exports the most commonly used types and traits from taskhive-postgres,
//! making it easy to import everything you need with a single `use` statement.
//!
//! # Example
//!
//! ```rust
//! use taskhive_postgres::prelude::*;
//!
//! # async fn example() -> PgResult<()> {
//! let config = PgConfig::new("postgresql://localhost/taskhive");
//! let client = config.build()?;
//! # Ok(())
//! # }
//! ```

// Common query traits
pub use diesel::prelude::*;
pub use diesel_async::RunQueryDsl;

// Connection type
pub use crate::PgConnection;
// Client types
pub use crate::client::{
    ConnectionPool, MigrationResult, MigrationStatus, PgClient, PgClientMigrationExt, PgConfig,
    PgConn, PgPoolStatus,
};
// Repository traits
pub use crate::query::{SavedFilterRepository, UserRepository};
// Domain types
pub use crate::types::{
    FilterSpec, OffsetPagination, SavedFilterSortBy, SavedFilterSortField, SortOrder,
    TaskSortField,
};
// Error types
pub use crate::{PgError, PgResult};
