//! Database query repositories for all entities in the system.
//!
//! Repository traits are implemented directly on the async connection, so a
//! [`PgConn`] obtained from [`PgClient::get_connection`] can execute any
//! repository method without further setup. Queries that may return large
//! result sets take an [`OffsetPagination`] to keep responses bounded.
//!
//! [`PgConn`]: crate::PgConn
//! [`PgClient::get_connection`]: crate::PgClient::get_connection
//! [`OffsetPagination`]: crate::types::OffsetPagination

pub mod saved_filter;
pub mod user;

pub use saved_filter::SavedFilterRepository;
pub use user::UserRepository;
