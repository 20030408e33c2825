//! Database models for all entities in the system.
//!
//! This module contains Diesel model definitions for all database tables,
//! including structs for querying, inserting, and updating records.

mod saved_filter;
mod user;

pub use saved_filter::{NewSavedFilter, SavedFilter, UpdateSavedFilter};
pub use user::{NewUser, UpdateUser, User};
