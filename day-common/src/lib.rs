//! # day-common
//!
//! Shared code for the day-site services:
//! - Search hit model and permissive date parsing
//! - Year grouping, group ordering and the upcoming-event classifier
//! - Memoized grouping and the listing view model
//! - Configuration loading
//! - Database initialization and sketch record queries
//! - Shared-secret check for backend routes

pub mod api;
pub mod config;
pub mod dates;
#[cfg(feature = "sqlx")]
pub mod db;
pub mod error;
pub mod grouping;
pub mod hits;
pub mod memo;
pub mod present;
pub mod upcoming;

pub use error::{Error, Result};
pub use grouping::{group_and_sort, group_by_year, sort_groups, YearGroup, YearKey};
pub use hits::{Hit, HitRecord};
pub use memo::GroupingMemo;
