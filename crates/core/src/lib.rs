//! Domain core for assetrack.
//!
//! Pure types and logic shared by the database, API and client crates.
//! Nothing in here performs I/O; callers pass data in.

pub mod change;
pub mod error;
pub mod integration;
pub mod inventory;
pub mod metrics;
pub mod roles;
pub mod search;
pub mod types;
