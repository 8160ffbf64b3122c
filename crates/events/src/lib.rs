//! assetrack change feed.
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`, carrying [`ChangeEvent`]s.
//! - [`ChangePersistence`] -- background service that appends every event
//!   to the `change_log` table.

pub mod bus;
pub mod persistence;

pub use assetrack_core::change::{ChangeAction, ChangeEvent};
pub use bus::EventBus;
pub use persistence::ChangePersistence;
