//! HTTP handlers, one module per resource.
//!
//! Reads take [`RequireAuth`](crate::middleware::rbac::RequireAuth); every
//! mutation takes [`RequireWriter`](crate::middleware::rbac::RequireWriter)
//! and publishes a change event after the write succeeds.

pub mod accessories;
pub mod alerts;
pub mod assets;
pub mod auth;
pub mod changes;
pub mod compliance;
pub mod components;
pub mod consumables;
pub mod dashboard;
pub mod imports;
pub mod integrations;
pub mod kits;
pub mod licenses;
pub mod maintenance;
pub mod people;
pub mod reports;
pub mod requestable_items;
