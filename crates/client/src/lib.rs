//! Typed client for the assetrack HTTP API.
//!
//! - [`RestClient`] -- JSON requests with the `{ "data": ... }` envelope
//!   decoded and bearer auth attached.
//! - [`AuthSession`] -- login, refresh rotation and logout on top of a
//!   [`RestClient`].
//! - [`RealtimeSubscription`] -- the `/realtime` change feed.
//! - [`ResourceCache`] -- shared per-resource cache with explicit
//!   [`LoadState`], refreshed by [`spawn_refresh`].

pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod realtime;
pub mod refresh;
pub mod rest;

pub use auth::{AuthSession, SessionUser};
pub use cache::{LoadState, ResourceCache};
pub use config::ClientConfig;
pub use error::ClientError;
pub use realtime::RealtimeSubscription;
pub use refresh::spawn_refresh;
pub use rest::RestClient;
