//! Realtime change feed over WebSocket.
//!
//! Clients connect to `/api/v1/realtime?table=<name>`; [`ChangeFeed`] fans
//! bus events out to every connection whose filter matches, and the
//! heartbeat keeps idle connections alive.

mod feed;
mod handler;
mod heartbeat;
pub mod manager;

pub use feed::ChangeFeed;
pub use handler::realtime_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
