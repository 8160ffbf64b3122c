//! Long-running tasks spawned from `main`.
//!
//! Each task takes a [`CancellationToken`](tokio_util::sync::CancellationToken)
//! for graceful shutdown.

pub mod expiry_scanner;
