//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- bearer JWT to user id + role.
//! - [`rbac::RequireAuth`] -- any signed-in user (read access).
//! - [`rbac::RequireWriter`] -- `admin` or `manager` (create/update/delete).
//! - [`rbac::RequireAdmin`] -- `admin` only (audit trail).

pub mod auth;
pub mod rbac;
