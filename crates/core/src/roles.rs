//! Well-known role name constants.
//!
//! These must match the CHECK constraint on `users.role`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_VIEWER: &str = "viewer";

/// Whether the role may create, update or delete inventory rows.
pub fn can_write(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_MANAGER
}
