//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//! - A list-parameters struct for `?search=&limit=&offset=` and filters

pub mod accessory;
pub mod alert;
pub mod asset;
pub mod change_log;
pub mod component;
pub mod compliance;
pub mod consumable;
pub mod import_record;
pub mod integration;
pub mod kit;
pub mod license;
pub mod maintenance;
pub mod person;
pub mod report;
pub mod requestable_item;
pub mod session;
pub mod user;
