//! Software license models and DTOs.

use assetrack_core::metrics::InventoryRecord;
use assetrack_core::search::Searchable;
use assetrack_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `licenses` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct License {
    pub id: DbId,
    pub name: String,
    pub product_key: Option<String>,
    pub manufacturer: Option<String>,
    pub category: Option<String>,
    pub seats: i32,
    pub available_seats: i32,
    pub purchase_cost: Option<f64>,
    pub purchase_date: Option<Date>,
    pub expiration_date: Option<Date>,
    pub assigned_to: Option<DbId>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl License {
    /// Seats currently checked out.
    pub fn used_seats(&self) -> i32 {
        self.seats - self.available_seats
    }
}

impl InventoryRecord for License {
    fn monetary_value(&self) -> Option<f64> {
        self.purchase_cost
    }

    fn expires_on(&self) -> Option<Date> {
        self.expiration_date
    }
}

impl Searchable for License {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.name.as_str()),
            self.category.as_deref(),
            self.manufacturer.as_deref(),
        ]
    }
}

/// DTO for creating a license. `available_seats` defaults to `seats`.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateLicense {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub product_key: Option<String>,
    pub manufacturer: Option<String>,
    pub category: Option<String>,
    #[validate(range(min = 0))]
    pub seats: i32,
    #[validate(range(min = 0))]
    pub available_seats: Option<i32>,
    pub purchase_cost: Option<f64>,
    pub purchase_date: Option<Date>,
    pub expiration_date: Option<Date>,
    pub assigned_to: Option<DbId>,
    pub notes: Option<String>,
}

/// DTO for updating a license. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct UpdateLicense {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub product_key: Option<String>,
    pub manufacturer: Option<String>,
    pub category: Option<String>,
    #[validate(range(min = 0))]
    pub seats: Option<i32>,
    #[validate(range(min = 0))]
    pub available_seats: Option<i32>,
    pub purchase_cost: Option<f64>,
    pub purchase_date: Option<Date>,
    pub expiration_date: Option<Date>,
    pub assigned_to: Option<DbId>,
    pub notes: Option<String>,
}

/// Query parameters for listing licenses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LicenseListParams {
    pub search: Option<String>,
    pub category: Option<String>,
    /// Only licenses that still have an available seat.
    #[serde(default)]
    pub available_only: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
