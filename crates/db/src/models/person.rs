//! People (asset holders) models and DTOs.

use assetrack_core::search::Searchable;
use assetrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `people` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Person {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub employee_number: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Searchable for Person {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.name.as_str()),
            Some(self.email.as_str()),
            self.department.as_deref(),
            self.employee_number.as_deref(),
        ]
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreatePerson {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub department: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub employee_number: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct UpdatePerson {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub department: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub employee_number: Option<String>,
    pub is_active: Option<bool>,
}

/// Query parameters for listing people.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonListParams {
    pub search: Option<String>,
    pub department: Option<String>,
    #[serde(default)]
    pub include_inactive: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Everything currently checked out to one person.
#[derive(Debug, Clone, Serialize)]
pub struct PersonHoldings {
    pub person: Person,
    pub assets: Vec<super::asset::Asset>,
    pub licenses: Vec<super::license::License>,
}
