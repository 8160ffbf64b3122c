//! Response envelope shared by all handlers.

use serde::Serialize;

/// `{ "data": T }`, the success shape of every `/api/v1` response.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
