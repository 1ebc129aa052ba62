use serde::{Deserialize, Serialize};

/// Form body for the lookup endpoint.
#[derive(Debug, Deserialize)]
pub struct LookupForm {
    pub barcode: String,
}

/// Error response format.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}
