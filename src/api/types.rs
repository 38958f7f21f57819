//! API request and response types.

use serde::{Deserialize, Serialize};

/// Request to research a company.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchCompanyRequest {
    /// Name of the company to look up
    pub company_name: String,
}

/// Error body returned for rejected requests.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Category labels in reporting order.
#[derive(Debug, Clone, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<&'static str>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,

    /// Model used for lookups
    pub model: String,
}
