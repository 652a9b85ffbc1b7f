//! Success envelopes shared by all handlers

use serde::Serialize;

/// Standard success envelope: `{status, data, message}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: u16,
    pub data: T,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            status: 200,
            data,
            message: message.into(),
        }
    }
}

/// Paginated result set with total count for navigation
#[derive(Debug, Serialize)]
pub struct Paged<T: Serialize> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: i64,
}
