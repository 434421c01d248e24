//! Shared response envelope for API handlers.
//!
//! Every success response is `{ success: true, data?, message?, pagination? }`
//! with absent members omitted. Use the constructors on [`ApiResponse`]
//! instead of ad-hoc `serde_json::json!` bodies.

use axum::http::StatusCode;
use axum::Json;
use dogland_core::pagination::{Page, PageRequest};
use serde::Serialize;

/// Pagination metadata returned alongside list results.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Pagination {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Standard success envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 with a payload.
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            message: None,
            pagination: None,
        })
    }

    /// 201 with the created record.
    pub fn created(data: T) -> (StatusCode, Json<Self>) {
        (StatusCode::CREATED, Self::ok(data))
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    /// 200 with one page of items and the window that produced it.
    pub fn paginated(page: Page<T>, window: PageRequest) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(page.items),
            message: None,
            pagination: Some(Pagination {
                total: page.total,
                limit: window.limit,
                offset: window.offset,
            }),
        })
    }
}

impl ApiResponse<()> {
    /// 200 with only a message, used by deletes.
    pub fn message(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            data: None,
            message: Some(message.into()),
            pagination: None,
        })
    }
}
