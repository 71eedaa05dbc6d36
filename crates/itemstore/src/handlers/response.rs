//! JSON response bodies shared by the item handlers.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};

use itemstore_core::item::Item;

/// Headers the browser may send on cross-origin requests.
pub const CORS_ALLOW_HEADERS: &str =
    "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token";

/// Methods the API answers cross-origin.
pub const CORS_ALLOW_METHODS: &str = "DELETE,GET,OPTIONS,PATCH,POST,PUT";

pub const ITEM_CREATED: &str = "Item created successfully";
pub const ITEM_UPDATED: &str = "Item updated successfully";
pub const ITEM_DELETED: &str = "Item deleted successfully";
pub const ITEM_NOT_FOUND: &str = "Item not found";
pub const INTERNAL_ERROR: &str = "Internal server error";
pub const SERVICE_UNAVAILABLE: &str = "Service unavailable";
pub const ROUTE_NOT_FOUND: &str = "Not found";
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";

/// `{"message": "..."}`
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

/// Body of a successful create.
#[derive(Debug, Serialize)]
pub struct CreatedBody {
    pub message: &'static str,
    pub item: Item,
}

/// Body of a successful update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedBody {
    pub message: &'static str,
    pub updated_attributes: Map<String, Value>,
}

/// Builds a `{"message": ...}` response with the given status.
pub fn message(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(MessageBody {
            message: message.into(),
        }),
    )
        .into_response()
}

/// Gives bodiless error responses from middleware, such as the request
/// timeout, a `{"message": ...}` body. Headers already set are kept.
pub async fn ensure_json_error(response: Response) -> Response {
    let status = response.status();
    let is_error = status.is_client_error() || status.is_server_error();
    if !is_error || response.headers().contains_key(header::CONTENT_TYPE) {
        return response;
    }

    let reason = status.canonical_reason().unwrap_or(INTERNAL_ERROR);
    let (mut parts, _) = response.into_parts();
    let (json_parts, body) = message(status, reason).into_parts();

    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.extend(json_parts.headers);
    Response::from_parts(parts, body)
}
