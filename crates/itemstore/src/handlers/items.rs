//! Item CRUD handlers.
//!
//! Bodies are taken as raw bytes so a missing body or a missing
//! `Content-Type` header is treated as `{}` instead of being rejected.
//! Extractor rejections are routed through [`ApiError`] to keep the JSON
//! error shape.

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use itemstore_core::item::{parse_body, validate_path_id, Item, UpdateRequest};
use itemstore_core::storage::RepositoryError;
use itemstore_core::update::UpdateExpression;

use super::{
    response::{self, CreatedBody, UpdatedBody, ITEM_CREATED, ITEM_DELETED, ITEM_UPDATED},
    ApiError,
};
use crate::state::AppState;

// ============================================================================
// Create Item
// ============================================================================

/// Create or replace an item (POST /items, PUT /items).
pub async fn create_item(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = body?;
    tracing::debug!(bytes = body.len(), "Create item request");

    let item = Item::from_json(parse_body(&body)?)?;
    state.item_repo.put_item(&item).await?;

    tracing::info!(id = %item.id(), "Item created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedBody {
            message: ITEM_CREATED,
            item,
        }),
    ))
}

// ============================================================================
// Read Item
// ============================================================================

/// Get a single item by id (GET /items/{id}).
pub async fn get_item(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Item>, ApiError> {
    let Path(id) = path?;
    let id = validate_path_id(&id)?;
    tracing::debug!(id = %id, "Get item request");

    let item = state
        .item_repo
        .get_item(id)
        .await?
        .ok_or_else(|| RepositoryError::NotFound { id: id.to_string() })?;

    tracing::info!(id = %id, "Item retrieved");
    Ok(Json(item))
}

// ============================================================================
// Update Item
// ============================================================================

/// Set the given attributes on an existing item (PUT/PATCH /items/{id}).
///
/// Only the attributes named in the body change. An `id` in the body is
/// ignored; the path decides which item is updated.
pub async fn update_item(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<UpdatedBody>, ApiError> {
    let Path(id) = path?;
    let body = body?;
    let id = validate_path_id(&id)?;
    tracing::debug!(id = %id, bytes = body.len(), "Update item request");

    let request = UpdateRequest::from_json(parse_body(&body)?)?;
    let update = UpdateExpression::build(&request)?;

    tracing::debug!(id = %id, expression = %update, "Built update expression");

    let updated_attributes = state.item_repo.update_item(id, &update).await?;

    tracing::info!(
        id = %id,
        attributes = updated_attributes.len(),
        "Item updated"
    );

    Ok(Json(UpdatedBody {
        message: ITEM_UPDATED,
        updated_attributes,
    }))
}

// ============================================================================
// Delete Item
// ============================================================================

/// Delete an item by id (DELETE /items/{id}). Succeeds for missing items.
pub async fn delete_item(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = path?;
    let id = validate_path_id(&id)?;
    tracing::debug!(id = %id, "Delete item request");

    state.item_repo.delete_item(id).await?;

    tracing::info!(id = %id, "Item deleted");
    Ok(response::message(StatusCode::OK, ITEM_DELETED))
}
