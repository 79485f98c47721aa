//! Item route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::catalog::Item;
use crate::images::{self, ImageKind};
use crate::popularity::Period;

use super::super::{error::ApiError, state::AppState};

/// Pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_page_limit")]
    pub limit: i64,
}

fn default_page_limit() -> i64 {
    100
}

fn default_search_limit() -> usize {
    50
}

/// List items with pagination.
pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Json<Vec<Item>> {
    let (page, _total) = state.query.items_page(params.skip, params.limit);
    Json(page.into_iter().cloned().collect())
}

/// Universal search query parameters.
#[derive(Debug, Deserialize)]
pub struct FindParams {
    pub query: String,
    #[serde(default = "default_search_limit")]
    pub limit: usize,
}

/// Universal search: by id when the query is numeric, by name otherwise.
pub async fn find_items(
    State(state): State<AppState>,
    Query(params): Query<FindParams>,
) -> Result<Json<Vec<Item>>, ApiError> {
    let matches = state.query.find_items(&params.query, params.limit);
    if matches.is_empty() {
        return Err(ApiError::no_match("items", &params.query));
    }
    Ok(Json(matches.into_iter().cloned().collect()))
}

/// Name search query parameters.
#[derive(Debug, Deserialize)]
pub struct NameSearchParams {
    pub name: String,
    #[serde(default)]
    pub exact: bool,
    #[serde(default = "default_search_limit")]
    pub limit: usize,
}

/// Search items by name (partial or exact match).
pub async fn search_by_name(
    State(state): State<AppState>,
    Query(params): Query<NameSearchParams>,
) -> Result<Json<Vec<Item>>, ApiError> {
    let mut matches = state.query.search_items(&params.name, params.exact);
    if matches.is_empty() {
        return Err(ApiError::no_match("items", &params.name));
    }
    matches.truncate(params.limit);
    Ok(Json(matches.into_iter().cloned().collect()))
}

/// Type filter query parameters.
#[derive(Debug, Deserialize)]
pub struct TypeFilterParams {
    pub item_type: String,
}

/// Filter items by type.
pub async fn filter_by_type(
    State(state): State<AppState>,
    Query(params): Query<TypeFilterParams>,
) -> Result<Json<Vec<Item>>, ApiError> {
    let matches = state.query.items_by_type(&params.item_type);
    if matches.is_empty() {
        return Err(ApiError::no_match("items of type", &params.item_type));
    }
    Ok(Json(matches.into_iter().cloned().collect()))
}

/// Popularity query parameters.
#[derive(Debug, Deserialize)]
pub struct PopularParams {
    #[serde(default = "default_popular_limit")]
    pub limit: usize,
}

fn default_popular_limit() -> usize {
    10
}

/// Most viewed items for a report window, enriched with catalog fields.
pub async fn popular_items(
    State(state): State<AppState>,
    Path(period): Path<String>,
    Query(params): Query<PopularParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let period: Period = period
        .parse()
        .map_err(|err| ApiError::invalid_period(&err))?;

    let ranking: Vec<serde_json::Value> = state
        .query
        .popular_items(period, Some(params.limit))
        .into_iter()
        .map(|entry| {
            serde_json::json!({
                "item_id": entry.item.id,
                "name": entry.item.name,
                "type": entry.item.item_type,
                "view_count": entry.view_count,
                "sprite": entry.item.aegis_name.to_lowercase(),
            })
        })
        .collect();

    Ok(Json(serde_json::json!({
        "period": period.as_str(),
        "items": ranking,
    })))
}

/// Get a specific item by id. Records a view.
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Item>, ApiError> {
    let item = state
        .query
        .snapshot()
        .item(id)
        .cloned()
        .ok_or_else(|| ApiError::item_not_found(id))?;

    // View recording persists to disk; keep that off the async workers.
    let query = state.query.clone();
    if tokio::task::spawn_blocking(move || query.record_item_view(id))
        .await
        .is_err()
    {
        tracing::warn!(item_id = id, "view recording task aborted");
    }

    Ok(Json(item))
}

/// View statistics for a specific item. Does not record a view.
pub async fn item_stats(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let snapshot = state.query.snapshot();
    let item = snapshot.item(id).ok_or_else(|| ApiError::item_not_found(id))?;
    let stats = state.query.item_stats(id);

    Ok(Json(serde_json::json!({
        "item_id": item.id,
        "name": item.name,
        "statistics": stats,
    })))
}

/// Serve a cached item image, falling back to the placeholder.
///
/// Accepts both `{id}` and `{id}.png` file segments.
pub async fn item_image(
    State(state): State<AppState>,
    Path((kind, file)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let kind = ImageKind::from_str_opt(&kind).ok_or_else(ApiError::image_not_found)?;
    let item_id: u32 = file
        .strip_suffix(".png")
        .unwrap_or(&file)
        .parse()
        .map_err(|_| ApiError::image_not_found())?;

    let image_path = images::image_path(&state.images_dir, kind, item_id);
    if let Ok(bytes) = tokio::fs::read(&image_path).await {
        return Ok(png_response(bytes, 86400));
    }

    let fallback = images::fallback_path(&state.images_dir, kind);
    match tokio::fs::read(&fallback).await {
        Ok(bytes) => Ok(png_response(bytes, 3600)),
        Err(_) => Err(ApiError::image_not_found()),
    }
}

fn png_response(bytes: Vec<u8>, max_age: u32) -> Response {
    (
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (
                header::CACHE_CONTROL,
                format!("public, max-age={max_age}"),
            ),
        ],
        bytes,
    )
        .into_response()
}
