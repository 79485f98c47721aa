//! Monster route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::catalog::Monster;

use super::super::{error::ApiError, state::AppState};
use super::items::PageParams;

/// List monsters with pagination.
pub async fn list_monsters(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Json<Vec<Monster>> {
    let (page, _total) = state.query.monsters_page(params.skip, params.limit);
    Json(page.into_iter().cloned().collect())
}

/// Get a specific monster by id.
pub async fn get_monster(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Monster>, ApiError> {
    let monster = state
        .query
        .monster(id)
        .ok_or_else(|| ApiError::monster_not_found(id))?;
    Ok(Json(monster.clone()))
}

/// Name search query parameters.
#[derive(Debug, Deserialize)]
pub struct NameSearchParams {
    pub name: String,
    #[serde(default)]
    pub exact: bool,
}

/// Search monsters by name (partial or exact match).
pub async fn search_by_name(
    State(state): State<AppState>,
    Query(params): Query<NameSearchParams>,
) -> Result<Json<Vec<Monster>>, ApiError> {
    let matches = state.query.search_monsters(&params.name, params.exact);
    if matches.is_empty() {
        return Err(ApiError::no_match("monsters", &params.name));
    }
    Ok(Json(matches.into_iter().cloned().collect()))
}

/// Element filter query parameters.
#[derive(Debug, Deserialize)]
pub struct ElementFilterParams {
    pub element: String,
}

/// Filter monsters by element.
pub async fn filter_by_element(
    State(state): State<AppState>,
    Query(params): Query<ElementFilterParams>,
) -> Result<Json<Vec<Monster>>, ApiError> {
    let matches = state.query.monsters_by_element(&params.element);
    if matches.is_empty() {
        return Err(ApiError::no_match("monsters with element", &params.element));
    }
    Ok(Json(matches.into_iter().cloned().collect()))
}

/// List all MVP monsters.
pub async fn mvp_monsters(
    State(state): State<AppState>,
) -> Result<Json<Vec<Monster>>, ApiError> {
    let matches = state.query.mvp_monsters();
    if matches.is_empty() {
        return Err(ApiError::no_match("MVP monsters", "mvp"));
    }
    Ok(Json(matches.into_iter().cloned().collect()))
}
