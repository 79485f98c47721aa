//! API routes and handlers.

mod items;
mod monsters;

use axum::{Json, Router, extract::State, routing::get};

use super::state::AppState;

/// Build the API router.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        // Item operations
        .route("/items", get(items::list_items))
        .route("/items/search", get(items::find_items))
        .route("/items/search/by-name", get(items::search_by_name))
        .route("/items/filter/by-type", get(items::filter_by_type))
        .route("/items/popular/{period}", get(items::popular_items))
        .route("/items/images/{kind}/{file}", get(items::item_image))
        .route("/items/{id}", get(items::get_item))
        .route("/items/{id}/stats", get(items::item_stats))
        // Monster operations
        .route("/monsters", get(monsters::list_monsters))
        .route("/monsters/search/by-name", get(monsters::search_by_name))
        .route("/monsters/filter/by-element", get(monsters::filter_by_element))
        .route("/monsters/filter/mvp", get(monsters::mvp_monsters))
        .route("/monsters/{id}", get(monsters::get_monster));

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api)
        .with_state(state)
}

/// Health check with dataset counters.
async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let snapshot = state.query.snapshot();
    Json(serde_json::json!({
        "status": "healthy",
        "items_loaded": snapshot.item_count(),
        "monsters_loaded": snapshot.monster_count(),
    }))
}
