use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use crate::{error::AppError, render, services::coins_service, AppState};

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

// GET /coins/cards
pub async fn get_coin_cards(State(state): State<AppState>) -> Result<Response, AppError> {
    let ctx = coins_service::coin_cards_ctx(&state);
    let html = render::render_partial(&state, "partials/coin_cards", &ctx)?;
    Ok((StatusCode::OK, Html(html)).into_response())
}

// GET /coins/search?q=bit
pub async fn get_search_results(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Response, AppError> {
    let q = query.q.unwrap_or_default();
    let ctx = coins_service::search_results_ctx(&state, &q);
    let html = render::render_partial(&state, "partials/search_results", &ctx)?;
    Ok((StatusCode::OK, Html(html)).into_response())
}
