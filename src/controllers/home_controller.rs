use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde_json::json;

use crate::{error::AppError, render, services::coins_service, AppState};

/// htmx swaps only the page body, so skip the layout for its requests.
fn wants_partial(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .is_some_and(|v| v.as_bytes().eq_ignore_ascii_case(b"true"))
}

pub async fn home(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, AppError> {
    let ctx = json!({
        "sounds_json": coins_service::sound_sources_ctx(&state).to_string(),
    });
    let body = render::render_partial(&state, "pages/home", &ctx)?;

    if wants_partial(&headers) {
        return Ok((StatusCode::OK, Html(body)).into_response());
    }

    let page = render::render_full(&state, "Crypto Price Alert", body)?;
    Ok((StatusCode::OK, Html(page)).into_response())
}

pub async fn not_found(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let body = match render::render_partial(&state, "pages/not_found", &json!({})) {
        Ok(b) => b,
        Err(e) => return e.into_response(),
    };

    if wants_partial(&headers) {
        return (StatusCode::NOT_FOUND, Html(body)).into_response();
    }

    match render::render_full(&state, "404", body) {
        Ok(page) => (StatusCode::NOT_FOUND, Html(page)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Html("ok".to_string()))
}

// GET /overview
pub async fn get_overview(State(state): State<AppState>) -> Result<Response, AppError> {
    let ctx = coins_service::overview_ctx(&state).await;
    let html = render::render_partial(&state, "partials/overview", &ctx)?;
    Ok((StatusCode::OK, Html(html)).into_response())
}
