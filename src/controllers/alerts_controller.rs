use axum::{
    extract::{Form, Path, State},
    http::{HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    error::AppError,
    models::SoundType,
    render,
    services::{alerts_service, coins_service},
    AppState,
};

/// 200 response that makes htmx fire `event` on the page, so dependent
/// partials (alert list, banners) reload.
fn with_trigger(event: &'static str, html: String) -> Response {
    (
        StatusCode::OK,
        [("HX-Trigger", HeaderValue::from_static(event))],
        Html(html),
    )
        .into_response()
}

/// Form problems are shown in place, htmx only swaps 2xx bodies.
fn form_error(msg: &str) -> Response {
    (
        StatusCode::OK,
        Html(format!(r#"<div class="text-danger">{msg}</div>"#)),
    )
        .into_response()
}

fn parse_sound(raw: Option<&str>) -> Result<SoundType, Response> {
    match raw {
        None => Ok(SoundType::default()),
        Some(s) => s
            .parse::<SoundType>()
            .map_err(|_| form_error("Please choose a valid alert sound.")),
    }
}

// ---------------- Partials ----------------

// GET /alerts/list
pub async fn get_alerts_list(State(state): State<AppState>) -> Result<Response, AppError> {
    let ctx = alerts_service::alerts_list_ctx(&state);
    let html = render::render_partial(&state, "partials/alerts_list", &ctx)?;
    Ok((StatusCode::OK, Html(html)).into_response())
}

// GET /alerts/form/:coin
pub async fn get_alert_form(
    State(state): State<AppState>,
    Path(coin): Path<String>,
) -> Result<Response, AppError> {
    let ctx = coins_service::alert_form_ctx(&state, coin.trim(), SoundType::default());
    let html = render::render_partial(&state, "partials/alert_form", &ctx)?;
    Ok((StatusCode::OK, Html(html)).into_response())
}

// GET /alerts/:id/edit
pub async fn get_edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let alert = state
        .engine
        .alert(&id)
        .ok_or_else(|| AppError::NotFound(format!("alert {id}")))?;

    let mut ctx = coins_service::alert_form_ctx(&state, &alert.coin_code, alert.sound_type);
    ctx["replace_id"] = serde_json::Value::String(alert.id.clone());
    ctx["target_price"] = serde_json::json!(alert.target_price);

    let html = render::render_partial(&state, "partials/alert_form", &ctx)?;
    Ok((StatusCode::OK, Html(html)).into_response())
}

// GET /banners
pub async fn get_banners(State(state): State<AppState>) -> Result<Response, AppError> {
    let ctx = alerts_service::banners_ctx(&state);
    let html = render::render_partial(&state, "partials/banners", &ctx)?;
    Ok((StatusCode::OK, Html(html)).into_response())
}

// ---------------- Actions ----------------

#[derive(Deserialize)]
pub struct CreateAlertForm {
    #[serde(rename = "coinCode")]
    pub coin_code: String,
    #[serde(rename = "targetPrice")]
    pub target_price: String,
    #[serde(rename = "soundType")]
    pub sound_type: Option<String>,
}

#[derive(Deserialize)]
pub struct ReplaceAlertForm {
    #[serde(rename = "targetPrice")]
    pub target_price: String,
    #[serde(rename = "soundType")]
    pub sound_type: Option<String>,
}

// POST /alerts
pub async fn post_create_alert(
    State(state): State<AppState>,
    Form(form): Form<CreateAlertForm>,
) -> Response {
    if form.coin_code.trim().is_empty() {
        return form_error("Please choose a coin.");
    }

    let target = match alerts_service::parse_target_price(&form.target_price) {
        Ok(v) => v,
        Err(e) => return form_error(&e.to_string()),
    };

    let sound = match parse_sound(form.sound_type.as_deref()) {
        Ok(s) => s,
        Err(res) => return res,
    };

    match alerts_service::create_alert(&state, &form.coin_code, target, sound).await {
        Ok(_) => with_trigger(
            "alertsUpdated",
            r#"<div class="text-success">Alert created.</div>"#.to_string(),
        ),
        Err(e) => e.into_response(),
    }
}

// POST /alerts/:id/replace
pub async fn post_replace_alert(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ReplaceAlertForm>,
) -> Response {
    let target = match alerts_service::parse_target_price(&form.target_price) {
        Ok(v) => v,
        Err(e) => return form_error(&e.to_string()),
    };

    let sound = match parse_sound(form.sound_type.as_deref()) {
        Ok(s) => s,
        Err(res) => return res,
    };

    match alerts_service::replace_alert(&state, &id, target, sound).await {
        Ok(_) => with_trigger(
            "alertsUpdated",
            r#"<div class="text-success">Alert updated.</div>"#.to_string(),
        ),
        Err(e) => e.into_response(),
    }
}

// POST /alerts/:id/delete
pub async fn post_delete_alert(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match alerts_service::delete_alert(&state, &id) {
        Ok(()) => with_trigger("alertsUpdated", String::new()),
        Err(e) => e.into_response(),
    }
}

// POST /banners/:id/dismiss
pub async fn post_dismiss_banner(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Response {
    state.engine.banner().dismiss(id);
    with_trigger("bannersUpdated", String::new())
}
