use serde_json::json;

use crate::{error::AppError, AppState};

pub fn render_full(state: &AppState, title: &str, body_html: String) -> Result<String, AppError> {
    let ctx = json!({
        "title": title,
        "body": body_html,
    });

    Ok(state.hbs.render("layouts/base", &ctx)?)
}

pub fn render_partial(
    state: &AppState,
    tpl: &str,
    ctx: &serde_json::Value,
) -> Result<String, AppError> {
    Ok(state.hbs.render(tpl, ctx)?)
}
