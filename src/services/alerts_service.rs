use serde_json::json;

use crate::{
    error::AppError,
    events::ClientEvent,
    models::{Alert, NewAlert, SoundType},
    AppState,
};

fn fmt2(x: f64) -> String {
    format!("{:.2}", x)
}

pub fn parse_target_price(raw: &str) -> Result<f64, AppError> {
    let target: f64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::Validation("Please enter a valid target price.".to_string()))?;

    if !target.is_finite() || target <= 0.0 {
        return Err(AppError::Validation(
            "Please enter a valid target price.".to_string(),
        ));
    }

    Ok(target)
}

/// Price used to fix the direction of a new alert: the board first, then a
/// one-off lookup. `None` when neither knows the coin.
async fn price_at_creation(state: &AppState, coin_code: &str) -> Option<f64> {
    if let Some(rate) = state.prices.rate(coin_code) {
        return Some(rate);
    }

    match state.feed.coin(coin_code).await {
        Ok(c) => Some(c.rate),
        Err(e) => {
            tracing::debug!("no price for {} at alert creation: {}", coin_code, e);
            None
        }
    }
}

pub async fn create_alert(
    state: &AppState,
    coin_code: &str,
    target_price: f64,
    sound_type: SoundType,
) -> Result<Alert, AppError> {
    let code = coin_code.trim();
    if code.is_empty() {
        return Err(AppError::Validation("Please choose a coin.".to_string()));
    }

    let current = price_at_creation(state, code).await;
    let def = NewAlert::from_current_price(code, target_price, current, sound_type);
    let alert = state.engine.add_alert(def)?;

    let _ = state.events_tx.send(ClientEvent::signal("alertsUpdated"));

    Ok(alert)
}

pub fn delete_alert(state: &AppState, id: &str) -> Result<(), AppError> {
    state.engine.remove_alert(id)?;
    let _ = state.events_tx.send(ClientEvent::signal("alertsUpdated"));
    Ok(())
}

/// Editing is delete-then-recreate; the replacement gets a new id and a
/// direction derived from the price right now.
pub async fn replace_alert(
    state: &AppState,
    id: &str,
    target_price: f64,
    sound_type: SoundType,
) -> Result<Alert, AppError> {
    let old = state
        .engine
        .alert(id)
        .ok_or_else(|| AppError::NotFound(format!("alert {id}")))?;

    let current = price_at_creation(state, &old.coin_code).await;
    let def = NewAlert::from_current_price(&old.coin_code, target_price, current, sound_type);
    let alert = state.engine.replace_alert(&old.id, def)?;

    let _ = state.events_tx.send(ClientEvent::signal("alertsUpdated"));

    Ok(alert)
}

/// Context for `partials/alerts_list`.
pub fn alerts_list_ctx(state: &AppState) -> serde_json::Value {
    let items: Vec<serde_json::Value> = state
        .engine
        .alerts()
        .into_iter()
        .map(|a| {
            let current = state.prices.rate(&a.coin_code);
            json!({
                "id": a.id,
                "coin_code": a.coin_code,
                "target_price": fmt2(a.target_price),
                "target_price_raw": a.target_price,
                "direction": a.direction_label(),
                "current_price": current
                    .map(|p| format!("${}", fmt2(p)))
                    .unwrap_or_else(|| "Loading...".to_string()),
                "sound_type": a.sound_type.as_str(),
                "created_at": a.created_at.to_rfc3339(),
            })
        })
        .collect();

    json!({ "alerts": items, "has_alerts": !items.is_empty() })
}

/// Context for `partials/banners`.
pub fn banners_ctx(state: &AppState) -> serde_json::Value {
    let items: Vec<serde_json::Value> = state
        .engine
        .banner()
        .list()
        .into_iter()
        .map(|b| {
            json!({
                "id": b.id,
                "coin_code": b.coin_code,
                "target_price": fmt2(b.target_price),
                "current_price": fmt2(b.current_price),
            })
        })
        .collect();

    json!({ "banners": items })
}
