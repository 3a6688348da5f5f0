use serde_json::json;

use crate::{models::SoundType, AppState};

const CARD_COUNT: usize = 6;

fn fmt2(x: f64) -> String {
    format!("{:.2}", x)
}

/// Context for `partials/search_results`.
///
/// - empty query => no results, no error
/// - otherwise every listed coin whose name or code contains the query
pub fn search_results_ctx(state: &AppState, query: &str) -> serde_json::Value {
    let q = query.trim().to_string();

    if q.is_empty() {
        return json!({ "query": "", "results": serde_json::Value::Null });
    }

    let results: Vec<_> = state
        .prices
        .search(&q)
        .into_iter()
        .map(|c| json!({ "code": c.code, "name": c.name, "rate": fmt2(c.rate) }))
        .collect();

    let results_val = if results.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::Value::Array(results)
    };

    json!({ "query": q, "results": results_val })
}

/// Context for `partials/coin_cards`.
pub fn coin_cards_ctx(state: &AppState) -> serde_json::Value {
    let cards: Vec<_> = state
        .prices
        .top(CARD_COUNT)
        .into_iter()
        .map(|c| json!({ "code": c.code, "name": c.name, "rate": fmt2(c.rate) }))
        .collect();

    json!({ "coins": cards, "loading": cards.is_empty() })
}

/// Context for the alert form of one coin.
pub fn alert_form_ctx(state: &AppState, coin_code: &str, selected: SoundType) -> serde_json::Value {
    let sounds: Vec<_> = SoundType::ALL
        .into_iter()
        .map(|s| {
            json!({
                "value": s.as_str(),
                "label": s.label(),
                "selected": s == selected,
            })
        })
        .collect();

    json!({
        "coin_code": coin_code,
        "current_price": state.prices.rate(coin_code).map(fmt2),
        "sounds": sounds,
    })
}

/// Sound sources the page preloads on connect.
pub fn sound_sources_ctx(state: &AppState) -> serde_json::Value {
    let sources = state.engine.sound().sources();
    let items: Vec<_> = SoundType::ALL
        .into_iter()
        .map(|s| json!({ "sound": s.as_str(), "src": sources[&s] }))
        .collect();

    serde_json::Value::Array(items)
}

/// Context for `partials/overview`.
pub async fn overview_ctx(state: &AppState) -> serde_json::Value {
    match state.feed.overview().await {
        Ok(o) => json!({
            "overview": {
                "cap": fmt2(o.cap),
                "volume": fmt2(o.volume),
                "btc_dominance": format!("{:.1}", o.btc_dominance * 100.0),
            },
            "error": serde_json::Value::Null
        }),
        Err(e) => {
            tracing::debug!("overview unavailable: {}", e);
            json!({ "overview": serde_json::Value::Null, "error": "Market overview unavailable right now." })
        }
    }
}
