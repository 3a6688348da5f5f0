mod common;

use std::sync::Arc;

use axum::{
    http::{header, Request, StatusCode},
    Router,
};
use common::test_settings;
use cryptoalert::{
    models::{Coin, SoundType},
    routes, services::kv_store::MemoryStore, templates, AppState,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

fn test_state() -> AppState {
    let state = AppState::new(
        test_settings(),
        templates::build_handlebars().expect("templates"),
        Arc::new(MemoryStore::new()),
    )
    .expect("app state");

    state.prices.replace(vec![
        Coin::new("BTC", "Bitcoin", 49_000.0),
        Coin::new("ETH", "Ethereum", 2_500.0),
    ]);

    state
}

fn app(state: &AppState) -> Router {
    routes::app(state.clone())
}

async fn response_body_string(res: axum::response::Response) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).to_string()
}

fn form_post(uri: &str, body: &str) -> Request<axum::body::Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(axum::body::Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<axum::body::Body> {
    Request::builder()
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap()
}

#[tokio::test]
async fn post_create_alert_derives_direction_from_board_price() {
    let state = test_state();

    let res = app(&state)
        .oneshot(form_post("/alerts", "coinCode=BTC&targetPrice=50000&soundType=police"))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers().get("HX-Trigger").unwrap(), "alertsUpdated");
    assert!(response_body_string(res).await.contains("Alert created"));

    let alerts = state.engine.alerts();
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].is_above);
    assert_eq!(alerts[0].sound_type, SoundType::Police);

    let res = app(&state)
        .oneshot(form_post("/alerts", "coinCode=ETH&targetPrice=2000"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let eth = state.engine.alerts().into_iter().find(|a| a.coin_code == "ETH").unwrap();
    assert!(!eth.is_above);
    assert_eq!(eth.sound_type, SoundType::Alarm);
}

#[tokio::test]
async fn post_create_alert_invalid_price_renders_error() {
    let state = test_state();

    for bad in ["abc", "0", "-5", ""] {
        let res = app(&state)
            .oneshot(form_post("/alerts", &format!("coinCode=BTC&targetPrice={bad}")))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let body = response_body_string(res).await;
        assert!(body.contains("valid target price"), "{bad}: {body}");
    }

    assert!(state.engine.alerts().is_empty());
}

#[tokio::test]
async fn post_create_alert_unknown_sound_renders_error() {
    let state = test_state();

    let res = app(&state)
        .oneshot(form_post("/alerts", "coinCode=BTC&targetPrice=1&soundType=kazoo"))
        .await
        .unwrap();

    let body = response_body_string(res).await;
    assert!(body.contains("valid alert sound"));
    assert!(state.engine.alerts().is_empty());
}

#[tokio::test]
async fn get_alerts_list_shows_target_direction_and_current_price() {
    let state = test_state();
    app(&state)
        .oneshot(form_post("/alerts", "coinCode=BTC&targetPrice=50000"))
        .await
        .unwrap();

    let res = app(&state).oneshot(get("/alerts/list")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_string(res).await;
    assert!(body.contains("BTC"));
    assert!(body.contains("$50000.00 (Above)"));
    assert!(body.contains("Current: $49000.00"));
}

#[tokio::test]
async fn post_delete_alert_removes_it_and_unknown_id_is_fine() {
    let state = test_state();
    app(&state)
        .oneshot(form_post("/alerts", "coinCode=BTC&targetPrice=50000"))
        .await
        .unwrap();
    let id = state.engine.alerts()[0].id.clone();

    let res = app(&state)
        .oneshot(form_post(&format!("/alerts/{id}/delete"), ""))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(state.engine.alerts().is_empty());

    let res = app(&state)
        .oneshot(form_post("/alerts/doesnotexist/delete", ""))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn post_replace_alert_recreates_with_new_id() {
    let state = test_state();
    app(&state)
        .oneshot(form_post("/alerts", "coinCode=BTC&targetPrice=50000&soundType=bell"))
        .await
        .unwrap();
    let old = state.engine.alerts()[0].clone();

    let res = app(&state)
        .oneshot(form_post(
            &format!("/alerts/{}/replace", old.id),
            "targetPrice=40000&soundType=siren",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let alerts = state.engine.alerts();
    assert_eq!(alerts.len(), 1);
    assert_ne!(alerts[0].id, old.id);
    assert_eq!(alerts[0].coin_code, "BTC");
    assert_eq!(alerts[0].target_price, 40_000.0);
    assert!(!alerts[0].is_above);
    assert_eq!(alerts[0].sound_type, SoundType::Siren);
}

#[tokio::test]
async fn failed_replace_write_keeps_the_original_alert() {
    let state = AppState::new(
        test_settings(),
        templates::build_handlebars().expect("templates"),
        Arc::new(common::FlakyStore::allowing(1)),
    )
    .expect("app state");
    state.prices.replace(vec![Coin::new("BTC", "Bitcoin", 49_000.0)]);

    app(&state)
        .oneshot(form_post("/alerts", "coinCode=BTC&targetPrice=50000&soundType=bell"))
        .await
        .unwrap();
    let old = state.engine.alerts()[0].clone();

    let res = app(&state)
        .oneshot(form_post(
            &format!("/alerts/{}/replace", old.id),
            "targetPrice=40000&soundType=siren",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    assert_eq!(state.engine.alerts(), vec![old]);
}

#[tokio::test]
async fn post_replace_unknown_alert_is_not_found() {
    let state = test_state();

    let res = app(&state)
        .oneshot(form_post("/alerts/nope/replace", "targetPrice=1"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_search_results_matches_name_and_code() {
    let state = test_state();

    let body = response_body_string(app(&state).oneshot(get("/coins/search?q=bit")).await.unwrap()).await;
    assert!(body.contains("Bitcoin (BTC)"));
    assert!(!body.contains("Ethereum"));

    let body = response_body_string(app(&state).oneshot(get("/coins/search?q=eth")).await.unwrap()).await;
    assert!(body.contains("Ethereum (ETH)"));

    let body = response_body_string(app(&state).oneshot(get("/coins/search?q=")).await.unwrap()).await;
    assert!(!body.contains("list-group-item"));
}

#[tokio::test]
async fn banner_dismiss_removes_banner_and_stops_sound() {
    let state = test_state();
    app(&state)
        .oneshot(form_post("/alerts", "coinCode=BTC&targetPrice=50000"))
        .await
        .unwrap();

    let fired = state.engine.check_price("BTC", 50_500.0);
    assert_eq!(fired.len(), 1);

    let body = response_body_string(app(&state).oneshot(get("/banners")).await.unwrap()).await;
    assert!(body.contains("BTC Alert Triggered!"));
    assert!(body.contains("Current: $50500.00"));

    let id = state.engine.banner().list()[0].id;
    let res = app(&state)
        .oneshot(form_post(&format!("/banners/{id}/dismiss"), ""))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers().get("HX-Trigger").unwrap(), "bannersUpdated");
    assert!(state.engine.banner().list().is_empty());
    assert_eq!(state.engine.sound().active(), None);
}

#[tokio::test]
async fn notification_permission_endpoint_is_one_shot() {
    let state = test_state();

    let res = app(&state)
        .oneshot(form_post("/notifications/permission", "permission=granted"))
        .await
        .unwrap();
    assert_eq!(response_body_string(res).await, "\"granted\"");

    let res = app(&state)
        .oneshot(form_post("/notifications/permission", "permission=denied"))
        .await
        .unwrap();
    assert_eq!(response_body_string(res).await, "\"granted\"");
}

#[tokio::test]
async fn home_and_health_render() {
    let state = test_state();

    let res = app(&state).oneshot(get("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app(&state).oneshot(get("/")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = response_body_string(res).await;
    assert!(body.contains("Crypto Price Alert"));
    assert!(body.contains("/static/sounds/police.mp3"));

    let res = app(&state).oneshot(get("/no/such/page")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn htmx_request_gets_home_without_layout() {
    let state = test_state();

    let req = Request::builder()
        .uri("/")
        .header("HX-Request", "true")
        .body(axum::body::Body::empty())
        .unwrap();
    let res = app(&state).oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_string(res).await;
    assert!(!body.contains("<!doctype html>"));
    assert!(body.contains("/static/sounds/police.mp3"));
}
