use std::{convert::Infallible, time::Duration};

use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{
        Html, IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
};
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;

use crate::{models::SoundType, notifications::Permission, AppState};

// GET /events  (SSE)
pub async fn sse_events(
    State(state): State<AppState>,
) -> Sse<impl futures_util::stream::Stream<Item = Result<Event, Infallible>>> {
    let rx = state.events_tx.subscribe();

    let stream = futures_util::stream::unfold(rx, |mut rx| async move {
        let evt = match rx.recv().await {
            Ok(evt) => Event::default().event(evt.name).data(evt.data.to_string()),
            Err(RecvError::Lagged(_)) => Event::default().event("ping").data("lagged"),
            Err(RecvError::Closed) => return None,
        };

        Some((Ok(evt), rx))
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(20))
            .text("keep-alive"),
    )
}

// POST /sound/stop
pub async fn post_stop_sound(State(state): State<AppState>) -> StatusCode {
    state.engine.stop_sound();
    StatusCode::NO_CONTENT
}

#[derive(Deserialize)]
pub struct TestSoundForm {
    #[serde(rename = "soundType")]
    pub sound_type: String,
}

// POST /sound/test
pub async fn post_test_sound(
    State(state): State<AppState>,
    Form(form): Form<TestSoundForm>,
) -> Response {
    let sound = match form.sound_type.parse::<SoundType>() {
        Ok(s) => s,
        Err(e) => return (StatusCode::BAD_REQUEST, Html(e)).into_response(),
    };

    if let Err(e) = state.engine.sound().preview(sound) {
        tracing::warn!("sound preview failed: {}", e);
    }

    StatusCode::NO_CONTENT.into_response()
}

#[derive(Deserialize)]
pub struct PermissionForm {
    pub permission: String,
}

// POST /notifications/permission
pub async fn post_notification_permission(
    State(state): State<AppState>,
    Form(form): Form<PermissionForm>,
) -> Response {
    let answer = match form.permission.parse::<Permission>() {
        Ok(p) => p,
        Err(e) => return (StatusCode::BAD_REQUEST, Html(e)).into_response(),
    };

    let now = state.engine.desktop().set_permission(answer);
    let body = serde_json::to_string(&now).unwrap_or_default();
    (StatusCode::OK, body).into_response()
}

// POST /notifications/:id/click
pub async fn post_notification_click(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> StatusCode {
    state.engine.desktop().clicked(id);
    StatusCode::NO_CONTENT
}
