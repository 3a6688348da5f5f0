use axum::{Router, routing::{get, post}};
use crate::{AppState, controllers::realtime_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/events", get(realtime_controller::sse_events))
        .route("/sound/stop", post(realtime_controller::post_stop_sound))
        .route("/sound/test", post(realtime_controller::post_test_sound))
        .route("/notifications/permission", post(realtime_controller::post_notification_permission))
        .route("/notifications/:id/click", post(realtime_controller::post_notification_click))
}
