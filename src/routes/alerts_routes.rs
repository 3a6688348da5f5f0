use axum::{Router, routing::{get, post}};
use crate::{AppState, controllers::alerts_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/alerts", post(alerts_controller::post_create_alert))
        .route("/alerts/list", get(alerts_controller::get_alerts_list))
        .route("/alerts/form/:coin", get(alerts_controller::get_alert_form))
        .route("/alerts/:id/edit", get(alerts_controller::get_edit_form))
        .route("/alerts/:id/replace", post(alerts_controller::post_replace_alert))
        .route("/alerts/:id/delete", post(alerts_controller::post_delete_alert))
        .route("/banners", get(alerts_controller::get_banners))
        .route("/banners/:id/dismiss", post(alerts_controller::post_dismiss_banner))
}
