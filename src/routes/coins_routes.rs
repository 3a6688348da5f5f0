use axum::{Router, routing::get};
use crate::{AppState, controllers::coins_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/coins/cards", get(coins_controller::get_coin_cards))
        .route("/coins/search", get(coins_controller::get_search_results))
}
