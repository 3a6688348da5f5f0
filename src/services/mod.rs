pub mod livecoinwatch;
pub mod kv_store;
pub mod alert_store;
pub mod alert_engine;
pub mod price_board;
pub mod price_poller;

pub mod alerts_service;
pub mod coins_service;
