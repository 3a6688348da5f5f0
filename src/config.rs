use std::{env, path::PathBuf, time::Duration};

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,

    pub livecoinwatch_api_key: String,
    pub livecoinwatch_base_url: String,
    pub currency: String,
    pub coin_limit: u32,
    pub poll_interval: Duration,

    pub data_dir: PathBuf,
    pub sounds_path: String,
    pub notification_icon: String,
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

    let port = env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let livecoinwatch_api_key = env::var("LIVECOINWATCH_API_KEY").unwrap_or_default();
    let livecoinwatch_base_url = env::var("LIVECOINWATCH_BASE_URL")
        .unwrap_or_else(|_| "https://api.livecoinwatch.com".to_string());

    let currency = env::var("PRICE_CURRENCY").unwrap_or_else(|_| "USD".to_string());

    let coin_limit = env::var("COIN_LIMIT")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(50);

    let poll_interval_ms = env::var("POLL_INTERVAL_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(5_000);

    let data_dir = env::var("DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"));

    let sounds_path = env::var("SOUNDS_PATH").unwrap_or_else(|_| "/static/sounds".to_string());
    let notification_icon =
        env::var("NOTIFICATION_ICON").unwrap_or_else(|_| "/static/crypto-icon.png".to_string());

    Settings {
        host,
        port,
        livecoinwatch_api_key,
        livecoinwatch_base_url,
        currency,
        coin_limit,
        poll_interval: Duration::from_millis(poll_interval_ms),
        data_dir,
        sounds_path,
        notification_icon,
    }
}
