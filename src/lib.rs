//! Library entrypoint for CryptoAlert.
//!
//! Integration tests under `tests/` build the app state from here with an
//! in-memory store, so nothing touches the data directory.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod notifications;
pub mod services;

#[path = "views/render.rs"]
pub mod render;
#[path = "views/templates.rs"]
pub mod templates;

pub mod controllers;
pub mod routes;

use error::AppError;
use events::EventsTx;
use notifications::{
    AudioSink, BannerChannel, BrowserAudio, BrowserNotifier, DesktopChannel, NotificationSink,
    SoundChannel,
};
use services::{
    alert_engine::AlertEngine, alert_store::AlertStore, kv_store::KeyValueStore,
    livecoinwatch::LiveCoinWatchClient, price_board::PriceBoard,
};

#[derive(Clone)]
pub struct AppState {
    pub hbs: templates::Hbs,
    pub settings: config::Settings,
    pub feed: LiveCoinWatchClient,
    pub prices: PriceBoard,
    pub engine: Arc<AlertEngine>,
    pub events_tx: EventsTx,
}

impl AppState {
    /// Wires the engine to the browser bridge.
    pub fn new(
        settings: config::Settings,
        hbs: templates::Hbs,
        kv: Arc<dyn KeyValueStore>,
    ) -> Result<Self, AppError> {
        let events_tx = events::channel();
        let audio = Arc::new(BrowserAudio::new(events_tx.clone()));
        let notifier = Arc::new(BrowserNotifier::new(events_tx.clone()));
        Self::with_sinks(settings, hbs, kv, audio, notifier, events_tx)
    }

    pub fn with_sinks(
        settings: config::Settings,
        hbs: templates::Hbs,
        kv: Arc<dyn KeyValueStore>,
        audio: Arc<dyn AudioSink>,
        notifier: Arc<dyn NotificationSink>,
        events_tx: EventsTx,
    ) -> Result<Self, AppError> {
        let store = AlertStore::load(kv)?;

        let sound = Arc::new(SoundChannel::new(audio, &settings.sounds_path));
        let desktop = Arc::new(DesktopChannel::new(
            notifier,
            sound.clone(),
            &settings.notification_icon,
        ));
        let banner = Arc::new(BannerChannel::new(sound.clone(), events_tx.clone()));
        let engine = Arc::new(AlertEngine::new(store, sound, desktop, banner));

        let feed = LiveCoinWatchClient::new(
            &settings.livecoinwatch_base_url,
            settings.livecoinwatch_api_key.clone(),
            &settings.currency,
            settings.coin_limit,
        );

        Ok(Self {
            hbs,
            settings,
            feed,
            prices: PriceBoard::new(),
            engine,
            events_tx,
        })
    }
}
