#![allow(dead_code)]

use std::{
    collections::HashSet,
    path::PathBuf,
    sync::{Arc, Mutex},
    time::Duration,
};

use cryptoalert::{
    config::Settings,
    error::AppError,
    events::{self, EventsTx},
    models::SoundType,
    notifications::{
        AudioSink, BannerChannel, DesktopChannel, DesktopNotification, NotificationSink,
        SoundChannel,
    },
    services::{
        alert_engine::AlertEngine,
        alert_store::AlertStore,
        kv_store::{KeyValueStore, MemoryStore},
    },
};

pub fn test_settings() -> Settings {
    Settings {
        host: "127.0.0.1".to_string(),
        port: 0,
        livecoinwatch_api_key: String::new(),
        livecoinwatch_base_url: "http://127.0.0.1:9".to_string(),
        currency: "USD".to_string(),
        coin_limit: 50,
        poll_interval: Duration::from_millis(20),
        data_dir: PathBuf::from("target/test-data"),
        sounds_path: "/static/sounds".to_string(),
        notification_icon: "/static/crypto-icon.png".to_string(),
    }
}

/// Records every command and which handles are currently playing.
#[derive(Default)]
pub struct FakeAudio {
    pub calls: Mutex<Vec<String>>,
    pub playing: Mutex<HashSet<SoundType>>,
    pub max_playing: Mutex<usize>,
    pub reject_play: bool,
}

impl FakeAudio {
    pub fn rejecting() -> Self {
        Self {
            reject_play: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn playing(&self) -> HashSet<SoundType> {
        self.playing.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl AudioSink for FakeAudio {
    fn preload(&self, sound: SoundType, src: &str, looping: bool) -> Result<(), AppError> {
        self.record(format!("preload:{sound}:{src}:{looping}"));
        Ok(())
    }

    fn play(&self, sound: SoundType) -> Result<(), AppError> {
        self.record(format!("play:{sound}"));
        if self.reject_play {
            return Err(AppError::Audio("autoplay blocked".to_string()));
        }

        let mut playing = self.playing.lock().unwrap();
        playing.insert(sound);
        let mut max = self.max_playing.lock().unwrap();
        *max = (*max).max(playing.len());
        Ok(())
    }

    fn pause(&self, sound: SoundType) {
        self.record(format!("pause:{sound}"));
        self.playing.lock().unwrap().remove(&sound);
    }

    fn rewind(&self, sound: SoundType) {
        self.record(format!("rewind:{sound}"));
    }

    fn preview(&self, sound: SoundType, src: &str, length: Duration) -> Result<(), AppError> {
        self.record(format!("preview:{sound}:{src}:{}", length.as_millis()));
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeNotifier {
    pub requests: Mutex<usize>,
    pub shown: Mutex<Vec<DesktopNotification>>,
    pub closed: Mutex<Vec<u64>>,
    pub reject_show: bool,
}

impl FakeNotifier {
    pub fn rejecting() -> Self {
        Self {
            reject_show: true,
            ..Self::default()
        }
    }

    pub fn shown(&self) -> Vec<DesktopNotification> {
        self.shown.lock().unwrap().clone()
    }
}

impl NotificationSink for FakeNotifier {
    fn request_permission(&self) -> Result<(), AppError> {
        *self.requests.lock().unwrap() += 1;
        Ok(())
    }

    fn show(&self, notification: &DesktopNotification) -> Result<(), AppError> {
        if self.reject_show {
            return Err(AppError::Notification("notification center unavailable".to_string()));
        }
        self.shown.lock().unwrap().push(notification.clone());
        Ok(())
    }

    fn close(&self, id: u64) {
        self.closed.lock().unwrap().push(id);
    }
}

/// Key-value store whose writes always fail.
pub struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, AppError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), AppError> {
        Err(AppError::Storage(std::io::Error::other("quota exceeded")))
    }
}

/// In-memory store that accepts `writes_left` writes, then fails every one.
pub struct FlakyStore {
    inner: MemoryStore,
    writes_left: Mutex<usize>,
}

impl FlakyStore {
    pub fn allowing(writes: usize) -> Self {
        Self {
            inner: MemoryStore::new(),
            writes_left: Mutex::new(writes),
        }
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut left = self.writes_left.lock().unwrap();
        if *left == 0 {
            return Err(AppError::Storage(std::io::Error::other("quota exceeded")));
        }
        *left -= 1;
        self.inner.set(key, value)
    }
}

pub struct Harness {
    pub engine: AlertEngine,
    pub audio: Arc<FakeAudio>,
    pub notifier: Arc<FakeNotifier>,
    pub events_tx: EventsTx,
}

pub fn harness_with(kv: Arc<dyn KeyValueStore>, audio: FakeAudio) -> Harness {
    harness_with_sinks(kv, audio, FakeNotifier::default())
}

pub fn harness_with_sinks(
    kv: Arc<dyn KeyValueStore>,
    audio: FakeAudio,
    notifier: FakeNotifier,
) -> Harness {
    let audio = Arc::new(audio);
    let notifier = Arc::new(notifier);
    let events_tx = events::channel();

    let sound = Arc::new(SoundChannel::new(audio.clone(), "/static/sounds"));
    let desktop = Arc::new(DesktopChannel::new(
        notifier.clone(),
        sound.clone(),
        "/static/crypto-icon.png",
    ));
    let banner = Arc::new(BannerChannel::new(sound.clone(), events_tx.clone()));

    let store = AlertStore::load(kv).expect("load store");
    let engine = AlertEngine::new(store, sound, desktop, banner);

    Harness {
        engine,
        audio,
        notifier,
        events_tx,
    }
}

pub fn harness() -> Harness {
    harness_with(Arc::new(MemoryStore::new()), FakeAudio::default())
}
