use std::time::Duration;

use serde_json::json;

use crate::{
    error::AppError,
    events::{ClientEvent, EventsTx},
    models::SoundType,
};

use super::{AudioSink, DesktopNotification, NotificationSink};

/// Audio handles live in the open page; this forwards commands to it.
pub struct BrowserAudio {
    events_tx: EventsTx,
}

impl BrowserAudio {
    pub fn new(events_tx: EventsTx) -> Self {
        Self { events_tx }
    }

    fn send(&self, evt: ClientEvent) -> Result<(), AppError> {
        self.events_tx
            .send(evt)
            .map(|_| ())
            .map_err(|_| AppError::Audio("no page is connected to play sound".to_string()))
    }
}

impl AudioSink for BrowserAudio {
    fn preload(&self, sound: SoundType, src: &str, looping: bool) -> Result<(), AppError> {
        // pages also preload from the rendered sound list when they connect
        let _ = self.events_tx.send(ClientEvent::new(
            "sound-preload",
            json!({ "sound": sound, "src": src, "loop": looping }),
        ));
        Ok(())
    }

    fn play(&self, sound: SoundType) -> Result<(), AppError> {
        self.send(ClientEvent::new("sound-play", json!({ "sound": sound })))
    }

    fn pause(&self, sound: SoundType) {
        let _ = self
            .events_tx
            .send(ClientEvent::new("sound-stop", json!({ "sound": sound })));
    }

    fn rewind(&self, _sound: SoundType) {
        // the page rewinds on `sound-stop`
    }

    fn preview(&self, sound: SoundType, src: &str, length: Duration) -> Result<(), AppError> {
        self.send(ClientEvent::new(
            "sound-preview",
            json!({ "sound": sound, "src": src, "ms": length.as_millis() as u64 }),
        ))
    }
}

/// Desktop notifications shown through the page's Notification API.
pub struct BrowserNotifier {
    events_tx: EventsTx,
}

impl BrowserNotifier {
    pub fn new(events_tx: EventsTx) -> Self {
        Self { events_tx }
    }
}

impl NotificationSink for BrowserNotifier {
    fn request_permission(&self) -> Result<(), AppError> {
        // a page connecting later asks on its own while still undecided
        let _ = self
            .events_tx
            .send(ClientEvent::signal("notification-permission-request"));
        Ok(())
    }

    fn show(&self, notification: &DesktopNotification) -> Result<(), AppError> {
        self.events_tx
            .send(ClientEvent::new("notification", notification))
            .map(|_| ())
            .map_err(|_| AppError::Notification("no page is connected".to_string()))
    }

    fn close(&self, id: u64) {
        let _ = self
            .events_tx
            .send(ClientEvent::new("notification-close", json!({ "id": id })));
    }
}
