use std::sync::{
    Arc, Mutex,
    atomic::{AtomicU64, Ordering},
};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    error::AppError,
    events::{ClientEvent, EventsTx},
};

use super::{NotificationChannel, SoundChannel, TriggerEvent};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Banner {
    pub id: u64,
    pub alert_id: String,
    pub coin_code: String,
    pub target_price: f64,
    pub current_price: f64,
    pub created_at: DateTime<Utc>,
}

/// In-page banners, one per trigger. Repeated triggers stack and a banner
/// stays listed until it is dismissed; there is no cap.
pub struct BannerChannel {
    sound: Arc<SoundChannel>,
    events_tx: EventsTx,
    banners: Mutex<Vec<Banner>>,
    next_id: AtomicU64,
}

impl BannerChannel {
    pub fn new(sound: Arc<SoundChannel>, events_tx: EventsTx) -> Self {
        Self {
            sound,
            events_tx,
            banners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn show(&self, event: &TriggerEvent) -> Banner {
        let banner = Banner {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            alert_id: event.alert.id.clone(),
            coin_code: event.alert.coin_code.clone(),
            target_price: event.alert.target_price,
            current_price: event.current_price,
            created_at: event.at,
        };

        self.banners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(banner.clone());

        // nobody listening is fine, the page lists banners on load
        let _ = self.events_tx.send(ClientEvent::new("banner", &banner));

        banner
    }

    pub fn list(&self) -> Vec<Banner> {
        self.banners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Removes the banner and stops the alarm. Returns false for unknown ids;
    /// the sound is stopped either way.
    pub fn dismiss(&self, id: u64) -> bool {
        let removed = {
            let mut banners = self.banners.lock().unwrap_or_else(|e| e.into_inner());
            let before = banners.len();
            banners.retain(|b| b.id != id);
            banners.len() != before
        };

        self.sound.stop();
        removed
    }
}

impl NotificationChannel for BannerChannel {
    fn name(&self) -> &'static str {
        "banner"
    }

    fn dispatch(&self, event: &TriggerEvent) -> Result<(), AppError> {
        self.show(event);
        Ok(())
    }
}
