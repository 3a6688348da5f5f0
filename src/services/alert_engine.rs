use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use chrono::{DateTime, Duration, Utc};

use crate::{
    error::AppError,
    models::{Alert, Coin, NewAlert},
    notifications::{BannerChannel, DesktopChannel, NotificationChannel, SoundChannel, TriggerEvent},
    services::alert_store::AlertStore,
};

/// Minimum time between two triggers of the same alert.
pub const COOLDOWN_SECS: i64 = 30;

/// Evaluates prices against the stored alerts and announces the ones that fire.
pub struct AlertEngine {
    store: Mutex<AlertStore>,
    last_trigger: Mutex<HashMap<String, DateTime<Utc>>>,
    sound: Arc<SoundChannel>,
    desktop: Arc<DesktopChannel>,
    banner: Arc<BannerChannel>,
}

impl AlertEngine {
    pub fn new(
        store: AlertStore,
        sound: Arc<SoundChannel>,
        desktop: Arc<DesktopChannel>,
        banner: Arc<BannerChannel>,
    ) -> Self {
        Self {
            store: Mutex::new(store),
            last_trigger: Mutex::new(HashMap::new()),
            sound,
            desktop,
            banner,
        }
    }

    pub fn init(&self) {
        self.sound.preload();
        self.desktop.request_permission();
    }

    pub fn teardown(&self) {
        self.sound.stop();
    }

    pub fn sound(&self) -> &Arc<SoundChannel> {
        &self.sound
    }

    pub fn desktop(&self) -> &Arc<DesktopChannel> {
        &self.desktop
    }

    pub fn banner(&self) -> &Arc<BannerChannel> {
        &self.banner
    }

    // ---------------- Store ----------------

    pub fn add_alert(&self, def: NewAlert) -> Result<Alert, AppError> {
        let alert = self.lock_store().add(def)?;
        tracing::info!(
            "alert {} created: {} {} {}",
            alert.id,
            alert.coin_code,
            alert.direction_label().to_lowercase(),
            alert.target_price
        );
        Ok(alert)
    }

    pub fn remove_alert(&self, id: &str) -> Result<(), AppError> {
        self.lock_store().remove(id)?;
        self.lock_last_trigger().remove(id);
        Ok(())
    }

    /// Replaces an alert; the old id's cool-down goes with it.
    pub fn replace_alert(&self, id: &str, def: NewAlert) -> Result<Alert, AppError> {
        let alert = self.lock_store().replace(id, def)?;
        self.lock_last_trigger().remove(id);
        tracing::info!("alert {} replaced by {}", id, alert.id);
        Ok(alert)
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.lock_store().list().to_vec()
    }

    pub fn alert(&self, id: &str) -> Option<Alert> {
        self.lock_store().get(id).cloned()
    }

    // ---------------- Evaluation ----------------

    pub fn check_price(&self, coin_code: &str, current_price: f64) -> Vec<TriggerEvent> {
        self.check_price_at(coin_code, current_price, Utc::now())
    }

    pub fn check_prices(&self, coins: &[Coin]) -> Vec<TriggerEvent> {
        let now = Utc::now();
        coins
            .iter()
            .flat_map(|c| self.check_price_at(&c.code, c.rate, now))
            .collect()
    }

    /// Decides and records triggers under the locks, then dispatches with
    /// the locks released.
    pub fn check_price_at(
        &self,
        coin_code: &str,
        current_price: f64,
        now: DateTime<Utc>,
    ) -> Vec<TriggerEvent> {
        let cooldown = Duration::seconds(COOLDOWN_SECS);

        let mut fired = Vec::new();
        {
            let store = self.lock_store();
            let mut last_trigger = self.lock_last_trigger();

            for alert in store.list().iter().filter(|a| a.coin_code == coin_code) {
                if !alert.is_hit(current_price) {
                    continue;
                }

                let cooled = match last_trigger.get(&alert.id) {
                    Some(last) => now - *last >= cooldown,
                    None => true,
                };
                if !cooled {
                    continue;
                }

                last_trigger.insert(alert.id.clone(), now);
                fired.push(TriggerEvent {
                    alert: alert.clone(),
                    current_price,
                    at: now,
                });
            }
        }

        for event in &fired {
            tracing::debug!(
                "alert {} triggered: {} at {}",
                event.alert.id,
                event.alert.coin_code,
                event.current_price
            );
            self.dispatch(event);
        }

        fired
    }

    fn dispatch(&self, event: &TriggerEvent) {
        let channels: [&dyn NotificationChannel; 3] =
            [self.sound.as_ref(), self.desktop.as_ref(), self.banner.as_ref()];

        for channel in channels {
            if let Err(e) = channel.dispatch(event) {
                tracing::warn!(
                    "{} channel failed for alert {}: {}",
                    channel.name(),
                    event.alert.id,
                    e
                );
            }
        }
    }

    pub fn stop_sound(&self) {
        self.sound.stop();
    }

    fn lock_store(&self) -> std::sync::MutexGuard<'_, AlertStore> {
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_last_trigger(&self) -> std::sync::MutexGuard<'_, HashMap<String, DateTime<Utc>>> {
        self.last_trigger.lock().unwrap_or_else(|e| e.into_inner())
    }
}
