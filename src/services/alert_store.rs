use std::sync::Arc;

use chrono::Utc;
use rand::Rng;

use crate::{
    error::AppError,
    models::{Alert, NewAlert},
    services::kv_store::KeyValueStore,
};

pub const ALERTS_KEY: &str = "priceAlerts";

const ID_LEN: usize = 9;
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// The user's alerts, mirrored to a key-value store as one JSON array.
pub struct AlertStore {
    kv: Arc<dyn KeyValueStore>,
    alerts: Vec<Alert>,
}

impl AlertStore {
    /// Reads the persisted set; an absent key means no alerts yet.
    pub fn load(kv: Arc<dyn KeyValueStore>) -> Result<Self, AppError> {
        let alerts = match kv.get(ALERTS_KEY)? {
            Some(raw) => serde_json::from_str::<Vec<Alert>>(&raw)?,
            None => Vec::new(),
        };

        tracing::info!("loaded {} price alert(s)", alerts.len());

        Ok(Self { kv, alerts })
    }

    pub fn add(&mut self, def: NewAlert) -> Result<Alert, AppError> {
        let alert = self.build(def)?;

        let mut next = self.alerts.clone();
        next.push(alert.clone());
        self.persist(next)?;

        Ok(alert)
    }

    /// Swaps `id` for a freshly built alert in a single write, so a failed
    /// write leaves the old alert in place.
    pub fn replace(&mut self, id: &str, def: NewAlert) -> Result<Alert, AppError> {
        if self.get(id).is_none() {
            return Err(AppError::NotFound(format!("alert {id}")));
        }

        let alert = self.build(def)?;

        let mut next: Vec<Alert> = self
            .alerts
            .iter()
            .filter(|a| a.id != id)
            .cloned()
            .collect();
        next.push(alert.clone());
        self.persist(next)?;

        Ok(alert)
    }

    pub fn remove(&mut self, id: &str) -> Result<(), AppError> {
        let next: Vec<Alert> = self
            .alerts
            .iter()
            .filter(|a| a.id != id)
            .cloned()
            .collect();

        self.persist(next)
    }

    pub fn list(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn get(&self, id: &str) -> Option<&Alert> {
        self.alerts.iter().find(|a| a.id == id)
    }

    fn build(&self, def: NewAlert) -> Result<Alert, AppError> {
        // non-finite targets serialize as null and fail to load
        if !def.target_price.is_finite() || def.target_price <= 0.0 {
            return Err(AppError::Validation(
                "Please enter a valid target price.".to_string(),
            ));
        }

        Ok(Alert {
            id: self.fresh_id(),
            coin_code: def.coin_code,
            target_price: def.target_price,
            is_above: def.is_above,
            created_at: Utc::now(),
            sound_type: def.sound_type,
        })
    }

    fn persist(&mut self, next: Vec<Alert>) -> Result<(), AppError> {
        let raw = serde_json::to_string(&next)?;
        self.kv.set(ALERTS_KEY, &raw)?;
        self.alerts = next;
        Ok(())
    }

    fn fresh_id(&self) -> String {
        let mut rng = rand::thread_rng();
        loop {
            let id: String = (0..ID_LEN)
                .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
                .collect();

            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}
