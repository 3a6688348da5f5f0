use std::sync::{
    Arc, Mutex,
    atomic::{AtomicU64, Ordering},
};

use serde::{Deserialize, Serialize};

use crate::error::AppError;

use super::{NotificationChannel, SoundChannel, TriggerEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    #[default]
    Default,
    Granted,
    Denied,
}

impl std::str::FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(Permission::Default),
            "granted" => Ok(Permission::Granted),
            "denied" => Ok(Permission::Denied),
            other => Err(format!("unknown permission: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesktopNotification {
    pub id: u64,
    pub title: String,
    pub body: String,
    pub icon: String,
    pub require_interaction: bool,
}

/// Native OS notifications.
pub trait NotificationSink: Send + Sync {
    fn request_permission(&self) -> Result<(), AppError>;
    fn show(&self, notification: &DesktopNotification) -> Result<(), AppError>;
    fn close(&self, id: u64);
}

pub struct DesktopChannel {
    sink: Arc<dyn NotificationSink>,
    sound: Arc<SoundChannel>,
    icon: String,
    permission: Mutex<Permission>,
    next_id: AtomicU64,
}

impl DesktopChannel {
    pub fn new(sink: Arc<dyn NotificationSink>, sound: Arc<SoundChannel>, icon: &str) -> Self {
        Self {
            sink,
            sound,
            icon: icon.to_string(),
            permission: Mutex::new(Permission::Default),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn permission(&self) -> Permission {
        *self.permission.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Asks the sink for permission, once, while it is still undecided.
    pub fn request_permission(&self) {
        if self.permission() != Permission::Default {
            return;
        }

        if let Err(e) = self.sink.request_permission() {
            tracing::warn!("notification permission request failed: {}", e);
        }
    }

    /// Records the user's answer. Only `default` can move; `granted` and
    /// `denied` hold for the rest of the session.
    pub fn set_permission(&self, answer: Permission) -> Permission {
        let mut current = self.permission.lock().unwrap_or_else(|e| e.into_inner());

        if *current == Permission::Default && answer != Permission::Default {
            tracing::info!("desktop notifications {:?}", answer);
            *current = answer;
        }

        *current
    }

    pub fn build(&self, event: &TriggerEvent) -> DesktopNotification {
        let alert = &event.alert;

        DesktopNotification {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            title: format!("Price Alert: {}", alert.coin_code),
            body: format!(
                "{} has {} ${:.2}!\nCurrent price: ${:.2}",
                alert.coin_code,
                alert.direction_wording(),
                alert.target_price,
                event.current_price
            ),
            icon: self.icon.clone(),
            require_interaction: true,
        }
    }

    pub fn notify(&self, event: &TriggerEvent) -> Result<(), AppError> {
        if self.permission() != Permission::Granted {
            return Ok(());
        }

        let notification = self.build(event);
        self.sink.show(&notification)
    }

    /// Clicking a notification silences the alarm and closes it.
    pub fn clicked(&self, id: u64) {
        self.sound.stop();
        self.sink.close(id);
    }
}

impl NotificationChannel for DesktopChannel {
    fn name(&self) -> &'static str {
        "desktop"
    }

    fn dispatch(&self, event: &TriggerEvent) -> Result<(), AppError> {
        self.notify(event)
    }
}
