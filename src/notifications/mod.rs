//! The three surfaces a triggered alert is announced on.
//!
//! Each channel sits on top of a capability trait (`AudioSink`,
//! `NotificationSink`) or the page event bus, so the engine can be driven
//! with fakes in tests and with the browser bridge in the server.

pub mod banner;
pub mod browser;
pub mod desktop;
pub mod sound;

use chrono::{DateTime, Utc};

use crate::{error::AppError, models::Alert};

pub use banner::{Banner, BannerChannel};
pub use browser::{BrowserAudio, BrowserNotifier};
pub use desktop::{DesktopChannel, DesktopNotification, NotificationSink, Permission};
pub use sound::{AudioSink, SoundChannel};

/// An alert that passed its condition and cool-down check.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerEvent {
    pub alert: Alert,
    pub current_price: f64,
    pub at: DateTime<Utc>,
}

pub trait NotificationChannel: Send + Sync {
    fn name(&self) -> &'static str;
    fn dispatch(&self, event: &TriggerEvent) -> Result<(), AppError>;
}
