use serde::Serialize;
use serde_json::Value;
use tokio::sync::broadcast;

/// A named event pushed to every open page over `/events`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientEvent {
    pub name: &'static str,
    pub data: Value,
}

impl ClientEvent {
    pub fn new(name: &'static str, data: impl Serialize) -> Self {
        Self {
            name,
            data: serde_json::to_value(data).unwrap_or(Value::Null),
        }
    }

    /// An event that only tells the page to refresh something.
    pub fn signal(name: &'static str) -> Self {
        Self {
            name,
            data: Value::Bool(true),
        }
    }
}

pub type EventsTx = broadcast::Sender<ClientEvent>;

pub fn channel() -> EventsTx {
    let (tx, _rx) = broadcast::channel(64);
    tx
}
