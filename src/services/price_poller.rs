use std::{sync::Arc, time::Duration};

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};

use crate::{
    events::{ClientEvent, EventsTx},
    services::{alert_engine::AlertEngine, livecoinwatch::PriceFeed, price_board::PriceBoard},
};

/// Running poll loop. Dropping the handle leaves the task running; call
/// `stop` to end it.
pub struct PollerHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    pub async fn stop(self) {
        let _ = self.stop_tx.send(true);
        if let Err(e) = self.task.await {
            tracing::warn!("[price-poller] task ended abnormally: {}", e);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

pub fn spawn_price_poller<F: PriceFeed>(
    feed: Arc<F>,
    prices: PriceBoard,
    engine: Arc<AlertEngine>,
    events_tx: EventsTx,
    every: Duration,
) -> PollerHandle {
    let (stop_tx, mut stop_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut interval = time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!("[price-poller] polling every {:?}", every);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    run_tick(feed.as_ref(), &prices, &engine, &events_tx).await;
                }
                changed = stop_rx.changed() => {
                    if changed.is_err() || *stop_rx.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!("[price-poller] stopped");
    });

    PollerHandle { stop_tx, task }
}

/// One fetch-merge-check pass. A failed fetch skips the tick entirely.
pub async fn run_tick<F: PriceFeed>(
    feed: &F,
    prices: &PriceBoard,
    engine: &AlertEngine,
    events_tx: &EventsTx,
) -> usize {
    let coins = match feed.fetch_coins().await {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("[price-poller] fetch failed, skipping tick: {}", e);
            return 0;
        }
    };

    prices.apply(&coins);
    let _ = events_tx.send(ClientEvent::signal("pricesUpdated"));

    let fired = engine.check_prices(&coins);
    if !fired.is_empty() {
        let _ = events_tx.send(ClientEvent::signal("alertsUpdated"));
    }

    fired.len()
}
