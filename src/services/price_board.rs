use std::sync::{Arc, RwLock};

use crate::models::Coin;

/// The coin table the page shows. Filled by the first successful fetch,
/// after that only the rates of coins already listed are updated.
#[derive(Clone, Default)]
pub struct PriceBoard {
    coins: Arc<RwLock<Vec<Coin>>>,
}

impl PriceBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.read().unwrap_or_else(|e| e.into_inner()).is_empty()
    }

    pub fn replace(&self, coins: Vec<Coin>) {
        *self.coins.write().unwrap_or_else(|e| e.into_inner()) = coins;
    }

    /// Updates rates in place; coins missing from `incoming` keep their
    /// last rate and new codes are ignored.
    pub fn merge_rates(&self, incoming: &[Coin]) {
        let mut coins = self.coins.write().unwrap_or_else(|e| e.into_inner());
        merge_into(&mut coins, incoming);
    }

    /// First batch replaces the table, later ones merge. Both happen under
    /// one write guard.
    pub fn apply(&self, incoming: &[Coin]) {
        let mut coins = self.coins.write().unwrap_or_else(|e| e.into_inner());
        if coins.is_empty() {
            *coins = incoming.to_vec();
        } else {
            merge_into(&mut coins, incoming);
        }
    }

    pub fn all(&self) -> Vec<Coin> {
        self.coins.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn top(&self, n: usize) -> Vec<Coin> {
        self.coins
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .take(n)
            .cloned()
            .collect()
    }

    pub fn rate(&self, code: &str) -> Option<f64> {
        self.coins
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .find(|c| c.code == code)
            .map(|c| c.rate)
    }

    /// Case-insensitive match on name or code; empty query matches nothing.
    pub fn search(&self, query: &str) -> Vec<Coin> {
        let q = query.trim();
        if q.is_empty() {
            return Vec::new();
        }

        self.coins
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|c| c.matches(q))
            .cloned()
            .collect()
    }
}

fn merge_into(coins: &mut [Coin], incoming: &[Coin]) {
    for coin in coins.iter_mut() {
        if let Some(fresh) = incoming.iter().find(|c| c.code == coin.code) {
            coin.rate = fresh.rate;
        }
    }
}
