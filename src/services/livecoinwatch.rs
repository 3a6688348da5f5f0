use std::future::Future;

use reqwest::Client;
use serde::Serialize;
use serde_json::json;

use crate::{
    error::AppError,
    models::{Coin, MarketOverview},
};

/// Source of price batches for the poller.
pub trait PriceFeed: Send + Sync + 'static {
    fn fetch_coins(&self) -> impl Future<Output = Result<Vec<Coin>, AppError>> + Send;
}

#[derive(Clone)]
pub struct LiveCoinWatchClient {
    http: Client,
    base_url: String,
    api_key: String,
    currency: String,
    limit: u32,
}

impl LiveCoinWatchClient {
    pub fn new(base_url: &str, api_key: String, currency: &str, limit: u32) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            currency: currency.to_string(),
            limit,
        }
    }

    fn has_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    async fn post<B: Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        if !self.has_key() {
            return Err(AppError::Feed(
                "LIVECOINWATCH_API_KEY is missing in .env".to_string(),
            ));
        }

        let url = format!("{}{}", self.base_url, path);
        let res = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::Feed(format!("{path} failed: {status} {body}")));
        }

        Ok(res.json::<T>().await?)
    }

    /// Top coins by rank.
    pub async fn coins(&self) -> Result<Vec<Coin>, AppError> {
        let body = json!({
            "currency": self.currency,
            "sort": "rank",
            "order": "ascending",
            "offset": 0,
            "limit": self.limit,
            "meta": true,
        });

        self.post("/coins/list", &body).await
    }

    pub async fn coin(&self, code: &str) -> Result<Coin, AppError> {
        let body = json!({
            "currency": self.currency,
            "code": code,
            "meta": true,
        });

        let mut coin: Coin = self.post("/coins/single", &body).await?;
        // `coins/single` does not echo the code back
        if coin.code.is_empty() {
            coin.code = code.to_string();
        }
        Ok(coin)
    }

    pub async fn overview(&self) -> Result<MarketOverview, AppError> {
        self.post("/overview", &json!({ "currency": self.currency }))
            .await
    }
}

impl PriceFeed for LiveCoinWatchClient {
    fn fetch_coins(&self) -> impl Future<Output = Result<Vec<Coin>, AppError>> + Send {
        self.coins()
    }
}
