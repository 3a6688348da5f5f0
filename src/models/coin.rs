use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoinDelta {
    pub hour: Option<f64>,
    pub day: Option<f64>,
    pub week: Option<f64>,
    pub month: Option<f64>,
    pub quarter: Option<f64>,
    pub year: Option<f64>,
}

/// One row of the LiveCoinWatch `coins/list` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
    pub rate: f64,
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default)]
    pub cap: Option<f64>,
    #[serde(default)]
    pub delta: Option<CoinDelta>,
}

impl Coin {
    pub fn new(code: &str, name: &str, rate: f64) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            symbol: None,
            rate,
            volume: None,
            cap: None,
            delta: None,
        }
    }

    pub fn matches(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.name.to_lowercase().contains(&q) || self.code.to_lowercase().contains(&q)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketOverview {
    pub cap: f64,
    pub volume: f64,
    pub liquidity: f64,
    #[serde(rename = "btcDominance")]
    pub btc_dominance: f64,
}
