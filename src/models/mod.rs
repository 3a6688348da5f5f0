pub mod alert;
pub mod coin;

pub use alert::{Alert, NewAlert, SoundType};
pub use coin::{Coin, CoinDelta, MarketOverview};
