use anyhow::{Context, Result};

/// One tracked coin: CoinGecko id, display ticker, list emoji.
pub struct Asset {
    pub id: &'static str,
    pub symbol: &'static str,
    pub emoji: &'static str,
}

/// Table order is the order the coins appear in the update.
pub const ASSETS: &[Asset] = &[
    Asset { id: "bitcoin", symbol: "BTC", emoji: "\u{1f171}\u{fe0f}" },
    Asset { id: "ethereum", symbol: "ETH", emoji: "\u{2728}" },
    Asset { id: "tether", symbol: "USDT", emoji: "\u{1f4b5}" },
    Asset { id: "binancecoin", symbol: "BNB", emoji: "\u{1f536}" },
    Asset { id: "solana", symbol: "SOL", emoji: "\u{1f7e3}" },
    Asset { id: "ripple", symbol: "XRP", emoji: "\u{1f680}" },
    Asset { id: "usd-coin", symbol: "USDC", emoji: "\u{1fa99}" },
    Asset { id: "cardano", symbol: "ADA", emoji: "\u{1f537}" },
    Asset { id: "avalanche-2", symbol: "AVAX", emoji: "\u{1f53a}" },
    Asset { id: "dogecoin", symbol: "DOGE", emoji: "\u{1f436}" },
    Asset { id: "toncoin", symbol: "TON", emoji: "\u{1f48e}" },
    Asset { id: "tron", symbol: "TRX", emoji: "\u{1f4d0}" },
];

/// Quotes are requested in Afghan afghani.
pub const VS_CURRENCY: &str = "afn";

pub struct Config {
    pub bot_token: String,
    pub chat_id: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bot_token: std::env::var("BOT_TOKEN").context("BOT_TOKEN not set")?,
            chat_id: std::env::var("CHAT_ID").context("CHAT_ID not set")?,
        })
    }
}
