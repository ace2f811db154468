//! Binance 现货 bookTicker

use anyhow::Result;
use serde::Deserialize;
use tracing::debug;

use super::{get_json, http_client, parse_price, MarketError, Ticker, TickerSource};

pub const BINANCE_API_URL: &str = "https://api.binance.com";

const EXCHANGE: &str = "Binance";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookTickerResponse {
    bid_price: String,
    ask_price: String,
}

pub struct BinanceClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl BinanceClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(BINANCE_API_URL)
    }

    /// 指定 API 地址（测试或代理）
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: http_client(EXCHANGE)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

impl TickerSource for BinanceClient {
    fn name(&self) -> &'static str {
        EXCHANGE
    }

    /// `symbol` 形如 `BTCUSDT`
    fn fetch(&self, symbol: &str) -> Result<Ticker, MarketError> {
        let url = format!("{}/api/v3/ticker/bookTicker", self.base_url);
        let response: BookTickerResponse =
            get_json(&self.client, EXCHANGE, &url, &[("symbol", symbol)])?;

        let bid = parse_price(EXCHANGE, "bidPrice", &response.bid_price)?;
        let ask = parse_price(EXCHANGE, "askPrice", &response.ask_price)?;
        debug!(symbol, bid, ask, "Fetched Binance book ticker");

        Ok(Ticker::new(EXCHANGE, symbol, bid, ask))
    }
}
