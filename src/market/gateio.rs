//! Gate.io 现货 tickers

use anyhow::Result;
use serde::Deserialize;
use tracing::debug;

use super::{get_json, http_client, parse_price, MarketError, Ticker, TickerSource};

pub const GATEIO_API_URL: &str = "https://api.gateio.ws";

const EXCHANGE: &str = "Gate.io";

#[derive(Debug, Deserialize)]
struct SpotTicker {
    currency_pair: String,
    highest_bid: String,
    lowest_ask: String,
    #[serde(default)]
    quote_volume: Option<String>,
    #[serde(default)]
    change_percentage: Option<String>,
}

pub struct GateioClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl GateioClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(GATEIO_API_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: http_client(EXCHANGE)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

impl TickerSource for GateioClient {
    fn name(&self) -> &'static str {
        EXCHANGE
    }

    /// `symbol` 形如 `BTC_USDT`
    fn fetch(&self, symbol: &str) -> Result<Ticker, MarketError> {
        let url = format!("{}/api/v4/spot/tickers", self.base_url);
        let tickers: Vec<SpotTicker> =
            get_json(&self.client, EXCHANGE, &url, &[("currency_pair", symbol)])?;

        let entry = tickers
            .into_iter()
            .find(|t| t.currency_pair == symbol)
            .ok_or_else(|| MarketError::SymbolNotFound {
                exchange: EXCHANGE,
                symbol: symbol.to_string(),
            })?;

        let bid = parse_price(EXCHANGE, "highest_bid", &entry.highest_bid)?;
        let ask = parse_price(EXCHANGE, "lowest_ask", &entry.lowest_ask)?;
        let volume = entry
            .quote_volume
            .as_deref()
            .map(|v| parse_price(EXCHANGE, "quote_volume", v))
            .transpose()?;
        let change = entry
            .change_percentage
            .as_deref()
            .map(|v| parse_price(EXCHANGE, "change_percentage", v))
            .transpose()?;

        debug!(symbol, bid, ask, ?volume, ?change, "Fetched Gate.io ticker");

        let mut ticker = Ticker::new(EXCHANGE, symbol, bid, ask);
        ticker.volume_usdt = volume;
        ticker.price_change_24h = change;
        Ok(ticker)
    }
}
