//! 交易所行情 - 拉取盘口并检测价差
//!
//! 只依赖 notification 层对外的接口，notification 不依赖这里。

pub mod binance;
pub mod gateio;
pub mod monitor;
pub mod spread;

use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

pub use binance::BinanceClient;
pub use gateio::GateioClient;
pub use monitor::{MonitorConfig, SpreadMonitor, TradingPair};
pub use spread::{evaluate, ArbitrageReport, SpreadThresholds};

/// 行情请求超时（秒）
pub const TICKER_TIMEOUT_SECS: u64 = 10;

/// 单个交易对的盘口快照
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ticker {
    pub exchange: String,
    pub symbol: String,
    pub bid: f64,
    pub ask: f64,
    /// ask - bid
    pub spread: f64,
    /// 24h 成交额（USDT 计）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_usdt: Option<f64>,
    /// 24h 涨跌幅（%）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_change_24h: Option<f64>,
}

impl Ticker {
    pub fn new(exchange: impl Into<String>, symbol: impl Into<String>, bid: f64, ask: f64) -> Self {
        Self {
            exchange: exchange.into(),
            symbol: symbol.into(),
            bid,
            ask,
            spread: ask - bid,
            volume_usdt: None,
            price_change_24h: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum MarketError {
    #[error("{exchange} request failed: {source}")]
    Http {
        exchange: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{exchange} returned HTTP {status}")]
    Status { exchange: &'static str, status: u16 },
    #[error("{exchange} response malformed: {message}")]
    Parse { exchange: &'static str, message: String },
    #[error("{exchange}: {symbol} not found")]
    SymbolNotFound { exchange: &'static str, symbol: String },
}

/// 行情来源
pub trait TickerSource {
    /// 交易所名称
    fn name(&self) -> &'static str;

    fn fetch(&self, symbol: &str) -> Result<Ticker, MarketError>;
}

/// 交易所客户端共用的 blocking HTTP client
pub(crate) fn http_client(exchange: &'static str) -> anyhow::Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(TICKER_TIMEOUT_SECS))
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to create {} HTTP client: {}", exchange, e))
}

/// 解析交易所返回的十进制字符串
pub(crate) fn parse_price(exchange: &'static str, field: &str, raw: &str) -> Result<f64, MarketError> {
    raw.trim().parse::<f64>().map_err(|e| MarketError::Parse {
        exchange,
        message: format!("{} = '{}': {}", field, raw, e),
    })
}

/// GET 并解析 JSON，状态码和解析错误统一映射
pub(crate) fn get_json<T: serde::de::DeserializeOwned>(
    client: &reqwest::blocking::Client,
    exchange: &'static str,
    url: &str,
    query: &[(&str, &str)],
) -> Result<T, MarketError> {
    let response = client
        .get(url)
        .query(query)
        .send()
        .map_err(|source| MarketError::Http { exchange, source })?;

    let status = response.status();
    if !status.is_success() {
        return Err(MarketError::Status {
            exchange,
            status: status.as_u16(),
        });
    }

    response.json::<T>().map_err(|e| MarketError::Parse {
        exchange,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_spread() {
        let ticker = Ticker::new("Binance", "BTCUSDT", 100.0, 100.25);
        assert!((ticker.spread - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("Binance", "bidPrice", "43012.50000000").unwrap(), 43012.5);
        let err = parse_price("Binance", "bidPrice", "abc").unwrap_err();
        assert!(err.to_string().contains("bidPrice"));
    }
}
