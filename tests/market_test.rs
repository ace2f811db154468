//! 交易所行情客户端与价差监控集成测试
//!
//! mockito 同时模拟 Binance / Gate.io 行情接口和 Lark webhook。

use lark_alert::market::monitor::PairOutcome;
use lark_alert::market::{
    BinanceClient, GateioClient, MarketError, MonitorConfig, SpreadMonitor, SpreadThresholds,
    TickerSource, TradingPair,
};
use lark_alert::notification::{AlertComposer, WebhookClient, WebhookConfig};
use mockito::Matcher;
use std::time::Duration;

const BOOK_TICKER_PATH: &str = "/api/v3/ticker/bookTicker";
const GATEIO_TICKERS_PATH: &str = "/api/v4/spot/tickers";

fn binance_mock(server: &mut mockito::Server, symbol: &str, bid: &str, ask: &str) -> mockito::Mock {
    server
        .mock("GET", BOOK_TICKER_PATH)
        .match_query(Matcher::UrlEncoded("symbol".into(), symbol.into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"{{"symbol":"{}","bidPrice":"{}","bidQty":"1.2","askPrice":"{}","askQty":"0.8"}}"#,
            symbol, bid, ask
        ))
        .create()
}

fn gateio_mock(server: &mut mockito::Server, pair: &str, bid: &str, ask: &str) -> mockito::Mock {
    server
        .mock("GET", GATEIO_TICKERS_PATH)
        .match_query(Matcher::UrlEncoded("currency_pair".into(), pair.into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"[{{"currency_pair":"{}","last":"{}","highest_bid":"{}","lowest_ask":"{}","quote_volume":"123456789.5","change_percentage":"-1.25"}}]"#,
            pair, bid, bid, ask
        ))
        .create()
}

// ============================================================================
// Binance
// ============================================================================

mod binance_tests {
    use super::*;

    #[test]
    fn test_default_clients() {
        assert_eq!(BinanceClient::new().unwrap().name(), "Binance");
        assert_eq!(GateioClient::new().unwrap().name(), "Gate.io");
    }

    #[test]
    fn test_fetch_book_ticker() {
        let mut server = mockito::Server::new();
        let mock = binance_mock(&mut server, "BTCUSDT", "43000.10000000", "43000.50000000");

        let client = BinanceClient::with_base_url(server.url()).unwrap();
        let ticker = client.fetch("BTCUSDT").unwrap();

        mock.assert();
        assert_eq!(client.name(), "Binance");
        assert_eq!(ticker.symbol, "BTCUSDT");
        assert_eq!(ticker.bid, 43000.1);
        assert_eq!(ticker.ask, 43000.5);
        assert!((ticker.spread - 0.4).abs() < 1e-6);
        assert!(ticker.volume_usdt.is_none());
    }

    #[test]
    fn test_status_error() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", BOOK_TICKER_PATH)
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(r#"{"code":-1121,"msg":"Invalid symbol."}"#)
            .create();

        let client = BinanceClient::with_base_url(server.url()).unwrap();
        let err = client.fetch("NOPE").unwrap_err();
        assert!(matches!(err, MarketError::Status { status: 400, .. }));
    }

    #[test]
    fn test_malformed_price() {
        let mut server = mockito::Server::new();
        let _mock = binance_mock(&mut server, "BTCUSDT", "n/a", "43000.5");

        let client = BinanceClient::with_base_url(server.url()).unwrap();
        let err = client.fetch("BTCUSDT").unwrap_err();
        assert!(matches!(err, MarketError::Parse { .. }));
    }
}

// ============================================================================
// Gate.io
// ============================================================================

mod gateio_tests {
    use super::*;

    #[test]
    fn test_fetch_ticker_with_volume() {
        let mut server = mockito::Server::new();
        let mock = gateio_mock(&mut server, "ETH_USDT", "2300.1", "2300.3");

        let client = GateioClient::with_base_url(server.url()).unwrap();
        let ticker = client.fetch("ETH_USDT").unwrap();

        mock.assert();
        assert_eq!(ticker.exchange, "Gate.io");
        assert_eq!(ticker.bid, 2300.1);
        assert_eq!(ticker.ask, 2300.3);
        assert_eq!(ticker.volume_usdt, Some(123456789.5));
        assert_eq!(ticker.price_change_24h, Some(-1.25));
    }

    #[test]
    fn test_symbol_not_found() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", GATEIO_TICKERS_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .create();

        let client = GateioClient::with_base_url(server.url()).unwrap();
        let err = client.fetch("FOO_USDT").unwrap_err();
        assert!(matches!(err, MarketError::SymbolNotFound { ref symbol, .. } if symbol == "FOO_USDT"));
    }
}

// ============================================================================
// 监控端到端
// ============================================================================

mod monitor_tests {
    use super::*;

    fn config(pairs: Vec<TradingPair>) -> MonitorConfig {
        MonitorConfig {
            pairs,
            thresholds: SpreadThresholds::default(),
            interval: Duration::ZERO,
            max_cycles: Some(1),
        }
    }

    #[test]
    fn test_price_gap_sends_alert_card() {
        let mut exchanges = mockito::Server::new();
        let _b = binance_mock(&mut exchanges, "BTCUSDT", "43000.0", "43000.2");
        // 约 2.3% 价差
        let _g = gateio_mock(&mut exchanges, "BTC_USDT", "44000.0", "44000.2");

        let mut lark = mockito::Server::new();
        let hook = lark
            .mock("POST", "/hook")
            .match_body(Matcher::Regex("Arbitrage Alert: BTCUSDT".to_string()))
            .with_status(200)
            .with_body(r#"{"code":0}"#)
            .expect(1)
            .create();

        let composer = AlertComposer::new(
            WebhookClient::new(WebhookConfig::new(format!("{}/hook", lark.url()))).unwrap(),
        );
        let monitor = SpreadMonitor::new(
            BinanceClient::with_base_url(exchanges.url()).unwrap(),
            GateioClient::with_base_url(exchanges.url()).unwrap(),
            composer,
            config(vec![TradingPair::new("BTCUSDT", "BTC_USDT")]),
        );

        let outcomes = monitor.run_cycle();
        hook.assert();
        assert_eq!(outcomes.len(), 1);
        match &outcomes[0] {
            PairOutcome::Alerted { report, result } => {
                assert!(result.success);
                assert!(report.price_diff_pct > 2.0);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_quiet_pair_sends_nothing() {
        let mut exchanges = mockito::Server::new();
        let _b = binance_mock(&mut exchanges, "ETHUSDT", "2300.0", "2300.1");
        let _g = gateio_mock(&mut exchanges, "ETH_USDT", "2300.2", "2300.3");

        let mut lark = mockito::Server::new();
        let hook = lark.mock("POST", "/hook").expect(0).create();

        let composer = AlertComposer::new(
            WebhookClient::new(WebhookConfig::new(format!("{}/hook", lark.url()))).unwrap(),
        );
        let monitor = SpreadMonitor::new(
            BinanceClient::with_base_url(exchanges.url()).unwrap(),
            GateioClient::with_base_url(exchanges.url()).unwrap(),
            composer,
            config(vec![TradingPair::new("ETHUSDT", "ETH_USDT")]),
        );

        assert_eq!(monitor.run(), 1);
        hook.assert();
    }
}
