//! `monitor` 命令：Binance / Gate.io 价差监控

use anyhow::Result;
use clap::Args;
use std::time::Duration;
use tracing::info;

use super::TargetArgs;
use crate::market::binance::BINANCE_API_URL;
use crate::market::gateio::GATEIO_API_URL;
use crate::market::monitor::DEFAULT_INTERVAL_SECS;
use crate::market::{BinanceClient, GateioClient, MonitorConfig, SpreadMonitor, SpreadThresholds, TradingPair};

/// `monitor` 命令参数
#[derive(Args, Debug)]
pub struct MonitorArgs {
    #[command(flatten)]
    pub target: TargetArgs,
    /// 交易对 BINANCE_SYMBOL:GATEIO_SYMBOL（可重复，默认 BTC/ETH/XRP）
    #[arg(long = "pair", value_name = "PRIMARY:SECONDARY")]
    pub pairs: Vec<TradingPair>,
    /// 轮询间隔（秒）
    #[arg(long, short, default_value_t = DEFAULT_INTERVAL_SECS)]
    pub interval: u64,
    /// 单交易所 spread 阈值（USD）
    #[arg(long, default_value_t = 0.5)]
    pub spread_threshold: f64,
    /// 跨交易所价差阈值（%）
    #[arg(long, default_value_t = 1.0)]
    pub diff_threshold: f64,
    /// 运行轮数后退出（默认一直运行）
    #[arg(long)]
    pub cycles: Option<u64>,
    #[arg(long, default_value = BINANCE_API_URL)]
    pub binance_url: String,
    #[arg(long, default_value = GATEIO_API_URL)]
    pub gateio_url: String,
}

impl MonitorArgs {
    pub fn monitor_config(&self) -> MonitorConfig {
        let pairs = if self.pairs.is_empty() {
            TradingPair::defaults()
        } else {
            self.pairs.clone()
        };

        MonitorConfig {
            pairs,
            thresholds: SpreadThresholds {
                spread: self.spread_threshold,
                price_diff_pct: self.diff_threshold,
            },
            interval: Duration::from_secs(self.interval),
            max_cycles: self.cycles,
        }
    }
}

/// 返回完成的轮数
pub fn handle_monitor(args: MonitorArgs) -> Result<u64> {
    let config = args.monitor_config();
    info!(
        pairs = config.pairs.len(),
        interval_secs = args.interval,
        spread_threshold = args.spread_threshold,
        diff_threshold = args.diff_threshold,
        "Starting spread monitor"
    );

    let monitor = SpreadMonitor::new(
        BinanceClient::with_base_url(&args.binance_url)?,
        GateioClient::with_base_url(&args.gateio_url)?,
        args.target.composer()?,
        config,
    );

    Ok(monitor.run())
}
