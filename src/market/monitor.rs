//! 价差监控循环
//!
//! 顺序轮询每个交易对，命中阈值时发送告警卡片，然后固定间隔休眠。
//! 没有并发，也没有取消：`max_cycles` 是唯一的退出条件。

use std::str::FromStr;
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::spread::{evaluate, ArbitrageReport, SpreadThresholds};
use super::TickerSource;
use crate::notification::{AlertComposer, DispatchResult, MessageChannel, Urgency};

/// 默认轮询间隔（秒）
pub const DEFAULT_INTERVAL_SECS: u64 = 300;

/// 同一资产在两个交易所的 symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradingPair {
    /// 主交易所 symbol，如 BTCUSDT
    pub primary: String,
    /// 对比交易所 symbol，如 BTC_USDT
    pub secondary: String,
}

impl TradingPair {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }

    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("BTCUSDT", "BTC_USDT"),
            Self::new("ETHUSDT", "ETH_USDT"),
            Self::new("XRPUSDT", "XRP_USDT"),
        ]
    }
}

impl FromStr for TradingPair {
    type Err = String;

    /// `BTCUSDT:BTC_USDT`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((a, b)) if !a.trim().is_empty() && !b.trim().is_empty() => {
                Ok(Self::new(a.trim(), b.trim()))
            }
            _ => Err(format!("expected PRIMARY:SECONDARY (e.g. BTCUSDT:BTC_USDT), got '{}'", s)),
        }
    }
}

/// 监控配置
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub pairs: Vec<TradingPair>,
    pub thresholds: SpreadThresholds,
    pub interval: Duration,
    /// None 表示一直运行
    pub max_cycles: Option<u64>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            pairs: TradingPair::defaults(),
            thresholds: SpreadThresholds::default(),
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            max_cycles: None,
        }
    }
}

/// 单个交易对一次检查的结果
#[derive(Debug)]
pub enum PairOutcome {
    /// 在阈值内
    Quiet,
    /// 已发送告警
    Alerted {
        report: ArbitrageReport,
        result: DispatchResult,
    },
    /// 拉取行情失败，跳过
    FetchFailed(String),
}

pub struct SpreadMonitor<P, S, C>
where
    P: TickerSource,
    S: TickerSource,
    C: MessageChannel,
{
    primary: P,
    secondary: S,
    composer: AlertComposer<C>,
    config: MonitorConfig,
}

impl<P, S, C> SpreadMonitor<P, S, C>
where
    P: TickerSource,
    S: TickerSource,
    C: MessageChannel,
{
    pub fn new(primary: P, secondary: S, composer: AlertComposer<C>, config: MonitorConfig) -> Self {
        Self {
            primary,
            secondary,
            composer,
            config,
        }
    }

    /// 检查单个交易对
    pub fn check_pair(&self, pair: &TradingPair) -> PairOutcome {
        let primary = match self.primary.fetch(&pair.primary) {
            Ok(t) => t,
            Err(e) => {
                error!(pair = %pair.primary, error = %e, "Failed to fetch primary ticker");
                return PairOutcome::FetchFailed(e.to_string());
            }
        };
        let secondary = match self.secondary.fetch(&pair.secondary) {
            Ok(t) => t,
            Err(e) => {
                error!(pair = %pair.secondary, error = %e, "Failed to fetch secondary ticker");
                return PairOutcome::FetchFailed(e.to_string());
            }
        };

        let Some(report) = evaluate(&pair.primary, &primary, &secondary, &self.config.thresholds) else {
            info!(pair = %pair.primary, "Spread and price difference within thresholds");
            return PairOutcome::Quiet;
        };

        debug!(pair = %pair.primary, report = %report.text(), "Thresholds exceeded");

        let result = self
            .composer
            .send_alert_card(&report.title(), &report.card_details(), Urgency::High);
        if result.success {
            info!(pair = %pair.primary, reasons = report.reasons.len(), "Arbitrage alert sent");
        } else {
            // 发送失败时保留完整告警内容
            warn!(
                pair = %pair.primary,
                error = ?result.error,
                report = %report.text(),
                "Failed to send arbitrage alert"
            );
        }

        PairOutcome::Alerted { report, result }
    }

    /// 按顺序检查所有交易对
    pub fn run_cycle(&self) -> Vec<PairOutcome> {
        self.config
            .pairs
            .iter()
            .map(|pair| self.check_pair(pair))
            .collect()
    }

    /// 循环运行，返回完成的轮数
    pub fn run(&self) -> u64 {
        let mut cycles = 0;
        loop {
            let outcomes = self.run_cycle();
            cycles += 1;

            let alerts = outcomes
                .iter()
                .filter(|o| matches!(o, PairOutcome::Alerted { .. }))
                .count();
            info!(cycle = cycles, pairs = outcomes.len(), alerts, "Monitor cycle completed");

            if self.config.max_cycles.is_some_and(|max| cycles >= max) {
                return cycles;
            }

            info!(secs = self.config.interval.as_secs(), "Waiting before next check");
            thread::sleep(self.config.interval);
        }
    }
}
