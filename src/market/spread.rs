//! 跨交易所价差检测

use serde::Serialize;

use super::Ticker;

/// 告警阈值
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadThresholds {
    /// 单交易所 ask - bid 上限（报价货币）
    pub spread: f64,
    /// 两交易所 bid 差异上限（%）
    pub price_diff_pct: f64,
}

impl Default for SpreadThresholds {
    fn default() -> Self {
        Self {
            spread: 0.5,
            price_diff_pct: 1.0,
        }
    }
}

/// 触发告警的检测结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArbitrageReport {
    pub pair: String,
    pub primary: Ticker,
    pub secondary: Ticker,
    pub price_diff_pct: f64,
    /// 触发原因，按检测顺序
    pub reasons: Vec<String>,
}

/// |a - b| / mean(a, b) * 100
pub fn price_diff_pct(a: f64, b: f64) -> f64 {
    let avg = (a + b) / 2.0;
    if avg == 0.0 {
        return 0.0;
    }
    (a - b).abs() / avg * 100.0
}

/// 检测价差，没有超过任何阈值时返回 None
pub fn evaluate(
    pair: &str,
    primary: &Ticker,
    secondary: &Ticker,
    thresholds: &SpreadThresholds,
) -> Option<ArbitrageReport> {
    let diff_pct = price_diff_pct(primary.bid, secondary.bid);
    let mut reasons = Vec::new();

    for ticker in [primary, secondary] {
        if ticker.spread > thresholds.spread {
            reasons.push(format!("{} spread is high: ${:.4}", ticker.exchange, ticker.spread));
        }
    }
    if diff_pct > thresholds.price_diff_pct {
        reasons.push(format!("Price difference between exchanges is {:.2}%", diff_pct));
    }

    if reasons.is_empty() {
        return None;
    }

    Some(ArbitrageReport {
        pair: pair.to_string(),
        primary: primary.clone(),
        secondary: secondary.clone(),
        price_diff_pct: diff_pct,
        reasons,
    })
}

impl ArbitrageReport {
    pub fn title(&self) -> String {
        format!("Arbitrage Alert: {}", self.pair)
    }

    /// 卡片明细行，顺序固定
    pub fn card_details(&self) -> Vec<(String, String)> {
        let p = &self.primary;
        let s = &self.secondary;
        vec![
            (format!("{} Bid", p.exchange), format!("${:.2}", p.bid)),
            (format!("{} Ask", p.exchange), format!("${:.2}", p.ask)),
            (format!("{} Spread", p.exchange), format!("${:.4}", p.spread)),
            (format!("{} Bid", s.exchange), format!("${:.2}", s.bid)),
            (format!("{} Ask", s.exchange), format!("${:.2}", s.ask)),
            (format!("{} Spread", s.exchange), format!("${:.4}", s.spread)),
            ("Price Diff %".to_string(), format!("{:.2}%", self.price_diff_pct)),
            (
                format!("Volume ({})", s.exchange),
                format!("${}", group_thousands(s.volume_usdt.unwrap_or(0.0))),
            ),
            (
                format!("24h Change ({})", s.exchange),
                format!("{:.2}%", s.price_change_24h.unwrap_or(0.0)),
            ),
        ]
    }

    /// 纯文本版本
    pub fn text(&self) -> String {
        let line = |t: &Ticker| {
            format!(
                "{} Bid: ${:.2}, Ask: ${:.2}, Spread: ${:.4}",
                t.exchange, t.bid, t.ask, t.spread
            )
        };
        format!(
            "🚨 Arbitrage Alert for {} 🚨\n\n{}\n{}\n\n{}",
            self.pair,
            line(&self.primary),
            line(&self.secondary),
            self.reasons.join("\n")
        )
    }
}

/// 两位小数并加千分位: 1234567.891 -> "1,234,567.89"
fn group_thousands(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}
