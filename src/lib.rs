//! Lark Alert - 通过群机器人 webhook 发送文本、富文本和卡片告警

pub mod cli;
pub mod market;
pub mod notification;

pub use notification::{
    AlertComposer, AlertItem, Card, CardElement, DispatchError, DispatchResult, MessageBuilder,
    MessageChannel, MessagePayload, PostSpan, Urgency, WebhookClient, WebhookConfig,
};
pub use market::{BinanceClient, GateioClient, MonitorConfig, SpreadMonitor, SpreadThresholds, Ticker, TickerSource, TradingPair};
