//! 通知层 - 构建并发送 Lark 群消息
//!
//! # 分层
//! 1. `MessageBuilder`：纯函数，语义输入 → `MessagePayload`
//! 2. `WebhookClient`：一次 POST，结果归一化为 `DispatchResult`
//! 3. `AlertComposer`：常用告警形态，委托给上面两层
//!
//! # 使用示例
//! ```ignore
//! use lark_alert::notification::{AlertComposer, Urgency, WebhookConfig};
//!
//! let composer = AlertComposer::webhook(WebhookConfig::new(url))?;
//! let result = composer.send_alert_card("Price Surge", &[("Pair", "BTC/USDT")], Urgency::High);
//! assert!(result.success);
//! ```

pub mod alert;
pub mod builder;
pub mod card;
pub mod channel;
pub mod composer;
pub mod payload;
pub mod urgency;
pub mod webhook;

pub use alert::AlertItem;
pub use builder::{msg, MessageBuilder};
pub use card::{ButtonKind, Card, CardAction, CardConfig, CardElement, CardHeader, CardText, TextTag};
pub use channel::{DryRunChannel, MessageChannel};
pub use composer::AlertComposer;
pub use payload::{MessagePayload, PostSpan, TextStyle};
pub use urgency::Urgency;
pub use webhook::{DispatchError, DispatchResult, Delivered, WebhookClient, WebhookConfig};
