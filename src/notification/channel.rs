//! 消息渠道 trait 定义

use super::payload::MessagePayload;
use super::webhook::{DispatchResult, WebhookClient};
use tracing::info;

/// 消息渠道
pub trait MessageChannel: Send + Sync {
    /// 渠道名称（用于日志）
    fn name(&self) -> &str;

    /// 同步发送消息，结果已归一化
    fn send(&self, payload: &MessagePayload) -> DispatchResult;
}

impl<T: MessageChannel + ?Sized> MessageChannel for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn send(&self, payload: &MessagePayload) -> DispatchResult {
        (**self).send(payload)
    }
}

impl MessageChannel for WebhookClient {
    fn name(&self) -> &str {
        "lark-webhook"
    }

    fn send(&self, payload: &MessagePayload) -> DispatchResult {
        WebhookClient::send(self, payload)
    }
}

/// Dry-run 渠道：打印 payload，不发送
#[derive(Debug, Default)]
pub struct DryRunChannel;

impl MessageChannel for DryRunChannel {
    fn name(&self) -> &str {
        "dry-run"
    }

    fn send(&self, payload: &MessagePayload) -> DispatchResult {
        match serde_json::to_value(payload) {
            Ok(value) => {
                info!(msg_type = payload.kind(), "[DRY-RUN] Would send payload");
                println!(
                    "[DRY-RUN] {}",
                    serde_json::to_string_pretty(&value).unwrap_or_default()
                );
                DispatchResult::ok(None, value)
            }
            Err(e) => DispatchResult::failed(None, format!("Failed to serialize payload: {}", e)),
        }
    }
}
