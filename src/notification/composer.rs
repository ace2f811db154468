//! AlertComposer - 常用告警形态的便捷封装
//!
//! 只做委托：`MessageBuilder` 拼装 payload，`MessageChannel` 负责发送。

use anyhow::Result;
use std::fmt::Display;
use tracing::debug;

use super::alert::AlertItem;
use super::builder::MessageBuilder;
use super::card::Card;
use super::channel::MessageChannel;
use super::payload::{MessagePayload, PostSpan};
use super::urgency::Urgency;
use super::webhook::{DispatchResult, WebhookClient, WebhookConfig};

pub struct AlertComposer<C: MessageChannel> {
    channel: C,
}

impl AlertComposer<WebhookClient> {
    /// 直接用 webhook 配置创建
    pub fn webhook(config: WebhookConfig) -> Result<Self> {
        Ok(Self::new(WebhookClient::new(config)?))
    }
}

impl<C: MessageChannel> AlertComposer<C> {
    pub fn new(channel: C) -> Self {
        Self { channel }
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// 发送任意 payload
    pub fn dispatch(&self, payload: &MessagePayload) -> DispatchResult {
        debug!(channel = self.channel.name(), msg_type = payload.kind(), "Dispatching message");
        self.channel.send(payload)
    }

    pub fn send_text(&self, text: &str) -> DispatchResult {
        self.dispatch(&MessageBuilder::text(text))
    }

    pub fn send_mention_text<S: AsRef<str>>(&self, text: &str, user_ids: &[S], mention_all: bool) -> DispatchResult {
        self.dispatch(&MessageBuilder::mention_text(text, user_ids, mention_all))
    }

    pub fn send_rich_text(&self, title: &str, content: Vec<Vec<PostSpan>>) -> DispatchResult {
        self.dispatch(&MessageBuilder::rich_text(title, content))
    }

    pub fn send_card(&self, card: Card) -> DispatchResult {
        self.dispatch(&MessageBuilder::card(card))
    }

    /// 紧急告警（默认 @所有人）
    pub fn send_urgent_alert(&self, title: &str, message: &str, mention_all: bool) -> DispatchResult {
        self.dispatch(&MessageBuilder::urgent_text(title, message, mention_all))
    }

    pub fn send_alert_card<K: Display, V: Display>(
        &self,
        title: &str,
        details: &[(K, V)],
        urgency: Urgency,
    ) -> DispatchResult {
        self.dispatch(&MessageBuilder::alert_card(title, details, urgency))
    }

    pub fn send_summary(&self, alerts: &[AlertItem]) -> DispatchResult {
        self.dispatch(&MessageBuilder::summary(alerts))
    }

    /// HIGH 走紧急告警并 @所有人，其余发普通标题文本
    pub fn send_custom_alert(&self, kind: &str, message: &str, urgency: Urgency) -> DispatchResult {
        match urgency {
            Urgency::High => self.send_urgent_alert(kind, message, true),
            Urgency::Medium | Urgency::Low => self.dispatch(&MessageBuilder::headline_text(kind, message)),
        }
    }
}
