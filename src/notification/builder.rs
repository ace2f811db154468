//! 消息构建器 - 把语义输入转换为 `MessagePayload`
//!
//! 所有函数都是纯函数：不做长度或 schema 校验，只负责拼装结构。
//! 唯一的非确定性来源是 `alert_card` 的时间戳，需要稳定输出时用 `alert_card_at`。

use chrono::{Local, NaiveDateTime};
use std::fmt::Display;

use super::alert::AlertItem;
use super::card::{ButtonKind, Card, CardAction, CardElement};
use super::payload::{MessagePayload, PostBody, PostContent, PostLocales, PostSpan, TextContent};
use super::urgency::Urgency;

/// Message text constants
pub mod msg {
    /// @所有人 标记（服务端私有格式，原样发送）
    pub const MENTION_ALL: &str = "<at user_id=\"all\">所有人</at> ";
    pub const ALERT_CARD_HEADER: &str = "Risk Management Alert";
    pub const TIME_LABEL: &str = "Time";
    pub const URGENT_RESPONSE: &str = "Urgent Response";
    pub const VIEW_DETAILS: &str = "View Details";
    pub const SUMMARY_TITLE: &str = "📊 **Risk Alert Summary**";
    pub const TOTAL_ALERTS: &str = "Total Alerts";
}

/// 卡片时间戳格式
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 单个用户的 @ 标记
pub fn mention_markup(user_id: &str) -> String {
    format!("<at user_id=\"{}\">@user</at> ", user_id)
}

/// 消息构建器
pub struct MessageBuilder;

impl MessageBuilder {
    /// 纯文本消息
    pub fn text(text: impl Into<String>) -> MessagePayload {
        MessagePayload::Text {
            content: TextContent { text: text.into() },
        }
    }

    /// 带 @ 标记的文本消息
    ///
    /// `mention_all` 为 true 时只加 @所有人，忽略 `user_ids`；
    /// 否则按输入顺序为每个 user id 加一个标记。
    pub fn mention_text<S: AsRef<str>>(text: &str, user_ids: &[S], mention_all: bool) -> MessagePayload {
        let mut full_text = String::new();
        if mention_all {
            full_text.push_str(msg::MENTION_ALL);
        } else {
            for user_id in user_ids {
                full_text.push_str(&mention_markup(user_id.as_ref()));
            }
        }
        full_text.push_str(text);
        Self::text(full_text)
    }

    /// 富文本消息，内容原样放在 `zh_cn` 下
    pub fn rich_text(title: impl Into<String>, content: Vec<Vec<PostSpan>>) -> MessagePayload {
        MessagePayload::Post {
            content: PostContent {
                post: PostLocales {
                    zh_cn: PostBody {
                        title: title.into(),
                        content,
                    },
                },
            },
        }
    }

    /// 卡片消息，原样透传
    pub fn card(card: Card) -> MessagePayload {
        MessagePayload::Interactive { card }
    }

    /// 紧急告警文本: `🚨 **title** 🚨\n\nmessage`
    pub fn urgent_text(title: &str, message: &str, mention_all: bool) -> MessagePayload {
        let alert_text = format!("🚨 **{}** 🚨\n\n{}", title, message);
        if mention_all {
            Self::text(format!("{}{}", msg::MENTION_ALL, alert_text))
        } else {
            Self::text(alert_text)
        }
    }

    /// 非紧急的自定义告警: `📊 **kind**\n\nmessage`
    pub fn headline_text(kind: &str, message: &str) -> MessagePayload {
        Self::text(format!("📊 **{}**\n\n{}", kind, message))
    }

    /// 告警卡片，时间戳取当前本地时间
    pub fn alert_card<K: Display, V: Display>(
        title: &str,
        details: &[(K, V)],
        urgency: Urgency,
    ) -> MessagePayload {
        Self::alert_card_at(title, details, urgency, Local::now().naive_local())
    }

    /// 告警卡片
    ///
    /// 元素顺序：标题行、每个 detail 一行（按输入顺序）、时间戳行，
    /// 仅 HIGH 时追加按钮组。
    pub fn alert_card_at<K: Display, V: Display>(
        title: &str,
        details: &[(K, V)],
        urgency: Urgency,
        timestamp: NaiveDateTime,
    ) -> MessagePayload {
        let emoji = urgency.emoji();

        let mut card = Card::new()
            .with_header(format!("{} {}", emoji, msg::ALERT_CARD_HEADER), urgency.color())
            .push(CardElement::markdown(format!("{} **{}**", emoji, title)));

        for (label, value) in details {
            card = card.push(CardElement::markdown(format!("**{}:** {}", label, value)));
        }

        card = card.push(CardElement::markdown(format!(
            "**{}:** {}",
            msg::TIME_LABEL,
            timestamp.format(TIMESTAMP_FORMAT)
        )));

        if urgency.has_actions() {
            card = card.push(CardElement::actions(vec![
                CardAction::button(msg::URGENT_RESPONSE, ButtonKind::Danger),
                CardAction::button(msg::VIEW_DETAILS, ButtonKind::Primary),
            ]));
        }

        Self::card(card)
    }

    /// 多条告警的汇总文本
    pub fn summary(alerts: &[AlertItem]) -> MessagePayload {
        let mut summary_text = format!("{}\n\n", msg::SUMMARY_TITLE);

        for (i, alert) in alerts.iter().enumerate() {
            summary_text.push_str(&format!("{}. **{}**\n", i + 1, alert.kind_or_default()));
            summary_text.push_str(&format!("   {}\n", alert.message_or_default()));
            summary_text.push_str(&format!("   ⏰ {}\n\n", alert.time_or_default()));
        }

        summary_text.push_str(&format!("{}: {}", msg::TOTAL_ALERTS, alerts.len()));
        Self::text(summary_text)
    }
}
