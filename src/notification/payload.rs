//! Payload 模块 - webhook 请求体
//!
//! 三种线上格式，由 `msg_type` 区分：
//! ```json
//! {"msg_type": "text", "content": {"text": "..."}}
//! {"msg_type": "post", "content": {"post": {"zh_cn": {"title": "...", "content": [[...]]}}}}
//! {"msg_type": "interactive", "card": {...}}
//! ```

use serde::{Deserialize, Serialize};

use super::card::Card;

/// 富文本固定使用的 locale
pub const POST_LOCALE: &str = "zh_cn";

/// Webhook 消息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "msg_type", rename_all = "snake_case")]
pub enum MessagePayload {
    /// 纯文本（含 @ 标记的文本也走这里）
    Text { content: TextContent },
    /// 富文本
    Post { content: PostContent },
    /// 交互式卡片
    Interactive { card: Card },
}

impl MessagePayload {
    /// `msg_type` 字段值
    pub fn kind(&self) -> &'static str {
        match self {
            MessagePayload::Text { .. } => "text",
            MessagePayload::Post { .. } => "post",
            MessagePayload::Interactive { .. } => "interactive",
        }
    }

    /// 文本消息内容
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessagePayload::Text { content } => Some(&content.text),
            _ => None,
        }
    }

    pub fn as_card(&self) -> Option<&Card> {
        match self {
            MessagePayload::Interactive { card } => Some(card),
            _ => None,
        }
    }

    pub fn as_post(&self) -> Option<&PostBody> {
        match self {
            MessagePayload::Post { content } => Some(&content.post.zh_cn),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostContent {
    pub post: PostLocales,
}

/// 富文本按 locale 分组，目前只发送 `zh_cn`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostLocales {
    pub zh_cn: PostBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostBody {
    pub title: String,
    /// 段落列表，每个段落是一行 span
    pub content: Vec<Vec<PostSpan>>,
}

/// 富文本 span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum PostSpan {
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        style: Vec<TextStyle>,
    },
    /// 超链接
    A { text: String, href: String },
    /// @ 某人
    At {
        user_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_name: Option<String>,
    },
    /// 图片
    Img { image_key: String },
}

impl PostSpan {
    pub fn text(text: impl Into<String>) -> Self {
        PostSpan::Text {
            text: text.into(),
            style: Vec::new(),
        }
    }

    pub fn styled(text: impl Into<String>, style: Vec<TextStyle>) -> Self {
        PostSpan::Text {
            text: text.into(),
            style,
        }
    }

    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        PostSpan::A {
            text: text.into(),
            href: href.into(),
        }
    }

    pub fn mention(user_id: impl Into<String>) -> Self {
        PostSpan::At {
            user_id: user_id.into(),
            user_name: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextStyle {
    Bold,
    Italic,
    Underline,
    LineThrough,
}
