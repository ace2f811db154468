//! 交互式卡片结构（`msg_type = "interactive"`）
//!
//! 卡片格式：
//! ```json
//! {
//!   "config": { "wide_screen_mode": true },
//!   "header": { "title": { "content": "...", "tag": "plain_text" }, "template": "red" },
//!   "elements": [
//!     { "tag": "div", "text": { "content": "**Pair:** BTC/USDT", "tag": "lark_md" } },
//!     { "tag": "action", "actions": [ { "tag": "button", "text": {...}, "type": "danger" } ] }
//!   ]
//! }
//! ```
//!
//! 发送前不做 schema 校验，结构错误只会由服务端在发送时报告。

use serde::{Deserialize, Serialize};

/// 卡片
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// 布局配置
    #[serde(default)]
    pub config: CardConfig,
    /// 标题栏（可选）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<CardHeader>,
    /// 按顺序渲染的元素
    #[serde(default)]
    pub elements: Vec<CardElement>,
}

impl Card {
    /// 空卡片（宽屏模式，无标题）
    pub fn new() -> Self {
        Self {
            config: CardConfig::default(),
            header: None,
            elements: Vec::new(),
        }
    }

    /// 设置标题栏
    pub fn with_header(mut self, title: impl Into<String>, template: impl Into<String>) -> Self {
        self.header = Some(CardHeader {
            title: CardText::plain(title),
            template: template.into(),
        });
        self
    }

    /// 设置宽屏模式
    pub fn with_wide_screen(mut self, wide_screen_mode: bool) -> Self {
        self.config.wide_screen_mode = wide_screen_mode;
        self
    }

    /// 追加元素
    pub fn push(mut self, element: CardElement) -> Self {
        self.elements.push(element);
        self
    }
}

impl Default for Card {
    fn default() -> Self {
        Self::new()
    }
}

/// 卡片布局配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    pub wide_screen_mode: bool,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            wide_screen_mode: true,
        }
    }
}

/// 卡片标题栏
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardHeader {
    pub title: CardText,
    /// 颜色模板: red, orange, blue, ...
    pub template: String,
}

/// 文本块
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardText {
    pub content: String,
    pub tag: TextTag,
}

impl CardText {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tag: TextTag::PlainText,
        }
    }

    pub fn markdown(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tag: TextTag::LarkMd,
        }
    }
}

/// 文本渲染方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextTag {
    PlainText,
    LarkMd,
}

/// 卡片元素
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum CardElement {
    /// 文本块
    Div { text: CardText },
    /// 按钮组
    Action { actions: Vec<CardAction> },
    /// 分割线
    Hr,
}

impl CardElement {
    /// `lark_md` 文本块
    pub fn markdown(content: impl Into<String>) -> Self {
        CardElement::Div {
            text: CardText::markdown(content),
        }
    }

    pub fn actions(actions: Vec<CardAction>) -> Self {
        CardElement::Action { actions }
    }

    pub fn is_action(&self) -> bool {
        matches!(self, CardElement::Action { .. })
    }

    /// 文本块内容（非文本元素返回 None）
    pub fn text_content(&self) -> Option<&str> {
        match self {
            CardElement::Div { text } => Some(&text.content),
            _ => None,
        }
    }
}

/// 按钮组中的交互元素
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum CardAction {
    Button {
        text: CardText,
        #[serde(rename = "type")]
        kind: ButtonKind,
        /// 点击跳转链接
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
}

impl CardAction {
    pub fn button(label: impl Into<String>, kind: ButtonKind) -> Self {
        CardAction::Button {
            text: CardText::plain(label),
            kind,
            url: None,
        }
    }

    pub fn link_button(label: impl Into<String>, kind: ButtonKind, url: impl Into<String>) -> Self {
        CardAction::Button {
            text: CardText::plain(label),
            kind,
            url: Some(url.into()),
        }
    }
}

/// 按钮样式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonKind {
    Default,
    Primary,
    Danger,
}
