//! 汇总消息中的单条告警

use serde::{Deserialize, Serialize};
use std::str::FromStr;

const UNKNOWN_TYPE: &str = "Unknown";
const NO_MESSAGE: &str = "No message";
const UNKNOWN_TIME: &str = "Unknown time";

/// 单条告警，字段缺失时使用默认文案
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertItem {
    /// 告警类型
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl AlertItem {
    pub fn new(kind: impl Into<String>, message: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            message: Some(message.into()),
            time: Some(time.into()),
        }
    }

    pub fn kind_or_default(&self) -> &str {
        self.kind.as_deref().unwrap_or(UNKNOWN_TYPE)
    }

    pub fn message_or_default(&self) -> &str {
        self.message.as_deref().unwrap_or(NO_MESSAGE)
    }

    pub fn time_or_default(&self) -> &str {
        self.time.as_deref().unwrap_or(UNKNOWN_TIME)
    }
}

impl FromStr for AlertItem {
    type Err = String;

    /// 解析 `TYPE|MESSAGE|TIME`，空段视为缺失
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('|').map(str::trim).collect();
        if parts.len() > 3 {
            return Err(format!("expected TYPE|MESSAGE|TIME, got '{}'", s));
        }

        let field = |idx: usize| {
            parts
                .get(idx)
                .filter(|p| !p.is_empty())
                .map(|p| p.to_string())
        };

        Ok(Self {
            kind: field(0),
            message: field(1),
            time: field(2),
        })
    }
}
