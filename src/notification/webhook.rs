//! Lark Webhook 客户端模块
//!
//! 每次 `send` 只发一次 POST，不重试；结果统一归一化为 `DispatchResult`。

use anyhow::{anyhow, Result};
use serde::Serialize;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::payload::MessagePayload;

/// 默认超时（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Webhook 客户端配置
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// 完整 webhook URL (如 https://open.larksuite.com/open-apis/bot/v2/hook/xxx)
    pub url: String,
    /// 超时时间 (秒)
    pub timeout_secs: u64,
}

impl WebhookConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// 发送失败原因
#[derive(Debug, Error)]
pub enum DispatchError {
    /// 连接失败等传输层错误
    #[error("HTTP request failed: {0}")]
    Transport(String),
    #[error("HTTP request timed out after {0}s")]
    Timeout(u64),
    /// 非 2xx 状态码
    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },
    /// 已收到状态行，但读取响应体失败
    #[error("Failed to read response body (HTTP {status}): {message}")]
    Body { status: u16, message: String },
    /// 2xx 但响应体不是合法 JSON
    #[error("Failed to parse JSON response: {message}")]
    Parse { status: u16, message: String },
    #[error("Failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl DispatchError {
    /// 已知的 HTTP 状态码
    pub fn status_code(&self) -> Option<u16> {
        match self {
            DispatchError::Status { status, .. }
            | DispatchError::Body { status, .. }
            | DispatchError::Parse { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// 成功送达的响应
#[derive(Debug, Clone, PartialEq)]
pub struct Delivered {
    pub status_code: u16,
    pub data: serde_json::Value,
}

/// 归一化的发送结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DispatchResult {
    pub fn ok(status_code: Option<u16>, data: serde_json::Value) -> Self {
        Self {
            success: true,
            status_code,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(status_code: Option<u16>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            status_code,
            data: None,
            error: Some(error.into()),
        }
    }
}

impl From<Result<Delivered, DispatchError>> for DispatchResult {
    fn from(result: Result<Delivered, DispatchError>) -> Self {
        match result {
            Ok(delivered) => Self::ok(Some(delivered.status_code), delivered.data),
            Err(e) => Self::failed(e.status_code(), e.to_string()),
        }
    }
}

/// Lark Webhook 客户端
#[derive(Debug)]
pub struct WebhookClient {
    client: reqwest::blocking::Client,
    config: WebhookConfig,
}

impl WebhookClient {
    /// 创建新的 Webhook 客户端
    pub fn new(config: WebhookConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(anyhow!("webhook url is required"));
        }

        let parsed = reqwest::Url::parse(&config.url)
            .map_err(|e| anyhow!("Invalid webhook url '{}': {}", config.url, e))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(anyhow!("Unsupported webhook url scheme: {}", parsed.scheme()));
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self { client, config })
    }

    /// 发送消息，失败不会向外抛出
    pub fn send(&self, payload: &MessagePayload) -> DispatchResult {
        let result = DispatchResult::from(self.try_send(payload));
        if let Some(error) = &result.error {
            warn!(
                msg_type = payload.kind(),
                status_code = ?result.status_code,
                error = %error,
                "Webhook send failed"
            );
        }
        result
    }

    /// 发送消息并返回带类型的错误
    pub fn try_send(&self, payload: &MessagePayload) -> Result<Delivered, DispatchError> {
        let body = serde_json::to_vec(payload)?;

        debug!(
            msg_type = payload.kind(),
            body_len = body.len(),
            timeout_secs = self.config.timeout_secs,
            "Posting to webhook"
        );

        let start = Instant::now();
        let response = self
            .client
            .post(&self.config.url)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let text = response.text().map_err(|e| DispatchError::Body {
            status: status.as_u16(),
            message: e.to_string(),
        })?;

        debug!(
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Webhook request completed"
        );

        if !status.is_success() {
            return Err(DispatchError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let data: serde_json::Value = serde_json::from_str(&text).map_err(|e| DispatchError::Parse {
            status: status.as_u16(),
            message: e.to_string(),
        })?;

        // Lark 对参数错误也返回 200，只在 body 的 code 里体现
        if let Some(code) = data.get("code").and_then(|c| c.as_i64()).filter(|c| *c != 0) {
            warn!(
                code,
                msg = data.get("msg").and_then(|m| m.as_str()).unwrap_or(""),
                "Webhook accepted request but reported an error code"
            );
        } else {
            info!(msg_type = payload.kind(), status = status.as_u16(), "Message sent successfully");
        }

        Ok(Delivered {
            status_code: status.as_u16(),
            data,
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> DispatchError {
        if e.is_timeout() {
            DispatchError::Timeout(self.config.timeout_secs)
        } else {
            DispatchError::Transport(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webhook_config_default() {
        let config = WebhookConfig::default();
        assert!(config.url.is_empty());
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_webhook_client_requires_url() {
        let result = WebhookClient::new(WebhookConfig::default());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("webhook url"));
    }

    #[test]
    fn test_webhook_client_rejects_bad_scheme() {
        let result = WebhookClient::new(WebhookConfig::new("ftp://example.com/hook"));
        assert!(result.unwrap_err().to_string().contains("scheme"));

        assert!(WebhookClient::new(WebhookConfig::new("not a url")).is_err());
    }

    #[test]
    fn test_dispatch_result_from_error() {
        let err = DispatchError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        let result = DispatchResult::from(Err::<Delivered, _>(err));
        assert!(!result.success);
        assert_eq!(result.status_code, Some(500));
        assert!(result.data.is_none());
        assert!(result.error.unwrap().contains("500"));
    }

    #[test]
    fn test_dispatch_result_serialization_skips_empty() {
        let result = DispatchResult::failed(None, "connection refused");
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({"success": false, "error": "connection refused"})
        );
    }

    #[test]
    fn test_status_code_only_when_known() {
        assert_eq!(DispatchError::Timeout(30).status_code(), None);
        assert_eq!(DispatchError::Transport("x".into()).status_code(), None);
        assert_eq!(
            DispatchError::Body {
                status: 200,
                message: "unexpected eof".into()
            }
            .status_code(),
            Some(200)
        );
        assert_eq!(
            DispatchError::Parse {
                status: 200,
                message: "eof".into()
            }
            .status_code(),
            Some(200)
        );
    }
}
