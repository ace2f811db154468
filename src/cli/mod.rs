//! CLI command handling

pub mod message;
pub mod monitor;
pub mod output;
pub mod simulate;

pub use message::*;
pub use monitor::*;
pub use output::*;
pub use simulate::*;

use anyhow::{bail, Result};
use clap::Args;

use crate::notification::{
    AlertComposer, DryRunChannel, MessageChannel, WebhookClient, WebhookConfig,
    webhook::DEFAULT_TIMEOUT_SECS,
};

/// 未替换的占位 URL 标记
const PLACEHOLDER_MARK: &str = "****";

/// 所有发送类命令共用的目标参数
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Lark webhook URL
    pub webhook_url: Option<String>,
    /// 请求超时（秒）
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
    /// Dry-run 模式（只打印 payload 不发送）
    #[arg(long)]
    pub dry_run: bool,
    /// 输出 JSON 格式
    #[arg(long)]
    pub json: bool,
}

impl TargetArgs {
    /// 校验 webhook URL 并生成配置
    pub fn webhook_config(&self) -> Result<WebhookConfig> {
        let Some(url) = self.webhook_url.as_deref().map(str::trim).filter(|u| !u.is_empty()) else {
            bail!("webhook URL is required (usage: lark-alert <COMMAND> <WEBHOOK_URL> ...)");
        };
        if url.contains(PLACEHOLDER_MARK) {
            bail!("Please replace the webhook URL placeholder with your actual Lark webhook URL");
        }

        Ok(WebhookConfig {
            url: url.to_string(),
            timeout_secs: self.timeout,
        })
    }

    /// dry-run 时不需要 URL
    pub fn channel(&self) -> Result<Box<dyn MessageChannel>> {
        if self.dry_run {
            return Ok(Box::new(DryRunChannel));
        }
        Ok(Box::new(WebhookClient::new(self.webhook_config()?)?))
    }

    pub fn composer(&self) -> Result<AlertComposer<Box<dyn MessageChannel>>> {
        Ok(AlertComposer::new(self.channel()?))
    }
}
