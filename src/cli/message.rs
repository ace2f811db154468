//! 发送单条消息的命令: send / urgent / custom / alert / rich / summary

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::TargetArgs;
use crate::notification::{AlertItem, DispatchResult, PostSpan, Urgency};

/// 默认消息内容
pub const DEFAULT_MESSAGE: &str = "request example";

/// `send` 命令参数
#[derive(Args, Debug)]
pub struct SendArgs {
    #[command(flatten)]
    pub target: TargetArgs,
    /// 消息内容（默认 "request example"）
    pub message: Option<String>,
    /// @ 指定用户（可重复）
    #[arg(long = "mention", value_name = "USER_ID")]
    pub mentions: Vec<String>,
    /// @ 所有人
    #[arg(long)]
    pub mention_all: bool,
}

impl SendArgs {
    /// dry-run 时只给了一个非 URL 的位置参数，把它当作消息内容
    pub fn resolve(mut self) -> Self {
        let lone_text = self.target.dry_run
            && self.message.is_none()
            && self
                .target
                .webhook_url
                .as_deref()
                .is_some_and(|v| !is_http_url(v));
        if lone_text {
            self.message = self.target.webhook_url.take();
        }
        self
    }

    pub fn message_text(&self) -> &str {
        self.message.as_deref().unwrap_or(DEFAULT_MESSAGE)
    }
}

fn is_http_url(value: &str) -> bool {
    reqwest::Url::parse(value.trim()).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}

/// `urgent` 命令参数
#[derive(Args, Debug)]
pub struct UrgentArgs {
    #[command(flatten)]
    pub target: TargetArgs,
    /// 告警标题
    #[arg(long)]
    pub title: String,
    /// 告警内容
    #[arg(long)]
    pub message: String,
    /// 不 @ 所有人
    #[arg(long)]
    pub no_mention_all: bool,
}

/// `custom` 命令参数
#[derive(Args, Debug)]
pub struct CustomArgs {
    #[command(flatten)]
    pub target: TargetArgs,
    /// 告警类型
    #[arg(long)]
    pub kind: String,
    #[arg(long)]
    pub message: String,
    /// high | medium | low
    #[arg(long, default_value = "medium")]
    pub urgency: Urgency,
}

/// `alert` 命令参数
#[derive(Args, Debug)]
pub struct AlertArgs {
    #[command(flatten)]
    pub target: TargetArgs,
    #[arg(long)]
    pub title: String,
    /// 明细行 KEY=VALUE（可重复，按顺序显示）
    #[arg(long = "detail", value_name = "KEY=VALUE", value_parser = parse_detail)]
    pub details: Vec<(String, String)>,
    /// high | medium | low
    #[arg(long, default_value = "high")]
    pub urgency: Urgency,
}

/// `rich` 命令参数
#[derive(Args, Debug)]
pub struct RichArgs {
    #[command(flatten)]
    pub target: TargetArgs,
    #[arg(long)]
    pub title: String,
    /// 段落文本（可重复）
    #[arg(long = "line", value_name = "TEXT")]
    pub lines: Vec<String>,
    /// 末尾附加链接 TEXT=URL
    #[arg(long, value_name = "TEXT=URL", value_parser = parse_detail)]
    pub link: Option<(String, String)>,
}

/// `summary` 命令参数
#[derive(Args, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub target: TargetArgs,
    /// 告警 TYPE|MESSAGE|TIME（可重复）
    #[arg(long = "item", value_name = "TYPE|MESSAGE|TIME")]
    pub items: Vec<AlertItem>,
}

/// 解析 `KEY=VALUE`
pub fn parse_detail(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

pub fn handle_send(args: SendArgs) -> Result<DispatchResult> {
    let args = args.resolve();
    let composer = args.target.composer()?;
    let message = args.message_text();
    info!(message = %message, "Sending message");

    let result = if args.mention_all || !args.mentions.is_empty() {
        composer.send_mention_text(message, &args.mentions, args.mention_all)
    } else {
        composer.send_text(message)
    };
    Ok(result)
}

pub fn handle_urgent(args: UrgentArgs) -> Result<DispatchResult> {
    let composer = args.target.composer()?;
    Ok(composer.send_urgent_alert(&args.title, &args.message, !args.no_mention_all))
}

pub fn handle_custom(args: CustomArgs) -> Result<DispatchResult> {
    let composer = args.target.composer()?;
    Ok(composer.send_custom_alert(&args.kind, &args.message, args.urgency))
}

pub fn handle_alert(args: AlertArgs) -> Result<DispatchResult> {
    let composer = args.target.composer()?;
    Ok(composer.send_alert_card(&args.title, &args.details, args.urgency))
}

pub fn handle_rich(args: RichArgs) -> Result<DispatchResult> {
    let composer = args.target.composer()?;
    Ok(composer.send_rich_text(&args.title, rich_content(&args.lines, args.link.as_ref())))
}

pub fn handle_summary(args: SummaryArgs) -> Result<DispatchResult> {
    let composer = args.target.composer()?;
    Ok(composer.send_summary(&args.items))
}

/// 每行一个段落，链接单独一段
fn rich_content(lines: &[String], link: Option<&(String, String)>) -> Vec<Vec<PostSpan>> {
    let mut content: Vec<Vec<PostSpan>> = lines.iter().map(|l| vec![PostSpan::text(l.as_str())]).collect();
    if let Some((text, href)) = link {
        content.push(vec![PostSpan::link(text.as_str(), href.as_str())]);
    }
    content
}
