//! 风险告警演练：按顺序发送一组示例告警，便于验证群机器人渲染效果

use anyhow::Result;
use clap::Args;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

use super::TargetArgs;
use crate::notification::{AlertComposer, AlertItem, DispatchResult, MessageChannel, Urgency};

/// `simulate` 命令参数
#[derive(Args, Debug)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub target: TargetArgs,
    /// 每条告警之间的间隔（秒）
    #[arg(long, default_value_t = 2)]
    pub delay: u64,
}

/// 演练场景
#[derive(Debug, Clone)]
pub enum Scenario {
    Urgent {
        title: &'static str,
        message: &'static str,
        mention_all: bool,
    },
    Card {
        title: &'static str,
        details: Vec<(&'static str, &'static str)>,
        urgency: Urgency,
    },
    Summary(Vec<AlertItem>),
}

impl Scenario {
    pub fn label(&self) -> &'static str {
        match self {
            Scenario::Urgent { title, .. } | Scenario::Card { title, .. } => *title,
            Scenario::Summary(_) => "Daily alert summary",
        }
    }

    pub fn send<C: MessageChannel>(&self, composer: &AlertComposer<C>) -> DispatchResult {
        match self {
            Scenario::Urgent {
                title,
                message,
                mention_all,
            } => composer.send_urgent_alert(title, message, *mention_all),
            Scenario::Card {
                title,
                details,
                urgency,
            } => composer.send_alert_card(title, details, *urgency),
            Scenario::Summary(items) => composer.send_summary(items),
        }
    }
}

/// 默认演练场景
pub fn default_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::Urgent {
            title: "CRITICAL PRICE MOVEMENT",
            message: "BTC/USDT rose 12% in the last 10 minutes!\n\n📈 Current Price: $45,230\n⚡ Change: +12.5%\n🔥 Immediate review required!",
            mention_all: true,
        },
        Scenario::Card {
            title: "Volume Spike Alert",
            details: vec![
                ("Pair", "ETH/USDT"),
                ("Volume Increase", "350%"),
                ("24h Volume", "$2.8B"),
                ("Average Volume", "$800M"),
                ("Status", "Abnormal Activity Detected"),
                ("Suggested Action", "Manual Review"),
            ],
            urgency: Urgency::High,
        },
        Scenario::Card {
            title: "Spread Widening",
            details: vec![
                ("Pair", "XRP/USDT"),
                ("Spread", "6.2%"),
                ("Normal Spread", "0.8%"),
                ("Increase", "675%"),
                ("Liquidity", "Low"),
                ("Risk Level", "MEDIUM"),
            ],
            urgency: Urgency::Medium,
        },
        Scenario::Urgent {
            title: "WASH TRADING SUSPECTED",
            message: "⚠️ Abnormal trading pattern detected for user A7829.\n\n🔍 Findings:\n• Repeated buy/sell at the same price\n• Large volumes in short intervals\n\n📋 Compliance team notified.",
            mention_all: false,
        },
        Scenario::Summary(vec![
            AlertItem::new("Price Alert", "BTC/USDT +12% (5 min)", "14:30:15"),
            AlertItem::new("Volume Alert", "ETH/USDT volume +350%", "14:32:42"),
            AlertItem::new("Spread Alert", "XRP/USDT spread rose to 6.2%", "14:35:18"),
            AlertItem::new("Wash Trading", "User A7829 suspicious activity", "14:38:55"),
            AlertItem::new("Liquidity Alert", "DOGE/USDT low liquidity", "14:42:33"),
        ]),
        Scenario::Card {
            title: "Risk System Status",
            details: vec![
                ("System Status", "Active"),
                ("Monitored Pairs", "47"),
                ("Active Alerts", "12"),
                ("CPU Usage", "23%"),
                ("Memory Usage", "67%"),
                ("Network Latency", "12ms"),
            ],
            urgency: Urgency::Low,
        },
    ]
}

/// 依次发送所有场景，返回 (场景名, 结果)
pub fn run_scenarios<C: MessageChannel>(
    composer: &AlertComposer<C>,
    scenarios: &[Scenario],
    delay: Duration,
) -> Vec<(&'static str, DispatchResult)> {
    let mut results = Vec::with_capacity(scenarios.len());

    for (i, scenario) in scenarios.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            thread::sleep(delay);
        }

        let result = scenario.send(composer);
        if result.success {
            info!(scenario = scenario.label(), "Scenario sent");
        } else {
            warn!(scenario = scenario.label(), error = ?result.error, "Scenario failed");
        }
        results.push((scenario.label(), result));
    }

    results
}

pub fn handle_simulate(args: SimulateArgs) -> Result<Vec<(&'static str, DispatchResult)>> {
    let composer = args.target.composer()?;
    Ok(run_scenarios(
        &composer,
        &default_scenarios(),
        Duration::from_secs(args.delay),
    ))
}
