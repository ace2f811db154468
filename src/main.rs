//! Lark Alert CLI
//!
//! 向 Lark (飞书) 群机器人发送告警，并可监控交易所价差

use anyhow::Result;
use clap::{Parser, Subcommand};
use lark_alert::cli::{
    self, AlertArgs, CustomArgs, MonitorArgs, RichArgs, SendArgs, SimulateArgs, SummaryArgs,
    UrgentArgs,
};
use lark_alert::DispatchResult;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "lark-alert")]
#[command(about = "Lark Alert - 向 Lark 群机器人发送文本、卡片和汇总告警")]
#[command(version)]
struct Cli {
    /// 输出 debug 日志
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 发送文本消息（可 @ 用户或所有人）
    Send(SendArgs),
    /// 发送紧急告警（默认 @所有人）
    Urgent(UrgentArgs),
    /// 按 urgency 发送自定义告警
    Custom(CustomArgs),
    /// 发送告警卡片
    Alert(AlertArgs),
    /// 发送富文本消息
    Rich(RichArgs),
    /// 发送多条告警的汇总
    Summary(SummaryArgs),
    /// 按顺序发送一组演练告警
    Simulate(SimulateArgs),
    /// 监控 Binance / Gate.io 价差并发送告警
    Monitor(MonitorArgs),
}

fn init_tracing(verbose: bool) {
    // RUST_LOG 优先，例如: RUST_LOG=debug lark-alert send ...
    let default = if verbose { "lark_alert=debug" } else { "lark_alert=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();
}

/// 打印结果，失败时以 1 退出
fn finish(result: DispatchResult, json: bool) {
    cli::print_result(&result, json);
    if !result.success {
        std::process::exit(1);
    }
}

/// 参数错误以 1 退出，--help / --version 以 0 退出
fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(opts) => opts,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    }
}

fn main() -> Result<()> {
    let opts = parse_args();
    init_tracing(opts.verbose);

    match opts.command {
        Commands::Send(args) => {
            let args = args.resolve();
            let json = args.target.json;
            if !json {
                println!("Sending message: '{}'", args.message_text());
            }
            finish(cli::handle_send(args)?, json);
        }
        Commands::Urgent(args) => {
            let json = args.target.json;
            finish(cli::handle_urgent(args)?, json);
        }
        Commands::Custom(args) => {
            let json = args.target.json;
            finish(cli::handle_custom(args)?, json);
        }
        Commands::Alert(args) => {
            let json = args.target.json;
            finish(cli::handle_alert(args)?, json);
        }
        Commands::Rich(args) => {
            let json = args.target.json;
            finish(cli::handle_rich(args)?, json);
        }
        Commands::Summary(args) => {
            let json = args.target.json;
            finish(cli::handle_summary(args)?, json);
        }
        Commands::Simulate(args) => {
            let json = args.target.json;
            let results = cli::handle_simulate(args)?;
            let failed = results.iter().filter(|(_, r)| !r.success).count();

            if json {
                let report: Vec<_> = results
                    .iter()
                    .map(|(name, r)| serde_json::json!({"scenario": name, "result": r}))
                    .collect();
                println!("{}", cli::format_output(&report));
            } else {
                for (name, result) in &results {
                    let mark = if result.success { "✅ Success" } else { "❌ Failed" };
                    println!("{}: {}", name, mark);
                }
                println!("\n{} scenarios, {} failed", results.len(), failed);
            }

            if failed > 0 {
                std::process::exit(1);
            }
        }
        Commands::Monitor(args) => {
            let cycles = cli::handle_monitor(args)?;
            println!("Monitor finished after {} cycles", cycles);
        }
    }

    Ok(())
}
