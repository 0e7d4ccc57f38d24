//! CI Slack Notify CLI
//!
//! 把 CI 任务结果投递到 Slack（incoming webhook 或 bot token）

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use ci_slack_notify::cli::{handle_notify, NotifyArgs};

#[derive(Parser)]
#[command(name = "csn")]
#[command(about = "CI Slack Notify - 把 CI 任务结果投递到 Slack")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 组装并发送一条任务结果通知
    Notify(NotifyArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化 tracing 日志系统
    // 通过 RUST_LOG 环境变量控制日志级别，默认为 info
    // 例如: RUST_LOG=debug csn notify --type success --job-name Build
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ci_slack_notify=info,csn=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Notify(args) => handle_notify(args).await,
    }
}
