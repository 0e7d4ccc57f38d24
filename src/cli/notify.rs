//! notify 命令处理 - 校验、收集、组装、发送、汇报
//!
//! 单次调用即单次投递：恰好调用一种传输，恰好发送一次，不重试。
//! 传输失败的底层原因只进 error 日志，向上抛统一的投递失败错误。

use anyhow::{bail, Result};
use clap::Args;
use tracing::{debug, error, info};

use crate::github::GithubContext;
use crate::mention::MentionRule;
use crate::message;
use crate::slack::{ApiClient, DisplayOverrides, SlackPayload, Transport, WebhookClient};
use crate::status::JobStatus;

/// notify 命令参数
#[derive(Args, Debug)]
pub struct NotifyArgs {
    /// Job result type: success, failure or cancelled (case-insensitive)
    #[arg(long = "type", value_name = "TYPE")]
    pub status: String,

    /// Job name, used as the message text prefix
    #[arg(long)]
    pub job_name: String,

    /// Slack incoming webhook URL (preferred transport)
    #[arg(long, env = "SLACK_WEBHOOK")]
    pub url: Option<String>,

    /// Slack bot token for the web api (used when no webhook URL)
    #[arg(long, env = "SLACK_BOT_TOKEN")]
    pub slack_bot_token: Option<String>,

    /// Mention target, e.g. "here" or "channel"
    #[arg(long)]
    pub mention: Option<String>,

    /// Mention condition: always, success, failure or cancelled
    #[arg(long)]
    pub mention_if: Option<String>,

    /// Username display override, passed through unmodified
    #[arg(long)]
    pub username: Option<String>,

    /// Channel display override, passed through unmodified
    #[arg(long)]
    pub channel: Option<String>,

    /// Icon emoji display override, passed through unmodified
    #[arg(long)]
    pub icon_emoji: Option<String>,

    /// Annotate the message with commit and author fields
    #[arg(long)]
    pub commit: bool,

    /// GitHub token for commit retrieval
    #[arg(long, env = "GITHUB_TOKEN")]
    pub token: Option<String>,
}

/// 处理 notify 命令
pub async fn handle_notify(args: NotifyArgs) -> Result<()> {
    // 校验：结果类型硬失败，mention 规则软失败降级
    let status = JobStatus::parse(&args.status)?;
    let mention = MentionRule::resolve(args.mention.as_deref(), args.mention_if.as_deref());
    let transport = Transport::select(args.url.as_deref(), args.slack_bot_token.as_deref())?;

    // 收集：运行上下文必需，commit 上下文按需获取，失败原样上抛
    let github = GithubContext::from_env()?;
    let commit = if args.commit {
        Some(github.fetch_commit(args.token.as_deref()).await?)
    } else {
        None
    };

    let fields = github.fields();
    let message = message::compose(
        &args.job_name,
        status,
        mention.as_ref(),
        &fields,
        commit.as_ref(),
    );

    let overrides = DisplayOverrides {
        username: args.username,
        channel: args.channel,
        icon_emoji: args.icon_emoji,
    };
    let payload = SlackPayload::build(&message, &overrides);
    debug!(
        payload = %serde_json::to_string(&payload).unwrap_or_default(),
        "Generated Slack payload"
    );

    match deliver(&transport, &payload).await {
        Ok(()) => {
            info!(transport = transport.name(), "Posted message to Slack");
            Ok(())
        }
        Err(e) => {
            error!(transport = transport.name(), error = %e, "Slack delivery failed");
            bail!("Failed to post message to Slack");
        }
    }
}

/// 按选定传输投递载荷
async fn deliver(transport: &Transport, payload: &SlackPayload) -> Result<()> {
    match transport {
        Transport::Webhook(url) => WebhookClient::new(url.clone())?.send(payload).await,
        Transport::Api(token) => ApiClient::new(token.clone())?.post_message(payload).await,
    }
}
