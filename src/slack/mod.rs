//! Slack 传输层 - incoming webhook 与 Web API 两种投递方式
//!
//! 两种传输共享同一个载荷构建器（payload 模块），各自只负责
//! 信封、认证和成功判定。每次调用恰好选择一种传输，恰好发送一次。

pub mod api;
pub mod payload;
pub mod webhook;

pub use api::ApiClient;
pub use payload::{DisplayOverrides, SlackPayload};
pub use webhook::WebhookClient;

use anyhow::{bail, Result};

/// 投递目标：二选一
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    /// incoming webhook（URL）
    Webhook(String),
    /// Web API chat.postMessage（bot token）
    Api(String),
}

impl Transport {
    /// 选择传输方式
    ///
    /// webhook URL 优先；URL 缺失时用 bot token；两者都缺失是配置
    /// 错误，在组装消息之前失败，不产生任何网络请求。
    pub fn select(url: Option<&str>, token: Option<&str>) -> Result<Self> {
        let url = url.unwrap_or("");
        if !url.is_empty() {
            return Ok(Self::Webhook(url.to_string()));
        }

        let token = token.unwrap_or("");
        if !token.is_empty() {
            return Ok(Self::Api(token.to_string()));
        }

        bail!(
            "Missing Slack Incoming Webhooks URL or Slack Bot Token. \
             To use incoming webhooks configure SLACK_WEBHOOK or pass --url. \
             To use the web api configure SLACK_BOT_TOKEN or pass --slack-bot-token."
        );
    }

    /// 传输名称（日志用）
    pub fn name(&self) -> &'static str {
        match self {
            Self::Webhook(_) => "Slack Webhook",
            Self::Api(_) => "Slack Web API",
        }
    }
}
