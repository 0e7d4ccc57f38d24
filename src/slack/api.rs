//! Slack Web API 客户端
//!
//! 用 bot token 调用 `chat.postMessage`。API 响应带 `ok` 布尔标志，
//! `ok == false` 时 `error` 字段携带失败原因。

use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::Deserialize;

use super::payload::SlackPayload;

const POST_MESSAGE_URL: &str = "https://slack.com/api/chat.postMessage";

/// chat.postMessage 响应（只取需要的字段）
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Web API 客户端
#[derive(Debug)]
pub struct ApiClient {
    client: Client,
    token: String,
    endpoint: String,
}

impl ApiClient {
    /// 创建 Web API 客户端（正式 chat.postMessage 端点）
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_endpoint(token, POST_MESSAGE_URL)
    }

    /// 创建指向指定端点的客户端
    pub fn with_endpoint(token: impl Into<String>, endpoint: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.is_empty() {
            bail!("Slack bot token is required");
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            token,
            endpoint: endpoint.into(),
        })
    }

    /// 调用 chat.postMessage，恰好一次，不重试
    pub async fn post_message(&self, payload: &SlackPayload) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.token))
            .json(payload)
            .send()
            .await
            .context("Slack API request failed")?;

        let api_response: ApiResponse = response
            .json()
            .await
            .context("Failed to parse Slack API response")?;

        if !api_response.ok {
            bail!(
                "Slack API rejected message: {}",
                api_response.error.unwrap_or_else(|| "unknown error".to_string())
            );
        }

        Ok(())
    }
}
