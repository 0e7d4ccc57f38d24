//! Incoming webhook 客户端
//!
//! 把载荷 POST 到配置的 webhook URL。Slack 对成功的 webhook 请求
//! 返回字面量 `"ok"` 作为响应体，其他任何响应体都视为投递失败。

use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::Client;

use super::payload::SlackPayload;

/// incoming webhook 客户端
#[derive(Debug)]
pub struct WebhookClient {
    client: Client,
    url: String,
}

impl WebhookClient {
    /// 创建 webhook 客户端
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        if url.is_empty() {
            bail!("Webhook URL is required");
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, url })
    }

    /// 发送载荷，恰好一次，不重试
    pub async fn send(&self, payload: &SlackPayload) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .context("Webhook request failed")?;

        let body = response
            .text()
            .await
            .context("Failed to read webhook response")?;

        if body != "ok" {
            bail!("Webhook response was not ok: {}", body);
        }

        Ok(())
    }
}
