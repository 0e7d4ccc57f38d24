//! GitHub Actions 上下文收集 - 运行环境与可选的 commit 信息
//!
//! 运行上下文（仓库、ref、事件、工作流）从 Actions 标准环境变量读取，
//! 在编排入口一次性解析成显式值传递下去，内部组件不再隐式读环境。
//! commit 信息按需通过 GitHub REST API 获取。

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// commit 作者（展示名 + 主页链接）
#[derive(Debug, Clone)]
pub struct CommitAuthor {
    pub name: String,
    pub url: String,
}

/// commit 上下文（按需获取，消息展示只用第一行）
#[derive(Debug, Clone)]
pub struct CommitContext {
    pub message: String,
    pub url: String,
    pub author: Option<CommitAuthor>,
}

/// 组装消息所需的运行上下文字段
#[derive(Debug, Clone)]
pub struct ContextFields {
    pub repo_owner: String,
    pub repo_name: String,
    pub repo_url: String,
    pub ref_name: String,
    pub event_name: String,
    pub event_url: Option<String>,
    pub workflow_name: String,
    pub workflow_url: String,
}

/// GitHub Actions 运行环境
#[derive(Debug, Clone)]
pub struct GithubContext {
    pub owner: String,
    pub repo: String,
    pub sha: String,
    pub ref_name: String,
    pub event_name: String,
    pub workflow: String,
    pub run_id: String,
    pub server_url: String,
    pub api_url: String,
    pub event_path: Option<PathBuf>,
}

/// GitHub commits API 响应（只取需要的字段）
#[derive(Debug, Deserialize)]
struct CommitResponse {
    html_url: String,
    commit: CommitDetail,
    author: Option<UserRef>,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    message: String,
}

#[derive(Debug, Deserialize)]
struct UserRef {
    login: String,
    html_url: String,
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("Missing environment variable: {}", name))
}

/// 解析 `owner/repo` 形式的仓库标识
pub fn parse_repository(repository: &str) -> Result<(String, String)> {
    let (owner, repo) = repository
        .split_once('/')
        .with_context(|| format!("Invalid repository format: {}", repository))?;
    Ok((owner.to_string(), repo.to_string()))
}

/// 从事件 payload 提取事件链接（目前只有 pull_request 事件有）
pub fn event_url_from_payload(event_name: &str, payload: &serde_json::Value) -> Option<String> {
    if event_name != "pull_request" {
        return None;
    }
    payload
        .get("pull_request")
        .and_then(|pr| pr.get("html_url"))
        .and_then(|url| url.as_str())
        .map(|url| url.to_string())
}

fn read_event_payload(path: &Path) -> Option<serde_json::Value> {
    let raw = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&raw).ok()
}

impl GithubContext {
    /// 从 Actions 环境变量构建运行上下文
    ///
    /// 必需变量缺失是致命错误。服务端地址有标准默认值。
    pub fn from_env() -> Result<Self> {
        let repository = env_var("GITHUB_REPOSITORY")?;
        let (owner, repo) = parse_repository(&repository)?;

        Ok(Self {
            owner,
            repo,
            sha: env_var("GITHUB_SHA")?,
            ref_name: env_var("GITHUB_REF")?,
            event_name: env_var("GITHUB_EVENT_NAME")?,
            workflow: env_var("GITHUB_WORKFLOW")?,
            run_id: env_var("GITHUB_RUN_ID")?,
            server_url: std::env::var("GITHUB_SERVER_URL")
                .unwrap_or_else(|_| "https://github.com".to_string()),
            api_url: std::env::var("GITHUB_API_URL")
                .unwrap_or_else(|_| "https://api.github.com".to_string()),
            event_path: std::env::var("GITHUB_EVENT_PATH").ok().map(PathBuf::from),
        })
    }

    /// 仓库主页链接
    pub fn repo_url(&self) -> String {
        format!("{}/{}/{}", self.server_url, self.owner, self.repo)
    }

    /// 本次工作流运行的链接
    pub fn workflow_url(&self) -> String {
        format!("{}/actions/runs/{}", self.repo_url(), self.run_id)
    }

    /// 组装消息字段
    ///
    /// 事件 payload 读取失败只导致事件链接缺省，不中断流程。
    pub fn fields(&self) -> ContextFields {
        let event_url = self
            .event_path
            .as_deref()
            .and_then(read_event_payload)
            .and_then(|payload| event_url_from_payload(&self.event_name, &payload));
        if event_url.is_none() {
            debug!(event = %self.event_name, "No event URL available");
        }

        ContextFields {
            repo_owner: self.owner.clone(),
            repo_name: self.repo.clone(),
            repo_url: self.repo_url(),
            ref_name: self.ref_name.clone(),
            event_name: self.event_name.clone(),
            event_url,
            workflow_name: self.workflow.clone(),
            workflow_url: self.workflow_url(),
        }
    }

    /// 通过 GitHub REST API 获取当前 commit 的上下文
    ///
    /// 只在调用方显式要求 commit 注解时调用；失败按致命错误原样上抛。
    pub async fn fetch_commit(&self, token: Option<&str>) -> Result<CommitContext> {
        let url = format!(
            "{}/repos/{}/{}/commits/{}",
            self.api_url, self.owner, self.repo, self.sha
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("ci-slack-notify")
            .build()
            .context("Failed to create HTTP client")?;

        let mut request = client
            .get(&url)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = token {
            if !token.is_empty() {
                request = request.header("Authorization", format!("Bearer {}", token));
            }
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to fetch commit {}", self.sha))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("GitHub API returned {} for commit {}", status, self.sha);
        }

        let commit: CommitResponse = response
            .json()
            .await
            .context("Failed to parse commit response")?;

        Ok(CommitContext {
            message: commit.commit.message,
            url: commit.html_url,
            author: commit.author.map(|author| CommitAuthor {
                name: author.login,
                url: author.html_url,
            }),
        })
    }
}
