//! CI Slack Notify - 把 CI 任务结果投递到 Slack
//!
//! 单次调用即单条消息：读取任务结果与 GitHub Actions 运行上下文，
//! 组装带颜色附件的结构化消息，通过 incoming webhook 或 Web API
//! 投递，然后以退出码汇报成败。

pub mod cli;
pub mod github;
pub mod mention;
pub mod message;
pub mod slack;
pub mod status;

pub use github::{CommitAuthor, CommitContext, ContextFields, GithubContext};
pub use mention::{MentionCondition, MentionRule};
pub use message::{compose, MessageField, MessagePayload};
pub use slack::{ApiClient, DisplayOverrides, SlackPayload, Transport, WebhookClient};
pub use status::JobStatus;
