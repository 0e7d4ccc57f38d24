//! 消息组装 - 把任务结果与运行上下文组装成传输无关的结构化消息
//!
//! 纯函数，无副作用。两种传输共享同一份组装结果，传输相关的
//! 信封字段由 slack 模块的适配层追加。
//!
//! 字段顺序不变式：基础字段（repository、ref、event name、workflow）
//! 永远在 commit 字段（commit、author）之前。

use crate::github::{CommitContext, ContextFields};
use crate::mention::MentionRule;
use crate::status::JobStatus;

/// 消息中的一个标签字段，值已按 Slack 链接语法渲染
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageField {
    pub label: &'static str,
    pub value: String,
}

/// 组装完成的消息（传输无关）
#[derive(Debug, Clone)]
pub struct MessagePayload {
    pub text: String,
    pub color: String,
    pub fields: Vec<MessageField>,
}

/// Slack 链接语法 `<url|text>`
fn link(url: &str, text: &str) -> String {
    format!("<{}|{}>", url, text)
}

/// 组装通知消息
///
/// 文本为 `"{job_name} {label}"`，mention 规则触发时前缀 `<!target>`。
/// commit 上下文存在时在四个基础字段之后追加 commit 字段，再追加
/// author 字段（如果有作者信息）。
pub fn compose(
    job_name: &str,
    status: JobStatus,
    mention: Option<&MentionRule>,
    context: &ContextFields,
    commit: Option<&CommitContext>,
) -> MessagePayload {
    let base_text = format!("{} {}", job_name, status.label());
    let text = match mention {
        Some(rule) if rule.fires(status) => format!("<!{}> {}", rule.target, base_text),
        _ => base_text,
    };

    let repo_slug = format!("{}/{}", context.repo_owner, context.repo_name);
    let event_value = match &context.event_url {
        Some(url) => link(url, &context.event_name),
        None => context.event_name.clone(),
    };

    let mut fields = vec![
        MessageField {
            label: "repository",
            value: link(&context.repo_url, &repo_slug),
        },
        MessageField {
            label: "ref",
            value: context.ref_name.clone(),
        },
        MessageField {
            label: "event name",
            value: event_value,
        },
        MessageField {
            label: "workflow",
            value: link(&context.workflow_url, &context.workflow_name),
        },
    ];

    if let Some(commit) = commit {
        // 无换行的消息整体就是第一行
        let subject = commit.message.lines().next().unwrap_or_default();
        fields.push(MessageField {
            label: "commit",
            value: link(&commit.url, subject),
        });
        if let Some(author) = &commit.author {
            fields.push(MessageField {
                label: "author",
                value: link(&author.url, &author.name),
            });
        }
    }

    MessagePayload {
        text,
        color: status.color().to_string(),
        fields,
    }
}
