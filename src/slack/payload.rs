//! Slack 载荷构建 - 把组装好的消息转换成线上格式
//!
//! 载荷结构两种传输共用：`text` + 单个带颜色的 attachment，内含一个
//! section block，字段渲染为 mrkdwn 元素。展示覆盖项（username、
//! channel、icon_emoji）是可选的顶层信封字段，缺省时不序列化。

use serde::Serialize;

use crate::message::MessagePayload;

/// 传输层展示覆盖项，原样透传
#[derive(Debug, Clone, Default)]
pub struct DisplayOverrides {
    pub username: Option<String>,
    pub channel: Option<String>,
    pub icon_emoji: Option<String>,
}

/// mrkdwn 字段元素
#[derive(Debug, Serialize)]
pub struct MrkdwnField {
    #[serde(rename = "type")]
    kind: &'static str,
    text: String,
}

/// section block
#[derive(Debug, Serialize)]
pub struct SectionBlock {
    #[serde(rename = "type")]
    kind: &'static str,
    fields: Vec<MrkdwnField>,
}

/// 带颜色的附件
#[derive(Debug, Serialize)]
pub struct Attachment {
    color: String,
    blocks: Vec<SectionBlock>,
}

/// 发往 Slack 的完整载荷
#[derive(Debug, Serialize)]
pub struct SlackPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_emoji: Option<String>,
    pub text: String,
    pub attachments: Vec<Attachment>,
    pub unfurl_links: bool,
}

impl SlackPayload {
    /// 从组装结果构建线上载荷
    pub fn build(message: &MessagePayload, overrides: &DisplayOverrides) -> Self {
        let fields = message
            .fields
            .iter()
            .map(|field| MrkdwnField {
                kind: "mrkdwn",
                text: format!("*{}*\n{}", field.label, field.value),
            })
            .collect();

        Self {
            username: overrides.username.clone(),
            channel: overrides.channel.clone(),
            icon_emoji: overrides.icon_emoji.clone(),
            text: message.text.clone(),
            attachments: vec![Attachment {
                color: message.color.clone(),
                blocks: vec![SectionBlock {
                    kind: "section",
                    fields,
                }],
            }],
            unfurl_links: true,
        }
    }
}
