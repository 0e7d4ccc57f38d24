//! Mention 规则 - 在消息前插入 `<!target>` 提醒标记
//!
//! 规则由 mention 目标和触发条件组成。条件非法时规则整体降级为
//! 不提醒（软失败，只记 warning），与结果类型的硬失败不同。

use tracing::warn;

use crate::status::JobStatus;

/// Mention 触发条件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentionCondition {
    Always,
    Success,
    Failure,
    Cancelled,
}

impl MentionCondition {
    /// 解析条件字符串，非法值返回 None
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "always" => Some(Self::Always),
            "success" => Some(Self::Success),
            "failure" => Some(Self::Failure),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Mention 规则（目标 + 条件）
#[derive(Debug, Clone)]
pub struct MentionRule {
    pub target: String,
    pub condition: MentionCondition,
}

impl MentionRule {
    /// 从原始输入解析 mention 规则
    ///
    /// - 目标为空：规则不存在，无警告
    /// - 目标非空但条件非法：规则降级为不存在，记 warning，流程继续
    pub fn resolve(target: Option<&str>, condition_raw: Option<&str>) -> Option<Self> {
        let target = target.unwrap_or("");
        if target.is_empty() {
            return None;
        }

        let condition_raw = condition_raw.unwrap_or("").to_lowercase();
        match MentionCondition::parse(&condition_raw) {
            Some(condition) => Some(Self {
                target: target.to_string(),
                condition,
            }),
            None => {
                warn!(
                    mention_if = %condition_raw,
                    "Ignoring slack message mention: mention_if is invalid"
                );
                None
            }
        }
    }

    /// 规则是否对该结果触发
    ///
    /// 条件为 always，或条件的字符串形式等于结果的规范字符串形式。
    pub fn fires(&self, status: JobStatus) -> bool {
        self.condition == MentionCondition::Always || self.condition.as_str() == status.as_str()
    }
}
