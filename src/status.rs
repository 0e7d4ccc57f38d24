//! 任务结果类型 - CI 任务的三种结果及其展示属性
//!
//! 结果集是封闭的：success / failure / cancelled。任何其他输入在
//! 解析阶段直接报错，后续查询颜色和标签都是全函数，无失败路径。

use anyhow::{bail, Result};

/// CI 任务结果（封闭枚举）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Success,
    Failure,
    Cancelled,
}

impl JobStatus {
    /// 解析结果字符串（大小写不敏感）
    ///
    /// 不在 success / failure / cancelled 之内的输入是致命错误，
    /// 在任何网络请求之前失败。
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.to_lowercase().as_str() {
            "success" => Ok(Self::Success),
            "failure" => Ok(Self::Failure),
            "cancelled" => Ok(Self::Cancelled),
            other => bail!("Invalid job status type: {}", other),
        }
    }

    /// 附件颜色（hex）
    pub fn color(&self) -> &'static str {
        match self {
            Self::Success => "#2cbe4e",
            Self::Failure => "#cb2431",
            Self::Cancelled => "#ffc107",
        }
    }

    /// 消息文本中的结果标签
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success => "Succeeded",
            Self::Failure => "Failed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// 规范字符串形式（与 mention 条件比较用）
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Cancelled => "cancelled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recognized_statuses() {
        assert_eq!(JobStatus::parse("success").unwrap(), JobStatus::Success);
        assert_eq!(JobStatus::parse("failure").unwrap(), JobStatus::Failure);
        assert_eq!(JobStatus::parse("cancelled").unwrap(), JobStatus::Cancelled);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(JobStatus::parse("Success").unwrap(), JobStatus::Success);
        assert_eq!(JobStatus::parse("FAILURE").unwrap(), JobStatus::Failure);
        assert_eq!(JobStatus::parse("CanCelled").unwrap(), JobStatus::Cancelled);
    }

    #[test]
    fn test_parse_rejects_unknown_status() {
        assert!(JobStatus::parse("skipped").is_err());
        assert!(JobStatus::parse("").is_err());
        assert!(JobStatus::parse("ok").is_err());
    }

    #[test]
    fn test_display_attributes() {
        assert_eq!(JobStatus::Success.color(), "#2cbe4e");
        assert_eq!(JobStatus::Success.label(), "Succeeded");
        assert_eq!(JobStatus::Failure.color(), "#cb2431");
        assert_eq!(JobStatus::Failure.label(), "Failed");
        assert_eq!(JobStatus::Cancelled.color(), "#ffc107");
        assert_eq!(JobStatus::Cancelled.label(), "Cancelled");
    }
}
