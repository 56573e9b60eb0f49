//! 值对象（Value Object）
//!
//! 无标识、以值相等为准的枚举值，随 DTO 原样在线上传递（PascalCase 字符串）。
//!

use serde::{Deserialize, Serialize};
use std::fmt;

/// 角色授予的访问权限
///
/// # 示例
///
/// ```
/// use uidsm_model::value_object::AccessRight;
///
/// let json = serde_json::to_string(&AccessRight::CreateComment).unwrap();
/// assert_eq!(json, "\"CreateComment\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AccessRight {
    ProjectManagement,
    ReviewManagement,
    ReviewObjectiveManagement,
    ReviewTaskManagement,
    CreateComment,
    CreateFeedback,
    ReplyToComment,
    AssignTask,
}

impl fmt::Display for AccessRight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// 评审、评审目标、评审任务与评论的状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    #[default]
    Open,
    Closed,
    Done,
    TaskCompleted,
}

impl StatusKind {
    /// 是否仍需处理
    pub fn is_open(&self) -> bool {
        matches!(self, StatusKind::Open)
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_open_status_is_open() {
        assert!(StatusKind::default().is_open());
        for status in [StatusKind::Closed, StatusKind::Done, StatusKind::TaskCompleted] {
            assert!(!status.is_open(), "{status}");
        }
    }

    #[test]
    fn display_matches_wire_name() {
        let json = serde_json::to_string(&StatusKind::TaskCompleted).unwrap();
        assert_eq!(json, format!("\"{}\"", StatusKind::TaskCompleted));
        assert_eq!(AccessRight::ReplyToComment.to_string(), "ReplyToComment");
    }
}
