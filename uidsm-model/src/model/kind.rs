//! 实体种类枚举
use crate::dto::EntityDto;
use crate::entity::Entity;
use crate::error::DomainError;
use std::fmt;
use std::str::FromStr;

use super::*;

/// 评审模型中的全部实体种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    UserEntity,
    Role,
    Project,
    Participant,
    Review,
    ReviewObjective,
    ReviewTask,
    ReviewItem,
    Comment,
    Feedback,
    Reply,
    Model,
}

impl EntityKind {
    pub const ALL: [EntityKind; 12] = [
        EntityKind::UserEntity,
        EntityKind::Role,
        EntityKind::Project,
        EntityKind::Participant,
        EntityKind::Review,
        EntityKind::ReviewObjective,
        EntityKind::ReviewTask,
        EntityKind::ReviewItem,
        EntityKind::Comment,
        EntityKind::Feedback,
        EntityKind::Reply,
        EntityKind::Model,
    ];

    /// 实体类型名（与 `Entity::NAME` 一致）
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::UserEntity => UserEntity::NAME,
            EntityKind::Role => Role::NAME,
            EntityKind::Project => Project::NAME,
            EntityKind::Participant => Participant::NAME,
            EntityKind::Review => Review::NAME,
            EntityKind::ReviewObjective => ReviewObjective::NAME,
            EntityKind::ReviewTask => ReviewTask::NAME,
            EntityKind::ReviewItem => ReviewItem::NAME,
            EntityKind::Comment => Comment::NAME,
            EntityKind::Feedback => Feedback::NAME,
            EntityKind::Reply => Reply::NAME,
            EntityKind::Model => Model::NAME,
        }
    }

    /// 对应 DTO 的线上类型标签
    pub fn tag(self) -> &'static str {
        match self {
            EntityKind::UserEntity => UserEntityDto::TAG,
            EntityKind::Role => RoleDto::TAG,
            EntityKind::Project => ProjectDto::TAG,
            EntityKind::Participant => ParticipantDto::TAG,
            EntityKind::Review => ReviewDto::TAG,
            EntityKind::ReviewObjective => ReviewObjectiveDto::TAG,
            EntityKind::ReviewTask => ReviewTaskDto::TAG,
            EntityKind::ReviewItem => ReviewItemDto::TAG,
            EntityKind::Comment => CommentDto::TAG,
            EntityKind::Feedback => FeedbackDto::TAG,
            EntityKind::Reply => ReplyDto::TAG,
            EntityKind::Model => ModelDto::TAG,
        }
    }

    /// 是否可被批注
    pub fn is_annotatable(self) -> bool {
        matches!(
            self,
            EntityKind::Review
                | EntityKind::ReviewObjective
                | EntityKind::ReviewTask
                | EntityKind::ReviewItem
        )
    }

    pub fn is_annotation(self) -> bool {
        matches!(self, EntityKind::Comment | EntityKind::Feedback)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 接受实体类型名或 DTO 标签，例如 `Project` / `ProjectDto`
impl FromStr for EntityKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s || kind.tag() == s)
            .ok_or_else(|| DomainError::UnknownType { tag: s.to_string() })
    }
}
