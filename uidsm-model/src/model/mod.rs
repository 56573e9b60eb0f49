//! 评审领域模型
//!
//! 每种实体都成对定义：`XxxDto`（线上形态，引用为标识）与 `Xxx`（解析后的实体）。

mod annotation;
mod artifact;
mod kind;
mod participant;
mod project;
mod review;
mod review_item;
mod role;
mod user;

pub use annotation::{
    AnnotatableRef, AnnotationRef, Comment, CommentDto, Feedback, FeedbackDto, Reply, ReplyDto,
};
pub use artifact::{Model, ModelDto};
pub use kind::EntityKind;
pub use participant::{Participant, ParticipantDto};
pub use project::{Project, ProjectDto};
pub use review::{
    Review, ReviewDto, ReviewObjective, ReviewObjectiveDto, ReviewTask, ReviewTaskDto,
};
pub use review_item::{ReviewItem, ReviewItemDto};
pub use role::{Role, RoleDto};
pub use user::{UserEntity, UserEntityDto};

use crate::registry::DtoRegistry;

pub(crate) fn register_all(registry: &mut DtoRegistry) {
    registry.insert::<UserEntityDto>();
    registry.insert::<RoleDto>();
    registry.insert::<ProjectDto>();
    registry.insert::<ParticipantDto>();
    registry.insert::<ReviewDto>();
    registry.insert::<ReviewObjectiveDto>();
    registry.insert::<ReviewTaskDto>();
    registry.insert::<ReviewItemDto>();
    registry.insert::<CommentDto>();
    registry.insert::<FeedbackDto>();
    registry.insert::<ReplyDto>();
    registry.insert::<ModelDto>();
}
