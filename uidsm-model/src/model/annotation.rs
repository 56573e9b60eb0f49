//! 批注：评论（可被回复）与反馈
//!
//! 批注附着在可批注条目（评审、评审目标、评审任务、评审条目）上；
//! 这两组都是多态引用，由 `AnnotatableRef` / `AnnotationRef` 在解析时收窄为具体类型。
use super::{Participant, Review, ReviewItem, ReviewObjective, ReviewTask};
use crate::entity::{EntityRef, Resolve};
use crate::error::{DomainError, DomainResult};
use crate::lookup::EntityLookup;
use crate::value_object::StatusKind;
use chrono::{DateTime, Utc};
use uidsm_macros::{entity, entity_dto};
use uuid::Uuid;

const ANNOTATABLE_ITEM: &str = "AnnotatableItem";
const ANNOTATION: &str = "Annotation";

/// 指向可批注条目的引用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotatableRef {
    Review(EntityRef<Review>),
    ReviewObjective(EntityRef<ReviewObjective>),
    ReviewTask(EntityRef<ReviewTask>),
    ReviewItem(EntityRef<ReviewItem>),
}

impl AnnotatableRef {
    pub fn id(&self) -> Uuid {
        match self {
            Self::Review(r) => r.id(),
            Self::ReviewObjective(r) => r.id(),
            Self::ReviewTask(r) => r.id(),
            Self::ReviewItem(r) => r.id(),
        }
    }

    pub(crate) fn resolve(lookup: &EntityLookup, id: Uuid) -> DomainResult<Self> {
        let target = lookup.any_reference(id, ANNOTATABLE_ITEM)?;
        target
            .downcast::<Review>()
            .map(Self::Review)
            .or_else(|| target.downcast::<ReviewObjective>().map(Self::ReviewObjective))
            .or_else(|| target.downcast::<ReviewTask>().map(Self::ReviewTask))
            .or_else(|| target.downcast::<ReviewItem>().map(Self::ReviewItem))
            .ok_or_else(|| DomainError::TypeMismatch {
                expected: ANNOTATABLE_ITEM.to_string(),
                found: target.type_name().to_string(),
            })
    }

    pub(crate) fn resolve_all(lookup: &EntityLookup, ids: &[Uuid]) -> DomainResult<Vec<Self>> {
        ids.iter().map(|id| Self::resolve(lookup, *id)).collect()
    }
}

/// 指向批注（评论或反馈）的引用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationRef {
    Comment(EntityRef<Comment>),
    Feedback(EntityRef<Feedback>),
}

impl AnnotationRef {
    pub fn id(&self) -> Uuid {
        match self {
            Self::Comment(r) => r.id(),
            Self::Feedback(r) => r.id(),
        }
    }

    pub(crate) fn resolve(lookup: &EntityLookup, id: Uuid) -> DomainResult<Self> {
        let target = lookup.any_reference(id, ANNOTATION)?;
        target
            .downcast::<Comment>()
            .map(Self::Comment)
            .or_else(|| target.downcast::<Feedback>().map(Self::Feedback))
            .ok_or_else(|| DomainError::TypeMismatch {
                expected: ANNOTATION.to_string(),
                found: target.type_name().to_string(),
            })
    }

    pub(crate) fn resolve_all(lookup: &EntityLookup, ids: &[Uuid]) -> DomainResult<Vec<Self>> {
        ids.iter().map(|id| Self::resolve(lookup, *id)).collect()
    }
}

#[entity_dto(entity = Comment)]
pub struct CommentDto {
    pub content: String,
    pub created_on: DateTime<Utc>,
    pub status: StatusKind,
    #[reference]
    pub author: Option<Uuid>,
    #[reference]
    pub annotatable_items: Vec<Uuid>,
    #[reference]
    pub replies: Vec<Uuid>,
}

#[entity(dto = CommentDto)]
pub struct Comment {
    pub content: String,
    pub created_on: DateTime<Utc>,
    pub status: StatusKind,
    pub author: Option<EntityRef<Participant>>,
    pub annotatable_items: Vec<AnnotatableRef>,
    pub replies: Vec<EntityRef<Reply>>,
}

impl Resolve for Comment {
    fn resolve_properties(&mut self, dto: &CommentDto, lookup: &EntityLookup) -> DomainResult<()> {
        self.content = dto.content.clone();
        self.created_on = dto.created_on;
        self.status = dto.status;
        self.author = lookup.optional(dto.author)?;
        self.annotatable_items = AnnotatableRef::resolve_all(lookup, &dto.annotatable_items)?;
        self.replies = lookup.references(&dto.replies)?;
        Ok(())
    }

    fn to_dto(&self) -> CommentDto {
        CommentDto {
            id: self.id,
            content: self.content.clone(),
            created_on: self.created_on,
            status: self.status,
            author: self.author.map(|r| r.id()),
            annotatable_items: self.annotatable_items.iter().map(AnnotatableRef::id).collect(),
            replies: self.replies.iter().map(EntityRef::id).collect(),
        }
    }
}

#[entity_dto(entity = Feedback)]
pub struct FeedbackDto {
    pub content: String,
    pub created_on: DateTime<Utc>,
    #[reference]
    pub author: Option<Uuid>,
    #[reference]
    pub annotatable_items: Vec<Uuid>,
}

#[entity(dto = FeedbackDto)]
pub struct Feedback {
    pub content: String,
    pub created_on: DateTime<Utc>,
    pub author: Option<EntityRef<Participant>>,
    pub annotatable_items: Vec<AnnotatableRef>,
}

impl Resolve for Feedback {
    fn resolve_properties(&mut self, dto: &FeedbackDto, lookup: &EntityLookup) -> DomainResult<()> {
        self.content = dto.content.clone();
        self.created_on = dto.created_on;
        self.author = lookup.optional(dto.author)?;
        self.annotatable_items = AnnotatableRef::resolve_all(lookup, &dto.annotatable_items)?;
        Ok(())
    }

    fn to_dto(&self) -> FeedbackDto {
        FeedbackDto {
            id: self.id,
            content: self.content.clone(),
            created_on: self.created_on,
            author: self.author.map(|r| r.id()),
            annotatable_items: self.annotatable_items.iter().map(AnnotatableRef::id).collect(),
        }
    }
}

#[entity_dto(entity = Reply)]
pub struct ReplyDto {
    pub content: String,
    pub created_on: DateTime<Utc>,
    #[reference]
    pub author: Option<Uuid>,
}

#[entity(dto = ReplyDto)]
pub struct Reply {
    pub content: String,
    pub created_on: DateTime<Utc>,
    pub author: Option<EntityRef<Participant>>,
}

impl Resolve for Reply {
    fn resolve_properties(&mut self, dto: &ReplyDto, lookup: &EntityLookup) -> DomainResult<()> {
        self.content = dto.content.clone();
        self.created_on = dto.created_on;
        self.author = lookup.optional(dto.author)?;
        Ok(())
    }

    fn to_dto(&self) -> ReplyDto {
        ReplyDto {
            id: self.id,
            content: self.content.clone(),
            created_on: self.created_on,
            author: self.author.map(|r| r.id()),
        }
    }
}
