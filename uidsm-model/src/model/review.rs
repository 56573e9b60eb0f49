//! 评审、评审目标与评审任务
//!
//! 评审包含若干评审目标，评审目标再拆分为分配给参与者的评审任务。
use super::{Model, Participant};
use crate::entity::{EntityRef, Resolve};
use crate::error::DomainResult;
use crate::lookup::EntityLookup;
use crate::value_object::StatusKind;
use chrono::{DateTime, Utc};
use uidsm_macros::{entity, entity_dto};
use uuid::Uuid;

#[entity_dto(entity = Review)]
pub struct ReviewDto {
    pub review_number: i32,
    pub title: String,
    pub description: String,
    pub created_on: DateTime<Utc>,
    pub status: StatusKind,
    #[reference]
    pub author: Option<Uuid>,
    #[reference]
    pub review_objectives: Vec<Uuid>,
    #[reference]
    pub artifacts: Vec<Uuid>,
}

#[entity(dto = ReviewDto)]
pub struct Review {
    pub review_number: i32,
    pub title: String,
    pub description: String,
    pub created_on: DateTime<Utc>,
    pub status: StatusKind,
    pub author: Option<EntityRef<Participant>>,
    pub review_objectives: Vec<EntityRef<ReviewObjective>>,
    pub artifacts: Vec<EntityRef<Model>>,
}

impl Resolve for Review {
    fn resolve_properties(&mut self, dto: &ReviewDto, lookup: &EntityLookup) -> DomainResult<()> {
        self.review_number = dto.review_number;
        self.title = dto.title.clone();
        self.description = dto.description.clone();
        self.created_on = dto.created_on;
        self.status = dto.status;
        self.author = lookup.optional(dto.author)?;
        self.review_objectives = lookup.references(&dto.review_objectives)?;
        self.artifacts = lookup.references(&dto.artifacts)?;
        Ok(())
    }

    fn to_dto(&self) -> ReviewDto {
        ReviewDto {
            id: self.id,
            review_number: self.review_number,
            title: self.title.clone(),
            description: self.description.clone(),
            created_on: self.created_on,
            status: self.status,
            author: self.author.map(|r| r.id()),
            review_objectives: self.review_objectives.iter().map(EntityRef::id).collect(),
            artifacts: self.artifacts.iter().map(EntityRef::id).collect(),
        }
    }
}

#[entity_dto(entity = ReviewObjective)]
pub struct ReviewObjectiveDto {
    pub review_objective_number: i32,
    pub title: String,
    pub description: String,
    pub created_on: DateTime<Utc>,
    pub status: StatusKind,
    #[reference]
    pub author: Option<Uuid>,
    #[reference]
    pub review_tasks: Vec<Uuid>,
}

#[entity(dto = ReviewObjectiveDto)]
pub struct ReviewObjective {
    pub review_objective_number: i32,
    pub title: String,
    pub description: String,
    pub created_on: DateTime<Utc>,
    pub status: StatusKind,
    pub author: Option<EntityRef<Participant>>,
    pub review_tasks: Vec<EntityRef<ReviewTask>>,
}

impl Resolve for ReviewObjective {
    fn resolve_properties(
        &mut self,
        dto: &ReviewObjectiveDto,
        lookup: &EntityLookup,
    ) -> DomainResult<()> {
        self.review_objective_number = dto.review_objective_number;
        self.title = dto.title.clone();
        self.description = dto.description.clone();
        self.created_on = dto.created_on;
        self.status = dto.status;
        self.author = lookup.optional(dto.author)?;
        self.review_tasks = lookup.references(&dto.review_tasks)?;
        Ok(())
    }

    fn to_dto(&self) -> ReviewObjectiveDto {
        ReviewObjectiveDto {
            id: self.id,
            review_objective_number: self.review_objective_number,
            title: self.title.clone(),
            description: self.description.clone(),
            created_on: self.created_on,
            status: self.status,
            author: self.author.map(|r| r.id()),
            review_tasks: self.review_tasks.iter().map(EntityRef::id).collect(),
        }
    }
}

#[entity_dto(entity = ReviewTask)]
pub struct ReviewTaskDto {
    pub task_number: i32,
    pub description: String,
    pub created_on: DateTime<Utc>,
    pub status: StatusKind,
    #[reference]
    pub author: Option<Uuid>,
    #[reference]
    pub is_assigned_to: Vec<Uuid>,
}

#[entity(dto = ReviewTaskDto)]
pub struct ReviewTask {
    pub task_number: i32,
    pub description: String,
    pub created_on: DateTime<Utc>,
    pub status: StatusKind,
    pub author: Option<EntityRef<Participant>>,
    pub is_assigned_to: Vec<EntityRef<Participant>>,
}

impl ReviewTask {
    pub fn is_assigned(&self, participant: &EntityRef<Participant>) -> bool {
        self.is_assigned_to.contains(participant)
    }
}

impl Resolve for ReviewTask {
    fn resolve_properties(
        &mut self,
        dto: &ReviewTaskDto,
        lookup: &EntityLookup,
    ) -> DomainResult<()> {
        self.task_number = dto.task_number;
        self.description = dto.description.clone();
        self.created_on = dto.created_on;
        self.status = dto.status;
        self.author = lookup.optional(dto.author)?;
        self.is_assigned_to = lookup.references(&dto.is_assigned_to)?;
        Ok(())
    }

    fn to_dto(&self) -> ReviewTaskDto {
        ReviewTaskDto {
            id: self.id,
            task_number: self.task_number,
            description: self.description.clone(),
            created_on: self.created_on,
            status: self.status,
            author: self.author.map(|r| r.id()),
            is_assigned_to: self.is_assigned_to.iter().map(EntityRef::id).collect(),
        }
    }
}
