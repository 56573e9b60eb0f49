//! 评审项目：聚合参与者、评审、批注与模型文件
use super::{AnnotationRef, Model, Participant, Review};
use crate::entity::{EntityRef, Resolve};
use crate::error::DomainResult;
use crate::lookup::EntityLookup;
use chrono::{DateTime, Utc};
use uidsm_macros::{entity, entity_dto};
use uuid::Uuid;

#[entity_dto(entity = Project)]
pub struct ProjectDto {
    pub project_name: String,
    pub created_on: DateTime<Utc>,
    #[reference]
    pub participants: Vec<Uuid>,
    #[reference]
    pub reviews: Vec<Uuid>,
    #[reference]
    pub annotations: Vec<Uuid>,
    #[reference]
    pub artifacts: Vec<Uuid>,
}

#[entity(dto = ProjectDto)]
pub struct Project {
    pub project_name: String,
    pub created_on: DateTime<Utc>,
    pub participants: Vec<EntityRef<Participant>>,
    pub reviews: Vec<EntityRef<Review>>,
    pub annotations: Vec<AnnotationRef>,
    pub artifacts: Vec<EntityRef<Model>>,
}

impl Resolve for Project {
    fn resolve_properties(&mut self, dto: &ProjectDto, lookup: &EntityLookup) -> DomainResult<()> {
        self.project_name = dto.project_name.clone();
        self.created_on = dto.created_on;
        self.participants = lookup.references(&dto.participants)?;
        self.reviews = lookup.references(&dto.reviews)?;
        self.annotations = AnnotationRef::resolve_all(lookup, &dto.annotations)?;
        self.artifacts = lookup.references(&dto.artifacts)?;
        Ok(())
    }

    fn to_dto(&self) -> ProjectDto {
        ProjectDto {
            id: self.id,
            project_name: self.project_name.clone(),
            created_on: self.created_on,
            participants: self.participants.iter().map(EntityRef::id).collect(),
            reviews: self.reviews.iter().map(EntityRef::id).collect(),
            annotations: self.annotations.iter().map(AnnotationRef::id).collect(),
            artifacts: self.artifacts.iter().map(EntityRef::id).collect(),
        }
    }
}
