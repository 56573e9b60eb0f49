//! 项目参与者：用户在某个项目中以某个角色参与评审
use super::{Project, Role, UserEntity};
use crate::entity::{EntityRef, Resolve};
use crate::error::DomainResult;
use crate::lookup::EntityLookup;
use uidsm_macros::{entity, entity_dto};
use uuid::Uuid;

#[entity_dto(entity = Participant)]
pub struct ParticipantDto {
    #[reference]
    pub role: Uuid,
    #[reference]
    pub project: Option<Uuid>,
    #[reference]
    pub user: Option<Uuid>,
}

#[entity(dto = ParticipantDto)]
pub struct Participant {
    pub role: Option<EntityRef<Role>>,
    pub project: Option<EntityRef<Project>>,
    pub user: Option<EntityRef<UserEntity>>,
}

impl Resolve for Participant {
    fn resolve_properties(
        &mut self,
        dto: &ParticipantDto,
        lookup: &EntityLookup,
    ) -> DomainResult<()> {
        self.role = Some(lookup.reference(dto.role)?);
        self.project = lookup.optional(dto.project)?;
        self.user = lookup.optional(dto.user)?;
        Ok(())
    }

    fn to_dto(&self) -> ParticipantDto {
        ParticipantDto {
            id: self.id,
            role: self.role.map(|r| r.id()).unwrap_or_default(),
            project: self.project.map(|r| r.id()),
            user: self.user.map(|r| r.id()),
        }
    }
}
