//! 角色与访问权限
use crate::entity::Resolve;
use crate::error::DomainResult;
use crate::lookup::EntityLookup;
use crate::value_object::AccessRight;
use uidsm_macros::{entity, entity_dto};

#[entity_dto(entity = Role)]
pub struct RoleDto {
    pub role_name: String,
    pub access_rights: Vec<AccessRight>,
}

#[entity(dto = RoleDto)]
pub struct Role {
    pub role_name: String,
    pub access_rights: Vec<AccessRight>,
}

impl Role {
    pub fn has_access_right(&self, right: AccessRight) -> bool {
        self.access_rights.contains(&right)
    }
}

impl Resolve for Role {
    fn resolve_properties(&mut self, dto: &RoleDto, _lookup: &EntityLookup) -> DomainResult<()> {
        self.role_name = dto.role_name.clone();
        self.access_rights = dto.access_rights.clone();
        Ok(())
    }

    fn to_dto(&self) -> RoleDto {
        RoleDto {
            id: self.id,
            role_name: self.role_name.clone(),
            access_rights: self.access_rights.clone(),
        }
    }
}
