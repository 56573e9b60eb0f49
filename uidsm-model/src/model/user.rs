//! 平台用户
use crate::entity::Resolve;
use crate::error::DomainResult;
use crate::lookup::EntityLookup;
use uidsm_macros::{entity, entity_dto};

#[entity_dto(entity = UserEntity)]
pub struct UserEntityDto {
    pub user_name: String,
    pub is_admin: bool,
}

#[entity(dto = UserEntityDto)]
pub struct UserEntity {
    pub user_name: String,
    pub is_admin: bool,
}

impl Resolve for UserEntity {
    fn resolve_properties(
        &mut self,
        dto: &UserEntityDto,
        _lookup: &EntityLookup,
    ) -> DomainResult<()> {
        self.user_name = dto.user_name.clone();
        self.is_admin = dto.is_admin;
        Ok(())
    }

    fn to_dto(&self) -> UserEntityDto {
        UserEntityDto {
            id: self.id,
            user_name: self.user_name.clone(),
            is_admin: self.is_admin,
        }
    }
}
