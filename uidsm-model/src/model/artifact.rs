//! 评审所依据的工程模型文件（ECSS-E-TM-10-25 模型的某次迭代）
use crate::entity::Resolve;
use crate::error::DomainResult;
use crate::lookup::EntityLookup;
use uidsm_macros::{entity, entity_dto};
use uuid::Uuid;

#[entity_dto(entity = Model)]
pub struct ModelDto {
    pub file_name: String,
    pub model_name: String,
    /// 外部模型中的迭代标识，不是本图中的实体
    pub iteration_id: Uuid,
}

#[entity(dto = ModelDto)]
pub struct Model {
    pub file_name: String,
    pub model_name: String,
    pub iteration_id: Uuid,
}

impl Resolve for Model {
    fn resolve_properties(&mut self, dto: &ModelDto, _lookup: &EntityLookup) -> DomainResult<()> {
        self.file_name = dto.file_name.clone();
        self.model_name = dto.model_name.clone();
        self.iteration_id = dto.iteration_id;
        Ok(())
    }

    fn to_dto(&self) -> ModelDto {
        ModelDto {
            id: self.id,
            file_name: self.file_name.clone(),
            model_name: self.model_name.clone(),
            iteration_id: self.iteration_id,
        }
    }
}
