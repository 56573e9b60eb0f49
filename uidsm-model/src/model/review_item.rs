//! 评审条目：被评审的外部模型元素（Thing）在本项目中的代理
use super::AnnotationRef;
use crate::entity::Resolve;
use crate::error::DomainResult;
use crate::lookup::EntityLookup;
use uidsm_macros::{entity, entity_dto};
use uuid::Uuid;

#[entity_dto(entity = ReviewItem)]
pub struct ReviewItemDto {
    /// 外部模型中 Thing 的标识，不是本图中的实体
    pub thing_id: Uuid,
    #[reference]
    pub annotations: Vec<Uuid>,
}

#[entity(dto = ReviewItemDto)]
pub struct ReviewItem {
    pub thing_id: Uuid,
    pub annotations: Vec<AnnotationRef>,
}

impl Resolve for ReviewItem {
    fn resolve_properties(
        &mut self,
        dto: &ReviewItemDto,
        lookup: &EntityLookup,
    ) -> DomainResult<()> {
        self.thing_id = dto.thing_id;
        self.annotations = AnnotationRef::resolve_all(lookup, &dto.annotations)?;
        Ok(())
    }

    fn to_dto(&self) -> ReviewItemDto {
        ReviewItemDto {
            id: self.id,
            thing_id: self.thing_id,
            annotations: self.annotations.iter().map(AnnotationRef::id).collect(),
        }
    }
}
