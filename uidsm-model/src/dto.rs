//! 数据传输对象（DTO）
//!
//! DTO 是实体的扁平线上形态：所有跨实体引用都以标识（UUID）表示。
//! 具体 DTO 由 `#[entity_dto]` 宏实现 `EntityDto`；装配与编解码则通过
//! 类型擦除的 `DtoObject` 统一处理混合了多种类型的 DTO 批次。
//!
use crate::entity::{BoxedEntity, Entity};
use serde::{Serialize, de::DeserializeOwned};
use std::any::Any;
use std::fmt;
use uuid::Uuid;

/// 具体 DTO 类型（由 `#[entity_dto]` 宏实现）
pub trait EntityDto:
    Serialize + DeserializeOwned + Clone + PartialEq + fmt::Debug + Send + Sync + 'static
{
    /// 线上类型标签（`"@type"` 的取值）
    const TAG: &'static str;

    /// 该 DTO 装配出的实体类型
    type Entity: crate::entity::Resolve<Dto = Self>;

    fn id(&self) -> uuid::Uuid;

    /// 引用的其他实体标识（按字段声明顺序）
    fn references(&self) -> Vec<Uuid>;

    fn boxed(self) -> BoxedDto {
        Box::new(self)
    }
}

/// 标注 `#[reference]` 的字段类型需实现此 trait
pub trait ReferenceIds {
    fn collect_ids(&self, out: &mut Vec<Uuid>);
}

impl ReferenceIds for Uuid {
    fn collect_ids(&self, out: &mut Vec<Uuid>) {
        out.push(*self);
    }
}

impl ReferenceIds for Option<Uuid> {
    fn collect_ids(&self, out: &mut Vec<Uuid>) {
        out.extend(self.iter().copied());
    }
}

impl ReferenceIds for Vec<Uuid> {
    fn collect_ids(&self, out: &mut Vec<Uuid>) {
        out.extend_from_slice(self);
    }
}

/// 类型擦除后的 DTO
pub trait DtoObject: Any + fmt::Debug + Send + Sync {
    fn dto_id(&self) -> Uuid;

    fn tag(&self) -> &'static str;

    fn reference_ids(&self) -> Vec<Uuid>;

    /// 创建对应类型的裸实体（仅含标识）
    fn instantiate_poco(&self) -> BoxedEntity;

    fn as_any(&self) -> &dyn Any;

    fn clone_boxed(&self) -> BoxedDto;

    fn dyn_eq(&self, other: &dyn DtoObject) -> bool;
}

pub type BoxedDto = Box<dyn DtoObject>;

impl<D> DtoObject for D
where
    D: EntityDto,
{
    fn dto_id(&self) -> Uuid {
        EntityDto::id(self)
    }

    fn tag(&self) -> &'static str {
        D::TAG
    }

    fn reference_ids(&self) -> Vec<Uuid> {
        EntityDto::references(self)
    }

    fn instantiate_poco(&self) -> BoxedEntity {
        Box::new(<D::Entity as Entity>::new(EntityDto::id(self)))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_boxed(&self) -> BoxedDto {
        Box::new(self.clone())
    }

    fn dyn_eq(&self, other: &dyn DtoObject) -> bool {
        other
            .as_any()
            .downcast_ref::<D>()
            .is_some_and(|other| self == other)
    }
}

impl Clone for BoxedDto {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

impl PartialEq for dyn DtoObject {
    fn eq(&self, other: &Self) -> bool {
        self.dyn_eq(other)
    }
}
