//! 实体查找表
//!
//! 在实例化阶段结束后由全部裸实体构建，记录每个标识对应实体的运行时类型。
//! 解析阶段中实体通过它将 DTO 中的标识转换为 `EntityRef`，因此引用的目标
//! 只需已被实例化，与其属性是否已解析无关。
//!
use crate::entity::{AnyRef, BoxedEntity, Entity, EntityRef};
use crate::error::{DomainError, DomainResult};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, Copy)]
struct LookupEntry {
    type_id: TypeId,
    type_name: &'static str,
}

/// 标识 → 实体类型的只读查找表
#[derive(Debug, Default)]
pub struct EntityLookup {
    entries: HashMap<Uuid, LookupEntry>,
}

impl EntityLookup {
    pub(crate) fn from_entities(entities: &[BoxedEntity]) -> Self {
        let entries = entities
            .iter()
            .map(|entity| {
                let entry = LookupEntry {
                    type_id: Any::type_id(entity.as_any()),
                    type_name: entity.type_name(),
                };
                (entity.entity_id(), entry)
            })
            .collect();
        Self { entries }
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 解引用单个标识，目标必须存在且运行时类型恰为 `T`
    pub fn reference<T: Entity>(&self, id: Uuid) -> DomainResult<EntityRef<T>> {
        let target = self.any_reference(id, T::NAME)?;
        target
            .downcast::<T>()
            .ok_or_else(|| DomainError::TypeMismatch {
                expected: T::NAME.to_string(),
                found: target.type_name().to_string(),
            })
    }

    /// 可选引用：`None` 保持为 `None`
    pub fn optional<T: Entity>(&self, id: Option<Uuid>) -> DomainResult<Option<EntityRef<T>>> {
        id.map(|id| self.reference::<T>(id)).transpose()
    }

    /// 引用列表，保持原有顺序；任一失败即整体失败
    pub fn references<T: Entity>(&self, ids: &[Uuid]) -> DomainResult<Vec<EntityRef<T>>> {
        ids.iter().map(|id| self.reference::<T>(*id)).collect()
    }

    /// 仅校验存在性的引用，具体类型由调用方判定；`expected` 用于错误信息
    pub fn any_reference(&self, id: Uuid, expected: &'static str) -> DomainResult<AnyRef> {
        self.entries
            .get(&id)
            .map(|entry| AnyRef::new(id, entry.type_id, entry.type_name))
            .ok_or(DomainError::UnknownReference { id, expected })
    }
}
