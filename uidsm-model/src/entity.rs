//! 实体（Entity）抽象
//!
//! 实体由 DTO 装配而来：先以仅含标识的裸实例（POCO）存在，再由
//! `Resolve::resolve_properties` 依据 DTO 与查找表填充属性。
//! 实体之间的引用以 `EntityRef<T>` 表示，只能由查找表在确认目标存在且类型匹配后创建，
//! 解引用经由 `EntityGraph` 完成。
//!
use crate::dto::{BoxedDto, DtoObject, EntityDto};
use crate::error::{DomainError, DomainResult};
use crate::lookup::EntityLookup;
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use uuid::Uuid;

/// 具备唯一标识的实体（由 `#[entity]` 宏实现）
pub trait Entity: fmt::Debug + Send + Sync + Sized + 'static {
    /// 实体类型名，用于错误信息与日志
    const NAME: &'static str;

    /// 对应的 DTO 类型
    type Dto: EntityDto;

    /// 创建仅含标识、尚未解析属性的裸实体
    fn new(id: Uuid) -> Self;

    fn id(&self) -> Uuid;
}

/// 属性解析与反向转换（各实体手写实现）
pub trait Resolve: Entity {
    /// 依据 DTO 填充自身属性；引用标识通过 `lookup` 解引用，
    /// 目标只需以裸实例存在，不要求已完成解析。
    fn resolve_properties(&mut self, dto: &Self::Dto, lookup: &EntityLookup) -> DomainResult<()>;

    /// 转换回 DTO，引用还原为标识
    fn to_dto(&self) -> Self::Dto;
}

/// 类型擦除后的实体，供实体图以统一方式存放不同类型的实体
pub trait EntityObject: Any + fmt::Debug + Send + Sync {
    fn entity_id(&self) -> Uuid;

    fn type_name(&self) -> &'static str;

    /// 以类型擦除的 DTO 解析属性；DTO 类型与实体不配对时返回 `TypeMismatch`
    fn resolve_from(&mut self, dto: &dyn DtoObject, lookup: &EntityLookup) -> DomainResult<()>;

    fn export_dto(&self) -> BoxedDto;

    fn as_any(&self) -> &dyn Any;
}

pub type BoxedEntity = Box<dyn EntityObject>;

impl<E> EntityObject for E
where
    E: Resolve,
{
    fn entity_id(&self) -> Uuid {
        Entity::id(self)
    }

    fn type_name(&self) -> &'static str {
        E::NAME
    }

    fn resolve_from(&mut self, dto: &dyn DtoObject, lookup: &EntityLookup) -> DomainResult<()> {
        match dto.as_any().downcast_ref::<E::Dto>() {
            Some(dto) => Resolve::resolve_properties(self, dto, lookup),
            None => Err(DomainError::TypeMismatch {
                expected: <E::Dto as EntityDto>::TAG.to_string(),
                found: dto.tag().to_string(),
            }),
        }
    }

    fn export_dto(&self) -> BoxedDto {
        Box::new(Resolve::to_dto(self))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// 指向实体图中某个 `T` 的类型化引用
///
/// 只能由 `EntityLookup` 创建，因此在其所属的实体图中目标必然存在且类型为 `T`。
pub struct EntityRef<T> {
    id: Uuid,
    _marker: PhantomData<fn() -> T>,
}

impl<T> EntityRef<T> {
    pub(crate) fn new(id: Uuid) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl<T> Clone for EntityRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for EntityRef<T> {}

impl<T> PartialEq for EntityRef<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for EntityRef<T> {}

impl<T> Hash for EntityRef<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T: Entity> fmt::Debug for EntityRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityRef<{}>({})", T::NAME, self.id)
    }
}

/// 类型未定的引用：目标存在，但具体类型需在使用处判定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnyRef {
    id: Uuid,
    type_id: TypeId,
    type_name: &'static str,
}

impl AnyRef {
    pub(crate) fn new(id: Uuid, type_id: TypeId, type_name: &'static str) -> Self {
        Self {
            id,
            type_id,
            type_name,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// 目标的运行时类型是否恰好为 `T`
    pub fn is<T: Entity>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// 收窄为 `EntityRef<T>`，类型不符时返回 `None`
    pub fn downcast<T: Entity>(&self) -> Option<EntityRef<T>> {
        self.is::<T>().then(|| EntityRef::new(self.id))
    }
}
