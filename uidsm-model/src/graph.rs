//! 实体图（EntityGraph）
//!
//! 一次装配产出的全部实体：稠密数组存放实体，辅以标识索引。
//! `EntityRef<T>` 经由实体图解引用；按类型筛选时只匹配运行时类型完全一致的实体。
//!
use crate::dto::BoxedDto;
use crate::entity::{BoxedEntity, Entity, EntityObject, EntityRef};
use crate::error::{DomainError, DomainResult};
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::marker::PhantomData;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct EntityGraph {
    entities: Vec<BoxedEntity>,
    index: HashMap<Uuid, usize>,
}

impl EntityGraph {
    pub(crate) fn new(entities: Vec<BoxedEntity>, index: HashMap<Uuid, usize>) -> Self {
        Self { entities, index }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.index.contains_key(&id)
    }

    /// 解引用
    pub fn get<T: Entity>(&self, reference: &EntityRef<T>) -> Option<&T> {
        self.get_as::<T>(reference.id())
    }

    /// 按标识取出并收窄为 `T`，类型不符时返回 `None`
    pub fn get_as<T: Entity>(&self, id: Uuid) -> Option<&T> {
        self.get_any(id)?.as_any().downcast_ref::<T>()
    }

    pub fn get_any(&self, id: Uuid) -> Option<&dyn EntityObject> {
        self.index.get(&id).map(|&pos| self.entities[pos].as_ref())
    }

    /// 实体的类型名
    pub fn type_name_of(&self, id: Uuid) -> Option<&'static str> {
        self.get_any(id).map(|entity| entity.type_name())
    }

    /// 按装配输入顺序遍历全部实体
    pub fn iter(&self) -> impl Iterator<Item = &dyn EntityObject> {
        self.entities.iter().map(|entity| entity.as_ref())
    }

    /// 运行时类型恰为 `T` 的实体（不做多态匹配）
    pub fn of_type<T: Entity>(&self) -> impl Iterator<Item = &T> {
        self.entities
            .iter()
            .filter_map(|entity| entity.as_any().downcast_ref::<T>())
    }

    /// 各实体类型的数量
    pub fn count_by_type(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for entity in &self.entities {
            *counts.entry(entity.type_name()).or_insert(0) += 1;
        }
        counts
    }

    /// 将整个实体图导出为 DTO（保持装配输入顺序）
    pub fn to_dtos(&self) -> Vec<BoxedDto> {
        self.entities.iter().map(|entity| entity.export_dto()).collect()
    }

    /// 导出 `root` 及其经引用可达的全部实体（广度优先，环路只访问一次）
    pub fn associated_dtos(&self, root: Uuid) -> DomainResult<Vec<BoxedDto>> {
        let mut visited = HashSet::from([root]);
        let mut queue = VecDeque::from([root]);
        let mut out = Vec::new();

        while let Some(id) = queue.pop_front() {
            let entity = self.get_any(id).ok_or_else(|| DomainError::NotFound {
                reason: format!("entity {id} is not part of the graph"),
            })?;
            let dto = entity.export_dto();
            for reference in dto.reference_ids() {
                if visited.insert(reference) {
                    queue.push_back(reference);
                }
            }
            out.push(dto);
        }

        Ok(out)
    }
}

/// 按类型筛选后的装配结果，同时保留完整实体图以便沿引用导航
#[derive(Debug)]
pub struct Assembled<T> {
    graph: EntityGraph,
    selected: Vec<usize>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Entity> Assembled<T> {
    pub(crate) fn select(graph: EntityGraph) -> Self {
        let selected = graph
            .entities
            .iter()
            .enumerate()
            .filter(|(_, entity)| entity.as_any().is::<T>())
            .map(|(pos, _)| pos)
            .collect();
        Self {
            graph,
            selected,
            _marker: PhantomData,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.selected
            .iter()
            .filter_map(|&pos| self.graph.entities[pos].as_any().downcast_ref::<T>())
    }

    pub fn ids(&self) -> Vec<Uuid> {
        self.iter().map(Entity::id).collect()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn graph(&self) -> &EntityGraph {
        &self.graph
    }

    pub fn into_graph(self) -> EntityGraph {
        self.graph
    }
}
