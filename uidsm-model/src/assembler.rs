//! 实体装配器（Assembler）
//!
//! 将一批无序、仅以标识相互引用的 DTO 还原为完整链接的实体图：
//! 1. 实例化：为每个 DTO 创建裸实体，并按标识登记实体与 DTO；
//! 2. 解析：以完整查找表逐个解析实体属性，解析不会递归进入被引用实体，
//!    因此环状引用也能在 O(n) 内完成；
//! 3. 筛选（`create_entities`）：只保留运行时类型恰为 `T` 的实体。
//!
//! 任一 DTO 失败即整体失败，不返回部分解析的实体图。
//!
use crate::dto::BoxedDto;
use crate::entity::{BoxedEntity, Entity};
use crate::error::{DomainError, DomainResult};
use crate::graph::{Assembled, EntityGraph};
use crate::lookup::EntityLookup;
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

/// 装配完整实体图
pub fn assemble<I>(dtos: I) -> DomainResult<EntityGraph>
where
    I: IntoIterator<Item = BoxedDto>,
{
    let mut pocos: Vec<BoxedEntity> = Vec::new();
    let mut sources: Vec<BoxedDto> = Vec::new();
    let mut index: HashMap<Uuid, usize> = HashMap::new();

    for dto in dtos {
        let id = dto.dto_id();
        if index.insert(id, pocos.len()).is_some() {
            return Err(DomainError::DuplicateIdentifier { id });
        }
        pocos.push(dto.instantiate_poco());
        sources.push(dto);
    }
    debug!(entities = pocos.len(), "instantiation pass complete");

    let lookup = EntityLookup::from_entities(&pocos);
    for (poco, dto) in pocos.iter_mut().zip(&sources) {
        let owner = poco.entity_id();
        let entity = poco.type_name();
        poco.resolve_from(dto.as_ref(), &lookup)
            .map_err(|source| DomainError::ResolveFailed {
                owner,
                entity,
                source: Box::new(source),
            })?;
    }
    debug!(entities = pocos.len(), "resolution pass complete");

    let graph = EntityGraph::new(pocos, index);
    info!(entities = graph.len(), "entity graph assembled");
    Ok(graph)
}

/// 装配并筛选出运行时类型恰为 `T` 的实体
pub fn create_entities<T, I>(dtos: I) -> DomainResult<Assembled<T>>
where
    T: Entity,
    I: IntoIterator<Item = BoxedDto>,
{
    let graph = assemble(dtos)?;
    let assembled = Assembled::<T>::select(graph);
    debug!(entity = T::NAME, selected = assembled.len(), "entities selected");
    Ok(assembled)
}

#[cfg(test)]
mod tests {
    use super::{assemble, create_entities};
    use crate::dto::{BoxedDto, EntityDto};
    use crate::entity::Entity;
    use crate::error::DomainError;
    use crate::model::*;
    use uuid::Uuid;

    fn project(id: Uuid, participants: Vec<Uuid>) -> BoxedDto {
        ProjectDto {
            id,
            project_name: "Envision".into(),
            participants,
            ..Default::default()
        }
        .boxed()
    }

    fn role(id: Uuid) -> BoxedDto {
        RoleDto {
            id,
            role_name: "Reviewer".into(),
            ..Default::default()
        }
        .boxed()
    }

    fn participant(id: Uuid, role: Uuid, project: Option<Uuid>) -> BoxedDto {
        ParticipantDto {
            id,
            role,
            project,
            user: None,
        }
        .boxed()
    }

    #[test]
    fn resolves_participant_references() {
        let (p1, r1, pa1) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let dtos = vec![project(p1, vec![]), role(r1), participant(pa1, r1, Some(p1))];

        let assembled = create_entities::<Participant, _>(dtos).unwrap();
        assert_eq!(assembled.ids(), vec![pa1]);

        let participant = assembled.iter().next().unwrap();
        let graph = assembled.graph();
        let role = graph.get(&participant.role.unwrap()).unwrap();
        assert_eq!(role.id(), r1);
        assert_eq!(role.role_name, "Reviewer");
        let project = graph.get(&participant.project.unwrap()).unwrap();
        assert_eq!(project.id(), p1);
        assert_eq!(project.project_name, "Envision");
    }

    #[test]
    fn input_order_does_not_matter() {
        let (p1, r1, pa1) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let dtos = vec![participant(pa1, r1, Some(p1)), role(r1), project(p1, vec![])];

        let graph = assemble(dtos).unwrap();
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.type_name_of(pa1), Some("Participant"));
    }

    #[test]
    fn mutual_references_resolve_both_ways() {
        let (p1, r1, pa1) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let dtos = vec![project(p1, vec![pa1]), role(r1), participant(pa1, r1, Some(p1))];

        let graph = assemble(dtos).unwrap();
        let project = graph.get_as::<Project>(p1).unwrap();
        let member = graph.get(&project.participants[0]).unwrap();
        assert_eq!(member.id(), pa1);
        let back = graph.get(&member.project.unwrap()).unwrap();
        assert_eq!(back.id(), p1);
    }

    #[test]
    fn dangling_reference_fails_the_batch() {
        let (c1, x1) = (Uuid::new_v4(), Uuid::new_v4());
        let comment = CommentDto {
            id: c1,
            replies: vec![x1],
            ..Default::default()
        };

        let err = assemble(vec![comment.boxed()]).unwrap_err();
        match &err {
            DomainError::ResolveFailed { owner, entity, .. } => {
                assert_eq!(*owner, c1);
                assert_eq!(*entity, "Comment");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            err.root_cause(),
            DomainError::UnknownReference { id, expected: "Reply" } if *id == x1
        ));
    }

    #[test]
    fn duplicate_identifier_is_rejected() {
        let id = Uuid::new_v4();
        let err = assemble(vec![role(id), project(id, vec![])]).unwrap_err();
        assert!(matches!(err, DomainError::DuplicateIdentifier { id: dup } if dup == id));
    }

    #[test]
    fn reference_to_wrong_kind_is_a_type_mismatch() {
        let (p1, pa1) = (Uuid::new_v4(), Uuid::new_v4());
        // role 指向了一个项目
        let err = assemble(vec![project(p1, vec![]), participant(pa1, p1, None)]).unwrap_err();
        assert!(matches!(
            err.root_cause(),
            DomainError::TypeMismatch { expected, found }
                if expected == "Role" && found == "Project"
        ));
    }

    #[test]
    fn annotation_group_rejects_other_kinds() {
        let (item, r1) = (Uuid::new_v4(), Uuid::new_v4());
        let review_item = ReviewItemDto {
            id: item,
            annotations: vec![r1],
            ..Default::default()
        };

        let err = assemble(vec![review_item.boxed(), role(r1)]).unwrap_err();
        assert!(matches!(
            err.root_cause(),
            DomainError::TypeMismatch { expected, .. } if expected == "Annotation"
        ));
    }

    #[test]
    fn selection_is_exact_type_only() {
        let (review, c1, f1) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let dtos = vec![
            ReviewDto {
                id: review,
                title: "PDR".into(),
                ..Default::default()
            }
            .boxed(),
            CommentDto {
                id: c1,
                content: "check mass budget".into(),
                annotatable_items: vec![review],
                ..Default::default()
            }
            .boxed(),
            FeedbackDto {
                id: f1,
                content: "looks good".into(),
                annotatable_items: vec![review],
                ..Default::default()
            }
            .boxed(),
        ];

        let comments = create_entities::<Comment, _>(dtos).unwrap();
        assert_eq!(comments.ids(), vec![c1]);
        let comment = comments.iter().next().unwrap();
        assert!(matches!(
            comment.annotatable_items.as_slice(),
            [AnnotatableRef::Review(r)] if r.id() == review
        ));
        assert_eq!(comments.graph().len(), 3);
    }

    #[test]
    fn empty_selection_is_not_an_error() {
        let replies = create_entities::<Reply, _>(vec![role(Uuid::new_v4())]).unwrap();
        assert!(replies.is_empty());
        assert_eq!(replies.graph().len(), 1);

        let nothing = create_entities::<Reply, _>(Vec::new()).unwrap();
        assert!(nothing.is_empty());
        assert!(nothing.into_graph().is_empty());
    }

    #[test]
    fn review_task_assignment_follows_resolved_participants() {
        let (r1, pa1, pa2, task) = (
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
        );
        let dtos = vec![
            role(r1),
            participant(pa1, r1, None),
            participant(pa2, r1, None),
            ReviewTaskDto {
                id: task,
                author: Some(pa2),
                is_assigned_to: vec![pa1],
                ..Default::default()
            }
            .boxed(),
        ];

        let tasks = create_entities::<ReviewTask, _>(dtos).unwrap();
        let task = tasks.iter().next().unwrap();
        let assignee = task.is_assigned_to[0];
        let author = task.author.unwrap();
        assert!(task.is_assigned(&assignee));
        assert!(!task.is_assigned(&author));
        assert!(task.status.is_open());
    }
}
