//! 类型标签注册表（DtoRegistry）
//!
//! 线上 JSON 以 `"@type"` 标签区分 DTO 的具体类型。注册表维护两张函数表：
//! - 标签 → 反序列化函数（读取路径）；
//! - 运行时类型 → 序列化函数（写入路径）。
//!
//! 注册表是显式构建并按引用传递的值：启动时构建一次，之后只读，可在线程间共享。
//!
use crate::dto::{BoxedDto, DtoObject, EntityDto};
use crate::envelope::ResponseEnvelope;
use crate::error::{DomainError, DomainResult};
use serde_json::Value;
use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

/// 类型标签在 JSON 对象中的键名
pub const TYPE_TAG: &str = "@type";

type DeserializeFn = fn(Value) -> DomainResult<BoxedDto>;
type SerializeFn = fn(&dyn DtoObject) -> DomainResult<Value>;

#[derive(Clone, Copy)]
struct Registration {
    deserialize: DeserializeFn,
    serialize: SerializeFn,
}

fn deserialize_as<D: EntityDto>(payload: Value) -> DomainResult<BoxedDto> {
    let dto: D = serde_json::from_value(payload)?;
    if dto.id().is_nil() {
        return Err(DomainError::Parse {
            reason: format!("{} without id", D::TAG),
        });
    }
    // 字段缺省时取默认值，必填引用缺失会表现为空标识
    if dto.references().iter().any(Uuid::is_nil) {
        return Err(DomainError::Parse {
            reason: format!("{} {} has an empty reference", D::TAG, dto.id()),
        });
    }
    Ok(dto.boxed())
}

fn serialize_as<D: EntityDto>(dto: &dyn DtoObject) -> DomainResult<Value> {
    let dto = dto
        .as_any()
        .downcast_ref::<D>()
        .ok_or_else(|| DomainError::TypeMismatch {
            expected: D::TAG.to_string(),
            found: dto.tag().to_string(),
        })?;
    let mut value = serde_json::to_value(dto)?;
    match &mut value {
        Value::Object(map) => {
            map.insert(TYPE_TAG.to_string(), Value::String(D::TAG.to_string()));
            Ok(value)
        }
        _ => Err(DomainError::Parse {
            reason: format!("{} did not serialize to a JSON object", D::TAG),
        }),
    }
}

/// DTO 类型标签注册表
#[derive(Default)]
pub struct DtoRegistry {
    by_tag: HashMap<&'static str, Registration>,
    by_type: HashMap<TypeId, Registration>,
}

impl std::fmt::Debug for DtoRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DtoRegistry")
            .field("tags", &self.registered_tags())
            .finish()
    }
}

impl DtoRegistry {
    /// 空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册了评审模型全部 DTO 类型的注册表
    pub fn standard() -> Self {
        let mut registry = Self::new();
        crate::model::register_all(&mut registry);
        registry
    }

    /// 注册 DTO 类型；同一标签不可重复注册
    pub fn register<D: EntityDto>(&mut self) -> DomainResult<&mut Self> {
        if self.by_tag.contains_key(D::TAG) {
            return Err(DomainError::AlreadyRegistered { tag: D::TAG });
        }
        self.insert::<D>();
        Ok(self)
    }

    pub(crate) fn insert<D: EntityDto>(&mut self) {
        let registration = Registration {
            deserialize: deserialize_as::<D>,
            serialize: serialize_as::<D>,
        };
        self.by_tag.insert(D::TAG, registration);
        self.by_type.insert(TypeId::of::<D>(), registration);
        debug!(tag = D::TAG, dto = type_name::<D>(), "dto type registered");
    }

    /// 已注册的类型标签（按字典序）
    pub fn registered_tags(&self) -> Vec<&'static str> {
        let mut tags: Vec<_> = self.by_tag.keys().copied().collect();
        tags.sort_unstable();
        tags
    }

    pub fn is_registered(&self, tag: &str) -> bool {
        self.by_tag.contains_key(tag)
    }

    /// 按标签反序列化；未注册的标签视为协议不匹配，
    /// 载荷自带的 `"@type"` 必须与 `tag` 一致
    pub fn deserialize(&self, tag: &str, payload: Value) -> DomainResult<BoxedDto> {
        let registration = self
            .by_tag
            .get(tag)
            .ok_or_else(|| DomainError::UnknownType {
                tag: tag.to_string(),
            })?;
        match payload.get(TYPE_TAG) {
            None => {}
            Some(Value::String(found)) if found == tag => {}
            Some(found) => {
                return Err(DomainError::TypeMismatch {
                    expected: tag.to_string(),
                    found: found.as_str().map_or_else(|| found.to_string(), str::to_string),
                });
            }
        }
        (registration.deserialize)(payload)
    }

    /// 从带 `"@type"` 的 JSON 对象反序列化
    pub fn deserialize_value(&self, value: Value) -> DomainResult<BoxedDto> {
        let tag = value
            .get(TYPE_TAG)
            .and_then(Value::as_str)
            .ok_or(DomainError::MissingTypeTag)?
            .to_string();
        self.deserialize(&tag, value)
    }

    /// 反序列化混合类型的 DTO 数组
    pub fn deserialize_batch(&self, json: &str) -> DomainResult<Vec<BoxedDto>> {
        let values: Vec<Value> = serde_json::from_str(json)?;
        self.deserialize_values(values)
    }

    pub fn deserialize_values(&self, values: Vec<Value>) -> DomainResult<Vec<BoxedDto>> {
        let dtos = values
            .into_iter()
            .map(|value| self.deserialize_value(value))
            .collect::<DomainResult<Vec<_>>>()?;
        debug!(dtos = dtos.len(), "dto batch decoded");
        Ok(dtos)
    }

    /// 按运行时类型序列化，输出中带 `"@type"`
    pub fn serialize(&self, dto: &dyn DtoObject) -> DomainResult<Value> {
        let registration = self
            .by_type
            .get(&Any::type_id(dto.as_any()))
            .ok_or_else(|| DomainError::UnregisteredType {
                type_name: dto.tag().to_string(),
            })?;
        (registration.serialize)(dto)
    }

    pub fn serialize_values(&self, dtos: &[BoxedDto]) -> DomainResult<Vec<Value>> {
        dtos.iter().map(|dto| self.serialize(dto.as_ref())).collect()
    }

    /// 序列化为 JSON 数组文本
    pub fn serialize_batch(&self, dtos: &[BoxedDto]) -> DomainResult<String> {
        let values = self.serialize_values(dtos)?;
        Ok(serde_json::to_string(&values)?)
    }

    /// 解码响应信封：失败的响应转换为 `RequestFailed`
    pub fn decode_response(&self, json: &str) -> DomainResult<Vec<BoxedDto>> {
        let envelope: ResponseEnvelope = serde_json::from_str(json)?;
        if !envelope.is_request_successful() {
            return Err(DomainError::RequestFailed {
                errors: envelope.errors().to_vec(),
            });
        }
        self.deserialize_values(envelope.into_entities())
    }

    /// 编码成功的响应信封
    pub fn encode_response(&self, dtos: &[BoxedDto]) -> DomainResult<String> {
        let envelope = ResponseEnvelope::success(self.serialize_values(dtos)?);
        Ok(serde_json::to_string(&envelope)?)
    }
}

#[cfg(test)]
mod tests {
    use super::{DtoRegistry, TYPE_TAG};
    use crate::dto::{DtoObject, EntityDto};
    use crate::error::DomainError;
    use crate::model::{CommentDto, ParticipantDto, RoleDto};
    use crate::value_object::{AccessRight, StatusKind};
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn standard_registry_knows_every_kind() {
        let registry = DtoRegistry::standard();
        assert_eq!(registry.registered_tags().len(), 12);
        assert!(registry.is_registered("ReviewObjectiveDto"));
        assert!(!registry.is_registered("Annotation"));
    }

    #[test]
    fn registering_a_tag_twice_fails() {
        let mut registry = DtoRegistry::new();
        registry.register::<RoleDto>().unwrap();
        let err = registry.register::<RoleDto>().unwrap_err();
        assert!(matches!(err, DomainError::AlreadyRegistered { tag: "RoleDto" }));
    }

    #[test]
    fn decodes_tagged_object() {
        let registry = DtoRegistry::standard();
        let id = Uuid::new_v4();
        let role = Uuid::new_v4();
        let dto = registry
            .deserialize_value(json!({
                "@type": "ParticipantDto",
                "id": id,
                "role": role,
                "project": null
            }))
            .unwrap();

        assert_eq!(dto.tag(), "ParticipantDto");
        let participant = dto.as_any().downcast_ref::<ParticipantDto>().unwrap();
        assert_eq!(participant.id, id);
        assert_eq!(participant.role, role);
        assert_eq!(participant.project, None);
        assert_eq!(dto.reference_ids(), vec![role]);
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let registry = DtoRegistry::standard();
        let err = registry
            .deserialize_value(json!({ "@type": "ThingDto", "id": Uuid::new_v4() }))
            .unwrap_err();
        assert!(matches!(err, DomainError::UnknownType { tag } if tag == "ThingDto"));
    }

    #[test]
    fn missing_tag_is_rejected() {
        let registry = DtoRegistry::standard();
        let err = registry
            .deserialize_value(json!({ "id": Uuid::new_v4() }))
            .unwrap_err();
        assert!(matches!(err, DomainError::MissingTypeTag));
    }

    #[test]
    fn missing_id_is_rejected() {
        let registry = DtoRegistry::standard();
        let err = registry
            .deserialize_value(json!({ "@type": "RoleDto", "roleName": "Reviewer" }))
            .unwrap_err();
        assert!(matches!(err, DomainError::Parse { .. }));
    }

    #[test]
    fn embedded_tag_must_match_requested_tag() {
        let registry = DtoRegistry::standard();
        let payload = json!({ "@type": "RoleDto", "id": Uuid::new_v4(), "roleName": "x" });

        let err = registry.deserialize("ProjectDto", payload.clone()).unwrap_err();
        assert!(matches!(
            err,
            DomainError::TypeMismatch { expected, found }
                if expected == "ProjectDto" && found == "RoleDto"
        ));
        assert_eq!(registry.deserialize("RoleDto", payload).unwrap().tag(), "RoleDto");
    }

    #[test]
    fn untagged_payload_uses_requested_tag() {
        let registry = DtoRegistry::standard();
        let dto = registry
            .deserialize("RoleDto", json!({ "id": Uuid::new_v4(), "roleName": "x" }))
            .unwrap();
        assert_eq!(dto.tag(), "RoleDto");
    }

    #[test]
    fn missing_required_reference_is_rejected() {
        let registry = DtoRegistry::standard();
        let err = registry
            .deserialize_value(json!({ "@type": "ParticipantDto", "id": Uuid::new_v4() }))
            .unwrap_err();
        assert!(matches!(err, DomainError::Parse { reason } if reason.contains("empty reference")));
    }

    #[test]
    fn serialize_emits_type_tag_and_camel_case() {
        let registry = DtoRegistry::standard();
        let dto = RoleDto {
            id: Uuid::new_v4(),
            role_name: "Project manager".into(),
            access_rights: vec![AccessRight::ProjectManagement, AccessRight::AssignTask],
        };

        let value = registry.serialize(&dto).unwrap();
        assert_eq!(value[TYPE_TAG], "RoleDto");
        assert_eq!(value["roleName"], "Project manager");
        assert_eq!(
            value["accessRights"],
            json!(["ProjectManagement", "AssignTask"])
        );

        let back = registry.deserialize_value(value).unwrap();
        assert!(back.as_any().downcast_ref::<RoleDto>() == Some(&dto));
    }

    #[test]
    fn serializing_an_unregistered_kind_fails() {
        let mut registry = DtoRegistry::new();
        registry.register::<RoleDto>().unwrap();
        let comment = CommentDto {
            id: Uuid::new_v4(),
            status: StatusKind::Closed,
            ..Default::default()
        };
        let err = registry.serialize(&comment).unwrap_err();
        assert!(matches!(
            err,
            DomainError::UnregisteredType { type_name } if type_name == "CommentDto"
        ));
    }

    #[test]
    fn batch_round_trip_preserves_order_and_values() {
        let registry = DtoRegistry::standard();
        let role = RoleDto {
            id: Uuid::new_v4(),
            role_name: "Reviewer".into(),
            access_rights: vec![AccessRight::CreateComment],
        };
        let participant = ParticipantDto {
            id: Uuid::new_v4(),
            role: role.id,
            ..Default::default()
        };
        let dtos = vec![role.boxed(), participant.boxed()];

        let json = registry.serialize_batch(&dtos).unwrap();
        let decoded = registry.deserialize_batch(&json).unwrap();
        assert!(decoded == dtos);
    }

    #[test]
    fn failed_envelope_surfaces_errors() {
        let registry = DtoRegistry::standard();
        let json = r#"{ "isRequestSuccessful": false, "errors": ["review not found"] }"#;
        let err = registry.decode_response(json).unwrap_err();
        assert!(matches!(
            err,
            DomainError::RequestFailed { errors } if errors == ["review not found"]
        ));
    }

    #[test]
    fn envelope_round_trip() {
        let registry = DtoRegistry::standard();
        let dtos = vec![
            RoleDto {
                id: Uuid::new_v4(),
                ..Default::default()
            }
            .boxed(),
        ];
        let json = registry.encode_response(&dtos).unwrap();
        let decoded = registry.decode_response(&json).unwrap();
        assert!(decoded == dtos);
    }
}
