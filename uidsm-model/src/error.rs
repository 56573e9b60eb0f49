//! 模型层统一错误定义
//!
//! 覆盖类型标签编解码、实体图装配（引用解析）与响应信封三类失败，
//! 便于调用方统一以 `DomainError` 处理。
//!
use thiserror::Error;
use uuid::Uuid;

/// 统一错误类型
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 序列化/类型标签 ---
    #[error("serialization error: {source}")]
    Serde {
        #[from]
        source: serde_json::Error,
    },
    #[error("parse error: {reason}")]
    Parse { reason: String },
    #[error("unknown type tag: {tag}")]
    UnknownType { tag: String },
    #[error("missing \"@type\" discriminator")]
    MissingTypeTag,
    #[error("type not registered: {type_name}")]
    UnregisteredType { type_name: String },
    #[error("type tag already registered: {tag}")]
    AlreadyRegistered { tag: &'static str },

    // --- 实体图装配 ---
    #[error("unknown reference: id={id}, expected={expected}")]
    UnknownReference { id: Uuid, expected: &'static str },
    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch { expected: String, found: String },
    #[error("duplicate identifier in batch: {id}")]
    DuplicateIdentifier { id: Uuid },
    #[error("failed to resolve {entity} {owner}: {source}")]
    ResolveFailed {
        owner: Uuid,
        entity: &'static str,
        #[source]
        source: Box<DomainError>,
    },
    #[error("not found: {reason}")]
    NotFound { reason: String },

    // --- 响应信封 ---
    #[error("request failed: {errors:?}")]
    RequestFailed { errors: Vec<String> },
}

impl DomainError {
    /// 剥离 `ResolveFailed` 包装，返回最内层的错误
    pub fn root_cause(&self) -> &DomainError {
        match self {
            DomainError::ResolveFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;
