//! UI-DSM 评审模型层（uidsm-model）
//!
//! 负责评审数据在线上形态与内存形态之间的转换：
//! - 评审领域的 DTO 与实体建模（`model`），以及枚举值对象（`value_object`）
//! - 以 `"@type"` 标签区分 DTO 类型的编解码注册表（`registry`）与响应信封（`envelope`）
//! - 两阶段装配（`assembler`）：先实例化全部裸实体，再依据查找表（`lookup`）解析引用，
//!   产出可含环路的实体图（`graph`）
//! - 实体图的反向导出：整图或自某实体起可达的闭包转换回 DTO
//!
//! 本 crate 不涉及传输与存储，也不安装日志订阅者；日志通过 `tracing` 输出，由调用方决定去向。
//!
//! 典型用法：
//! 1. 构建一次 `DtoRegistry::standard()`，在各处按引用共享；
//! 2. 以 `decode_response` / `deserialize_batch` 得到混合类型的 DTO；
//! 3. 调用 `create_entities::<T>` 得到类型恰为 `T` 的实体，并经由实体图沿引用导航。
//!
pub mod assembler;
pub mod dto;
pub mod entity;
pub mod envelope;
pub mod error;
pub mod graph;
pub mod lookup;
pub mod model;
pub mod registry;
pub mod value_object;

pub use assembler::{assemble, create_entities};
pub use error::{DomainError, DomainResult};
pub use graph::{Assembled, EntityGraph};
pub use registry::DtoRegistry;

// 宏生成的代码以 ::uidsm_model::uuid::Uuid 引用标识类型
pub use uuid;

// 允许在本 crate 内部通过 ::uidsm_model 进行自引用，
// 以便过程宏在本 crate 中展开时也能解析到 ::uidsm_model 路径。
extern crate self as uidsm_model;
