//! uidsm 过程宏
//!
//! 为评审模型中的实体与 DTO 生成标识相关的样板代码：
//! - `#[entity]`：实体（POCO）的 `id` 字段、派生与 `Entity` 实现；
//! - `#[entity_dto]`：DTO 的 `id` 字段、serde 配置、类型标签与引用收集。
//!
//! 生成代码通过 `::uidsm_model` 绝对路径引用运行时类型。
mod entity;
mod entity_dto;
mod utils;

use proc_macro::TokenStream;

/// 实体宏
///
/// ```ignore
/// #[entity(dto = ParticipantDto)]
/// pub struct Participant {
///     pub role: Option<EntityRef<Role>>,
/// }
/// ```
#[proc_macro_attribute]
pub fn entity(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity::expand(attr, item)
}

/// DTO 宏
///
/// 标注 `#[reference]` 的字段（`Uuid` / `Option<Uuid>` / `Vec<Uuid>`）视为对其他实体的引用。
///
/// ```ignore
/// #[entity_dto(entity = Participant)]
/// pub struct ParticipantDto {
///     #[reference]
///     pub role: Uuid,
/// }
/// ```
#[proc_macro_attribute]
pub fn entity_dto(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity_dto::expand(attr, item)
}
