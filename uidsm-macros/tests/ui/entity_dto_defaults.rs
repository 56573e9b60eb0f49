use uidsm_macros::{entity, entity_dto};
use uidsm_model::dto::EntityDto;
use uidsm_model::entity::{Entity, Resolve};
use uidsm_model::error::DomainResult;
use uidsm_model::lookup::EntityLookup;
use uidsm_model::uuid::Uuid;

// 已声明的 id 字段会被移到最前；已有的 derive 与宏要求的合并去重
#[entity_dto(entity = Note)]
#[derive(Debug, serde::Serialize)]
pub struct NoteDto {
    pub body: String,
    pub id: Uuid,
}

#[entity(dto = NoteDto)]
#[derive(Clone)]
pub struct Note {
    body: String,
}

impl Resolve for Note {
    fn resolve_properties(&mut self, dto: &NoteDto, _lookup: &EntityLookup) -> DomainResult<()> {
        self.body = dto.body.clone();
        Ok(())
    }

    fn to_dto(&self) -> NoteDto {
        NoteDto {
            id: self.id,
            body: self.body.clone(),
        }
    }
}

fn main() {
    assert_eq!(NoteDto::TAG, "NoteDto");

    let json = r#"{ "id": "00000000-0000-0000-0000-000000000007" }"#;
    let dto: NoteDto = serde_json::from_str(json).unwrap();
    assert_eq!(dto.id(), Uuid::from_u128(7));
    assert!(dto.body.is_empty());
    assert!(dto.references().is_empty());

    let note = Note::new(dto.id());
    assert_eq!(note.clone(), note);
}
