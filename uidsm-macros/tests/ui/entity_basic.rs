use uidsm_macros::{entity, entity_dto};
use uidsm_model::dto::EntityDto;
use uidsm_model::entity::{Entity, EntityRef, Resolve};
use uidsm_model::error::DomainResult;
use uidsm_model::lookup::EntityLookup;
use uidsm_model::uuid::Uuid;
use uidsm_model::{DtoRegistry, create_entities};

#[entity_dto(entity = Sensor, tag = "SensorDto")]
struct SensorDto {
    label: String,
    #[reference]
    parent: Option<Uuid>,
    #[reference]
    peers: Vec<Uuid>,
}

#[entity(dto = SensorDto)]
struct Sensor {
    label: String,
    parent: Option<EntityRef<Sensor>>,
    peers: Vec<EntityRef<Sensor>>,
}

impl Resolve for Sensor {
    fn resolve_properties(&mut self, dto: &SensorDto, lookup: &EntityLookup) -> DomainResult<()> {
        self.label = dto.label.clone();
        self.parent = lookup.optional(dto.parent)?;
        self.peers = lookup.references(&dto.peers)?;
        Ok(())
    }

    fn to_dto(&self) -> SensorDto {
        SensorDto {
            id: self.id,
            label: self.label.clone(),
            parent: self.parent.map(|r| r.id()),
            peers: self.peers.iter().map(EntityRef::id).collect(),
        }
    }
}

fn main() {
    assert_eq!(SensorDto::TAG, "SensorDto");
    assert_eq!(Sensor::NAME, "Sensor");

    let (a, b) = (Uuid::from_u128(1), Uuid::from_u128(2));
    let first = SensorDto {
        id: a,
        label: "thermistor".into(),
        parent: None,
        peers: vec![b],
    };
    let second = SensorDto {
        id: b,
        label: "heater".into(),
        parent: Some(a),
        peers: vec![a],
    };
    assert_eq!(second.references(), vec![a, a]);

    let bare = Sensor::new(a);
    assert_eq!(bare.id(), a);
    assert!(bare.label.is_empty());

    let mut registry = DtoRegistry::new();
    registry.register::<SensorDto>().unwrap();
    let json = registry
        .serialize_batch(&[first.boxed(), second.boxed()])
        .unwrap();
    let sensors = create_entities::<Sensor, _>(registry.deserialize_batch(&json).unwrap()).unwrap();
    assert_eq!(sensors.len(), 2);
}
