use uidsm_macros::entity_dto;

#[entity_dto(entity = Sensor, tag = SensorTag)]
struct SensorDto {
    label: String,
}

fn main() {}
