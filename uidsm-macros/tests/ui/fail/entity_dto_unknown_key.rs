use uidsm_macros::entity_dto;

#[entity_dto(entity = Sensor, kind = "SensorDto")]
struct SensorDto {
    label: String,
}

fn main() {}
