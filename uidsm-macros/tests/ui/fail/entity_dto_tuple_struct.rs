use uidsm_macros::entity_dto;

#[entity_dto(entity = Sensor)]
struct SensorDto(String);

fn main() {}
