use uidsm_macros::entity;

#[entity(dto = SensorDto, dto = OtherDto)]
struct Sensor {
    label: String,
}

fn main() {}
