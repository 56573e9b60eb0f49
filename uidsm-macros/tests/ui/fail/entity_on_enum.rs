use uidsm_macros::entity;

#[entity(dto = SensorDto)]
enum Sensor {
    Idle,
}

fn main() {}
