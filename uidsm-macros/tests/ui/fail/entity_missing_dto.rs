use uidsm_macros::entity;

#[entity]
struct Sensor {
    label: String,
}

fn main() {}
