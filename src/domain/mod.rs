// Domain layer: entity models and the store ports. No dependencies beyond std/serde.

pub mod model;
pub mod ports;
