// Domain layer: catalogue models and ports. The pattern modules only see these.

pub mod model;
pub mod ports;
