// Domain layer: models and ports. Adapters and core logic depend on this, never the reverse.

pub mod model;
pub mod ports;
