// Domain layer: models and the ports the renderers and fetchers talk through.

pub mod model;
pub mod ports;
