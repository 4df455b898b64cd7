// Domain layer: request/response models and the ports artifacts are served through.

pub mod model;
pub mod ports;
