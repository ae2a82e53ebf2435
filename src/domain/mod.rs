// Domain layer: bootcamp models and the ports the workflows drive.

pub mod model;
pub mod ports;
