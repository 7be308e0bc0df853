// Domain layer: the transaction record and the ports the pipeline talks through.

pub mod model;
pub mod ports;
