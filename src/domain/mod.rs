// Domain layer: plain data plus the ports the core talks through.

pub mod model;
pub mod ports;
