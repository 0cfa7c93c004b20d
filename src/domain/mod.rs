// Domain layer: records, collections and ports. No I/O here.

pub mod collection;
pub mod model;
pub mod ports;
