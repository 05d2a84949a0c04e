// Domain layer: value types and ports. No I/O here.

pub mod course;
pub mod grade;
pub mod model;
pub mod ports;
