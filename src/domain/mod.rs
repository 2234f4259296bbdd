// Domain layer: value types and the parameter port the calculators read from.

pub mod model;
pub mod ports;
