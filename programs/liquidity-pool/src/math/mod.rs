pub mod curve;
pub mod fixed_point;
