/// Net load and solar utilization columns.
pub mod analysis;
/// Injectable time source for series timestamps.
pub mod clock;
pub mod generator;
pub mod types;
