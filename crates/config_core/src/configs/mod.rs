pub mod collision;
pub mod telemetry;
