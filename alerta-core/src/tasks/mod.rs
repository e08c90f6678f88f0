// File: alerta-core/src/tasks/mod.rs
pub mod expiry_sweep;

pub use expiry_sweep::{spawn_expiry_sweep, sweep_overdue_alerts, SweepOutcome};
