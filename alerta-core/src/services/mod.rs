// File: alerta-core/src/services/mod.rs

pub mod acknowledgment;
pub mod chat_service;
pub mod duration;
pub mod lifecycle_service;

pub use acknowledgment::AcknowledgmentTracker;
pub use chat_service::ChatLogService;
pub use duration::{Countdown, DurationReport, DurationVerdict};
pub use lifecycle_service::AlertLifecycleService;
