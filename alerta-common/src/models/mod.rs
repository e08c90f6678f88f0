// File: alerta-common/src/models/mod.rs
pub mod actor;
pub mod alert;
pub mod chat;

pub use actor::{Actor, ActorRole};
pub use alert::{Alert, AlertStatus, GpsPoint, NewAlert, TerminalTransition};
pub use chat::AlertChatMessage;
