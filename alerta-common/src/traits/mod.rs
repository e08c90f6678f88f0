// File: alerta-common/src/traits/mod.rs
pub mod repository_traits;

pub use repository_traits::{AlertRepo, ChatMessageRepo, UpdateOutcome};
