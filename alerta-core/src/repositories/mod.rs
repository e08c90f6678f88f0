// src/repositories/mod.rs

pub use alerta_common::traits::repository_traits::{AlertRepo, ChatMessageRepo, UpdateOutcome};

pub use postgres::alert::PostgresAlertRepository;
pub use postgres::chat::PostgresChatMessageRepository;

pub mod postgres;
