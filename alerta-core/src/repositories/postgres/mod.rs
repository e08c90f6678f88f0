// src/repositories/postgres/mod.rs

pub mod alert;
pub mod chat;
