// File: alerta-core/src/utils/mod.rs
pub mod time;
