// src/server/handlers/mod.rs

pub mod chat;
pub mod conversations;
pub mod health;
