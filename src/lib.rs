// src/lib.rs

pub mod auth;
pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod persona;
pub mod profile;
pub mod server;
pub mod store;
