// src/lib.rs

pub mod api;
pub mod app;
pub mod chat_message;
pub mod chat_view;
pub mod config;
pub mod errors;
pub mod key_handlers;
pub mod logging;
pub mod status_indicator;
