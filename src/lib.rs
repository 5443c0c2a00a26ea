//! Presales Assistant - chatbot endpoint backed by a hosted generative-language API.

pub mod ai;
pub mod config;
pub mod knowledge;
pub mod server;
