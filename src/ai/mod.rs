//! AI client module: provider abstraction and prompt templates.

mod client;
mod prompts;

pub use client::{AiClient, AiError, AiProvider, ClaudeProvider, GeminiProvider, Provider};
pub use prompts::{format_answer_prompt, system_instruction};
