//! LLM integration
//!
//! Provides the client trait for external text-generation/embedding
//! services and the prompt-bound language operations built on top of it:
//! - Intent classification
//! - City-name extraction
//! - Weather summarization
//! - Context-grounded answering

mod client;
mod service;

pub use client::{ChatMessage, LlmClient, OpenAiClient};
pub use service::{LanguageService, REFUSAL_PHRASE};
