//! Switchboard Core Library
//!
//! Intent-routed query workflow with document retrieval.
//!
//! # Features
//! - Workflow engine that classifies a query and routes it to the
//!   weather or document handler
//! - Retrieval pipeline: page extraction, overlapping chunking,
//!   embedding, vector similarity search
//! - Prompt-bound language operations against an OpenAI-compatible
//!   service
//! - Weather provider gateway with data-level failure reporting

pub mod config;
pub mod error;
pub mod index;
pub mod llm;
pub mod session;
pub mod weather;
pub mod workflow;

pub use config::{Config, IndexConfig, LlmServiceConfig, WeatherConfig};
pub use error::{Error, Result, SwitchboardError};
pub use index::{
    chunk_pages, Chunk, ChunkConfig, ChunkPoint, DocumentIndex, MemoryVectorStore, QdrantStore,
    RetrievedChunk, ScoredChunk, VectorStore, DEFAULT_RETRIEVAL_K,
};
pub use llm::{ChatMessage, LanguageService, LlmClient, OpenAiClient, REFUSAL_PHRASE};
pub use session::Session;
pub use weather::{WeatherGateway, WeatherProvider, WeatherReport};
pub use workflow::{
    route, Intent, NodeId, WorkflowEngine, WorkflowState, NO_CITY_MESSAGE, WEATHER_ERROR_PREFIX,
};

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "switchboard";
