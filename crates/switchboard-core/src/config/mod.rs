//! Configuration management

use crate::error::{Result, SwitchboardError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// LLM service configuration (chat + embeddings)
    #[serde(default)]
    pub llm_service: LlmServiceConfig,

    /// Weather provider configuration
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Document index configuration
    #[serde(default)]
    pub index: IndexConfig,
}

/// LLM service configuration for external inference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmServiceConfig {
    /// Base URL of the LLM service for chat/completions
    pub url: String,

    /// Model name for chat completions (classification, summarization, QA)
    #[serde(default = "default_chat_model")]
    pub model: String,

    /// Base URL for embeddings service (can be different from LLM URL)
    #[serde(default)]
    pub embedding_url: Option<String>,

    /// Model name for embeddings
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Embedding dimensions
    #[serde(default = "default_embedding_dimensions")]
    pub embedding_dimensions: usize,

    /// API key (optional, for authenticated services)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl LlmServiceConfig {
    /// Get the embeddings URL (falls back to main URL if not specified)
    pub fn embeddings_url(&self) -> &str {
        self.embedding_url.as_deref().unwrap_or(&self.url)
    }
}

impl Default for LlmServiceConfig {
    fn default() -> Self {
        Self {
            url: std::env::var("SWITCHBOARD_LLM_URL")
                .unwrap_or_else(|_| "https://api.openai.com".to_string()),
            model: default_chat_model(),
            embedding_url: std::env::var("SWITCHBOARD_EMBEDDING_URL").ok(),
            embedding_model: default_embedding_model(),
            embedding_dimensions: std::env::var("SWITCHBOARD_EMBEDDING_DIMS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_embedding_dimensions),
            api_key: std::env::var("SWITCHBOARD_LLM_API_KEY").ok(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_chat_model() -> String {
    std::env::var("SWITCHBOARD_LLM_MODEL").unwrap_or_else(|_| "gpt-4o".to_string())
}

fn default_embedding_model() -> String {
    std::env::var("SWITCHBOARD_EMBEDDING_MODEL")
        .unwrap_or_else(|_| "text-embedding-ada-002".to_string())
}

fn default_embedding_dimensions() -> usize {
    1536
}

fn default_timeout() -> u64 {
    30
}

/// Weather provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// API key for the weather provider; the gateway reports a data-level
    /// error when unset instead of failing the run
    #[serde(default)]
    pub api_key: Option<String>,

    /// Current-weather endpoint URL
    #[serde(default = "default_weather_url")]
    pub base_url: String,

    /// Measurement units passed to the provider
    #[serde(default = "default_units")]
    pub units: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("SWITCHBOARD_WEATHER_API_KEY").ok(),
            base_url: default_weather_url(),
            units: default_units(),
        }
    }
}

fn default_weather_url() -> String {
    std::env::var("SWITCHBOARD_WEATHER_URL")
        .unwrap_or_else(|_| "https://api.openweathermap.org/data/2.5/weather".to_string())
}

fn default_units() -> String {
    "metric".to_string()
}

/// Document index configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Vector engine base URL
    #[serde(default = "default_vector_url")]
    pub vector_url: String,

    /// Collection name in the vector engine
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Chunk target size in characters
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Chunk overlap in characters (must be strictly less than chunk_size)
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Number of chunks retrieved per query
    #[serde(default = "default_retrieval_k")]
    pub retrieval_k: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            vector_url: default_vector_url(),
            collection: default_collection(),
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            retrieval_k: default_retrieval_k(),
        }
    }
}

impl IndexConfig {
    /// Validate chunking parameters. Overlap must stay below the target
    /// size or the sliding window would never advance.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(SwitchboardError::Config(
                "chunk_size must be greater than zero".to_string(),
            ));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(SwitchboardError::Config(format!(
                "chunk_overlap ({}) must be strictly less than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        Ok(())
    }
}

fn default_vector_url() -> String {
    std::env::var("SWITCHBOARD_QDRANT_URL")
        .unwrap_or_else(|_| "http://localhost:6333".to_string())
}

fn default_collection() -> String {
    "switchboard_docs".to_string()
}

fn default_chunk_size() -> usize {
    1000
}

fn default_chunk_overlap() -> usize {
    200
}

fn default_retrieval_k() -> usize {
    4
}

impl Config {
    /// Load config from default path
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = serde_yaml::from_str(&content)?;
            config.index.validate()?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to default path
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CONFIG_DIR_NAME)
            .join("config.yml")
    }
}
