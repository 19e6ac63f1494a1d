//! Session façade
//!
//! Entry point for callers: accepts a raw query or a document path,
//! drives the workflow engine or the document index, and returns the
//! final response together with the full trace state.

use crate::config::Config;
use crate::error::{Result, SwitchboardError};
use crate::index::{ChunkConfig, DocumentIndex, QdrantStore, VectorStore};
use crate::llm::{LanguageService, LlmClient, OpenAiClient};
use crate::weather::{WeatherGateway, WeatherProvider};
use crate::workflow::{WorkflowEngine, WorkflowState};
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub struct Session {
    engine: WorkflowEngine,
    index: DocumentIndex,
}

impl Session {
    /// Build a session from configuration, constructing the shared
    /// service handles (LLM client, vector store) once.
    pub fn new(config: &Config) -> Result<Self> {
        config.index.validate()?;

        let llm: Arc<dyn LlmClient> = Arc::new(OpenAiClient::new(config.llm_service.clone())?);
        let store: Arc<dyn VectorStore> = Arc::new(QdrantStore::new(
            config.index.vector_url.clone(),
            config.index.collection.clone(),
        )?);

        Ok(Self::with_parts(
            llm,
            store,
            Arc::new(WeatherGateway::new(config.weather.clone())),
            ChunkConfig {
                target_size: config.index.chunk_size,
                overlap: config.index.chunk_overlap,
            },
            config.index.retrieval_k,
        ))
    }

    /// Build a session from explicit parts. Tests substitute fakes here
    /// instead of patching process-wide state.
    pub fn with_parts(
        llm: Arc<dyn LlmClient>,
        store: Arc<dyn VectorStore>,
        weather: Arc<dyn WeatherProvider>,
        chunk_config: ChunkConfig,
        retrieval_k: usize,
    ) -> Self {
        let index = DocumentIndex::new(llm.clone(), store).with_chunk_config(chunk_config);
        let engine = WorkflowEngine::new(
            LanguageService::new(llm),
            weather,
            index.clone(),
            retrieval_k,
        );
        Self { engine, index }
    }

    /// Process a user query through the workflow.
    ///
    /// Returns the response text and the full terminal state. Upstream
    /// service failures propagate; the outermost caller must present a
    /// generic failure message instead of crashing.
    pub async fn handle_query(&self, query: &str) -> Result<(String, WorkflowState)> {
        let state = self.engine.run(query).await?;
        Ok((state.response().to_string(), state))
    }

    /// Same as `handle_query`, cancellable via the supplied token.
    pub async fn handle_query_with_cancel(
        &self,
        query: &str,
        cancel: CancellationToken,
    ) -> Result<(String, WorkflowState)> {
        let state = self.engine.run_with_cancel(query, cancel).await?;
        Ok((state.response().to_string(), state))
    }

    /// Ingest a document into the index.
    ///
    /// A missing file comes back as a descriptive status string, not an
    /// error, so the caller's happy path stays uniform; other failures
    /// propagate.
    pub async fn upload_document(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        match self.index.ingest(path).await {
            Ok(count) => Ok(format!(
                "Successfully processed {} chunks from {}.",
                count,
                path.display()
            )),
            Err(SwitchboardError::DocumentNotFound(_)) => {
                Ok(format!("Error: file {} not found.", path.display()))
            }
            Err(e) => Err(e),
        }
    }

    /// Number of chunks currently stored in the collection (diagnostics)
    pub async fn stored_chunks(&self) -> Result<usize> {
        self.index.stored_chunks().await
    }
}
