//! Retrieval pipeline
//!
//! Turns an uploaded document into searchable chunks (extract pages,
//! window, embed, upsert) and answers nearest-neighbor queries against
//! the stored collection.

pub mod chunker;
pub mod store;

pub use chunker::{chunk_pages, Chunk, ChunkConfig, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
pub use store::{ChunkPoint, MemoryVectorStore, QdrantStore, ScoredChunk, VectorStore};

use crate::error::{Result, SwitchboardError};
use crate::llm::LlmClient;
use std::path::Path;
use std::sync::Arc;

/// A chunk returned to the workflow from similarity search
pub type RetrievedChunk = ScoredChunk;

/// Default number of chunks retrieved per query
pub const DEFAULT_RETRIEVAL_K: usize = 4;

/// Document index over an embedding client and a vector store.
///
/// The collection is created lazily on first use and only ever appended
/// to; re-ingesting the same document adds duplicate chunks.
#[derive(Clone)]
pub struct DocumentIndex {
    llm: Arc<dyn LlmClient>,
    store: Arc<dyn VectorStore>,
    chunk_config: ChunkConfig,
}

impl DocumentIndex {
    pub fn new(llm: Arc<dyn LlmClient>, store: Arc<dyn VectorStore>) -> Self {
        Self {
            llm,
            store,
            chunk_config: ChunkConfig::default(),
        }
    }

    pub fn with_chunk_config(mut self, chunk_config: ChunkConfig) -> Self {
        self.chunk_config = chunk_config;
        self
    }

    /// Ingest a document: extract text per page, chunk, embed, upsert.
    ///
    /// Returns the number of chunks inserted. Insertion is best-effort,
    /// not transactional: a failure partway through leaves the chunks
    /// already upserted in place and propagates the error.
    pub async fn ingest(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let pages = extract_pages(path)?;
        let doc_label = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let chunks = chunk_pages(&pages, &doc_label, &self.chunk_config)?;
        if chunks.is_empty() {
            tracing::warn!(doc = %doc_label, "document produced no chunks");
            return Ok(0);
        }

        self.store
            .ensure_collection(self.llm.embedding_dimensions())
            .await?;

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = self.llm.embed_batch(&texts).await?;
        if vectors.len() != chunks.len() {
            return Err(SwitchboardError::Llm(format!(
                "embedding count mismatch: {} chunks, {} vectors",
                chunks.len(),
                vectors.len()
            )));
        }

        let count = chunks.len();
        let points = chunks
            .into_iter()
            .zip(vectors)
            .map(|(chunk, vector)| ChunkPoint {
                text: chunk.text,
                source_ref: chunk.source_ref,
                order: chunk.order,
                vector,
            })
            .collect();
        self.store.upsert(points).await?;

        tracing::info!(doc = %doc_label, count, "document ingested");
        Ok(count)
    }

    /// Retrieve up to `k` chunks nearest to the query, best first.
    ///
    /// An empty or unpopulated collection yields an empty vec.
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<RetrievedChunk>> {
        self.store
            .ensure_collection(self.llm.embedding_dimensions())
            .await?;
        let vector = self.llm.embed(query).await?;
        self.store.search(&vector, k).await
    }

    /// Number of stored points (diagnostics)
    pub async fn stored_chunks(&self) -> Result<usize> {
        self.store.count().await
    }
}

/// Extract a document's text as one string per page.
///
/// PDFs go through `pdf-extract`; any other readable file is treated as
/// plain text with form-feed page separators (the pdftotext convention).
fn extract_pages(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        return Err(SwitchboardError::DocumentNotFound(
            path.display().to_string(),
        ));
    }

    let is_pdf = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);

    if is_pdf {
        let pages = pdf_extract::extract_text_by_pages(path).map_err(|e| {
            SwitchboardError::DocumentNotFound(format!(
                "{} (failed to extract text: {})",
                path.display(),
                e
            ))
        })?;
        Ok(pages)
    } else {
        let text = std::fs::read_to_string(path)
            .map_err(|_| SwitchboardError::DocumentNotFound(path.display().to_string()))?;
        Ok(text.split('\u{0c}').map(|p| p.to_string()).collect())
    }
}
