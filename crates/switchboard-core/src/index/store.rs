//! Vector store backends
//!
//! The document index talks to the vector-similarity engine through the
//! `VectorStore` trait: ensure-collection, upsert, search. `QdrantStore`
//! is the deployment backend (REST); `MemoryVectorStore` keeps points in
//! process for tests and offline runs.

use crate::error::{Result, SwitchboardError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Mutex;
use std::time::Duration;

/// A chunk with its embedding, ready for insertion
#[derive(Debug, Clone)]
pub struct ChunkPoint {
    pub text: String,
    pub source_ref: String,
    pub order: usize,
    pub vector: Vec<f32>,
}

/// A chunk returned from similarity search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub text: String,
    pub source_ref: String,
    pub score: f32,
}

/// Narrow interface over the external vector-similarity engine
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Create the collection if it does not exist yet (cosine metric,
    /// fixed dimensionality). Idempotent.
    async fn ensure_collection(&self, dimensions: usize) -> Result<()>;

    /// Insert points into the collection. Repeated inserts of the same
    /// content add duplicates; the store never deduplicates.
    async fn upsert(&self, points: Vec<ChunkPoint>) -> Result<()>;

    /// Nearest-neighbor search, descending similarity, up to `limit`
    /// results. An empty collection yields an empty vec, not an error.
    async fn search(&self, vector: &[f32], limit: usize) -> Result<Vec<ScoredChunk>>;

    /// Number of stored points (diagnostics)
    async fn count(&self) -> Result<usize>;
}

/// Qdrant REST backend
pub struct QdrantStore {
    http_client: reqwest::Client,
    base_url: String,
    collection: String,
}

impl QdrantStore {
    pub fn new(base_url: impl Into<String>, collection: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(SwitchboardError::Http)?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
            collection: collection.into(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/collections/{}", self.base_url, self.collection)
    }

    async fn check_response(response: reqwest::Response, action: &str) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(SwitchboardError::VectorStore(format!(
            "{} failed (HTTP {}): {}",
            action, status, body
        )))
    }
}

#[async_trait]
impl VectorStore for QdrantStore {
    async fn ensure_collection(&self, dimensions: usize) -> Result<()> {
        let response = self.http_client.get(self.collection_url()).send().await?;
        if response.status().is_success() {
            return Ok(());
        }

        tracing::info!(collection = %self.collection, dimensions, "creating collection");
        let body = json!({
            "vectors": { "size": dimensions, "distance": "Cosine" }
        });
        let response = self
            .http_client
            .put(self.collection_url())
            .json(&body)
            .send()
            .await?;
        Self::check_response(response, "create collection").await?;
        Ok(())
    }

    async fn upsert(&self, points: Vec<ChunkPoint>) -> Result<()> {
        if points.is_empty() {
            return Ok(());
        }

        let points_json: Vec<_> = points
            .into_iter()
            .map(|p| {
                json!({
                    "id": uuid::Uuid::new_v4().to_string(),
                    "vector": p.vector,
                    "payload": {
                        "text": p.text,
                        "source_ref": p.source_ref,
                        "order": p.order,
                    }
                })
            })
            .collect();

        let url = format!("{}/points?wait=true", self.collection_url());
        let response = self
            .http_client
            .put(&url)
            .json(&json!({ "points": points_json }))
            .send()
            .await?;
        Self::check_response(response, "upsert points").await?;
        Ok(())
    }

    async fn search(&self, vector: &[f32], limit: usize) -> Result<Vec<ScoredChunk>> {
        #[derive(Deserialize)]
        struct SearchResponse {
            result: Vec<SearchHit>,
        }

        #[derive(Deserialize)]
        struct SearchHit {
            score: f32,
            payload: HitPayload,
        }

        #[derive(Deserialize)]
        struct HitPayload {
            text: String,
            source_ref: String,
        }

        let url = format!("{}/points/search", self.collection_url());
        let body = json!({
            "vector": vector,
            "limit": limit,
            "with_payload": true,
        });
        let response = self.http_client.post(&url).json(&body).send().await?;
        let response = Self::check_response(response, "search points").await?;

        let search_response: SearchResponse = response
            .json()
            .await
            .map_err(SwitchboardError::Http)?;

        Ok(search_response
            .result
            .into_iter()
            .map(|hit| ScoredChunk {
                text: hit.payload.text,
                source_ref: hit.payload.source_ref,
                score: hit.score,
            })
            .collect())
    }

    async fn count(&self) -> Result<usize> {
        #[derive(Deserialize)]
        struct CountResponse {
            result: CountResult,
        }

        #[derive(Deserialize)]
        struct CountResult {
            count: usize,
        }

        let url = format!("{}/points/count", self.collection_url());
        let response = self
            .http_client
            .post(&url)
            .json(&json!({ "exact": true }))
            .send()
            .await?;
        let response = Self::check_response(response, "count points").await?;
        let count_response: CountResponse = response.json().await.map_err(SwitchboardError::Http)?;
        Ok(count_response.result.count)
    }
}

/// In-process cosine store
///
/// Readers and writers interleave with eventual visibility, matching the
/// engine-level contract; no snapshot isolation.
#[derive(Default)]
pub struct MemoryVectorStore {
    points: Mutex<Vec<ChunkPoint>>,
}

impl MemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn ensure_collection(&self, _dimensions: usize) -> Result<()> {
        Ok(())
    }

    async fn upsert(&self, points: Vec<ChunkPoint>) -> Result<()> {
        let mut stored = self
            .points
            .lock()
            .map_err(|_| SwitchboardError::VectorStore("store lock poisoned".to_string()))?;
        stored.extend(points);
        Ok(())
    }

    async fn search(&self, vector: &[f32], limit: usize) -> Result<Vec<ScoredChunk>> {
        let stored = self
            .points
            .lock()
            .map_err(|_| SwitchboardError::VectorStore("store lock poisoned".to_string()))?;

        let mut scored: Vec<ScoredChunk> = stored
            .iter()
            .map(|p| ScoredChunk {
                text: p.text.clone(),
                source_ref: p.source_ref.clone(),
                score: cosine_similarity(&p.vector, vector),
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);
        Ok(scored)
    }

    async fn count(&self) -> Result<usize> {
        let stored = self
            .points
            .lock()
            .map_err(|_| SwitchboardError::VectorStore("store lock poisoned".to_string()))?;
        Ok(stored.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(text: &str, vector: Vec<f32>) -> ChunkPoint {
        ChunkPoint {
            text: text.to_string(),
            source_ref: "doc#page=1".to_string(),
            order: 0,
            vector,
        }
    }

    #[tokio::test]
    async fn test_memory_store_ranks_by_similarity() {
        let store = MemoryVectorStore::new();
        store
            .upsert(vec![
                point("north", vec![1.0, 0.0]),
                point("east", vec![0.0, 1.0]),
                point("northeast", vec![0.7, 0.7]),
            ])
            .await
            .unwrap();

        let results = store.search(&[1.0, 0.0], 2).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].text, "north");
        assert_eq!(results[1].text, "northeast");
        assert!(results[0].score > results[1].score);
    }

    #[tokio::test]
    async fn test_memory_store_empty_search_returns_empty() {
        let store = MemoryVectorStore::new();
        let results = store.search(&[1.0, 0.0], 4).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_memory_store_keeps_duplicates() {
        let store = MemoryVectorStore::new();
        let points = vec![point("same", vec![1.0, 0.0])];
        store.upsert(points.clone()).await.unwrap();
        store.upsert(points).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[test]
    fn test_cosine_similarity_zero_vector() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }
}
