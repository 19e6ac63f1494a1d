//! Document chunking for embedding
//!
//! Splits a document's extracted pages into fixed-size overlapping
//! windows. The window is exact: every chunk holds at most `target_size`
//! characters and consecutive chunks share exactly `overlap` characters,
//! so no context is lost at split points.

use crate::error::{Result, SwitchboardError};

/// Default chunk target size in characters
pub const DEFAULT_CHUNK_SIZE: usize = 1000;
/// Default chunk overlap in characters
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// Chunking configuration
#[derive(Debug, Clone, Copy)]
pub struct ChunkConfig {
    pub target_size: usize,
    pub overlap: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            target_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

impl ChunkConfig {
    /// Reject configurations where the window would never advance
    pub fn validate(&self) -> Result<()> {
        if self.target_size == 0 {
            return Err(SwitchboardError::Config(
                "chunk target_size must be greater than zero".to_string(),
            ));
        }
        if self.overlap >= self.target_size {
            return Err(SwitchboardError::Config(format!(
                "chunk overlap ({}) must be strictly less than target_size ({})",
                self.overlap, self.target_size
            )));
        }
        Ok(())
    }
}

/// A bounded span of extracted text, the unit of embedding and retrieval.
///
/// Immutable once created; ownership moves to the document index on
/// insertion.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub text: String,
    pub source_ref: String,
    pub order: usize,
}

/// Split extracted pages into overlapping chunks.
///
/// Pages are concatenated before windowing; each chunk's `source_ref`
/// names the page containing its first character, as `<doc>#page=N`
/// (1-based).
pub fn chunk_pages(pages: &[String], doc_label: &str, config: &ChunkConfig) -> Result<Vec<Chunk>> {
    config.validate()?;

    let chars: Vec<char> = pages.iter().flat_map(|p| p.chars()).collect();
    if chars.is_empty() {
        return Ok(Vec::new());
    }

    // Cumulative char offsets of page starts, for source_ref lookup
    let mut page_starts = Vec::with_capacity(pages.len());
    let mut offset = 0usize;
    for page in pages {
        page_starts.push(offset);
        offset += page.chars().count();
    }

    let step = config.target_size - config.overlap;
    let total = chars.len();
    let mut chunks = Vec::new();
    let mut start = 0usize;

    loop {
        let end = (start + config.target_size).min(total);
        let page = page_for_offset(&page_starts, start);

        chunks.push(Chunk {
            text: chars[start..end].iter().collect(),
            source_ref: format!("{}#page={}", doc_label, page),
            order: chunks.len(),
        });

        if end >= total {
            break;
        }
        start += step;
    }

    tracing::debug!(doc = doc_label, count = chunks.len(), "chunked document");
    Ok(chunks)
}

/// 1-based page number for a char offset into the concatenated text
fn page_for_offset(page_starts: &[usize], offset: usize) -> usize {
    match page_starts.binary_search(&offset) {
        Ok(idx) => idx + 1,
        Err(idx) => idx.max(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn single_page(text: &str) -> Vec<String> {
        vec![text.to_string()]
    }

    #[test]
    fn test_small_content_single_chunk() {
        let chunks = chunk_pages(
            &single_page("Small content."),
            "doc",
            &ChunkConfig::default(),
        )
        .unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "Small content.");
        assert_eq!(chunks[0].order, 0);
        assert_eq!(chunks[0].source_ref, "doc#page=1");
    }

    #[test]
    fn test_empty_document_yields_no_chunks() {
        let chunks = chunk_pages(&single_page(""), "doc", &ChunkConfig::default()).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_consecutive_chunks_share_exact_overlap() {
        let text: String = ('a'..='z').cycle().take(250).collect();
        let config = ChunkConfig {
            target_size: 100,
            overlap: 20,
        };
        let chunks = chunk_pages(&single_page(&text), "doc", &config).unwrap();

        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            let prev: Vec<char> = pair[0].text.chars().collect();
            let next: Vec<char> = pair[1].text.chars().collect();
            assert_eq!(&prev[prev.len() - 20..], &next[..20]);
        }
    }

    #[test]
    fn test_overlap_at_least_size_fails_fast() {
        let config = ChunkConfig {
            target_size: 100,
            overlap: 100,
        };
        let result = chunk_pages(&single_page("text"), "doc", &config);
        assert!(matches!(result, Err(SwitchboardError::Config(_))));
    }

    #[test]
    fn test_handles_unicode() {
        let text = "Hello 世界! This is a test with emoji 🎉 and box chars ─ mixed in. ".repeat(5);
        let config = ChunkConfig {
            target_size: 40,
            overlap: 10,
        };
        let chunks = chunk_pages(&single_page(&text), "doc", &config).unwrap();
        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 40);
        }
    }

    #[test]
    fn test_source_ref_tracks_pages() {
        // Three 1800-char pages, 5400 chars total
        let pages: Vec<String> = ["alpha", "bravo", "delta"]
            .iter()
            .map(|w| w.chars().cycle().take(1800).collect())
            .collect();
        let chunks = chunk_pages(&pages, "report.pdf", &ChunkConfig::default()).unwrap();

        // ceil((5400 - 200) / 800) = 7
        assert_eq!(chunks.len(), 7);
        assert_eq!(chunks[0].source_ref, "report.pdf#page=1");
        assert_eq!(chunks.last().unwrap().source_ref, "report.pdf#page=3");
        assert!(chunks.iter().any(|c| c.source_ref == "report.pdf#page=2"));
    }

    proptest! {
        #[test]
        fn prop_window_invariants(
            len in 1usize..4000,
            target in 2usize..400,
            overlap_frac in 0usize..100,
        ) {
            let overlap = overlap_frac * (target - 1) / 100;
            prop_assume!(overlap < target);

            let text: String = ('a'..='z').cycle().take(len).collect();
            let config = ChunkConfig { target_size: target, overlap };
            let chunks = chunk_pages(&[text], "doc", &config).unwrap();

            let step = target - overlap;
            let expected = if len <= target {
                1
            } else {
                // ceil((len - overlap) / (target - overlap))
                (len - overlap).div_ceil(step)
            };
            prop_assert_eq!(chunks.len(), expected);

            for (i, chunk) in chunks.iter().enumerate() {
                prop_assert!(chunk.text.chars().count() <= target);
                prop_assert_eq!(chunk.order, i);
            }

            for pair in chunks.windows(2) {
                let prev: Vec<char> = pair[0].text.chars().collect();
                let next: Vec<char> = pair[1].text.chars().collect();
                prop_assert_eq!(&prev[prev.len() - overlap..], &next[..overlap]);
            }
        }
    }
}
