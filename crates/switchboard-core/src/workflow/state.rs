//! Per-run workflow state

use crate::index::RetrievedChunk;
use crate::weather::WeatherReport;
use serde::{Deserialize, Serialize};

/// Coarse category assigned to a user query, determining which branch
/// of the workflow executes. Closed set; routing is a total function
/// over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Weather,
    Document,
}

impl Intent {
    /// Normalize a raw classifier label.
    ///
    /// Any label containing "weather" (ASCII case-insensitive) maps to
    /// `Weather`; everything else defaults to `Document`. Normalization
    /// never fails, so classification cannot fail the run.
    pub fn from_label(label: &str) -> Self {
        if label.to_ascii_lowercase().contains("weather") {
            Intent::Weather
        } else {
            Intent::Document
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Weather => "weather",
            Intent::Document => "document",
        }
    }
}

/// Shared state threaded through workflow nodes.
///
/// Created fresh per query, mutated by each node, discarded after the
/// terminal response is read. Exactly one of `weather`/`retrieved` is
/// set per run, chosen by `intent`; `response` is always set at
/// termination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowState {
    pub query: String,
    pub intent: Option<Intent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retrieved: Option<Vec<RetrievedChunk>>,
    pub response: Option<String>,
}

impl WorkflowState {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            intent: None,
            weather: None,
            retrieved: None,
            response: None,
        }
    }

    /// Final response text, with a fallback if a run somehow terminated
    /// without writing one
    pub fn response(&self) -> &str {
        self.response.as_deref().unwrap_or("No response generated.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_normalization_table() {
        let cases = [
            ("weather", Intent::Weather),
            ("Weather", Intent::Weather),
            ("WEATHER.", Intent::Weather),
            ("it is a weather question", Intent::Weather),
            ("document", Intent::Document),
            ("unknown", Intent::Document),
            ("", Intent::Document),
            ("whether", Intent::Document),
        ];
        for (label, expected) in cases {
            assert_eq!(Intent::from_label(label), expected, "label: {:?}", label);
        }
    }

    #[test]
    fn test_fresh_state_has_only_query() {
        let state = WorkflowState::new("hello");
        assert_eq!(state.query, "hello");
        assert!(state.intent.is_none());
        assert!(state.weather.is_none());
        assert!(state.retrieved.is_none());
        assert_eq!(state.response(), "No response generated.");
    }
}
