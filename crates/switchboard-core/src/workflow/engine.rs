//! Intent-routed workflow engine
//!
//! A small state machine: classify the query, route on the resulting
//! intent, run the matching handler, terminate once `response` is set.
//! Nodes execute strictly sequentially; no node is retried. Upstream
//! service failures propagate uncaught out of `run` for the outermost
//! caller to absorb.

use super::state::{Intent, WorkflowState};
use crate::error::{Result, SwitchboardError};
use crate::index::DocumentIndex;
use crate::llm::LanguageService;
use crate::weather::WeatherProvider;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Fixed clarification message when no city can be extracted
pub const NO_CITY_MESSAGE: &str = "I could not identify the city for the weather request.";

/// Response prefix when the weather gateway reports a failure
pub const WEATHER_ERROR_PREFIX: &str = "Error fetching weather: ";

/// Workflow graph nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeId {
    Classify,
    HandleWeather,
    HandleDocument,
}

/// Conditional edge out of the classify node.
///
/// Pure and total over the closed intent set, so routing is
/// deterministic and independently testable.
pub fn route(intent: Intent) -> NodeId {
    match intent {
        Intent::Weather => NodeId::HandleWeather,
        Intent::Document => NodeId::HandleDocument,
    }
}

/// The workflow engine, built from dependency-injected service handles
pub struct WorkflowEngine {
    language: LanguageService,
    weather: Arc<dyn WeatherProvider>,
    index: DocumentIndex,
    retrieval_k: usize,
}

impl WorkflowEngine {
    pub fn new(
        language: LanguageService,
        weather: Arc<dyn WeatherProvider>,
        index: DocumentIndex,
        retrieval_k: usize,
    ) -> Self {
        Self {
            language,
            weather,
            index,
            retrieval_k,
        }
    }

    /// Execute the workflow for a query and return the terminal state.
    pub async fn run(&self, query: &str) -> Result<WorkflowState> {
        self.run_with_cancel(query, CancellationToken::new()).await
    }

    /// Execute the workflow, honoring a caller-supplied cancellation
    /// token. Cancellation surfaces as `SwitchboardError::Cancelled`.
    pub async fn run_with_cancel(
        &self,
        query: &str,
        cancel: CancellationToken,
    ) -> Result<WorkflowState> {
        let mut state = WorkflowState::new(query);
        let mut node = NodeId::Classify;

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(SwitchboardError::Cancelled),
                next = self.execute(node, &mut state) => next?,
            };

            match next {
                Some(n) => node = n,
                None => break,
            }
        }

        debug_assert!(state.response.is_some());
        Ok(state)
    }

    /// Run one node; returns the next node, or None at a terminal edge.
    async fn execute(&self, node: NodeId, state: &mut WorkflowState) -> Result<Option<NodeId>> {
        match node {
            NodeId::Classify => {
                let label = self.language.classify_intent(&state.query).await?;
                let intent = Intent::from_label(label.trim());
                tracing::info!(intent = intent.as_str(), "classified query");
                state.intent = Some(intent);
                Ok(Some(route(intent)))
            }
            NodeId::HandleWeather => {
                self.handle_weather(state).await?;
                Ok(None)
            }
            NodeId::HandleDocument => {
                self.handle_document(state).await?;
                Ok(None)
            }
        }
    }

    /// Weather branch: extract city, fetch, summarize.
    async fn handle_weather(&self, state: &mut WorkflowState) -> Result<()> {
        let city = self.language.extract_city(&state.query).await?;
        if city.is_empty() {
            state.response = Some(NO_CITY_MESSAGE.to_string());
            return Ok(());
        }

        let report = self.weather.fetch(&city).await;
        if let Some(ref error) = report.error {
            // Keep the report for diagnostics, skip the summarizer
            state.response = Some(format!("{}{}", WEATHER_ERROR_PREFIX, error));
            state.weather = Some(report);
            return Ok(());
        }

        let summary = self.language.summarize_weather(&state.query, &report).await?;
        state.weather = Some(report);
        state.response = Some(summary);
        Ok(())
    }

    /// Document branch: retrieve context, answer from it.
    async fn handle_document(&self, state: &mut WorkflowState) -> Result<()> {
        let chunks = self.index.retrieve(&state.query, self.retrieval_k).await?;
        let answer = self.language.answer_from_context(&state.query, &chunks).await?;
        state.retrieved = Some(chunks);
        state.response = Some(answer);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_is_total_over_intents() {
        assert_eq!(route(Intent::Weather), NodeId::HandleWeather);
        assert_eq!(route(Intent::Document), NodeId::HandleDocument);
    }
}
