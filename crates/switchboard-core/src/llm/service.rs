//! Prompt-bound language operations
//!
//! Each operation is a single round trip to the text-generation engine
//! with a fixed system instruction and one user-supplied substitution.

use super::{ChatMessage, LlmClient};
use crate::error::Result;
use crate::index::RetrievedChunk;
use crate::weather::WeatherReport;
use std::sync::Arc;

/// Fixed refusal phrase for the context-grounded answering operation.
///
/// Preferring a stated refusal over fabrication is the system's only
/// grounding safeguard; the phrase is part of the public contract.
pub const REFUSAL_PHRASE: &str =
    "I don't have enough information in the uploaded document to answer that.";

const CLASSIFY_INSTRUCTION: &str = "\
You are a helpful assistant. Classify the user query into one of two categories: 'weather' or 'document'.
- 'weather': Questions about current weather, temperature, forecast, etc. for a specific location.
- 'document': General questions, requests for information, summarization, or questions that might need external knowledge from an uploaded document.

Return ONLY one word: 'weather' or 'document'.";

const EXTRACT_CITY_INSTRUCTION: &str = "\
You are an entity extractor. Extract the city name from the user's query.
Return ONLY the city name. If no city is found, return nothing.
Example: \"What's the weather in London?\" -> London
Example: \"Forecast for Paris, France\" -> Paris";

const SUMMARIZE_WEATHER_INSTRUCTION: &str = "\
You are a weather assistant. Given the user query and the raw weather JSON data, provide a natural language summary of the weather.
Be concise and helpful.";

/// Language service over an injected LLM client.
///
/// Stateless between calls; no retries, no streaming.
#[derive(Clone)]
pub struct LanguageService {
    client: Arc<dyn LlmClient>,
}

impl LanguageService {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    /// Decide whether the query is about 'weather' or 'document'.
    ///
    /// Returns the raw label; the workflow engine normalizes it to a
    /// closed intent set.
    pub async fn classify_intent(&self, query: &str) -> Result<String> {
        let messages = vec![
            ChatMessage::system(CLASSIFY_INSTRUCTION),
            ChatMessage::user(query),
        ];
        self.client.chat_completion(messages).await
    }

    /// Extract the city name from a weather-related query.
    ///
    /// Returns an empty string when no city is found.
    pub async fn extract_city(&self, query: &str) -> Result<String> {
        let messages = vec![
            ChatMessage::system(EXTRACT_CITY_INSTRUCTION),
            ChatMessage::user(query),
        ];
        let city = self.client.chat_completion(messages).await?;
        Ok(city.trim().to_string())
    }

    /// Summarize weather data in response to a user query.
    pub async fn summarize_weather(&self, query: &str, report: &WeatherReport) -> Result<String> {
        let messages = vec![
            ChatMessage::system(SUMMARIZE_WEATHER_INSTRUCTION),
            ChatMessage::user(format!("Query: {}\nData: {}", query, report.payload)),
        ];
        self.client.chat_completion(messages).await
    }

    /// Answer a query grounded in retrieved document chunks.
    ///
    /// An empty chunk list short-circuits to the refusal phrase without a
    /// model round trip; with context, the instruction still binds the
    /// model to the same refusal when the answer is not present.
    pub async fn answer_from_context(
        &self,
        query: &str,
        chunks: &[RetrievedChunk],
    ) -> Result<String> {
        if chunks.is_empty() {
            tracing::debug!("no retrieved context, returning refusal");
            return Ok(REFUSAL_PHRASE.to_string());
        }

        let context_text = chunks
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let instruction = format!(
            "You are a helpful assistant analyzing an uploaded document.\n\
             Use the following pieces of retrieved context to answer the user's question.\n\n\
             If the user asks for a summary or general information about the document, \
             use the provided chunks to give a high-level overview.\n\
             If the answer is not in the context, say \"{}\"\n\n\
             Context:\n{}",
            REFUSAL_PHRASE, context_text
        );

        let messages = vec![ChatMessage::system(instruction), ChatMessage::user(query)];
        self.client.chat_completion(messages).await
    }
}
