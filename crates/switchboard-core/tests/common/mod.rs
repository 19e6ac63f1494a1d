//! Shared fakes for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use switchboard_core::{ChatMessage, LlmClient, Result, SwitchboardError, WeatherProvider, WeatherReport};

/// LLM fake: pops scripted chat replies in order; embeddings are
/// two-dimensional, keyed on whether the text contains a marker word.
pub struct ScriptedLlm {
    replies: Mutex<VecDeque<String>>,
    pub chat_calls: AtomicUsize,
    marker: String,
}

impl ScriptedLlm {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            chat_calls: AtomicUsize::new(0),
            marker: "zephyr".to_string(),
        }
    }

    pub fn chat_calls(&self) -> usize {
        self.chat_calls.load(Ordering::SeqCst)
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        if text.contains(&self.marker) {
            vec![1.0, 0.0]
        } else {
            vec![0.0, 1.0]
        }
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn chat_completion(&self, _messages: Vec<ChatMessage>) -> Result<String> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| SwitchboardError::Llm("no scripted reply left".to_string()))
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.embed_one(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }

    fn embedding_dimensions(&self) -> usize {
        2
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Weather fake returning a fixed report and counting calls
pub struct FixedWeather {
    report: WeatherReport,
    pub calls: AtomicUsize,
}

impl FixedWeather {
    pub fn succeeding(city: &str, payload: serde_json::Value) -> Self {
        Self {
            report: WeatherReport {
                city: city.to_string(),
                payload,
                error: None,
                status_code: Some(200),
            },
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(city: &str, error: &str) -> Self {
        Self {
            report: WeatherReport {
                city: city.to_string(),
                payload: serde_json::Value::Null,
                error: Some(error.to_string()),
                status_code: Some(502),
            },
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherProvider for FixedWeather {
    async fn fetch(&self, _city: &str) -> WeatherReport {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.report.clone()
    }
}
