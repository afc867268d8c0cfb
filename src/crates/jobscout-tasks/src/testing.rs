//! Test support: a scripted completion model.
//!
//! Used by this crate's unit and integration tests; exposed publicly so
//! downstream consumers can drive the orchestrators without a network.

use crate::error::TaskError;
use crate::scrape::PageFetcher;
use async_trait::async_trait;
use jobscout_llm::{CompletionModel, CompletionRequest, LlmError};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A completion model that replays scripted responses.
///
/// Scripted results are served in order. Once the script runs out, the
/// last text response repeats indefinitely (errors are served once).
pub struct StubModel {
    responses: Mutex<VecDeque<Result<String, LlmError>>>,
    last_text: Mutex<Option<String>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl StubModel {
    /// A stub that returns the same text on every call.
    pub fn returning(text: impl Into<String>) -> Self {
        Self::scripted(vec![Ok(text.into())])
    }

    /// A stub that replays the given results in order.
    pub fn scripted(responses: Vec<Result<String, LlmError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            last_text: Mutex::new(None),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A stub that fails its first call.
    pub fn failing(error: LlmError) -> Self {
        Self::scripted(vec![Err(error)])
    }

    /// How many times `complete` was invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The requests seen so far, in order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionModel for StubModel {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(text)) => {
                *self.last_text.lock().unwrap() = Some(text.clone());
                Ok(text)
            }
            Some(Err(e)) => Err(e),
            None => Ok(self.last_text.lock().unwrap().clone().unwrap_or_default()),
        }
    }
}

/// A page fetcher that serves canned text instead of hitting the proxy.
pub struct StubFetcher {
    page: Result<String, String>,
    calls: AtomicUsize,
}

impl StubFetcher {
    /// A fetcher that returns the same page text for every URL.
    pub fn returning(text: impl Into<String>) -> Self {
        Self {
            page: Ok(text.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// A fetcher whose every fetch fails with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            page: Err(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times `fetch_text` was invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch_text(&self, _url: &str) -> Result<String, TaskError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.page {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(TaskError::ScrapeFailed(message.clone())),
        }
    }
}
