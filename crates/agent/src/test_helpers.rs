//! Shared test doubles for agent tests.

use quickseek_core::error::{RuntimeError, SearchError};
use quickseek_core::event::{AgentEvent, EventObserver};
use quickseek_core::model::{ModelId, SearchResult};
use quickseek_core::runtime::ModelRuntime;
use quickseek_core::search::SearchProvider;
use std::sync::{Arc, Mutex};

enum Reply {
    Fixed(String),
    Echo,
    Fail(RuntimeError),
}

/// A scripted model runtime that records every call.
pub struct MockRuntime {
    listing: Result<Vec<ModelId>, RuntimeError>,
    reply: Reply,
    list_calls: Mutex<usize>,
    prompts: Mutex<Vec<String>>,
}

impl MockRuntime {
    pub fn with_models(models: &[&str]) -> Self {
        Self {
            listing: Ok(models.iter().copied().map(ModelId::from).collect()),
            reply: Reply::Fixed("mock answer".into()),
            list_calls: Mutex::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn listing_fails(err: RuntimeError) -> Self {
        Self {
            listing: Err(err),
            ..Self::with_models(&[])
        }
    }

    /// Answer every prompt with `text`.
    pub fn replying(mut self, text: &str) -> Self {
        self.reply = Reply::Fixed(text.into());
        self
    }

    /// Answer every prompt with the prompt itself.
    pub fn echoing(mut self) -> Self {
        self.reply = Reply::Echo;
        self
    }

    pub fn generation_fails(mut self, err: RuntimeError) -> Self {
        self.reply = Reply::Fail(err);
        self
    }

    pub fn list_calls(&self) -> usize {
        *self.list_calls.lock().unwrap()
    }

    pub fn generate_calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ModelRuntime for MockRuntime {
    fn name(&self) -> &str {
        "mock_runtime"
    }

    async fn list_models(&self) -> Result<Vec<ModelId>, RuntimeError> {
        *self.list_calls.lock().unwrap() += 1;
        self.listing.clone()
    }

    async fn generate(&self, _model: &ModelId, prompt: &str) -> Result<String, RuntimeError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Reply::Fixed(text) => Ok(text.clone()),
            Reply::Echo => Ok(prompt.to_string()),
            Reply::Fail(err) => Err(err.clone()),
        }
    }
}

/// A scripted search provider that records every query.
pub struct MockSearch {
    outcome: Result<Vec<SearchResult>, SearchError>,
    queries: Mutex<Vec<(String, usize)>>,
}

impl MockSearch {
    pub fn returning(results: Vec<SearchResult>) -> Self {
        Self {
            outcome: Ok(results),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::returning(Vec::new())
    }

    pub fn failing(err: SearchError) -> Self {
        Self {
            outcome: Err(err),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub fn queries(&self) -> Vec<(String, usize)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SearchProvider for MockSearch {
    fn name(&self) -> &str {
        "mock_search"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
        self.queries.lock().unwrap().push((query.to_string(), limit));
        self.outcome.clone()
    }
}

/// An observer that stores every event it sees.
pub fn recording_observer() -> (EventObserver, Arc<Mutex<Vec<AgentEvent>>>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let observer: EventObserver = Arc::new(move |event: &AgentEvent| {
        sink.lock().unwrap().push(event.clone());
    });
    (observer, events)
}
