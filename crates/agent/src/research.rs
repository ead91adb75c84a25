//! The research agent — search the web, then ask the local model.
//!
//! # Flow
//!
//! 1. Construction picks the model (first installed, or a validated choice)
//! 2. `research` runs one web search and folds the results into a prompt
//! 3. The prompt goes to the model runtime once; its output is the response
//!
//! `chat` skips steps 1–2 of a request and forwards the message verbatim.
//! Nothing is retried and nothing is cached between requests.

use std::sync::Arc;
use quickseek_config::AppConfig;
use quickseek_core::error::AgentError;
use quickseek_core::event::{AgentEvent, EventObserver};
use quickseek_core::model::ModelId;
use quickseek_core::runtime::ModelRuntime;
use quickseek_core::search::SearchProvider;
use tracing::{debug, info, warn};

use crate::prompt::{self, NO_RESULTS_PLACEHOLDER};
use crate::response::Response;

/// Tunables for prompt assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSettings {
    /// Results requested per search
    pub max_results: usize,
    /// Snippet length cap inside the prompt
    pub snippet_chars: usize,
    /// Language the model is told to answer in
    pub language: String,
}

impl AgentSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            max_results: config.search.max_results,
            snippet_chars: config.search.snippet_chars,
            language: config.agent.language.clone(),
        }
    }
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// Answers questions with a local model, grounded in web search results.
pub struct ResearchAgent {
    runtime: Arc<dyn ModelRuntime>,
    search: Arc<dyn SearchProvider>,
    /// Fixed for the lifetime of the agent.
    model: ModelId,
    settings: AgentSettings,
    observer: Option<EventObserver>,
}

impl ResearchAgent {
    /// Create an agent, selecting and validating the model.
    ///
    /// With `requested = None` the first model the runtime lists is used.
    /// Fails with [`AgentError::RuntimeUnavailable`] when the runtime cannot
    /// be executed, [`AgentError::NoModelAvailable`] when nothing can be
    /// selected, and [`AgentError::ModelNotFound`] when `requested` is not
    /// installed. Never generates.
    pub async fn new(
        runtime: Arc<dyn ModelRuntime>,
        search: Arc<dyn SearchProvider>,
        requested: Option<ModelId>,
        settings: AgentSettings,
    ) -> Result<Self, AgentError> {
        Self::with_observer(runtime, search, requested, settings, None).await
    }

    /// Like [`ResearchAgent::new`], reporting progress to `observer`.
    pub async fn with_observer(
        runtime: Arc<dyn ModelRuntime>,
        search: Arc<dyn SearchProvider>,
        requested: Option<ModelId>,
        settings: AgentSettings,
        observer: Option<EventObserver>,
    ) -> Result<Self, AgentError> {
        let installed = runtime
            .list_models()
            .await
            .map_err(AgentError::from_listing)?;

        let auto_detected = requested.is_none();
        let model = match requested {
            None => installed
                .first()
                .cloned()
                .ok_or_else(|| AgentError::NoModelAvailable {
                    reason: format!("'{}' lists no installed models", runtime.name()),
                })?,
            Some(model) => {
                if !installed.iter().any(|listed| model.matches(listed)) {
                    return Err(AgentError::ModelNotFound {
                        model: model.to_string(),
                        available: installed.iter().map(ToString::to_string).collect(),
                    });
                }
                model
            }
        };

        info!(model = %model, auto_detected, runtime = runtime.name(), "Model selected");

        let agent = Self {
            runtime,
            search,
            model,
            settings,
            observer,
        };
        agent.emit(AgentEvent::ModelSelected {
            model: agent.model.clone(),
            auto_detected,
        });
        Ok(agent)
    }

    /// The model every request is sent to.
    pub fn model(&self) -> &ModelId {
        &self.model
    }

    /// Answer `question` using one web search and one generation.
    ///
    /// Search failures degrade to a placeholder; generation failures become
    /// [`Response::Failed`]. Neither is returned as an error.
    pub async fn research(&self, question: &str) -> Response {
        let context = self.search_context(question).await;
        let prompt = prompt::research_prompt(question, &context, &self.settings.language);
        debug!(prompt_len = prompt.len(), "Research prompt assembled");
        self.generate(&prompt).await
    }

    /// Send `message` to the model as-is. No search is performed.
    pub async fn chat(&self, message: &str) -> Response {
        self.generate(message).await
    }

    /// Run the web search and render its results for the prompt.
    async fn search_context(&self, question: &str) -> String {
        self.emit(AgentEvent::SearchStarted {
            query: question.to_string(),
        });

        match self.search.search(question, self.settings.max_results).await {
            Ok(results) => {
                debug!(results = results.len(), provider = self.search.name(), "Search complete");
                self.emit(AgentEvent::SearchCompleted {
                    results: results.len(),
                });
                prompt::format_search_results(question, &results, self.settings.snippet_chars)
            }
            Err(e) => {
                warn!(error = %e, provider = self.search.name(), "Search failed, continuing without results");
                self.emit(AgentEvent::SearchFailed {
                    error: e.to_string(),
                });
                NO_RESULTS_PLACEHOLDER.to_string()
            }
        }
    }

    async fn generate(&self, prompt: &str) -> Response {
        self.emit(AgentEvent::GenerationStarted {
            model: self.model.clone(),
        });

        match self.runtime.generate(&self.model, prompt).await {
            Ok(text) => {
                debug!(model = %self.model, answer_len = text.len(), "Generation complete");
                Response::Generated(text)
            }
            Err(e) => {
                warn!(model = %self.model, error = %e, "Generation failed");
                self.emit(AgentEvent::GenerationFailed {
                    error: e.to_string(),
                });
                Response::Failed(e)
            }
        }
    }

    fn emit(&self, event: AgentEvent) {
        if let Some(observer) = &self.observer {
            observer(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{MockRuntime, MockSearch, recording_observer};
    use quickseek_core::error::{RuntimeError, SearchError};
    use quickseek_core::model::SearchResult;
    use std::time::Duration;

    fn agent_parts(
        runtime: MockRuntime,
        search: MockSearch,
    ) -> (Arc<MockRuntime>, Arc<MockSearch>) {
        (Arc::new(runtime), Arc::new(search))
    }

    #[tokio::test]
    async fn selects_first_listed_model() {
        let (runtime, search) = agent_parts(
            MockRuntime::with_models(&["modelA", "modelB"]),
            MockSearch::empty(),
        );
        let agent = ResearchAgent::new(runtime.clone(), search, None, AgentSettings::default())
            .await
            .unwrap();
        assert_eq!(agent.model(), &ModelId::from("modelA"));
        assert_eq!(runtime.list_calls(), 1);
        assert_eq!(runtime.generate_calls(), 0);
    }

    #[tokio::test]
    async fn empty_listing_is_no_model_available() {
        let (runtime, search) = agent_parts(MockRuntime::with_models(&[]), MockSearch::empty());
        let err = ResearchAgent::new(runtime, search, None, AgentSettings::default())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AgentError::NoModelAvailable { .. }));
    }

    #[tokio::test]
    async fn listing_failure_is_no_model_available() {
        let runtime = MockRuntime::listing_fails(RuntimeError::Timeout {
            operation: "ollama list".into(),
            timeout: Duration::from_secs(5),
        });
        let (runtime, search) = agent_parts(runtime, MockSearch::empty());
        let err = ResearchAgent::new(runtime, search, None, AgentSettings::default())
            .await
            .err()
            .unwrap();
        match err {
            AgentError::NoModelAvailable { reason } => assert!(reason.contains("timed out")),
            other => panic!("expected NoModelAvailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_runtime_is_runtime_unavailable() {
        let runtime = MockRuntime::listing_fails(RuntimeError::NotInstalled {
            program: "ollama".into(),
        });
        let (runtime, search) = agent_parts(runtime, MockSearch::empty());
        let err = ResearchAgent::new(
            runtime.clone(),
            search.clone(),
            Some(ModelId::from("modelA")),
            AgentSettings::default(),
        )
        .await
        .err()
        .unwrap();
        assert!(matches!(err, AgentError::RuntimeUnavailable { .. }));
        assert_eq!(runtime.generate_calls(), 0);
        assert_eq!(search.calls(), 0);
    }

    #[tokio::test]
    async fn unknown_explicit_model_is_rejected_without_generation() {
        let (runtime, search) = agent_parts(
            MockRuntime::with_models(&["modelA", "modelB"]),
            MockSearch::empty(),
        );
        let err = ResearchAgent::new(
            runtime.clone(),
            search,
            Some(ModelId::from("mistral")),
            AgentSettings::default(),
        )
        .await
        .err()
        .unwrap();
        assert_eq!(
            err,
            AgentError::ModelNotFound {
                model: "mistral".into(),
                available: vec!["modelA".into(), "modelB".into()],
            }
        );
        assert_eq!(runtime.generate_calls(), 0);
    }

    #[tokio::test]
    async fn explicit_model_keeps_requested_name() {
        let (runtime, search) = agent_parts(
            MockRuntime::with_models(&["gemma3:4b", "llama3.2:latest"]),
            MockSearch::empty(),
        );
        let agent = ResearchAgent::new(
            runtime,
            search,
            Some(ModelId::from("llama3.2")),
            AgentSettings::default(),
        )
        .await
        .unwrap();
        assert_eq!(agent.model(), &ModelId::from("llama3.2"));
    }

    #[tokio::test]
    async fn chat_never_searches() {
        let (runtime, search) = agent_parts(
            MockRuntime::with_models(&["modelA"]).replying("Hola"),
            MockSearch::returning(vec![SearchResult::new("T", "S", "U")]),
        );
        let agent = ResearchAgent::new(runtime.clone(), search.clone(), None, AgentSettings::default())
            .await
            .unwrap();

        let response = agent.chat("Di solo 'Hola'").await;
        assert_eq!(response, Response::Generated("Hola".into()));
        assert_eq!(search.calls(), 0);
        assert_eq!(runtime.prompts(), vec!["Di solo 'Hola'".to_string()]);
    }

    #[tokio::test]
    async fn research_searches_once_with_question_and_cap() {
        let (runtime, search) = agent_parts(
            MockRuntime::with_models(&["modelA"]),
            MockSearch::returning(vec![SearchResult::new("T", "S", "U")]),
        );
        let settings = AgentSettings {
            max_results: 5,
            ..AgentSettings::default()
        };
        let agent = ResearchAgent::new(runtime.clone(), search.clone(), None, settings)
            .await
            .unwrap();

        agent.research("what is X").await;
        assert_eq!(search.queries(), vec![("what is X".to_string(), 5)]);
        assert_eq!(runtime.generate_calls(), 1);
    }

    #[tokio::test]
    async fn research_prompt_contains_question_and_result() {
        let (runtime, search) = agent_parts(
            MockRuntime::with_models(&["modelA"]),
            MockSearch::returning(vec![SearchResult::new("T", "S", "U")]),
        );
        let agent = ResearchAgent::new(runtime.clone(), search, None, AgentSettings::default())
            .await
            .unwrap();

        agent.research("what is X").await;
        let prompt = runtime.prompts().remove(0);
        assert!(prompt.contains("what is X"));
        assert!(prompt.contains("T"));
        assert!(prompt.contains("U"));
        assert!(prompt.contains("Answer in Spanish"));
    }

    #[tokio::test]
    async fn search_failure_still_generates_with_placeholder() {
        let (runtime, search) = agent_parts(
            MockRuntime::with_models(&["modelA"]).echoing(),
            MockSearch::failing(SearchError::Timeout { timeout_secs: 60 }),
        );
        let agent = ResearchAgent::new(runtime.clone(), search.clone(), None, AgentSettings::default())
            .await
            .unwrap();

        let response = agent.research("what is X").await;
        let text = response.text();
        assert!(!text.is_empty());
        assert!(text.contains(NO_RESULTS_PLACEHOLDER));
        assert_eq!(search.calls(), 1);
        assert_eq!(runtime.generate_calls(), 1);
    }

    #[tokio::test]
    async fn generation_failure_becomes_response_text() {
        let runtime = MockRuntime::with_models(&["modelA"]).generation_fails(RuntimeError::Failed {
            operation: "ollama run".into(),
            reason: "model crashed".into(),
        });
        let (runtime, search) = agent_parts(runtime, MockSearch::empty());
        let agent = ResearchAgent::new(runtime, search, None, AgentSettings::default())
            .await
            .unwrap();

        let response = agent.research("what is X").await;
        assert!(response.is_failure());
        assert!(response.text().contains("model crashed"));

        let response = agent.chat("hi").await;
        assert!(response.text().starts_with("Error calling the model runtime:"));
    }

    #[tokio::test]
    async fn repeated_research_is_identical() {
        let (runtime, search) = agent_parts(
            MockRuntime::with_models(&["modelA"]).echoing(),
            MockSearch::returning(vec![SearchResult::new("T", "S", "U")]),
        );
        let agent = ResearchAgent::new(runtime, search.clone(), None, AgentSettings::default())
            .await
            .unwrap();

        let first = agent.research("what is X").await;
        let second = agent.research("what is X").await;
        assert_eq!(first, second);
        assert_eq!(search.calls(), 2);
    }

    #[tokio::test]
    async fn observer_receives_progress() {
        let (observer, events) = recording_observer();
        let (runtime, search) = agent_parts(
            MockRuntime::with_models(&["modelA"]),
            MockSearch::failing(SearchError::RateLimited),
        );
        let agent = ResearchAgent::with_observer(
            runtime,
            search,
            None,
            AgentSettings::default(),
            Some(observer),
        )
        .await
        .unwrap();
        agent.research("q").await;

        let events = events.lock().unwrap();
        assert_eq!(
            events[0],
            AgentEvent::ModelSelected {
                model: ModelId::from("modelA"),
                auto_detected: true,
            }
        );
        assert_eq!(events[1], AgentEvent::SearchStarted { query: "q".into() });
        assert!(matches!(events[2], AgentEvent::SearchFailed { .. }));
        assert!(matches!(events[3], AgentEvent::GenerationStarted { .. }));
        assert_eq!(events.len(), 4);
    }

    #[test]
    fn settings_follow_config() {
        let mut config = AppConfig::default();
        config.search.max_results = 7;
        config.agent.language = "English".into();
        let settings = AgentSettings::from_config(&config);
        assert_eq!(settings.max_results, 7);
        assert_eq!(settings.snippet_chars, 200);
        assert_eq!(settings.language, "English");
    }
}
