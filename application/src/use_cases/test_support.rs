//! In-memory doubles shared by use case tests.

use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::inference::{GatewayError, InferenceGateway};
use crate::ports::learner_store::{LearnerStore, StoreError};
use crate::ports::project_inspector::{InspectorError, ProjectInspector};
use async_trait::async_trait;
use buildpath_domain::{InferenceRequest, LearnerState};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Replies to each agent from a per-agent script, recording every request.
#[derive(Default)]
pub(crate) struct ScriptedGateway {
    scripts: Mutex<HashMap<String, VecDeque<Result<String, String>>>>,
    requests: Mutex<Vec<InferenceRequest>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for the agent named `agent` ("teacher", "reviewer_coach", ...)
    pub fn reply(self, agent: &str, text: &str) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(agent.to_string())
            .or_default()
            .push_back(Ok(text.to_string()));
        self
    }

    /// Queue a transport failure for `agent`
    pub fn fail(self, agent: &str, message: &str) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(agent.to_string())
            .or_default()
            .push_back(Err(message.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<InferenceRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_for(&self, agent: &str) -> Vec<InferenceRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.agent == agent)
            .collect()
    }
}

#[async_trait]
impl InferenceGateway for ScriptedGateway {
    async fn invoke(&self, request: &InferenceRequest) -> Result<String, GatewayError> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(&request.agent)
            .and_then(VecDeque::pop_front);
        match next {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(GatewayError::ConnectionError(message)),
            None => Err(GatewayError::Other(format!(
                "no scripted reply for {}",
                request.agent
            ))),
        }
    }
}

/// Store holding the last saved state in memory
#[derive(Default)]
pub(crate) struct MemoryStore {
    pub saved: Mutex<Option<LearnerState>>,
    pub saves: Mutex<usize>,
}

impl MemoryStore {
    pub fn with_state(state: LearnerState) -> Self {
        Self {
            saved: Mutex::new(Some(state)),
            saves: Mutex::new(0),
        }
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }

    pub fn last_saved(&self) -> Option<LearnerState> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl LearnerStore for MemoryStore {
    async fn save(&self, state: &LearnerState) -> Result<(), StoreError> {
        *self.saved.lock().unwrap() = Some(state.clone());
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }

    async fn load(&self) -> Option<LearnerState> {
        self.saved.lock().unwrap().clone()
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

/// Store whose saves always fail
pub(crate) struct BrokenStore;

#[async_trait]
impl LearnerStore for BrokenStore {
    async fn save(&self, _state: &LearnerState) -> Result<(), StoreError> {
        Err(StoreError::Io("disk full".to_string()))
    }

    async fn load(&self) -> Option<LearnerState> {
        None
    }

    fn location(&self) -> String {
        "nowhere".to_string()
    }
}

/// Inspector over a fixed set of files
#[derive(Default)]
pub(crate) struct StubInspector {
    files: HashMap<String, String>,
}

impl StubInspector {
    pub fn with_file(mut self, path: &str, contents: &str) -> Self {
        self.files.insert(path.to_string(), contents.to_string());
        self
    }
}

#[async_trait]
impl ProjectInspector for StubInspector {
    async fn full_context(&self) -> Result<String, InspectorError> {
        let mut paths: Vec<_> = self.files.keys().cloned().collect();
        paths.sort();
        Ok(format!("PROJECT FILES:\n{}", paths.join("\n")))
    }

    async fn tree(&self) -> Result<String, InspectorError> {
        Ok(self.files.keys().cloned().collect::<Vec<_>>().join("\n"))
    }

    async fn read_file(&self, path: &str) -> Result<String, InspectorError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| InspectorError::NotFound(path.to_string()))
    }

    async fn run(&self, command: &str) -> Result<String, InspectorError> {
        Ok(format!("$ {command}\nok"))
    }
}

/// Logger collecting event types
#[derive(Default)]
pub(crate) struct RecordingLogger {
    pub events: Mutex<Vec<(String, serde_json::Value)>>,
}

impl RecordingLogger {
    pub fn types(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|(t, _)| t.clone())
            .collect()
    }
}

impl ConversationLogger for RecordingLogger {
    fn log(&self, event: ConversationEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.event_type.to_string(), event.payload));
    }
}
