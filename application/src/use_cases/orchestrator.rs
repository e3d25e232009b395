//! Orchestrator use case.
//!
//! Composes agents, the response extractor, learner state, interaction
//! history and the coaching engine into the learner-facing operations.
//!
//! Execution is strictly sequential: every operation takes `&mut self`,
//! awaits one agent at a time and mutates state only inside its own call.
//! Durable progress is saved after every mutating operation; a failed save
//! is logged and does not fail the operation.

use crate::config::OrchestratorConfig;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger, events,
};
use crate::ports::inference::{GatewayError, InferenceGateway};
use crate::ports::learner_store::LearnerStore;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::project_inspector::{InspectorError, ProjectInspector};
use crate::use_cases::coaching::{CoachingEngine, CoachingReport};
use crate::use_cases::roster::{RoleSet, primary_agents};
use crate::use_cases::shared::AgentInvoker;
use buildpath_domain::extract::payload::get_string;
use buildpath_domain::extract::{PLANNER_KEYS, REVIEW_KEYS, TASK_KEYS};
use buildpath_domain::util::preview;
use buildpath_domain::{
    Agent, Catalogue, DomainError, InteractionHistory, IssueResolution, JsonObject, LearnerState,
    PreferenceUpdate, Preferences, PrimaryRole, PromptTemplate, ReviewVerdict, Unit,
    UnitCompletion, complete_unit, extract_or_raw,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors surfaced by orchestrator operations.
///
/// Malformed model output and blocked transitions are never errors; they
/// resolve to degraded or negative values.
#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Project error: {0}")]
    Inspector(#[from] InspectorError),

    #[error("{0}")]
    Domain(#[from] DomainError),
}

/// Result of asking the task-setter for work
#[derive(Debug, Clone, Serialize)]
pub struct TaskAssignment {
    /// Extracted payload (or `{"raw": ...}` fallback)
    pub payload: JsonObject,
    /// The task now assigned, if the payload carried one
    pub task: Option<String>,
}

/// Result of a code or file submission
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionOutcome {
    pub payload: JsonObject,
    /// The verdict appended to review history, if one was recognised
    pub verdict: Option<ReviewVerdict>,
    /// Task newly marked complete by this submission
    pub completed_task: Option<String>,
    /// Report of the automatic coaching round this submission triggered
    pub auto_coaching: Option<CoachingReport>,
}

/// Result of an explicit coaching request
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CoachingOutcome {
    Disabled,
    Completed { report: CoachingReport },
}

/// Result of a learner issue report
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IssueOutcome {
    Disabled,
    Resolved { resolution: IssueResolution },
}

/// The learner-facing façade over agents, state and coaching.
pub struct Orchestrator {
    gateway: Arc<dyn InferenceGateway>,
    inspector: Arc<dyn ProjectInspector>,
    store: Arc<dyn LearnerStore>,
    conversation_logger: Arc<dyn ConversationLogger>,
    progress: Arc<dyn ProgressNotifier>,
    catalogue: Arc<Catalogue>,
    config: OrchestratorConfig,
    primaries: RoleSet<Agent>,
    coaching: Option<CoachingEngine>,
    history: InteractionHistory,
    learner: LearnerState,
}

impl Orchestrator {
    pub fn new(
        gateway: Arc<dyn InferenceGateway>,
        inspector: Arc<dyn ProjectInspector>,
        store: Arc<dyn LearnerStore>,
        catalogue: Arc<Catalogue>,
        config: OrchestratorConfig,
    ) -> Self {
        let first_unit = catalogue.first().map(|u| u.id.clone()).unwrap_or_default();
        let coaching = config
            .coaching_enabled
            .then(|| CoachingEngine::new(&config));

        Self {
            gateway,
            inspector,
            store,
            conversation_logger: Arc::new(NoConversationLogger),
            progress: Arc::new(NoProgress),
            catalogue,
            primaries: primary_agents(),
            coaching,
            history: InteractionHistory::new(config.history_capacity),
            learner: LearnerState::new(config.default_learner_name.clone(), first_unit),
            config,
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Create with a progress notifier.
    pub fn with_progress(mut self, progress: Arc<dyn ProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    // ==================== Accessors ====================

    pub fn learner(&self) -> &LearnerState {
        &self.learner
    }

    pub fn history(&self) -> &InteractionHistory {
        &self.history
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub fn agent(&self, role: PrimaryRole) -> &Agent {
        self.primaries.get(role)
    }

    /// Coach agent for `role`; `None` when coaching is disabled
    pub fn coach(&self, role: PrimaryRole) -> Option<&Agent> {
        self.coaching.as_ref().map(|engine| engine.coach(role))
    }

    pub fn coaching_enabled(&self) -> bool {
        self.coaching.is_some()
    }

    /// Reviews counted toward the next automatic coaching round
    pub fn reviews_since_coaching(&self) -> u32 {
        self.coaching
            .as_ref()
            .map_or(0, |engine| engine.cadence().since_last())
    }

    // ==================== Session ====================

    /// Restore persisted state. Returns `false` when nothing could be loaded.
    pub async fn resume(&mut self) -> bool {
        let Some(state) = self.store.load().await else {
            debug!("No saved progress at {}", self.store.location());
            return false;
        };
        if self.catalogue.get(&state.current_unit).is_none() {
            warn!(
                "Saved unit '{}' is not in the curriculum catalogue",
                state.current_unit
            );
        }
        info!("Resumed progress for {}", state.name);
        self.learner = state;
        true
    }

    /// Start over with fresh state on `start_unit` (1-based index or id;
    /// the first unit when `None`) and persist it.
    ///
    /// Interaction history, steering directives and the auto-coaching
    /// counter are reset too.
    pub async fn start_session(
        &mut self,
        name: &str,
        start_unit: Option<&str>,
    ) -> Result<&LearnerState, OrchestratorError> {
        let unit = match start_unit {
            Some(selector) => self.catalogue.resolve(selector)?,
            None => self.catalogue.first().ok_or(DomainError::EmptyCatalogue)?,
        };
        let name = if name.trim().is_empty() {
            self.config.default_learner_name.as_str()
        } else {
            name.trim()
        };

        info!("Starting session for {} on {}", name, unit.id);
        self.learner = LearnerState::new(name, unit.id.clone());
        self.history.clear();
        // Coaching learned for the previous learner does not carry over
        self.primaries = primary_agents();
        self.coaching = self
            .config
            .coaching_enabled
            .then(|| CoachingEngine::new(&self.config));
        self.persist().await;
        Ok(&self.learner)
    }

    // ==================== Catalogue ====================

    /// Unit selected by index or id; the current unit when `None`
    pub fn unit_brief(&self, selector: Option<&str>) -> Result<&Unit, OrchestratorError> {
        let unit = match selector {
            Some(selector) => self.catalogue.resolve(selector)?,
            None => self
                .catalogue
                .get(&self.learner.current_unit)
                .ok_or_else(|| DomainError::UnknownUnit(self.learner.current_unit.clone()))?,
        };
        Ok(unit)
    }

    pub fn roadmap(&self) -> &[Unit] {
        self.catalogue.units()
    }

    // ==================== Primary agents ====================

    /// Planner assessment of progress
    pub async fn planner_check(&mut self) -> Result<JsonObject, OrchestratorError> {
        let prompt = PromptTemplate::planner_check(&self.learner);
        let raw = self.ask(PrimaryRole::Planner, prompt, None).await?;
        self.history.record(PrimaryRole::Planner, raw.as_str());
        Ok(extract_or_raw(&raw, PLANNER_KEYS))
    }

    /// Ask the task-setter for the next task; it sees the project code.
    pub async fn next_task(&mut self) -> Result<TaskAssignment, OrchestratorError> {
        let unit = self.catalogue.get(&self.learner.current_unit);
        let prompt = PromptTemplate::next_task(unit, &self.learner);
        let code = self.project_context().await;

        let raw = self.ask(PrimaryRole::TaskSetter, prompt, code).await?;
        self.history.record(PrimaryRole::TaskSetter, raw.as_str());

        let payload = extract_or_raw(&raw, TASK_KEYS);
        let task = get_string(&payload, "task");
        if let Some(task) = &task {
            info!("Assigned task: {}", preview(task, 80));
            self.learner.assign_task(task.clone());
            self.persist().await;
        } else {
            warn!("Task-setter reply had no task field; current task unchanged");
        }
        Ok(TaskAssignment { payload, task })
    }

    /// Focused lesson on `topic`
    pub async fn lesson(&mut self, topic: &str) -> Result<String, OrchestratorError> {
        let unit = self.catalogue.get(&self.learner.current_unit);
        let prompt = PromptTemplate::lesson(unit, topic, &self.learner.current_task);
        let text = self.ask(PrimaryRole::Teacher, prompt, None).await?;
        self.history.record(PrimaryRole::Teacher, text.as_str());
        Ok(text)
    }

    /// Answer a question with the whole project in view. Not recorded in
    /// interaction history.
    pub async fn chat(&mut self, question: &str) -> Result<String, OrchestratorError> {
        let code = self.project_context().await;
        let text = self
            .ask(PrimaryRole::Teacher, PromptTemplate::chat(question), code)
            .await?;
        Ok(text)
    }

    // ==================== Submissions ====================

    /// Review pasted code against the unit requirements.
    pub async fn submit_code(
        &mut self,
        code: &str,
        description: &str,
    ) -> Result<SubmissionOutcome, OrchestratorError> {
        let unit = self.catalogue.get(&self.learner.current_unit);
        let prompt =
            PromptTemplate::review_code(unit, &self.learner.current_task, code, description);
        let raw = self.ask(PrimaryRole::Reviewer, prompt, None).await?;
        self.history.record(PrimaryRole::Reviewer, raw.as_str());
        Ok(self.process_review(&raw, description).await)
    }

    /// Review one project file, scoped to the current task.
    ///
    /// Only that file is sent; the rest of the project stays out of the
    /// reviewer's view.
    pub async fn review_file(&mut self, path: &str) -> Result<SubmissionOutcome, OrchestratorError> {
        let contents = self.inspector.read_file(path).await?;
        let unit = self.catalogue.get(&self.learner.current_unit);
        let prompt =
            PromptTemplate::review_file(unit, &self.learner.current_task, path, &contents);
        let raw = self.ask(PrimaryRole::Reviewer, prompt, None).await?;
        self.history.record(PrimaryRole::Reviewer, raw.as_str());
        Ok(self.process_review(&raw, &format!("Review: {path}")).await)
    }

    async fn process_review(&mut self, raw: &str, fallback_task: &str) -> SubmissionOutcome {
        let payload = extract_or_raw(raw, REVIEW_KEYS);
        let verdict = match ReviewVerdict::from_payload(&payload) {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!("Review not recorded: {}", e);
                return SubmissionOutcome {
                    payload,
                    verdict: None,
                    completed_task: None,
                    auto_coaching: None,
                };
            }
        };

        let completed_task = self.learner.record_verdict(verdict.clone(), fallback_task);
        info!(
            "Verdict {} ({} must-fix)",
            verdict.outcome,
            verdict.must_fix.len()
        );
        self.conversation_logger.log(ConversationEvent::new(
            events::VERDICT_RECORDED,
            serde_json::json!({
                "verdict": verdict.outcome.as_str(),
                "must_fix": verdict.must_fix,
                "completed_task": completed_task,
                "unit": self.learner.current_unit,
            }),
        ));
        if let Some(task) = &completed_task {
            info!("Task complete: {}", task);
            self.progress.on_task_completed(task);
        }
        self.persist().await;

        let auto_coaching = self.maybe_auto_coach().await;
        SubmissionOutcome {
            payload,
            verdict: Some(verdict),
            completed_task,
            auto_coaching,
        }
    }

    /// Run a coaching round if the review cadence says one is due.
    ///
    /// The submission has already been recorded, so a failing round is
    /// logged rather than returned.
    async fn maybe_auto_coach(&mut self) -> Option<CoachingReport> {
        let learner_context = self.learner.to_context(&self.catalogue);
        let engine = self.coaching.as_mut()?;
        if !engine.record_review() {
            return None;
        }

        info!("Auto-coaching: adapting agents to recent performance");
        self.progress.on_auto_coaching();
        let invoker = AgentInvoker {
            gateway: self.gateway.as_ref(),
            logger: self.conversation_logger.as_ref(),
            progress: self.progress.as_ref(),
        };
        match engine
            .run_round(
                &invoker,
                &self.history,
                &self.learner,
                &learner_context,
                &mut self.primaries,
            )
            .await
        {
            Ok(report) => Some(report),
            Err(e) => {
                warn!("Auto-coaching failed: {}", e);
                None
            }
        }
    }

    // ==================== Coaching ====================

    /// Explicit coaching round over every role with history.
    pub async fn request_coaching(&mut self) -> Result<CoachingOutcome, OrchestratorError> {
        let learner_context = self.learner.to_context(&self.catalogue);
        let Some(engine) = self.coaching.as_ref() else {
            return Ok(CoachingOutcome::Disabled);
        };
        let invoker = AgentInvoker {
            gateway: self.gateway.as_ref(),
            logger: self.conversation_logger.as_ref(),
            progress: self.progress.as_ref(),
        };
        let report = engine
            .run_round(
                &invoker,
                &self.history,
                &self.learner,
                &learner_context,
                &mut self.primaries,
            )
            .await?;
        Ok(CoachingOutcome::Completed { report })
    }

    /// Route a learner-reported issue to the coaches.
    pub async fn report_issue(&mut self, issue: &str) -> Result<IssueOutcome, OrchestratorError> {
        let learner_context = self.learner.to_context(&self.catalogue);
        let Some(engine) = self.coaching.as_ref() else {
            return Ok(IssueOutcome::Disabled);
        };
        let invoker = AgentInvoker {
            gateway: self.gateway.as_ref(),
            logger: self.conversation_logger.as_ref(),
            progress: self.progress.as_ref(),
        };
        let resolution = engine
            .resolve_issue(
                &invoker,
                issue,
                &self.history,
                &learner_context,
                &mut self.primaries,
            )
            .await?;
        Ok(IssueOutcome::Resolved { resolution })
    }

    // ==================== Progression ====================

    /// Complete the current unit if the gate allows it.
    pub async fn complete_unit(&mut self) -> UnitCompletion {
        let result = complete_unit(&mut self.learner, &self.catalogue);
        match &result {
            UnitCompletion::Rejected { blocked } => {
                info!("Unit completion rejected: {:?}", blocked);
            }
            completed => {
                info!("Unit completion: {}", preview(&completed.to_string(), 80));
                self.conversation_logger.log(ConversationEvent::new(
                    events::UNIT_COMPLETED,
                    serde_json::to_value(completed).unwrap_or_default(),
                ));
                self.persist().await;
            }
        }
        result
    }

    // ==================== Learner settings ====================

    /// Apply a partial preference update and persist.
    pub async fn update_preferences(&mut self, update: PreferenceUpdate) -> Preferences {
        if !update.is_empty() {
            self.learner.preferences.apply(update);
            self.persist().await;
        }
        self.learner.preferences
    }

    /// Count one day of work and persist.
    pub async fn record_day(&mut self) -> &LearnerState {
        self.learner.record_day();
        self.persist().await;
        &self.learner
    }

    // ==================== Project ====================

    pub async fn project_tree(&self) -> Result<String, OrchestratorError> {
        Ok(self.inspector.tree().await?)
    }

    pub async fn read_project_file(&self, path: &str) -> Result<String, OrchestratorError> {
        Ok(self.inspector.read_file(path).await?)
    }

    pub async fn run_command(&self, command: &str) -> Result<String, OrchestratorError> {
        Ok(self.inspector.run(command).await?)
    }

    // ==================== Internals ====================

    fn invoker(&self) -> AgentInvoker<'_> {
        AgentInvoker {
            gateway: self.gateway.as_ref(),
            logger: self.conversation_logger.as_ref(),
            progress: self.progress.as_ref(),
        }
    }

    async fn ask(
        &self,
        role: PrimaryRole,
        message: String,
        auxiliary: Option<String>,
    ) -> Result<String, GatewayError> {
        let learner_context = self.learner.to_context(&self.catalogue);
        self.invoker()
            .invoke(self.primaries.get(role), message, learner_context, auxiliary)
            .await
    }

    /// Full project context, or `None` with a warning when unavailable
    async fn project_context(&self) -> Option<String> {
        match self.inspector.full_context().await {
            Ok(context) => Some(context),
            Err(e) => {
                warn!("Project context unavailable: {}", e);
                None
            }
        }
    }

    async fn persist(&self) {
        if let Err(e) = self.store.save(&self.learner).await {
            warn!("Could not save progress to {}: {}", self.store.location(), e);
        }
    }
}
