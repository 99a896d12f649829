//! AI assistant view model.
//!
//! Holds the selected tab and the last result of each of the five
//! assistant actions. Results are read-only projections over the task
//! collection; task titles come from a [`TaskTitles`] snapshot handed in
//! by the caller, never from the task list itself.
//!
//! Each action has its own in-flight flag. An action whose flag is set
//! cannot be started again until its outcome is applied, while different
//! actions may run side by side. Outcomes are applied in arrival order.
//!
//! [`TaskTitles`]: crate::task_list::TaskTitles

use std::collections::HashSet;
use std::fmt;

use tracing::{info, warn};

use crate::api::{ApiError, AssistantApi};
use crate::task_list::TaskTitles;
use crate::types::{AiAnswer, AnalysisItem, AnalysisKind};

/// Prefix of the summary text shown when summarizing fails.
pub const SUMMARY_FAILED: &str = "Failed to get summary: ";

/// Prefix of the answer text shown when a question fails.
pub const ANSWER_FAILED: &str = "Failed to get answer: ";

/// One of the five assistant operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AiAction {
    Summarize,
    Ask,
    Categorize,
    Prioritize,
    Recommend,
}

impl AiAction {
    /// Label of the action's trigger when idle.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AiAction::Summarize => "Generate Summary",
            AiAction::Ask => "Ask",
            AiAction::Categorize => "Categorize All Tasks",
            AiAction::Prioritize => "Prioritize All Tasks",
            AiAction::Recommend => "Get Recommendations",
        }
    }

    /// Label of the action's trigger while its request is in flight.
    #[must_use]
    pub fn busy_label(self) -> &'static str {
        match self {
            AiAction::Summarize | AiAction::Recommend => "Generating...",
            AiAction::Ask => "Thinking...",
            AiAction::Categorize => "Categorizing...",
            AiAction::Prioritize => "Analyzing...",
        }
    }

    /// The analysis kind for the three per-task actions.
    #[must_use]
    pub fn analysis_kind(self) -> Option<AnalysisKind> {
        match self {
            AiAction::Categorize => Some(AnalysisKind::Category),
            AiAction::Prioritize => Some(AnalysisKind::Priority),
            AiAction::Recommend => Some(AnalysisKind::Recommendation),
            AiAction::Summarize | AiAction::Ask => None,
        }
    }
}

impl From<AnalysisKind> for AiAction {
    fn from(kind: AnalysisKind) -> Self {
        match kind {
            AnalysisKind::Category => AiAction::Categorize,
            AnalysisKind::Priority => AiAction::Prioritize,
            AnalysisKind::Recommendation => AiAction::Recommend,
        }
    }
}

/// Tabs of the assistant panel, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssistantTab {
    #[default]
    Summary,
    Qna,
    Categories,
    Priorities,
    Recommendations,
}

impl AssistantTab {
    pub const ALL: [AssistantTab; 5] = [
        AssistantTab::Summary,
        AssistantTab::Qna,
        AssistantTab::Categories,
        AssistantTab::Priorities,
        AssistantTab::Recommendations,
    ];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            AssistantTab::Summary => "Summary",
            AssistantTab::Qna => "Q&A",
            AssistantTab::Categories => "Categorize",
            AssistantTab::Priorities => "Prioritize",
            AssistantTab::Recommendations => "Recommend",
        }
    }

    /// The action triggered from this tab.
    #[must_use]
    pub fn action(self) -> AiAction {
        match self {
            AssistantTab::Summary => AiAction::Summarize,
            AssistantTab::Qna => AiAction::Ask,
            AssistantTab::Categories => AiAction::Categorize,
            AssistantTab::Priorities => AiAction::Prioritize,
            AssistantTab::Recommendations => AiAction::Recommend,
        }
    }

    /// Zero-based position in [`AssistantTab::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            AssistantTab::Summary => 0,
            AssistantTab::Qna => 1,
            AssistantTab::Categories => 2,
            AssistantTab::Priorities => 3,
            AssistantTab::Recommendations => 4,
        }
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Next tab, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous tab, wrapping around.
    #[must_use]
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl From<AiAction> for AssistantTab {
    /// The tab showing `action`'s result.
    fn from(action: AiAction) -> Self {
        match action {
            AiAction::Summarize => AssistantTab::Summary,
            AiAction::Ask => AssistantTab::Qna,
            AiAction::Categorize => AssistantTab::Categories,
            AiAction::Prioritize => AssistantTab::Priorities,
            AiAction::Recommend => AssistantTab::Recommendations,
        }
    }
}

impl fmt::Display for AssistantTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A request the assistant wants sent to the AI backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiRequest {
    Summarize,
    Ask(String),
    Analyze(AnalysisKind),
}

impl AiRequest {
    #[must_use]
    pub fn action(&self) -> AiAction {
        match self {
            AiRequest::Summarize => AiAction::Summarize,
            AiRequest::Ask(_) => AiAction::Ask,
            AiRequest::Analyze(kind) => AiAction::from(*kind),
        }
    }

    /// Sends the request and wraps the response in an [`AiOutcome`].
    pub async fn execute(self, api: &AssistantApi) -> AiOutcome {
        match self {
            AiRequest::Summarize => AiOutcome::Summary(api.summarize().await),
            AiRequest::Ask(question) => AiOutcome::Answer(api.ask(&question).await),
            AiRequest::Analyze(kind) => AiOutcome::Analysis {
                kind,
                result: api.analyze(kind).await,
            },
        }
    }
}

/// Result of an [`AiRequest`].
#[derive(Debug)]
pub enum AiOutcome {
    Summary(Result<AiAnswer, ApiError>),
    Answer(Result<AiAnswer, ApiError>),
    Analysis {
        kind: AnalysisKind,
        result: Result<Vec<AnalysisItem>, ApiError>,
    },
}

impl AiOutcome {
    #[must_use]
    pub fn action(&self) -> AiAction {
        match self {
            AiOutcome::Summary(_) => AiAction::Summarize,
            AiOutcome::Answer(_) => AiAction::Ask,
            AiOutcome::Analysis { kind, .. } => AiAction::from(*kind),
        }
    }

    /// Returns the request error, if the request failed.
    #[must_use]
    pub fn error(&self) -> Option<&ApiError> {
        match self {
            AiOutcome::Summary(result) | AiOutcome::Answer(result) => result.as_ref().err(),
            AiOutcome::Analysis { result, .. } => result.as_ref().err(),
        }
    }
}

/// State of the assistant panel.
#[derive(Debug, Clone, Default)]
pub struct AssistantState {
    tab: AssistantTab,
    in_flight: HashSet<AiAction>,
    summary: String,
    question: String,
    answer: String,
    categories: Vec<AnalysisItem>,
    priorities: Vec<AnalysisItem>,
    recommendations: Vec<AnalysisItem>,
}

impl AssistantState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn tab(&self) -> AssistantTab {
        self.tab
    }

    /// Changes the displayed tab. Never starts a request.
    pub fn select_tab(&mut self, tab: AssistantTab) {
        self.tab = tab;
    }

    /// Returns `true` while `action` has a request in flight.
    #[must_use]
    pub fn is_busy(&self, action: AiAction) -> bool {
        self.in_flight.contains(&action)
    }

    /// Returns `true` if any action is in flight.
    #[must_use]
    pub fn any_busy(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Trigger label for `action`, reflecting its busy state.
    #[must_use]
    pub fn trigger_label(&self, action: AiAction) -> &'static str {
        if self.is_busy(action) {
            action.busy_label()
        } else {
            action.label()
        }
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Draft question text.
    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn set_question(&mut self, question: impl Into<String>) {
        self.question = question.into();
    }

    pub fn question_mut(&mut self) -> &mut String {
        &mut self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Last successful result set for `kind`.
    #[must_use]
    pub fn analysis(&self, kind: AnalysisKind) -> &[AnalysisItem] {
        match kind {
            AnalysisKind::Category => &self.categories,
            AnalysisKind::Priority => &self.priorities,
            AnalysisKind::Recommendation => &self.recommendations,
        }
    }

    /// Plain-text view of `action`'s current result, one entry per line.
    ///
    /// Summary and answer text is returned as-is, including an inline
    /// failure message. Analysis items read `title: payload`, labelled
    /// through `titles`. An empty result yields no lines.
    #[must_use]
    pub fn result_lines(&self, action: AiAction, titles: &TaskTitles) -> Vec<String> {
        if let Some(kind) = action.analysis_kind() {
            return self
                .analysis(kind)
                .iter()
                .map(|item| format!("{}: {}", titles.title_for(&item.task_id), item.payload))
                .collect();
        }

        let text = if action == AiAction::Ask {
            &self.answer
        } else {
            &self.summary
        };
        text.lines().map(str::to_string).collect()
    }

    /// Starts `action`, returning the request to send.
    ///
    /// Returns `None` if the action is already in flight, or for
    /// [`AiAction::Ask`] when the draft question is blank.
    pub fn begin(&mut self, action: AiAction) -> Option<AiRequest> {
        if self.is_busy(action) {
            return None;
        }

        let request = match action {
            AiAction::Summarize => AiRequest::Summarize,
            AiAction::Ask => {
                if self.question.trim().is_empty() {
                    return None;
                }
                AiRequest::Ask(self.question.clone())
            }
            AiAction::Categorize => AiRequest::Analyze(AnalysisKind::Category),
            AiAction::Prioritize => AiRequest::Analyze(AnalysisKind::Priority),
            AiAction::Recommend => AiRequest::Analyze(AnalysisKind::Recommendation),
        };

        self.in_flight.insert(action);
        Some(request)
    }

    /// Starts the action of the selected tab.
    pub fn begin_selected(&mut self) -> Option<AiRequest> {
        self.begin(self.tab.action())
    }

    /// Applies an outcome and clears its action's in-flight flag.
    ///
    /// Summary and answer failures replace the text with an inline error.
    /// Analysis failures are only logged; the previous results stay.
    pub fn apply(&mut self, outcome: AiOutcome) {
        self.in_flight.remove(&outcome.action());

        match outcome {
            AiOutcome::Summary(Ok(answer)) => self.summary = answer.answer,
            AiOutcome::Summary(Err(e)) => self.summary = format!("{SUMMARY_FAILED}{e}"),
            AiOutcome::Answer(Ok(answer)) => self.answer = answer.answer,
            AiOutcome::Answer(Err(e)) => self.answer = format!("{ANSWER_FAILED}{e}"),
            AiOutcome::Analysis {
                kind,
                result: Ok(items),
            } => {
                info!(?kind, count = items.len(), "Analysis applied");
                match kind {
                    AnalysisKind::Category => self.categories = items,
                    AnalysisKind::Priority => self.priorities = items,
                    AnalysisKind::Recommendation => self.recommendations = items,
                }
            }
            AiOutcome::Analysis {
                kind,
                result: Err(e),
            } => {
                warn!(error = %e, endpoint = kind.endpoint(), "Analysis request failed");
            }
        }
    }

    /// Begins `action`, runs it against `api`, and applies the outcome.
    /// Returns `false` if the action could not be started.
    pub async fn run(&mut self, action: AiAction, api: &AssistantApi) -> bool {
        let Some(request) = self.begin(action) else {
            return false;
        };
        let outcome = request.execute(api).await;
        self.apply(outcome);
        true
    }

    pub async fn summarize(&mut self, api: &AssistantApi) -> bool {
        self.run(AiAction::Summarize, api).await
    }

    /// Sets the draft question and asks it. Blank questions are a no-op.
    pub async fn ask(&mut self, api: &AssistantApi, question: &str) -> bool {
        self.set_question(question);
        self.run(AiAction::Ask, api).await
    }

    pub async fn categorize(&mut self, api: &AssistantApi) -> bool {
        self.run(AiAction::Categorize, api).await
    }

    pub async fn prioritize(&mut self, api: &AssistantApi) -> bool {
        self.run(AiAction::Prioritize, api).await
    }

    pub async fn recommend(&mut self, api: &AssistantApi) -> bool {
        self.run(AiAction::Recommend, api).await
    }
}
