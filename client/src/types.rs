//! Wire types shared by the task and AI backends.
//!
//! All types serialize to camelCase JSON. Task records are treated as
//! server-owned: fields the client does not know about are kept in
//! [`Task::extra`] so an update can send the full record back unchanged.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Opaque task identifier.
///
/// The backend decides the representation; the client only compares ids
/// and formats them into request paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    Number(i64),
    Text(String),
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskId::Number(n) => write!(f, "{n}"),
            TaskId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for TaskId {
    fn from(value: i64) -> Self {
        TaskId::Number(value)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        TaskId::Text(value.to_string())
    }
}

impl FromStr for TaskId {
    type Err = std::convert::Infallible;

    /// Numeric strings become [`TaskId::Number`] so they match ids the
    /// backend sends as JSON numbers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(trimmed
            .parse::<i64>()
            .map(TaskId::Number)
            .unwrap_or_else(|_| TaskId::Text(trimmed.to_string())))
    }
}

/// Server-assigned timestamp.
///
/// Accepts RFC 3339 values as well as zone-less local datetimes, which is
/// what a backend persisting `LocalDateTime` emits. Anything else (epoch
/// millis, other string formats) is kept verbatim in [`Timestamp::Other`]
/// so one odd record never fails a whole list, and an update sends it back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Utc(DateTime<Utc>),
    Local(NaiveDateTime),
    Other(Value),
}

impl Timestamp {
    /// Formats the timestamp for display in local time. Unrecognised values
    /// are shown as sent.
    #[must_use]
    pub fn display_local(&self) -> String {
        match self {
            Timestamp::Utc(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
            Timestamp::Local(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
            Timestamp::Other(Value::String(raw)) => raw.clone(),
            Timestamp::Other(raw) => raw.to_string(),
        }
    }
}

/// A task record as owned by the task backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Server-assigned identifier.
    pub id: TaskId,

    /// Task title.
    pub title: String,

    /// Optional free-text description.
    #[serde(default)]
    pub description: Option<String>,

    /// Completion flag. A `null` from the server reads as `false`.
    #[serde(default, deserialize_with = "nullable_bool")]
    pub completed: bool,

    /// Creation timestamp, set by the server.
    #[serde(default)]
    pub created_at: Option<Timestamp>,

    /// Any additional fields the server sent (e.g. `updatedAt`).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    /// Returns a copy of this record with `completed` inverted.
    ///
    /// Every other field, including unknown ones, is carried over so the
    /// backend receives the full record.
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }

    /// Returns the description if it has visible content.
    #[must_use]
    pub fn visible_description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

fn nullable_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Body of a create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

impl NewTask {
    /// Builds a create request, or `None` if the title is empty or whitespace.
    ///
    /// Title and description are trimmed; an empty description becomes `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskpad_client::types::NewTask;
    ///
    /// assert!(NewTask::new("   ", "ignored").is_none());
    ///
    /// let task = NewTask::new(" Buy milk ", "").unwrap();
    /// assert_eq!(task.title, "Buy milk");
    /// assert_eq!(task.description, None);
    /// assert!(!task.completed);
    /// ```
    #[must_use]
    pub fn new(title: &str, description: &str) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        let description = description.trim();
        Some(Self {
            title: title.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            completed: false,
        })
    }
}

/// Free-text answer from the AI backend (summary or Q&A).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiAnswer {
    pub answer: String,

    /// Answer kind reported by the backend ("summary", "qna", ...).
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Body of a question request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionRequest {
    pub question: String,
}

/// The three per-task analyses the AI backend can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisKind {
    Category,
    Priority,
    Recommendation,
}

impl AnalysisKind {
    /// Path segment of the analysis endpoint.
    #[must_use]
    pub fn endpoint(self) -> &'static str {
        match self {
            AnalysisKind::Category => "categorize",
            AnalysisKind::Priority => "prioritize",
            AnalysisKind::Recommendation => "recommend",
        }
    }
}

/// Raw analysis record. The backend fills only the field matching the
/// endpoint that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub task_id: TaskId,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub recommendation: Option<String>,
}

impl AnalysisRecord {
    /// Picks the payload field for `kind`; a missing payload becomes empty.
    #[must_use]
    pub fn into_item(self, kind: AnalysisKind) -> AnalysisItem {
        let payload = match kind {
            AnalysisKind::Category => self.category,
            AnalysisKind::Priority => self.priority,
            AnalysisKind::Recommendation => self.recommendation,
        };

        AnalysisItem {
            task_id: self.task_id,
            payload: payload.unwrap_or_default(),
        }
    }
}

/// A per-task annotation: category label, priority level, or recommendation.
///
/// `task_id` is a lookup key into the task list, not ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisItem {
    pub task_id: TaskId,
    pub payload: String,
}

/// Display class of a priority payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityLevel {
    High,
    Medium,
    Low,
    Unknown,
}

impl PriorityLevel {
    /// Classifies a priority label, ignoring case and surrounding whitespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskpad_client::types::PriorityLevel;
    ///
    /// assert_eq!(PriorityLevel::from_label("HIGH"), PriorityLevel::High);
    /// assert_eq!(PriorityLevel::from_label(" medium "), PriorityLevel::Medium);
    /// assert_eq!(PriorityLevel::from_label("urgent"), PriorityLevel::Unknown);
    /// ```
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("high") {
            PriorityLevel::High
        } else if label.eq_ignore_ascii_case("medium") {
            PriorityLevel::Medium
        } else if label.eq_ignore_ascii_case("low") {
            PriorityLevel::Low
        } else {
            PriorityLevel::Unknown
        }
    }
}
