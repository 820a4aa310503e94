use serde::{Deserialize, Serialize};

/// Task status as reported by `task export`.
///
/// Anything taskwarrior may grow in the future (or a record with no status at
/// all) collapses to `Other`, which is never actionable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
    Deleted,
    Waiting,
    Recurring,
    #[default]
    #[serde(other)]
    Other,
}

impl TaskStatus {
    /// Whether this task should appear in the panel.
    pub fn is_actionable(self) -> bool {
        self == TaskStatus::Pending
    }
}

/// One entry from the taskwarrior export.
///
/// Every field is defaulted: the export omits fields that are unset (a task
/// with no project has no `project` key at all), and extra fields like
/// annotations or UDAs are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub urgency: f64,
    #[serde(default)]
    pub priority: String,
    /// Date fields are kept as the opaque strings taskwarrior emits.
    #[serde(default)]
    pub due: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub entry: String,
    #[serde(default)]
    pub modified: String,
}
