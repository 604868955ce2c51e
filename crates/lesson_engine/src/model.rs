//! Lesson state: tasks, steps, inventory, and companion dialogue.

use chrono::{DateTime, Utc};
use lesson_contract::{AppId, LessonScope, Mood, Phase, RewardItem, Trigger};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unique identifier of an authored task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a task id from trusted authored content.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a step, unique within its owning task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepId(String);

impl StepId {
    /// Creates a step id from trusted authored content.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a task. Transitions are one-directional:
/// `Pending → InProgress → Completed`.
///
/// `Locked` is reserved for authored content that should be invisible until
/// unlocked; the engine never assigns it and treats locked tasks as inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Locked,
    Pending,
    InProgress,
    Completed,
}

/// One checklist entry of a task. `completed` is monotonic and never reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStep {
    pub id: StepId,
    pub description: String,
    pub completed: bool,
    /// When set, a matching app event completes this step automatically.
    /// Steps without a trigger complete only through the direct bypass call.
    pub trigger: Option<Trigger>,
}

/// An authored lesson task. Only `status` and the steps' `completed` flags
/// mutate at runtime, and only through the engine reducer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub phase: Phase,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    /// The app the learner is expected to use; informational only.
    pub required_app_id: Option<AppId>,
    pub guide_text: String,
    pub complete_text: String,
    pub steps: Vec<TaskStep>,
    pub reward: Option<RewardItem>,
}

/// A granted reward with its acquisition timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub item: RewardItem,
    pub obtained_at: DateTime<Utc>,
}

/// Append-only, id-deduplicated trophy case for the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Inventory {
    entries: Vec<InventoryEntry>,
}

impl Inventory {
    /// Appends `item` stamped with the current time. Returns `false` (and
    /// leaves the inventory untouched) when an item with the same id was
    /// already granted.
    pub fn grant(&mut self, item: RewardItem) -> bool {
        if self.contains(&item.id) {
            return false;
        }
        self.entries.push(InventoryEntry {
            item,
            obtained_at: Utc::now(),
        });
        true
    }

    /// Whether an item with `id` has been granted.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.item.id == id)
    }

    /// Granted entries in acquisition order.
    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Companion bubble state. Holds no timers; every transition is driven by
/// the lesson reducer or an explicit UI request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueState {
    pub text: String,
    pub mood: Mood,
    pub bubble_visible: bool,
    /// The guide panel flag is independent of bubble visibility.
    pub guide_open: bool,
}

impl Default for DialogueState {
    fn default() -> Self {
        Self {
            text: String::new(),
            mood: Mood::Normal,
            bubble_visible: true,
            guide_open: false,
        }
    }
}

impl DialogueState {
    /// Replaces the bubble message and always forces it visible.
    pub fn set(&mut self, text: impl Into<String>, mood: Mood) {
        self.text = text.into();
        self.mood = mood;
        self.bubble_visible = true;
    }
}

/// Authored-content validation errors reported at engine construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("task list is empty")]
    EmptyTaskList,
    #[error("duplicate task id `{0}`")]
    DuplicateTask(TaskId),
    #[error("duplicate step id `{step}` in task `{task}`")]
    DuplicateStep { task: TaskId, step: StepId },
}

/// The full progression-engine state for one lesson session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonState {
    /// Frozen for the lifetime of this state value.
    pub scope: LessonScope,
    pub tasks: Vec<Task>,
    pub inventory: Inventory,
    pub dialogue: DialogueState,
}

impl LessonState {
    /// Validates `tasks`, applies the scope's status overrides, and seeds the
    /// opening guidance dialogue.
    ///
    /// Under a single-phase scope the first authored task of that phase
    /// becomes in-progress and every other task (in or out of the phase) is
    /// forced to pending. Unscoped, the authored statuses stand, which lets
    /// each phase carry its own in-progress task for the overview mode.
    pub fn new(tasks: Vec<Task>, scope: LessonScope) -> Result<Self, ContentError> {
        validate_tasks(&tasks)?;
        let mut state = Self {
            scope,
            tasks,
            inventory: Inventory::default(),
            dialogue: DialogueState::default(),
        };
        if let LessonScope::Single(phase) = scope {
            let first_in_phase = state
                .tasks
                .iter()
                .position(|t| t.phase == phase);
            for (index, task) in state.tasks.iter_mut().enumerate() {
                task.status = if Some(index) == first_in_phase {
                    TaskStatus::InProgress
                } else {
                    TaskStatus::Pending
                };
            }
        }
        if let Some(task) = state
            .tasks
            .iter()
            .find(|t| scope.visible(t.phase) && t.status == TaskStatus::InProgress)
        {
            state.dialogue.text = task.guide_text.clone();
        }
        Ok(state)
    }

    /// Looks up a task by id.
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }
}

fn validate_tasks(tasks: &[Task]) -> Result<(), ContentError> {
    if tasks.is_empty() {
        return Err(ContentError::EmptyTaskList);
    }
    for (index, task) in tasks.iter().enumerate() {
        if tasks[..index].iter().any(|t| t.id == task.id) {
            return Err(ContentError::DuplicateTask(task.id.clone()));
        }
        for (step_index, step) in task.steps.iter().enumerate() {
            if task.steps[..step_index].iter().any(|s| s.id == step.id) {
                return Err(ContentError::DuplicateStep {
                    task: task.id.clone(),
                    step: step.id.clone(),
                });
            }
        }
    }
    Ok(())
}
