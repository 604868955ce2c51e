//! Shared boundary types between the simulated app surfaces, the shell
//! runtime, and the lesson progression engine.
//!
//! This crate is intentionally runtime-agnostic. It defines the serializable
//! identifiers, trigger predicates, and reward payloads that cross component
//! boundaries without depending on the shell or engine internals. An app
//! surface only ever needs these types to announce "an event of kind X
//! happened, optionally for app Y with value Z"; it never learns which
//! lesson step, if any, cares.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use serde::{Deserialize, Serialize};

/// Stable identifier for an installable application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppId(String);

impl AppId {
    /// Returns an app identifier when `raw` conforms to the lowercase
    /// `[a-z][a-z0-9_-]*` policy.
    pub fn new(raw: impl Into<String>) -> Result<Self, String> {
        let raw = raw.into();
        if is_valid_app_id(&raw) {
            Ok(Self(raw))
        } else {
            Err(format!(
                "invalid app id `{raw}`; expected lowercase ascii segments"
            ))
        }
    }

    /// Creates an id without validation for compile-time trusted constants.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AppId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_valid_app_id(raw: &str) -> bool {
    if raw.is_empty() || raw.len() > 64 {
        return false;
    }
    let bytes = raw.as_bytes();
    if !bytes[0].is_ascii_lowercase() {
        return false;
    }
    bytes
        .iter()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-' || *b == b'_')
}

/// One of the three sequential field-trip stages grouping lesson tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Pre-visit planning and preparation.
    One,
    /// During-visit exploration and discovery.
    Two,
    /// Post-visit research and sharing.
    Three,
}

impl Phase {
    /// All phases in lesson order.
    pub const ALL: [Phase; 3] = [Phase::One, Phase::Two, Phase::Three];

    /// One-based stage number.
    pub fn number(self) -> u8 {
        match self {
            Phase::One => 1,
            Phase::Two => 2,
            Phase::Three => 3,
        }
    }

    /// Human-readable stage title.
    pub fn title(self) -> &'static str {
        match self {
            Phase::One => "Before the Visit",
            Phase::Two => "At the Zoo",
            Phase::Three => "After the Visit",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Restricts the engine's visible and active content to a single phase, or
/// leaves all three phases visible.
///
/// The scope is resolved once when an engine is constructed and stays frozen
/// for that engine's lifetime; build a new engine to change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LessonScope {
    /// All phases visible; authored statuses stand as-is.
    #[default]
    All,
    /// Only the named phase is visible and active.
    Single(Phase),
}

impl LessonScope {
    /// Whether tasks of `phase` are visible under this scope.
    pub fn visible(self, phase: Phase) -> bool {
        match self {
            LessonScope::All => true,
            LessonScope::Single(scoped) => scoped == phase,
        }
    }

    /// Display title for progress headers; "All Tasks" when unscoped.
    pub fn title(self) -> &'static str {
        match self {
            LessonScope::All => "All Tasks",
            LessonScope::Single(phase) => phase.title(),
        }
    }
}

/// Kind tag for events announced by app surfaces and matched by step
/// triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// An application window was opened (first launch, not refocus).
    AppOpen,
    /// Generic in-app action; reserved by the authored content.
    Action,
    /// The learner answered a companion question.
    Answer,
    /// An image was saved; reserved by the authored content.
    SaveImage,
    /// A passage of text was copied.
    CopyText,
    /// A travel route was selected; reserved by the authored content.
    RouteSelect,
    /// Route planning finished.
    RouteComplete,
    /// An image was saved to the photo album.
    SaveToAlbum,
    /// A keyword search ran in the browser.
    BrowserSearch,
    /// An animal photo was saved from the zoo site.
    SaveAnimalPhoto,
    /// A new note was created.
    CreateNote,
    /// The camera lens finished an AI identification.
    AiIdentify,
}

/// Structural match predicate that auto-completes a task step.
///
/// A trigger matches an event when the kinds are equal and every constraint
/// that is set (`app_id`, `value`) equals the event's corresponding field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    /// Required event kind.
    pub kind: TriggerKind,
    /// Optional app constraint; unset matches any app.
    pub app_id: Option<AppId>,
    /// Optional payload constraint; unset matches any value.
    pub value: Option<String>,
}

impl Trigger {
    /// Creates a kind-only trigger.
    pub fn of(kind: TriggerKind) -> Self {
        Self {
            kind,
            app_id: None,
            value: None,
        }
    }

    /// Creates a trigger constrained to an app.
    pub fn for_app(kind: TriggerKind, app_id: AppId) -> Self {
        Self {
            kind,
            app_id: Some(app_id),
            value: None,
        }
    }

    /// Creates a trigger constrained to a payload value.
    pub fn with_value(kind: TriggerKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            app_id: None,
            value: Some(value.into()),
        }
    }

    /// Whether `event` satisfies this trigger's constraints.
    pub fn matches(&self, event: &TriggerEvent) -> bool {
        if self.kind != event.kind {
            return false;
        }
        if let Some(app_id) = &self.app_id {
            if event.app_id.as_ref() != Some(app_id) {
                return false;
            }
        }
        if let Some(value) = &self.value {
            if event.value.as_deref() != Some(value.as_str()) {
                return false;
            }
        }
        true
    }
}

/// An event raised by an app surface when the learner does something that
/// might satisfy a lesson step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerEvent {
    /// Event kind.
    pub kind: TriggerKind,
    /// App the event originated from, when meaningful.
    pub app_id: Option<AppId>,
    /// Free-form payload, for example an answer choice.
    pub value: Option<String>,
}

impl TriggerEvent {
    /// Creates a kind-only event.
    pub fn of(kind: TriggerKind) -> Self {
        Self {
            kind,
            app_id: None,
            value: None,
        }
    }

    /// Creates the canonical app-launch event.
    pub fn app_open(app_id: AppId) -> Self {
        Self {
            kind: TriggerKind::AppOpen,
            app_id: Some(app_id),
            value: None,
        }
    }

    /// Creates an event carrying a payload value.
    pub fn with_value(kind: TriggerKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            app_id: None,
            value: Some(value.into()),
        }
    }
}

/// Category of a reward item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardKind {
    /// An admission ticket.
    Ticket,
    /// A map or route plan.
    Map,
    /// A saved photo.
    Photo,
    /// A written note.
    Note,
    /// A merit badge.
    Achievement,
}

/// A collectible granted when a task completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardItem {
    /// Unique item id; each id is granted at most once per session.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Item category.
    pub kind: RewardKind,
    /// Short description shown in the inventory.
    pub description: String,
    /// Optional illustration asset path.
    pub image_url: Option<String>,
}

/// Mood tag accompanying companion dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    /// Celebrating a phase or lesson milestone.
    Happy,
    /// Pondering; used by explicit UI requests.
    Thinking,
    /// Celebrating a single task completion.
    Excited,
    /// Default guidance tone.
    Normal,
}

/// Desktop coordinates where a newly launched window should appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchPosition {
    /// Horizontal position in px.
    pub x: i32,
    /// Vertical position in px.
    pub y: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_id_policy_rejects_bad_input() {
        assert!(AppId::new("weather").is_ok());
        assert!(AppId::new("smart-lens").is_ok());
        assert!(AppId::new("").is_err());
        assert!(AppId::new("Weather").is_err());
        assert!(AppId::new("9lives").is_err());
    }

    #[test]
    fn trigger_matches_kind_and_constraints() {
        let trigger = Trigger::for_app(TriggerKind::AppOpen, AppId::trusted("weather"));
        assert!(trigger.matches(&TriggerEvent::app_open(AppId::trusted("weather"))));
        assert!(!trigger.matches(&TriggerEvent::app_open(AppId::trusted("booking"))));
        assert!(!trigger.matches(&TriggerEvent::of(TriggerKind::Answer)));
    }

    #[test]
    fn unconstrained_trigger_matches_any_event_of_its_kind() {
        let trigger = Trigger::of(TriggerKind::RouteComplete);
        let mut event = TriggerEvent::of(TriggerKind::RouteComplete);
        assert!(trigger.matches(&event));
        event.app_id = Some(AppId::trusted("maps"));
        event.value = Some("bus".to_string());
        assert!(trigger.matches(&event));
    }

    #[test]
    fn value_trigger_requires_exact_payload() {
        let trigger = Trigger::with_value(TriggerKind::Answer, "warm");
        assert!(trigger.matches(&TriggerEvent::with_value(TriggerKind::Answer, "warm")));
        assert!(!trigger.matches(&TriggerEvent::with_value(TriggerKind::Answer, "cold")));
        assert!(!trigger.matches(&TriggerEvent::of(TriggerKind::Answer)));
    }

    #[test]
    fn trigger_kind_serializes_with_snake_case_tags() {
        let json = serde_json::to_string(&TriggerKind::SaveToAlbum).expect("serialize");
        assert_eq!(json, "\"save_to_album\"");
    }
}
