//! Static registry of installable application descriptors.

use lesson_contract::AppId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Launcher grouping for an installed app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppCategory {
    /// Built-in shell surfaces.
    System,
    /// Lesson-specific learning apps.
    Education,
    /// General-purpose tools.
    Utility,
}

/// Display metadata for one installable app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppEntry {
    pub app_id: AppId,
    pub name: String,
    pub icon_id: String,
    pub category: AppCategory,
}

impl AppEntry {
    pub fn new(
        app_id: AppId,
        name: impl Into<String>,
        icon_id: impl Into<String>,
        category: AppCategory,
    ) -> Self {
        Self {
            app_id,
            name: name.into(),
            icon_id: icon_id.into(),
            category,
        }
    }
}

/// Catalog construction errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Two entries share the same app id.
    #[error("duplicate app id `{0}` in catalog")]
    DuplicateApp(AppId),
}

/// Immutable registry of installable apps, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    entries: Vec<AppEntry>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate app ids.
    pub fn new(entries: Vec<AppEntry>) -> Result<Self, CatalogError> {
        for (index, entry) in entries.iter().enumerate() {
            if entries[..index].iter().any(|e| e.app_id == entry.app_id) {
                return Err(CatalogError::DuplicateApp(entry.app_id.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// Looks up an entry by app id.
    pub fn get(&self, app_id: &AppId) -> Option<&AppEntry> {
        self.entries.iter().find(|e| &e.app_id == app_id)
    }

    /// Whether `app_id` names an installed app.
    pub fn contains(&self, app_id: &AppId) -> bool {
        self.get(app_id).is_some()
    }

    /// All entries in launcher order.
    pub fn entries(&self) -> &[AppEntry] {
        &self.entries
    }

    /// The seven apps installed for the zoo field-trip lesson.
    pub fn field_trip() -> Self {
        let entries = vec![
            AppEntry::new(
                AppId::trusted("weather"),
                "Weather",
                "sun",
                AppCategory::Utility,
            ),
            AppEntry::new(
                AppId::trusted("safari"),
                "Browser",
                "compass",
                AppCategory::Utility,
            ),
            AppEntry::new(
                AppId::trusted("booking"),
                "Tickets",
                "ticket",
                AppCategory::Education,
            ),
            AppEntry::new(
                AppId::trusted("maps"),
                "Maps",
                "map-trifold",
                AppCategory::Utility,
            ),
            AppEntry::new(
                AppId::trusted("lens"),
                "Smart Lens",
                "camera",
                AppCategory::Education,
            ),
            AppEntry::new(
                AppId::trusted("notes"),
                "Notes",
                "note-pencil",
                AppCategory::Utility,
            ),
            AppEntry::new(
                AppId::trusted("photos"),
                "Photos",
                "image",
                AppCategory::Utility,
            ),
        ];
        Self::new(entries).expect("field trip catalog has unique ids")
    }
}
