//! Shell runtime state: running instances, focus, and stacking order.

use lesson_contract::{AppId, LaunchPosition};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

/// Base value for the stacking counter; the first window lands above it.
pub const Z_INDEX_BASE: u64 = 100;

/// Stable identifier for a running app instance, unique for the lifetime of
/// a [`ShellState`] and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProcessId(pub u64);

/// A live window/process entry in the shell. At most one instance exists per
/// app id at any time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningInstance {
    pub process_id: ProcessId,
    pub app_id: AppId,
    /// Strictly increases on every focus; greater means closer to the front.
    pub z_index: u64,
    pub minimized: bool,
    pub launch_position: Option<LaunchPosition>,
}

/// The full window-manager state for one shell session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellState {
    pub catalog: Catalog,
    pub running: Vec<RunningInstance>,
    /// App owning the front-most visible window, if any.
    pub active_app: Option<AppId>,
    pub(crate) next_process_id: u64,
    pub(crate) next_z_index: u64,
}

impl ShellState {
    /// Creates an empty shell over `catalog`.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            running: Vec::new(),
            active_app: None,
            next_process_id: 1,
            next_z_index: Z_INDEX_BASE + 1,
        }
    }

    /// Looks up a running instance by process id.
    pub fn instance(&self, process_id: ProcessId) -> Option<&RunningInstance> {
        self.running.iter().find(|i| i.process_id == process_id)
    }

    /// Looks up the singleton instance for an app, if running.
    pub fn instance_for_app(&self, app_id: &AppId) -> Option<&RunningInstance> {
        self.running.iter().find(|i| &i.app_id == app_id)
    }

    /// Whether `app_id` currently has a running instance.
    pub fn is_app_running(&self, app_id: &AppId) -> bool {
        self.instance_for_app(app_id).is_some()
    }

    /// The highest-z non-minimized instance, if any.
    pub fn front_most_visible(&self) -> Option<&RunningInstance> {
        self.running
            .iter()
            .filter(|i| !i.minimized)
            .max_by_key(|i| i.z_index)
    }

    pub(crate) fn allocate_process_id(&mut self) -> ProcessId {
        let id = ProcessId(self.next_process_id);
        self.next_process_id = self.next_process_id.saturating_add(1);
        id
    }

    pub(crate) fn allocate_z_index(&mut self) -> u64 {
        let z = self.next_z_index;
        self.next_z_index = self.next_z_index.saturating_add(1);
        z
    }

    pub(crate) fn recompute_active_app(&mut self) {
        self.active_app = self.front_most_visible().map(|i| i.app_id.clone());
    }
}
