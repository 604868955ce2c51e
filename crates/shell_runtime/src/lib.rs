//! Window/process management for the simulated tablet shell.
//!
//! The shell tracks which app instances are "running", which one is active,
//! and their front-to-back stacking order. State transitions go through the
//! reducer in [`reducer`]; rendering layers hold a [`model::ShellState`] and
//! treat it as read-only between dispatches.

pub mod catalog;
pub mod model;
pub mod reducer;

pub use catalog::{AppCategory, AppEntry, Catalog, CatalogError};
pub use model::{ProcessId, RunningInstance, ShellState};
pub use reducer::{reduce_shell, ShellAction, ShellEffect};
