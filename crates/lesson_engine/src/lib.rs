//! The guided-lesson progression engine.
//!
//! Tasks are statically authored in three phases; each task owns an ordered
//! list of steps, and a step may declare a structural trigger that
//! auto-completes it when a matching app event arrives. The engine is a pure
//! reducer over [`model::LessonState`]: callers dispatch [`reducer::LessonAction`]s
//! and execute the returned [`reducer::LessonEffect`]s (the only one with a
//! host obligation is the deferred phase advance). Derived progress views are
//! plain functions in [`views`], recomputed on demand.

pub mod content;
pub mod model;
pub mod reducer;
pub mod views;

pub use model::{
    ContentError, DialogueState, Inventory, InventoryEntry, LessonState, StepId, Task, TaskStatus,
    TaskStep, TaskId,
};
pub use reducer::{reduce_lesson, LessonAction, LessonEffect, ADVANCE_DELAY};
