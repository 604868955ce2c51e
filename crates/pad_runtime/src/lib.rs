//! Host layer tying the shell window manager and the lesson engine into one
//! constructed runtime object.
//!
//! [`PadRuntime`] owns both state machines, routes app-launch effects into
//! lesson triggers, and executes the engine's deferred phase advances on a
//! cancellable tokio timer. No global state: build as many independent
//! runtimes as needed and drop them for clean teardown.

mod runtime;
mod scheduler;

pub use runtime::{PadRuntime, RuntimeError};
