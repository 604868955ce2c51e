//! Reducer actions, side-effect intents, and transition logic for the shell
//! window manager.
//!
//! Every id-keyed action is a safe no-op when its target is not found; the
//! reducer never errors at runtime. The process-id and z-index counters are
//! monotonic for the life of the state value and are never reset, so the
//! front-to-back order is always strict and stable.

use lesson_contract::{AppId, LaunchPosition};

use crate::model::{ProcessId, RunningInstance, ShellState};

/// Actions accepted by [`reduce_shell`] to mutate [`ShellState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellAction {
    /// Open an app, reusing its existing instance if one is running.
    OpenApp {
        /// App to open.
        app_id: AppId,
        /// Optional desktop position for a newly launched window.
        launch_position: Option<LaunchPosition>,
    },
    /// Close a running instance.
    CloseApp {
        /// Instance to close.
        process_id: ProcessId,
    },
    /// Minimize a running instance.
    MinimizeApp {
        /// Instance to minimize.
        process_id: ProcessId,
    },
    /// Raise an instance to the front, un-minimizing it.
    BringToFront {
        /// Instance to raise.
        process_id: ProcessId,
    },
    /// Close every running instance.
    CloseAllApps,
}

/// Side-effect intents emitted by [`reduce_shell`] for the host to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEffect {
    /// A new instance was created. The host raises the `app_open` lesson
    /// trigger from this effect.
    AppLaunched {
        process_id: ProcessId,
        app_id: AppId,
    },
    /// An existing instance was reused by an open request.
    AppRefocused {
        process_id: ProcessId,
        app_id: AppId,
    },
}

/// Applies a [`ShellAction`] to the shell state and collects side effects.
pub fn reduce_shell(state: &mut ShellState, action: ShellAction) -> Vec<ShellEffect> {
    let mut effects = Vec::new();
    match action {
        ShellAction::OpenApp {
            app_id,
            launch_position,
        } => {
            if let Some(existing) = state.instance_for_app(&app_id) {
                let process_id = existing.process_id;
                bring_to_front_internal(state, process_id);
                effects.push(ShellEffect::AppRefocused { process_id, app_id });
            } else if state.catalog.contains(&app_id) {
                let process_id = state.allocate_process_id();
                let z_index = state.allocate_z_index();
                state.running.push(RunningInstance {
                    process_id,
                    app_id: app_id.clone(),
                    z_index,
                    minimized: false,
                    launch_position,
                });
                state.active_app = Some(app_id.clone());
                effects.push(ShellEffect::AppLaunched { process_id, app_id });
            }
            // Unknown app id: no instance, no effect.
        }
        ShellAction::CloseApp { process_id } => {
            let before = state.running.len();
            state.running.retain(|i| i.process_id != process_id);
            if state.running.len() != before {
                state.recompute_active_app();
            }
        }
        ShellAction::MinimizeApp { process_id } => {
            if let Some(instance) = state
                .running
                .iter_mut()
                .find(|i| i.process_id == process_id)
            {
                instance.minimized = true;
                state.recompute_active_app();
            }
        }
        ShellAction::BringToFront { process_id } => {
            bring_to_front_internal(state, process_id);
        }
        ShellAction::CloseAllApps => {
            state.running.clear();
            state.active_app = None;
        }
    }
    effects
}

/// Raises `process_id` with a fresh strictly-greater z-index, clearing its
/// minimized flag and marking its app active. No-op if not found.
fn bring_to_front_internal(state: &mut ShellState, process_id: ProcessId) {
    let Some(index) = state
        .running
        .iter()
        .position(|i| i.process_id == process_id)
    else {
        return;
    };
    let z_index = state.allocate_z_index();
    let instance = &mut state.running[index];
    instance.z_index = z_index;
    instance.minimized = false;
    state.active_app = Some(instance.app_id.clone());
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog::Catalog;

    fn shell() -> ShellState {
        ShellState::new(Catalog::field_trip())
    }

    fn open(state: &mut ShellState, app: &str) -> Option<ProcessId> {
        let effects = reduce_shell(
            state,
            ShellAction::OpenApp {
                app_id: AppId::trusted(app),
                launch_position: None,
            },
        );
        effects.first().map(|effect| match effect {
            ShellEffect::AppLaunched { process_id, .. }
            | ShellEffect::AppRefocused { process_id, .. } => *process_id,
        })
    }

    #[test]
    fn opening_an_app_allocates_process_id_one() {
        let mut state = shell();
        assert_eq!(open(&mut state, "weather"), Some(ProcessId(1)));
        assert_eq!(state.active_app, Some(AppId::trusted("weather")));
        assert_eq!(state.running.len(), 1);
    }

    #[test]
    fn second_open_reuses_the_singleton_instance() {
        let mut state = shell();
        let first = open(&mut state, "weather");
        let effects = reduce_shell(
            &mut state,
            ShellAction::OpenApp {
                app_id: AppId::trusted("weather"),
                launch_position: None,
            },
        );
        assert_eq!(
            effects,
            vec![ShellEffect::AppRefocused {
                process_id: first.expect("weather pid"),
                app_id: AppId::trusted("weather"),
            }]
        );
        assert_eq!(state.running.len(), 1);
    }

    #[test]
    fn reopening_a_minimized_app_restores_and_raises_it() {
        let mut state = shell();
        let weather = open(&mut state, "weather").expect("weather pid");
        open(&mut state, "booking");
        reduce_shell(&mut state, ShellAction::MinimizeApp { process_id: weather });

        open(&mut state, "weather");
        let instance = state.instance(weather).expect("weather instance");
        assert!(!instance.minimized);
        assert_eq!(state.active_app, Some(AppId::trusted("weather")));
        assert_eq!(state.front_most_visible().map(|i| i.process_id), Some(weather));
    }

    #[test]
    fn unknown_app_id_is_ignored() {
        let mut state = shell();
        assert_eq!(open(&mut state, "settings"), None);
        assert!(state.running.is_empty());
        assert_eq!(state.active_app, None);
    }

    #[test]
    fn z_index_strictly_increases_across_focus_changes() {
        let mut state = shell();
        let weather = open(&mut state, "weather").expect("weather pid");
        let booking = open(&mut state, "booking").expect("booking pid");
        reduce_shell(&mut state, ShellAction::BringToFront { process_id: weather });
        reduce_shell(&mut state, ShellAction::BringToFront { process_id: booking });
        reduce_shell(&mut state, ShellAction::BringToFront { process_id: weather });

        let weather_z = state.instance(weather).expect("weather").z_index;
        let booking_z = state.instance(booking).expect("booking").z_index;
        assert!(weather_z > booking_z);
        assert_eq!(state.active_app, Some(AppId::trusted("weather")));
    }

    #[test]
    fn closing_the_active_app_promotes_the_next_front_most() {
        let mut state = shell();
        let weather = open(&mut state, "weather").expect("weather pid");
        let booking = open(&mut state, "booking").expect("booking pid");
        open(&mut state, "maps");
        reduce_shell(&mut state, ShellAction::BringToFront { process_id: booking });

        let maps = state
            .instance_for_app(&AppId::trusted("maps"))
            .expect("maps instance")
            .process_id;
        reduce_shell(&mut state, ShellAction::CloseApp { process_id: booking });
        assert_eq!(state.active_app, Some(AppId::trusted("maps")));

        reduce_shell(&mut state, ShellAction::CloseApp { process_id: maps });
        assert_eq!(state.active_app, Some(AppId::trusted("weather")));

        reduce_shell(&mut state, ShellAction::CloseApp { process_id: weather });
        assert_eq!(state.active_app, None);
    }

    #[test]
    fn minimizing_the_active_app_activates_the_next_visible_instance() {
        let mut state = shell();
        open(&mut state, "weather");
        let booking = open(&mut state, "booking").expect("booking pid");
        reduce_shell(&mut state, ShellAction::MinimizeApp { process_id: booking });
        assert_eq!(state.active_app, Some(AppId::trusted("weather")));

        let weather = state
            .instance_for_app(&AppId::trusted("weather"))
            .expect("weather instance")
            .process_id;
        reduce_shell(&mut state, ShellAction::MinimizeApp { process_id: weather });
        assert_eq!(state.active_app, None);
        assert_eq!(state.running.len(), 2);
    }

    #[test]
    fn close_all_clears_running_set_but_keeps_counters() {
        let mut state = shell();
        open(&mut state, "weather");
        open(&mut state, "booking");
        reduce_shell(&mut state, ShellAction::CloseAllApps);
        assert!(state.running.is_empty());
        assert_eq!(state.active_app, None);

        // Process ids are never reused, even after a full close.
        assert_eq!(open(&mut state, "maps"), Some(ProcessId(3)));
    }

    #[test]
    fn actions_on_unknown_process_ids_are_no_ops() {
        let mut state = shell();
        open(&mut state, "weather");
        let before = state.clone();
        reduce_shell(&mut state, ShellAction::CloseApp { process_id: ProcessId(99) });
        reduce_shell(&mut state, ShellAction::MinimizeApp { process_id: ProcessId(99) });
        reduce_shell(&mut state, ShellAction::BringToFront { process_id: ProcessId(99) });
        assert_eq!(state, before);
    }
}
