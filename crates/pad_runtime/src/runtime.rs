//! The combined shell + lesson runtime facade.

use lesson_contract::{AppId, LaunchPosition, LessonScope, Mood, TriggerEvent};
use lesson_engine::content::field_trip_tasks;
use lesson_engine::{
    reduce_lesson, ContentError, LessonAction, LessonEffect, LessonState, StepId, Task, TaskId,
};
use shell_runtime::{
    reduce_shell, AppEntry, Catalog, CatalogError, ProcessId, ShellAction, ShellEffect, ShellState,
};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::scheduler::AdvanceScheduler;

/// Construction errors for a [`PadRuntime`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Content(#[from] ContentError),
}

/// One simulated tablet session: a window manager, a lesson engine, and the
/// deferred-advance scheduler wiring them together.
///
/// Construction requires a tokio runtime context because completed tasks arm
/// timers. Deferred advances arrive on an internal channel; call
/// [`PadRuntime::drain_deferred`] from a cooperative tick or await
/// [`PadRuntime::deferred_advance`] to apply them.
pub struct PadRuntime {
    shell: ShellState,
    lesson: LessonState,
    scheduler: AdvanceScheduler,
    deferred_rx: mpsc::UnboundedReceiver<LessonAction>,
}

impl PadRuntime {
    /// Builds a runtime over externally supplied app and task content.
    pub fn new(
        apps: Vec<AppEntry>,
        tasks: Vec<Task>,
        scope: LessonScope,
    ) -> Result<Self, RuntimeError> {
        let catalog = Catalog::new(apps)?;
        let lesson = LessonState::new(tasks, scope)?;
        let (tx, deferred_rx) = mpsc::unbounded_channel();
        Ok(Self {
            shell: ShellState::new(catalog),
            lesson,
            scheduler: AdvanceScheduler::new(tx),
            deferred_rx,
        })
    }

    /// Builds a runtime preloaded with the authored field-trip content.
    pub fn field_trip(scope: LessonScope) -> Self {
        Self::new(
            Catalog::field_trip().entries().to_vec(),
            field_trip_tasks(),
            scope,
        )
        .expect("authored field trip content is valid")
    }

    /// Opens an app, reusing a running instance when one exists.
    ///
    /// Returns the instance's process id, or `None` when `app_id` is not in
    /// the catalog. A fresh launch (not a refocus) raises the `app_open`
    /// lesson trigger.
    pub fn open_app(
        &mut self,
        app_id: AppId,
        launch_position: Option<LaunchPosition>,
    ) -> Option<ProcessId> {
        let effects = reduce_shell(
            &mut self.shell,
            ShellAction::OpenApp {
                app_id,
                launch_position,
            },
        );
        let mut opened = None;
        for effect in effects {
            match effect {
                ShellEffect::AppLaunched { process_id, app_id } => {
                    info!(app = %app_id, pid = process_id.0, "app launched");
                    opened = Some(process_id);
                    self.apply_lesson(LessonAction::CheckTrigger {
                        event: TriggerEvent::app_open(app_id),
                    });
                }
                ShellEffect::AppRefocused { process_id, app_id } => {
                    debug!(app = %app_id, pid = process_id.0, "app refocused");
                    opened = Some(process_id);
                }
            }
        }
        opened
    }

    /// Closes a running instance; unknown ids are ignored.
    pub fn close_app(&mut self, process_id: ProcessId) {
        reduce_shell(&mut self.shell, ShellAction::CloseApp { process_id });
    }

    /// Minimizes a running instance; unknown ids are ignored.
    pub fn minimize_app(&mut self, process_id: ProcessId) {
        reduce_shell(&mut self.shell, ShellAction::MinimizeApp { process_id });
    }

    /// Raises a running instance to the front; unknown ids are ignored.
    pub fn bring_to_front(&mut self, process_id: ProcessId) {
        reduce_shell(&mut self.shell, ShellAction::BringToFront { process_id });
    }

    /// Closes every running instance.
    pub fn close_all_apps(&mut self) {
        reduce_shell(&mut self.shell, ShellAction::CloseAllApps);
    }

    /// Whether `app_id` currently has a running instance.
    pub fn is_app_running(&self, app_id: &AppId) -> bool {
        self.shell.is_app_running(app_id)
    }

    /// Catalog metadata for an app, if installed.
    pub fn app_entry(&self, app_id: &AppId) -> Option<&AppEntry> {
        self.shell.catalog.get(app_id)
    }

    /// Announces an app event for trigger matching.
    pub fn announce(&mut self, event: TriggerEvent) {
        debug!(?event, "trigger event announced");
        self.apply_lesson(LessonAction::CheckTrigger { event });
    }

    /// Directly completes a named step (the bypass path).
    pub fn complete_task_step(&mut self, task_id: TaskId, step_id: StepId) {
        self.apply_lesson(LessonAction::CompleteStep { task_id, step_id });
    }

    /// Completes a task outright.
    pub fn complete_task(&mut self, task_id: TaskId) {
        self.apply_lesson(LessonAction::CompleteTask { task_id });
    }

    /// Shows companion dialogue on behalf of the UI.
    pub fn set_dialogue(&mut self, text: impl Into<String>, mood: Mood) {
        self.apply_lesson(LessonAction::SetDialogue {
            text: text.into(),
            mood,
        });
    }

    /// Hides the companion bubble.
    pub fn hide_bubble(&mut self) {
        self.apply_lesson(LessonAction::HideBubble);
    }

    /// Flips the guide panel flag.
    pub fn toggle_guide(&mut self) {
        self.apply_lesson(LessonAction::ToggleGuide);
    }

    /// Read-only window-manager state for rendering.
    pub fn shell(&self) -> &ShellState {
        &self.shell
    }

    /// Read-only lesson state for rendering and the view functions.
    pub fn lesson(&self) -> &LessonState {
        &self.lesson
    }

    /// Applies every deferred advance that has already fired. Returns the
    /// number applied. Non-blocking; call from a cooperative tick.
    pub fn drain_deferred(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(action) = self.deferred_rx.try_recv() {
            self.apply_lesson(action);
            applied += 1;
        }
        applied
    }

    /// Waits for the next deferred advance and applies it.
    pub async fn deferred_advance(&mut self) {
        if let Some(action) = self.deferred_rx.recv().await {
            self.apply_lesson(action);
        }
    }

    fn apply_lesson(&mut self, action: LessonAction) {
        if let LessonAction::AdvancePhase { phase } = &action {
            info!(phase = phase.number(), "deferred advance applied");
        }
        let effects = reduce_lesson(&mut self.lesson, action);
        for effect in effects {
            match effect {
                LessonEffect::ScheduleAdvance { phase, delay } => {
                    debug!(phase = phase.number(), ?delay, "advance scheduled");
                    self.scheduler.schedule(phase, delay);
                }
                LessonEffect::TaskCompleted { task_id } => {
                    info!(task = %task_id, "task completed");
                }
                LessonEffect::RewardGranted { item_id } => {
                    info!(item = %item_id, "reward granted");
                }
            }
        }
    }
}
