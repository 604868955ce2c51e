//! Reducer actions, side-effect intents, and transition logic for the
//! lesson progression engine.
//!
//! Every id-keyed action is a safe no-op when its target is missing or the
//! transition has already happened; task status never moves backward. The
//! only effect with a host obligation is [`LessonEffect::ScheduleAdvance`]:
//! the reducer does not sleep, it asks the host to dispatch
//! [`LessonAction::AdvancePhase`] after the delay.

use std::time::Duration;

use lesson_contract::{Mood, Phase, TriggerEvent};

use crate::model::{LessonState, StepId, TaskId, TaskStatus};

/// Pause between completing a task and promoting the next one in its phase.
pub const ADVANCE_DELAY: Duration = Duration::from_millis(2000);

/// Actions accepted by [`reduce_lesson`] to mutate [`LessonState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonAction {
    /// Directly complete a named step (the bypass path for apps that know
    /// the exact step id).
    CompleteStep { task_id: TaskId, step_id: StepId },
    /// Complete a task outright, force-completing its remaining steps.
    CompleteTask { task_id: TaskId },
    /// Match an app event against every scope-visible in-progress task.
    CheckTrigger { event: TriggerEvent },
    /// Deferred continuation after a completed task's delay: promote the
    /// next pending task of `phase` or announce the phase/lesson finish.
    AdvancePhase { phase: Phase },
    /// Explicit UI request to show companion dialogue.
    SetDialogue { text: String, mood: Mood },
    /// Explicit UI request to hide the companion bubble.
    HideBubble,
    /// Explicit UI request to flip the guide panel flag.
    ToggleGuide,
}

/// Side-effect intents emitted by [`reduce_lesson`] for the host to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonEffect {
    /// Dispatch `AdvancePhase { phase }` after `delay` without blocking.
    ScheduleAdvance { phase: Phase, delay: Duration },
    /// A task completed (emitted once per task).
    TaskCompleted { task_id: TaskId },
    /// A reward entered the inventory (emitted once per item id).
    RewardGranted { item_id: String },
}

/// Applies a [`LessonAction`] to the lesson state and collects side effects.
pub fn reduce_lesson(state: &mut LessonState, action: LessonAction) -> Vec<LessonEffect> {
    let mut effects = Vec::new();
    match action {
        LessonAction::CompleteStep { task_id, step_id } => {
            let Some(task_index) = state.tasks.iter().position(|t| t.id == task_id) else {
                return effects;
            };
            let task = &mut state.tasks[task_index];
            let Some(step) = task.steps.iter_mut().find(|s| s.id == step_id) else {
                return effects;
            };
            step.completed = true;
            if task.steps.iter().all(|s| s.completed) {
                complete_task_at(state, task_index, &mut effects);
            }
        }
        LessonAction::CompleteTask { task_id } => {
            if let Some(task_index) = state.tasks.iter().position(|t| t.id == task_id) {
                complete_task_at(state, task_index, &mut effects);
            }
        }
        LessonAction::CheckTrigger { event } => {
            // Deterministic order: tasks in authoring order, steps in list
            // order, no early exit after the first match.
            for task_index in 0..state.tasks.len() {
                if !state.scope.visible(state.tasks[task_index].phase) {
                    continue;
                }
                if state.tasks[task_index].status != TaskStatus::InProgress {
                    continue;
                }
                for step_index in 0..state.tasks[task_index].steps.len() {
                    let step = &state.tasks[task_index].steps[step_index];
                    if step.completed {
                        continue;
                    }
                    let Some(trigger) = &step.trigger else {
                        continue;
                    };
                    if !trigger.matches(&event) {
                        continue;
                    }
                    state.tasks[task_index].steps[step_index].completed = true;
                    if state.tasks[task_index].steps.iter().all(|s| s.completed) {
                        complete_task_at(state, task_index, &mut effects);
                    }
                }
            }
        }
        LessonAction::AdvancePhase { phase } => {
            advance_phase(state, phase);
        }
        LessonAction::SetDialogue { text, mood } => {
            state.dialogue.set(text, mood);
        }
        LessonAction::HideBubble => {
            state.dialogue.bubble_visible = false;
        }
        LessonAction::ToggleGuide => {
            state.dialogue.guide_open = !state.dialogue.guide_open;
        }
    }
    effects
}

/// Completes the task at `task_index` unless it already is completed:
/// force-completes its steps, emits the completion dialogue, grants the
/// reward once, and schedules the deferred phase advance.
fn complete_task_at(state: &mut LessonState, task_index: usize, effects: &mut Vec<LessonEffect>) {
    let task = &mut state.tasks[task_index];
    if task.status == TaskStatus::Completed {
        return;
    }
    task.status = TaskStatus::Completed;
    for step in &mut task.steps {
        step.completed = true;
    }
    let phase = task.phase;
    let task_id = task.id.clone();
    let complete_text = task.complete_text.clone();
    let reward = task.reward.clone();

    state.dialogue.set(complete_text, Mood::Excited);
    effects.push(LessonEffect::TaskCompleted { task_id });
    if let Some(item) = reward {
        let item_id = item.id.clone();
        if state.inventory.grant(item) {
            effects.push(LessonEffect::RewardGranted { item_id });
        }
    }
    effects.push(LessonEffect::ScheduleAdvance {
        phase,
        delay: ADVANCE_DELAY,
    });
}

fn advance_phase(state: &mut LessonState, phase: Phase) {
    if let Some(task) = state
        .tasks
        .iter_mut()
        .find(|t| t.phase == phase && t.status == TaskStatus::Pending)
    {
        task.status = TaskStatus::InProgress;
        let guide_text = task.guide_text.clone();
        state.dialogue.set(guide_text, Mood::Normal);
        return;
    }
    let all_completed = state
        .tasks
        .iter()
        .all(|t| t.status == TaskStatus::Completed);
    if all_completed {
        state.dialogue.set(
            "Congratulations, every task is finished! You're officially an \
             information whiz!",
            Mood::Happy,
        );
    } else {
        state.dialogue.set(
            format!("Fantastic! Every task in \"{}\" is done!", phase.title()),
            Mood::Happy,
        );
    }
}
