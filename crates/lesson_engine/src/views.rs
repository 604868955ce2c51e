//! Derived read views over [`LessonState`].
//!
//! These are plain functions recomputed on demand from the current state
//! snapshot; nothing here caches or subscribes.

use lesson_contract::Phase;

use crate::model::{LessonState, Task, TaskStatus};

/// Number of completed tasks across all phases.
pub fn completed_count(state: &LessonState) -> usize {
    state
        .tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .count()
}

/// Overall completion percentage, rounded to the nearest whole number.
pub fn progress_percent(state: &LessonState) -> u8 {
    percent(completed_count(state), state.tasks.len())
}

/// The current task: first in-progress task in authoring order.
pub fn current_task(state: &LessonState) -> Option<&Task> {
    state
        .tasks
        .iter()
        .find(|t| t.status == TaskStatus::InProgress)
}

/// Index of the current task, falling back to the last task when nothing is
/// in progress (the end-of-lesson display case).
pub fn current_task_index(state: &LessonState) -> usize {
    state
        .tasks
        .iter()
        .position(|t| t.status == TaskStatus::InProgress)
        .unwrap_or(state.tasks.len().saturating_sub(1))
}

/// Every in-progress task; unscoped, each phase may contribute one.
pub fn in_progress_tasks(state: &LessonState) -> Vec<&Task> {
    state
        .tasks
        .iter()
        .filter(|t| t.status == TaskStatus::InProgress)
        .collect()
}

/// Tasks of one phase in authoring order.
pub fn tasks_in_phase(state: &LessonState, phase: Phase) -> Vec<&Task> {
    state.tasks.iter().filter(|t| t.phase == phase).collect()
}

/// All tasks grouped by phase, in phase order.
pub fn tasks_by_phase(state: &LessonState) -> [(Phase, Vec<&Task>); 3] {
    Phase::ALL.map(|phase| (phase, tasks_in_phase(state, phase)))
}

/// Phase of the current task, defaulting to the first phase.
pub fn current_phase(state: &LessonState) -> Phase {
    current_task(state).map(|t| t.phase).unwrap_or(Phase::One)
}

/// Whether every task in every phase is completed.
pub fn is_all_completed(state: &LessonState) -> bool {
    state
        .tasks
        .iter()
        .all(|t| t.status == TaskStatus::Completed)
}

/// Tasks visible under the state's lesson scope.
pub fn scoped_tasks(state: &LessonState) -> Vec<&Task> {
    state
        .tasks
        .iter()
        .filter(|t| state.scope.visible(t.phase))
        .collect()
}

/// Completed count restricted to the scope.
pub fn scoped_completed_count(state: &LessonState) -> usize {
    scoped_tasks(state)
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .count()
}

/// Completion percentage restricted to the scope.
pub fn scoped_progress_percent(state: &LessonState) -> u8 {
    percent(scoped_completed_count(state), scoped_tasks(state).len())
}

/// First in-progress task among the scope-visible ones.
pub fn scoped_current_task(state: &LessonState) -> Option<&Task> {
    scoped_tasks(state)
        .into_iter()
        .find(|t| t.status == TaskStatus::InProgress)
}

/// Whether every scope-visible task is completed.
pub fn scoped_is_completed(state: &LessonState) -> bool {
    scoped_tasks(state)
        .iter()
        .all(|t| t.status == TaskStatus::Completed)
}

/// Header title for the active scope.
pub fn lesson_title(state: &LessonState) -> &'static str {
    state.scope.title()
}

fn percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::content::field_trip_tasks;
    use crate::model::TaskId;
    use crate::reducer::{reduce_lesson, LessonAction};
    use lesson_contract::LessonScope;

    fn unscoped() -> LessonState {
        LessonState::new(field_trip_tasks(), LessonScope::All).expect("valid content")
    }

    fn complete(state: &mut LessonState, id: &str) {
        reduce_lesson(
            state,
            LessonAction::CompleteTask {
                task_id: TaskId::new(id),
            },
        );
    }

    #[test]
    fn progress_rounds_to_the_nearest_percent() {
        let mut state = unscoped();
        assert_eq!(progress_percent(&state), 0);
        complete(&mut state, "task_1");
        // 1/9 rounds to 11.
        assert_eq!(progress_percent(&state), 11);
        complete(&mut state, "task_2");
        assert_eq!(progress_percent(&state), 22);
    }

    #[test]
    fn current_task_is_first_in_progress_by_authoring_order() {
        let mut state = unscoped();
        assert_eq!(
            current_task(&state).map(|t| t.id.clone()),
            Some(TaskId::new("task_1"))
        );
        assert_eq!(current_phase(&state), Phase::One);

        complete(&mut state, "task_1");
        // task_4 and task_7 remain in progress; task_4 comes first.
        assert_eq!(
            current_task(&state).map(|t| t.id.clone()),
            Some(TaskId::new("task_4"))
        );
        assert_eq!(current_phase(&state), Phase::Two);
    }

    #[test]
    fn current_task_index_falls_back_to_the_last_task() {
        let mut state = unscoped();
        let ids: Vec<TaskId> = state.tasks.iter().map(|t| t.id.clone()).collect();
        for id in ids {
            reduce_lesson(&mut state, LessonAction::CompleteTask { task_id: id });
        }
        assert_eq!(current_task(&state), None);
        assert_eq!(current_task_index(&state), 8);
        assert!(is_all_completed(&state));
        assert_eq!(progress_percent(&state), 100);
    }

    #[test]
    fn tasks_group_by_phase_in_order() {
        let state = unscoped();
        let grouped = tasks_by_phase(&state);
        assert_eq!(grouped[0].1.len(), 3);
        assert_eq!(grouped[1].1.len(), 3);
        assert_eq!(grouped[2].1.len(), 3);
        assert_eq!(grouped[2].0, Phase::Three);
        assert_eq!(in_progress_tasks(&state).len(), 3);
    }

    #[test]
    fn scoped_views_only_see_the_scoped_phase() {
        let mut state = LessonState::new(field_trip_tasks(), LessonScope::Single(Phase::Two))
            .expect("valid content");
        assert_eq!(scoped_tasks(&state).len(), 3);
        assert_eq!(lesson_title(&state), Phase::Two.title());
        assert_eq!(
            scoped_current_task(&state).map(|t| t.id.clone()),
            Some(TaskId::new("task_4"))
        );

        for id in ["task_4", "task_5", "task_6"] {
            complete(&mut state, id);
        }
        assert_eq!(scoped_progress_percent(&state), 100);
        assert!(scoped_is_completed(&state));
        // The full lesson is not complete, only the scoped slice.
        assert!(!is_all_completed(&state));
        assert_eq!(completed_count(&state), 3);
        assert_eq!(scoped_completed_count(&state), 3);
    }
}
