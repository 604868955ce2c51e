//! Integration tests driving the combined shell + lesson runtime the way the
//! UI layer would, with a paused tokio clock standing in for real delays.

use std::time::Duration;

use lesson_contract::{AppId, LessonScope, Phase, TriggerEvent, TriggerKind};
use lesson_engine::{views, StepId, TaskId, TaskStatus};
use pad_runtime::PadRuntime;
use pretty_assertions::assert_eq;
use shell_runtime::ProcessId;

fn status(pad: &PadRuntime, id: &str) -> TaskStatus {
    pad.lesson()
        .task(&TaskId::new(id))
        .expect("task exists")
        .status
}

#[tokio::test(start_paused = true)]
async fn opening_an_app_twice_reuses_the_singleton_instance() {
    let mut pad = PadRuntime::field_trip(LessonScope::All);
    let first = pad.open_app(AppId::trusted("weather"), None);
    let second = pad.open_app(AppId::trusted("weather"), None);
    assert_eq!(first, Some(ProcessId(1)));
    assert_eq!(second, first);
    assert_eq!(pad.shell().running.len(), 1);
    assert!(pad.is_app_running(&AppId::trusted("weather")));
}

#[tokio::test(start_paused = true)]
async fn opening_an_unknown_app_returns_none() {
    let mut pad = PadRuntime::field_trip(LessonScope::All);
    assert_eq!(pad.open_app(AppId::trusted("settings"), None), None);
    assert!(pad.shell().running.is_empty());
}

#[tokio::test(start_paused = true)]
async fn full_weather_task_scenario_with_deferred_promotion() {
    let mut pad = PadRuntime::field_trip(LessonScope::All);

    // Launch completes step_1_1 through the app_open trigger.
    assert_eq!(
        pad.open_app(AppId::trusted("weather"), None),
        Some(ProcessId(1))
    );
    // Bypass path for the read-the-forecast step.
    pad.complete_task_step(TaskId::new("task_1"), StepId::new("step_1_2"));
    assert_eq!(status(&pad, "task_1"), TaskStatus::InProgress);

    // The answer trigger completes the final step and the whole task.
    pad.announce(TriggerEvent::with_value(TriggerKind::Answer, "warm"));
    assert_eq!(status(&pad, "task_1"), TaskStatus::Completed);
    assert!(pad.lesson().inventory.contains("weather_badge"));
    assert_eq!(status(&pad, "task_2"), TaskStatus::Pending);

    // Nothing arrives before the delay elapses.
    tokio::time::sleep(Duration::from_millis(1900)).await;
    assert_eq!(pad.drain_deferred(), 0);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(pad.drain_deferred(), 1);
    assert_eq!(status(&pad, "task_2"), TaskStatus::InProgress);
    let guide = pad
        .lesson()
        .task(&TaskId::new("task_2"))
        .expect("task_2")
        .guide_text
        .clone();
    assert_eq!(pad.lesson().dialogue.text, guide);
}

#[tokio::test(start_paused = true)]
async fn a_second_completion_in_the_same_phase_replaces_the_pending_advance() {
    let mut pad = PadRuntime::field_trip(LessonScope::All);
    pad.complete_task(TaskId::new("task_1"));

    tokio::time::sleep(Duration::from_millis(1000)).await;
    pad.complete_task(TaskId::new("task_2"));

    // The first timer would have fired at t=2000; it was replaced.
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(pad.drain_deferred(), 0);
    assert_eq!(status(&pad, "task_3"), TaskStatus::Pending);

    // The replacement fires at t=3000.
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(pad.drain_deferred(), 1);
    assert_eq!(status(&pad, "task_3"), TaskStatus::InProgress);
}

#[tokio::test(start_paused = true)]
async fn refocusing_a_running_app_does_not_raise_app_open() {
    let mut pad = PadRuntime::field_trip(LessonScope::Single(Phase::One));
    pad.complete_task(TaskId::new("task_1"));

    // task_2 is still pending, so this launch's trigger finds no match.
    pad.open_app(AppId::trusted("booking"), None);
    tokio::time::sleep(Duration::from_millis(2100)).await;
    assert_eq!(pad.drain_deferred(), 1);
    assert_eq!(status(&pad, "task_2"), TaskStatus::InProgress);

    // Reopening is a refocus, not a launch; the step stays incomplete.
    pad.open_app(AppId::trusted("booking"), None);
    let step_done = pad
        .lesson()
        .task(&TaskId::new("task_2"))
        .expect("task_2")
        .steps[0]
        .completed;
    assert!(!step_done);
}

#[tokio::test(start_paused = true)]
async fn scoped_runtime_initializes_only_its_phase() {
    let pad = PadRuntime::field_trip(LessonScope::Single(Phase::Two));
    assert_eq!(status(&pad, "task_4"), TaskStatus::InProgress);
    for id in ["task_1", "task_2", "task_3", "task_5", "task_6", "task_7", "task_8", "task_9"] {
        assert_eq!(status(&pad, id), TaskStatus::Pending, "{id} should be pending");
    }
    assert_eq!(views::scoped_tasks(pad.lesson()).len(), 3);
}

#[tokio::test(start_paused = true)]
async fn shell_surface_recomputes_the_active_app() {
    let mut pad = PadRuntime::field_trip(LessonScope::All);
    let weather = pad
        .open_app(AppId::trusted("weather"), None)
        .expect("weather pid");
    let booking = pad
        .open_app(AppId::trusted("booking"), None)
        .expect("booking pid");

    pad.minimize_app(booking);
    assert_eq!(pad.shell().active_app, Some(AppId::trusted("weather")));

    pad.bring_to_front(booking);
    assert_eq!(pad.shell().active_app, Some(AppId::trusted("booking")));

    pad.close_app(booking);
    assert_eq!(pad.shell().active_app, Some(AppId::trusted("weather")));

    pad.close_app(weather);
    assert_eq!(pad.shell().active_app, None);
    pad.close_all_apps();
    assert!(pad.shell().running.is_empty());
}

#[tokio::test(start_paused = true)]
async fn finishing_every_task_reaches_the_global_congratulations() {
    let mut pad = PadRuntime::field_trip(LessonScope::All);
    let ids: Vec<TaskId> = pad.lesson().tasks.iter().map(|t| t.id.clone()).collect();
    for id in ids {
        pad.complete_task(id);
    }
    assert!(views::is_all_completed(pad.lesson()));
    assert_eq!(views::progress_percent(pad.lesson()), 100);

    // Three phase timers are pending, one per phase; every phase is
    // exhausted, and the last applied advance lands on the global message.
    tokio::time::sleep(Duration::from_millis(2100)).await;
    assert_eq!(pad.drain_deferred(), 3);
    assert!(pad.lesson().dialogue.text.contains("every task is finished"));
}
