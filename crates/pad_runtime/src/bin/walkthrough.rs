//! Headless end-to-end walkthrough of the authored field trip.
//!
//! Drives every task of the nine-task script through the real runtime,
//! waiting out each deferred phase advance. Run with
//! `RUST_LOG=debug cargo run --bin walkthrough` for the full trace.

use lesson_contract::{AppId, LessonScope, TriggerEvent, TriggerKind};
use lesson_engine::{views, StepId, TaskId};
use pad_runtime::PadRuntime;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut pad = PadRuntime::field_trip(LessonScope::All);
    info!(
        lesson = views::lesson_title(pad.lesson()),
        tasks = pad.lesson().tasks.len(),
        "field trip starting"
    );

    // Phase one: plan and prepare.
    pad.open_app(AppId::trusted("weather"), None);
    pad.complete_task_step(TaskId::new("task_1"), StepId::new("step_1_2"));
    pad.announce(TriggerEvent::with_value(TriggerKind::Answer, "warm"));
    pad.deferred_advance().await;

    pad.open_app(AppId::trusted("booking"), None);
    pad.complete_task_step(TaskId::new("task_2"), StepId::new("step_2_2"));
    pad.deferred_advance().await;

    pad.open_app(AppId::trusted("maps"), None);
    pad.announce(TriggerEvent::of(TriggerKind::RouteComplete));
    pad.deferred_advance().await;

    // Phase two: explore the zoo.
    pad.open_app(AppId::trusted("safari"), None);
    pad.announce(TriggerEvent::of(TriggerKind::SaveToAlbum));
    pad.deferred_advance().await;
    pad.announce(TriggerEvent::of(TriggerKind::BrowserSearch));
    pad.deferred_advance().await;
    pad.open_app(AppId::trusted("lens"), None);
    pad.announce(TriggerEvent::of(TriggerKind::AiIdentify));
    pad.deferred_advance().await;

    // Phase three: research and share.
    pad.announce(TriggerEvent::of(TriggerKind::SaveAnimalPhoto));
    pad.deferred_advance().await;
    pad.announce(TriggerEvent::of(TriggerKind::CopyText));
    pad.deferred_advance().await;
    pad.open_app(AppId::trusted("notes"), None);
    pad.announce(TriggerEvent::of(TriggerKind::CreateNote));
    pad.deferred_advance().await;

    let lesson = pad.lesson();
    info!(
        progress = views::progress_percent(lesson),
        all_completed = views::is_all_completed(lesson),
        dialogue = %lesson.dialogue.text,
        "field trip finished"
    );
    for entry in lesson.inventory.entries() {
        info!(
            item = %entry.item.id,
            name = %entry.item.name,
            obtained_at = %entry.obtained_at,
            "inventory"
        );
    }
    pad.close_all_apps();
}
