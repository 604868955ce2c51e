//! The authored zoo field-trip script: nine tasks across three phases.
//!
//! Content is a load-time constant. The first task of each phase is authored
//! in-progress so the unscoped overview shows one live task per phase; a
//! single-phase scope re-derives statuses at construction instead.

use lesson_contract::{AppId, Phase, RewardItem, RewardKind, Trigger, TriggerKind};

use crate::model::{StepId, Task, TaskId, TaskStatus, TaskStep};

fn step(id: &str, description: &str) -> TaskStep {
    TaskStep {
        id: StepId::new(id),
        description: description.to_string(),
        completed: false,
        trigger: None,
    }
}

fn triggered_step(id: &str, description: &str, trigger: Trigger) -> TaskStep {
    TaskStep {
        trigger: Some(trigger),
        ..step(id, description)
    }
}

fn reward(id: &str, name: &str, kind: RewardKind, description: &str) -> RewardItem {
    RewardItem {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        description: description.to_string(),
        image_url: None,
    }
}

/// The complete field-trip task list in authoring order.
pub fn field_trip_tasks() -> Vec<Task> {
    vec![
        // Phase one: plan and prepare before the visit.
        Task {
            id: TaskId::new("task_1"),
            phase: Phase::One,
            title: "Check Tomorrow's Weather".to_string(),
            description: "Open the Weather app, look up tomorrow's seaside forecast, \
                          and tell Wukong whether it will be cold by the water."
                .to_string(),
            status: TaskStatus::InProgress,
            required_app_id: Some(AppId::trusted("weather")),
            guide_text: "We're seeing the sea lion show by the shore tomorrow! Can you \
                         check the weather for me? It gets windy out there."
                .to_string(),
            complete_text: "Great work! Now I know exactly what to wear tomorrow."
                .to_string(),
            steps: vec![
                triggered_step(
                    "step_1_1",
                    "Open the Weather app",
                    Trigger::for_app(TriggerKind::AppOpen, AppId::trusted("weather")),
                ),
                step("step_1_2", "Read the temperature forecast"),
                triggered_step(
                    "step_1_3",
                    "Answer Wukong's question",
                    Trigger::with_value(TriggerKind::Answer, "warm"),
                ),
            ],
            reward: Some(reward(
                "weather_badge",
                "Weather Watcher",
                RewardKind::Achievement,
                "Looked up a real forecast before the trip.",
            )),
        },
        Task {
            id: TaskId::new("task_2"),
            phase: Phase::One,
            title: "Book the Tickets".to_string(),
            description: "Open the Tickets app, search for Xinpu Zoo, and reserve a \
                          student ticket."
                .to_string(),
            status: TaskStatus::Pending,
            required_app_id: Some(AppId::trusted("booking")),
            guide_text: "Weekends get crowded! Let's book ahead, and remember to pick \
                         the student discount."
                .to_string(),
            complete_text: "Tickets sorted! I can't wait to go.".to_string(),
            steps: vec![
                triggered_step(
                    "step_2_1",
                    "Open the Tickets app",
                    Trigger::for_app(TriggerKind::AppOpen, AppId::trusted("booking")),
                ),
                step("step_2_2", "Generate the e-ticket"),
            ],
            reward: Some(RewardItem {
                image_url: Some("/ticket.png".to_string()),
                ..reward(
                    "zoo_ticket",
                    "Zoo E-Ticket",
                    RewardKind::Ticket,
                    "Student admission to Xinpu Zoo.",
                )
            }),
        },
        Task {
            id: TaskId::new("task_3"),
            phase: Phase::One,
            title: "Plan the Journey".to_string(),
            description: "Open the Maps app and plan a route from here to Xinpu Zoo; \
                          the bus route will do."
                .to_string(),
            status: TaskStatus::Pending,
            required_app_id: Some(AppId::trusted("maps")),
            guide_text: "How do we get there from here? Find us a route, I want to \
                         arrive early!"
                .to_string(),
            complete_text: "Route planned! We'll follow it on the day. Off we go!"
                .to_string(),
            steps: vec![triggered_step(
                "step_3_1",
                "Finish planning a route",
                Trigger::of(TriggerKind::RouteComplete),
            )],
            reward: Some(reward(
                "route_map",
                "Travel Route",
                RewardKind::Map,
                "Bus route from the current position to the zoo.",
            )),
        },
        // Phase two: explore and discover at the zoo.
        Task {
            id: TaskId::new("task_4"),
            phase: Phase::Two,
            title: "Grab the Park Map".to_string(),
            description: "Open the Browser, visit the zoo's official site, and save \
                          the visitor map to the photo album."
                .to_string(),
            status: TaskStatus::InProgress,
            required_app_id: Some(AppId::trusted("safari")),
            guide_text: "We're inside! Check the official site for the animals and \
                         save the visitor map."
                .to_string(),
            complete_text: "Map saved! Now we can find every enclosure.".to_string(),
            steps: vec![triggered_step(
                "step_4_1",
                "Save the visitor map to the album",
                Trigger::of(TriggerKind::SaveToAlbum),
            )],
            reward: Some(RewardItem {
                image_url: Some("/zoo_map.png".to_string()),
                ..reward(
                    "zoo_guide",
                    "Visitor Map",
                    RewardKind::Map,
                    "Official map of Xinpu Zoo.",
                )
            }),
        },
        Task {
            id: TaskId::new("task_5"),
            phase: Phase::Two,
            title: "How Tall Is a Giraffe?".to_string(),
            description: "Use the browser's search box to look up the average height \
                          of a giraffe and the weight of an Asian elephant."
                .to_string(),
            status: TaskStatus::Pending,
            required_app_id: Some(AppId::trusted("safari")),
            guide_text: "Whoa, that giraffe is enormous! Exactly how tall do they \
                         get? And how heavy is the elephant? Search it!"
                .to_string(),
            complete_text: "So tall, and so heavy! We both learned something new."
                .to_string(),
            steps: vec![triggered_step(
                "step_5_1",
                "Run a keyword search",
                Trigger::of(TriggerKind::BrowserSearch),
            )],
            reward: None,
        },
        Task {
            id: TaskId::new("task_6"),
            phase: Phase::Two,
            title: "Name That Red Bird".to_string(),
            description: "Open the Smart Lens app and point it at the mysterious red \
                          birds to identify them."
                .to_string(),
            status: TaskStatus::Pending,
            required_app_id: Some(AppId::trusted("lens")),
            guide_text: "Look over there, a whole flock of red birds! What are they? \
                         Scan one with the Smart Lens!"
                .to_string(),
            complete_text: "Flamingos! They really do look like a living flame."
                .to_string(),
            steps: vec![triggered_step(
                "step_6_1",
                "Complete an AI identification",
                Trigger::of(TriggerKind::AiIdentify),
            )],
            reward: None,
        },
        // Phase three: research and share after the visit.
        Task {
            id: TaskId::new("task_7"),
            phase: Phase::Three,
            title: "Collect Favorite Animals".to_string(),
            description: "Find your favorite animals in the site's field guide and \
                          save their pictures to the album."
                .to_string(),
            status: TaskStatus::InProgress,
            required_app_id: Some(AppId::trusted("safari")),
            guide_text: "We met so many great animals today! Save pictures of the \
                         ones you liked best."
                .to_string(),
            complete_text: "What a collection! We can look through them any time."
                .to_string(),
            steps: vec![triggered_step(
                "step_7_1",
                "Save an animal photo",
                Trigger::of(TriggerKind::SaveAnimalPhoto),
            )],
            reward: None,
        },
        Task {
            id: TaskId::new("task_8"),
            phase: Phase::Three,
            title: "Research the Details".to_string(),
            description: "Look up a detailed profile of an animal and copy a passage \
                          of the text."
                .to_string(),
            status: TaskStatus::Pending,
            required_app_id: Some(AppId::trusted("safari")),
            guide_text: "Is the golden monkey a protected species? Find its profile \
                         and copy the facts down!"
                .to_string(),
            complete_text: "Copied! Next we'll paste it straight into our notes."
                .to_string(),
            steps: vec![triggered_step(
                "step_8_1",
                "Copy a text passage",
                Trigger::of(TriggerKind::CopyText),
            )],
            reward: None,
        },
        Task {
            id: TaskId::new("task_9"),
            phase: Phase::Three,
            title: "Build the Field Journal".to_string(),
            description: "Open the Notes app, create a \"My Zoo Trip\" note, paste \
                          the text, and add your animal pictures."
                .to_string(),
            status: TaskStatus::Pending,
            required_app_id: Some(AppId::trusted("notes")),
            guide_text: "Last step! Let's turn everything we learned today into a \
                         proper field journal."
                .to_string(),
            complete_text: "The journal is done! You're a true information explorer. \
                            Today was packed with discoveries!"
                .to_string(),
            steps: vec![triggered_step(
                "step_9_1",
                "Create a new note",
                Trigger::of(TriggerKind::CreateNote),
            )],
            reward: Some(reward(
                "master_badge",
                "Information Explorer",
                RewardKind::Achievement,
                "Finished every learning task on the trip.",
            )),
        },
    ]
}
