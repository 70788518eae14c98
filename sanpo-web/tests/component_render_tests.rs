use futures::executor::block_on;
use sanpo_core::{MoodKey, WalkLogEntry};
use sanpo_web::app::AppLayout;
use sanpo_web::components::log_list::WalkLogList;
use sanpo_web::components::notice::{Notice, NoticeBanner};
use sanpo_web::components::walk_form::WalkForm;
use yew::{AttrValue, Callback, LocalServerRenderer};

fn entry(date: &str, mood: &str, minutes: u64) -> WalkLogEntry {
    WalkLogEntry {
        date: date.to_string(),
        mood: mood.to_string(),
        distance_km: 3.0,
        duration_minutes: minutes,
    }
}

#[test]
fn walk_form_offers_every_mood_and_action() {
    let props = sanpo_web::components::walk_form::Props {
        mood: MoodKey::Adventure,
        distance: AttrValue::from("4.5"),
        busy: false,
        on_mood_change: Callback::noop(),
        on_distance_change: Callback::noop(),
        on_start: Callback::noop(),
        on_return: Callback::noop(),
        on_finish: Callback::noop(),
    };
    let html = block_on(
        LocalServerRenderer::<WalkForm>::with_props(props)
            .hydratable(false)
            .render(),
    );
    for mood in MoodKey::ALL {
        assert!(html.contains(&format!("value=\"{}\"", mood.as_str())));
    }
    assert!(html.contains("Start walk"));
    assert!(html.contains("Different way home"));
    assert!(html.contains("Finish walk"));
}

#[test]
fn busy_form_disables_actions() {
    let props = sanpo_web::components::walk_form::Props {
        mood: MoodKey::Relax,
        distance: AttrValue::from("2"),
        busy: true,
        on_mood_change: Callback::noop(),
        on_distance_change: Callback::noop(),
        on_start: Callback::noop(),
        on_return: Callback::noop(),
        on_finish: Callback::noop(),
    };
    let html = block_on(
        LocalServerRenderer::<WalkForm>::with_props(props)
            .hydratable(false)
            .render(),
    );
    assert_eq!(html.matches("disabled").count(), 3);
}

#[test]
fn log_list_shows_entries_in_given_order() {
    let props = sanpo_web::components::log_list::Props {
        entries: vec![
            entry("2024/06/02 18:10", "adventure", 58),
            entry("2024/06/01 07:00", "relax", 40),
        ],
    };
    let html = block_on(
        LocalServerRenderer::<WalkLogList>::with_props(props)
            .hydratable(false)
            .render(),
    );
    let newer = html.find("2024/06/02 18:10").expect("newer entry rendered");
    let older = html.find("2024/06/01 07:00").expect("older entry rendered");
    assert!(newer < older);
    assert!(html.contains("58 min"));
    assert!(!html.contains("No walks yet."));
}

#[test]
fn notice_banner_renders_info_as_status() {
    let props = sanpo_web::components::notice::Props {
        notice: Some(Notice::info("Route ready.")),
        on_dismiss: Callback::noop(),
    };
    let html = block_on(
        LocalServerRenderer::<NoticeBanner>::with_props(props)
            .hydratable(false)
            .render(),
    );
    assert!(html.contains("role=\"status\""));
    assert!(html.contains("Route ready."));
}

#[test]
fn layout_renders_history_and_notice_together() {
    let props = sanpo_web::app::layout::Props {
        mood: MoodKey::City,
        distance: AttrValue::from("3"),
        busy: true,
        notice: Some(Notice::error("Start a walk first.")),
        logs: vec![entry("2024/06/01 07:00", "city", 12)],
        on_mood_change: Callback::noop(),
        on_distance_change: Callback::noop(),
        on_start: Callback::noop(),
        on_return: Callback::noop(),
        on_finish: Callback::noop(),
        on_dismiss: Callback::noop(),
    };
    let html = block_on(
        LocalServerRenderer::<AppLayout>::with_props(props)
            .hydratable(false)
            .render(),
    );
    assert!(html.contains("aria-busy=\"true\""));
    assert!(html.contains("Start a walk first."));
    assert!(html.contains("12 min"));
}
