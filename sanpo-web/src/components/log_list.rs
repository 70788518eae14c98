use sanpo_core::{MoodKey, WalkLogEntry};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub entries: Vec<WalkLogEntry>,
}

/// One line per walk: date, mood, distance and duration.
#[must_use]
pub fn describe(entry: &WalkLogEntry) -> String {
    let mood = entry
        .mood
        .parse::<MoodKey>()
        .map_or_else(|_| entry.mood.clone(), |mood| mood.label().to_string());
    format!(
        "{} · {} · {} km · {} min",
        entry.date, mood, entry.distance_km, entry.duration_minutes
    )
}

/// Most recent walks, newest first.
#[function_component(WalkLogList)]
pub fn walk_log_list(p: &Props) -> Html {
    html! {
        <section class="walk-log" aria-labelledby="walk-log-title">
            <h2 id="walk-log-title">{ "Recent walks" }</h2>
            if p.entries.is_empty() {
                <p class="walk-log-empty">{ "No walks yet." }</p>
            } else {
                <ul class="walk-log-list">
                    { for p.entries.iter().map(|entry| html! {
                        <li class="walk-log-entry">{ describe(entry) }</li>
                    }) }
                </ul>
            }
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_uses_mood_labels() {
        let entry = WalkLogEntry {
            date: "2024/05/03 07:05".into(),
            mood: "city".into(),
            distance_km: 2.5,
            duration_minutes: 31,
        };
        assert_eq!(describe(&entry), "2024/05/03 07:05 · City stroll · 2.5 km · 31 min");

        let legacy = WalkLogEntry {
            mood: "unknown".into(),
            ..entry
        };
        assert!(describe(&legacy).contains("· unknown ·"));
    }
}
