use sanpo_core::MoodKey;
use wasm_bindgen::JsCast;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub mood: MoodKey,
    /// Raw distance text as typed.
    pub distance: AttrValue,
    /// An action is in flight; buttons are disabled.
    #[prop_or_default]
    pub busy: bool,
    #[prop_or_default]
    pub on_mood_change: Callback<MoodKey>,
    #[prop_or_default]
    pub on_distance_change: Callback<String>,
    #[prop_or_default]
    pub on_start: Callback<()>,
    #[prop_or_default]
    pub on_return: Callback<()>,
    #[prop_or_default]
    pub on_finish: Callback<()>,
}

/// Parse the distance field. Only finite positive kilometres are accepted.
#[must_use]
pub fn parse_distance(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|km| km.is_finite() && *km > 0.0)
}

fn click(cb: &Callback<()>) -> Callback<MouseEvent> {
    let cb = cb.clone();
    Callback::from(move |_| cb.emit(()))
}

/// Mood selector, distance field and the three walk actions.
#[function_component(WalkForm)]
pub fn walk_form(p: &Props) -> Html {
    let on_mood = {
        let cb = p.on_mood_change.clone();
        Callback::from(move |e: web_sys::Event| {
            if let Some(sel) = e
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
                && let Ok(mood) = sel.value().parse::<MoodKey>()
            {
                cb.emit(mood);
            }
        })
    };
    let on_distance = {
        let cb = p.on_distance_change.clone();
        Callback::from(move |e: web_sys::Event| {
            if let Some(input) = e
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            {
                cb.emit(input.value());
            }
        })
    };
    let distance_valid = parse_distance(&p.distance).is_some();

    html! {
        <form class="walk-form" onsubmit={Callback::from(|e: SubmitEvent| e.prevent_default())}>
            <label for="mood">{ "Mood" }</label>
            <select id="mood" onchange={on_mood}>
                { for MoodKey::ALL.iter().map(|mood| html! {
                    <option value={mood.as_str()} selected={*mood == p.mood}>{ mood.label() }</option>
                }) }
            </select>

            <label for="distance">{ "Distance (km)" }</label>
            <input
                id="distance"
                type="number"
                min="0.1"
                step="0.1"
                value={p.distance.clone()}
                aria-invalid={(!distance_valid).to_string()}
                onchange={on_distance}
            />

            <div class="walk-actions">
                <button id="start-walk" type="button" disabled={p.busy || !distance_valid} onclick={click(&p.on_start)}>
                    { "Start walk" }
                </button>
                <button id="return-route" type="button" disabled={p.busy} onclick={click(&p.on_return)}>
                    { "Different way home" }
                </button>
                <button id="finish-walk" type="button" disabled={p.busy} onclick={click(&p.on_finish)}>
                    { "Finish walk" }
                </button>
            </div>
        </form>
    }
}
