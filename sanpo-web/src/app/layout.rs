use sanpo_core::{MoodKey, WalkLogEntry};
use yew::prelude::*;

use crate::components::log_list::WalkLogList;
use crate::components::notice::{Notice, NoticeBanner};
use crate::components::walk_form::WalkForm;

/// Id of the element Leaflet mounts into.
pub const MAP_ELEMENT_ID: &str = "map";

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub mood: MoodKey,
    pub distance: AttrValue,
    #[prop_or_default]
    pub busy: bool,
    #[prop_or_default]
    pub notice: Option<Notice>,
    #[prop_or_default]
    pub logs: Vec<WalkLogEntry>,
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
    #[prop_or_default]
    pub on_dismiss: Callback<()>,
}

/// Page shell: controls, notice, map container and walk history.
#[function_component(AppLayout)]
pub fn app_layout(p: &Props) -> Html {
    html! {
        <>
            <header role="banner" class="app-header">
                <h1>{ "Sanpo" }</h1>
                <p class="tagline">{ "Pick a mood, pick a distance, get lost a little." }</p>
            </header>
            <main id="main" role="main" aria-busy={p.busy.to_string()}>
                <NoticeBanner notice={p.notice.clone()} on_dismiss={p.on_dismiss.clone()} />
                <WalkForm
                    mood={p.mood}
                    distance={p.distance.clone()}
                    busy={p.busy}
                    on_mood_change={p.on_mood_change.clone()}
                    on_distance_change={p.on_distance_change.clone()}
                    on_start={p.on_start.clone()}
                    on_return={p.on_return.clone()}
                    on_finish={p.on_finish.clone()}
                />
                <div id={MAP_ELEMENT_ID} class="map" aria-label="Route map"></div>
                <WalkLogList entries={p.logs.clone()} />
            </main>
        </>
    }
}
