#[cfg(target_arch = "wasm32")]
use yew::prelude::*;

#[cfg(target_arch = "wasm32")]
pub mod actions;
pub mod bootstrap;
pub mod layout;
pub mod messages;
pub mod state;

pub use layout::AppLayout;

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    let app_state = state::use_app_state();
    bootstrap::use_bootstrap(&app_state);

    let on_mood_change = {
        let mood = app_state.mood.clone();
        Callback::from(move |value| mood.set(value))
    };
    let on_distance_change = {
        let distance = app_state.distance.clone();
        Callback::from(move |value: String| distance.set(AttrValue::from(value)))
    };
    let on_dismiss = {
        let notice = app_state.notice.clone();
        Callback::from(move |()| notice.set(None))
    };

    html! {
        <AppLayout
            mood={*app_state.mood}
            distance={(*app_state.distance).clone()}
            busy={*app_state.busy || !app_state.ready()}
            notice={(*app_state.notice).clone()}
            logs={(*app_state.logs).clone()}
            {on_mood_change}
            {on_distance_change}
            on_start={actions::start_walk(&app_state)}
            on_return={actions::plan_return(&app_state)}
            on_finish={actions::finish_walk(&app_state)}
            {on_dismiss}
        />
    }
}
