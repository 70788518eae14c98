//! Button handlers. Each one runs its walk action on the shared controller
//! and reports the outcome through the notice banner.
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::app::messages;
use crate::app::state::{AppState, SharedController, acquire};
use crate::components::notice::Notice;
use crate::components::walk_form::parse_distance;

fn controller_or_notice(state: &AppState) -> Option<SharedController> {
    let controller = (*state.controller).clone();
    if controller.is_none() {
        state.show(Notice::error(messages::NOT_READY_MESSAGE));
    }
    controller
}

pub fn start_walk(state: &AppState) -> Callback<()> {
    let state = state.clone();
    Callback::from(move |()| {
        let Some(distance_km) = parse_distance(&state.distance) else {
            state.show(Notice::error(messages::DISTANCE_MESSAGE));
            return;
        };
        let Some(controller) = controller_or_notice(&state) else {
            return;
        };
        let mood = *state.mood;
        let state = state.clone();
        spawn_local(async move {
            let mut walk = match acquire(&controller) {
                Ok(walk) => walk,
                Err(notice) => return state.show(notice),
            };
            state.busy.set(true);
            let notice = match walk.start_walk(mood, distance_km).await {
                Ok(plan) => messages::plan_notice(&plan),
                Err(err) => {
                    log::warn!("start walk failed: {err}");
                    messages::error_notice(&err)
                }
            };
            state.busy.set(false);
            state.show(notice);
        });
    })
}

pub fn plan_return(state: &AppState) -> Callback<()> {
    let state = state.clone();
    Callback::from(move |()| {
        let Some(controller) = controller_or_notice(&state) else {
            return;
        };
        let state = state.clone();
        spawn_local(async move {
            let mut walk = match acquire(&controller) {
                Ok(walk) => walk,
                Err(notice) => return state.show(notice),
            };
            state.busy.set(true);
            let notice = match walk.plan_return().await {
                Ok(plan) => messages::plan_notice(&plan),
                Err(err) => {
                    log::warn!("return route failed: {err}");
                    messages::error_notice(&err)
                }
            };
            state.busy.set(false);
            state.show(notice);
        });
    })
}

pub fn finish_walk(state: &AppState) -> Callback<()> {
    let state = state.clone();
    Callback::from(move |()| {
        let Some(controller) = controller_or_notice(&state) else {
            return;
        };
        let mut walk = match acquire(&controller) {
            Ok(walk) => walk,
            Err(notice) => return state.show(notice),
        };
        match walk.finish_walk() {
            Ok(entry) => {
                state.show(messages::finish_notice(&entry));
                match walk.recent_logs_default() {
                    Ok(logs) => state.logs.set(logs),
                    Err(err) => log::error!("failed to refresh walk log: {err}"),
                }
            }
            Err(err) => state.show(messages::error_notice(&err)),
        }
    })
}
