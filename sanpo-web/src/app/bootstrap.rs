#[cfg(target_arch = "wasm32")]
use crate::app::state::AppState;
#[cfg(target_arch = "wasm32")]
use yew::prelude::*;

use sanpo_core::{WalkConfig, WalkError, WalkLogEntry};

use crate::app::messages;
use crate::components::notice::Notice;
use crate::platform::WebController;

/// Initial history for a freshly built controller, plus a notice when the
/// stored log cannot be read.
#[must_use]
pub fn initial_logs(controller: &WebController) -> (Vec<WalkLogEntry>, Option<Notice>) {
    match controller.recent_logs_default() {
        Ok(logs) => (logs, None),
        Err(err) => {
            log::error!("failed to read walk log: {err}");
            (Vec::new(), Some(messages::error_notice(&err)))
        }
    }
}

/// Mount the map and build the controller.
///
/// # Errors
///
/// Returns a notice describing why the page cannot plan walks.
pub fn build_controller(config: WalkConfig, map_element: &str) -> Result<WebController, Notice> {
    let map = crate::platform::LeafletMap::mount(map_element, config.fallback_location).map_err(|err| {
        let reason = crate::dom::js_error_message(&err);
        log::error!("map failed to load: {reason}");
        Notice::error(format!("The map failed to load ({reason})."))
    })?;
    crate::platform::web_controller(config, map).map_err(|err: WalkError| {
        log::error!("invalid configuration: {err}");
        messages::error_notice(&err)
    })
}

#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_bootstrap(app_state: &AppState) {
    let state = app_state.clone();

    use_effect_with((), move |()| {
        let config = crate::platform::config::page_config();
        match build_controller(config, crate::app::layout::MAP_ELEMENT_ID) {
            Ok(controller) => {
                let (logs, notice) = initial_logs(&controller);
                state.logs.set(logs);
                if let Some(notice) = notice {
                    state.show(notice);
                }
                state
                    .controller
                    .set(Some(std::rc::Rc::new(futures::lock::Mutex::new(controller))));
            }
            Err(notice) => state.show(notice),
        }
        || {}
    });
}
