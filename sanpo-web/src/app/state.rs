use futures::lock::{Mutex, MutexGuard};
use sanpo_core::{MoodKey, WalkLogEntry};
use std::rc::Rc;
use yew::prelude::*;

use crate::app::messages;
use crate::components::notice::Notice;
use crate::platform::WebController;

/// Controller shared between action callbacks. The lock is only ever
/// `try_lock`ed, so overlapping actions are rejected instead of queued.
pub type SharedController = Rc<Mutex<WebController>>;

pub const DEFAULT_DISTANCE_KM: &str = "3";

#[derive(Clone)]
pub struct AppState {
    pub mood: UseStateHandle<MoodKey>,
    pub distance: UseStateHandle<AttrValue>,
    pub busy: UseStateHandle<bool>,
    pub notice: UseStateHandle<Option<Notice>>,
    pub logs: UseStateHandle<Vec<WalkLogEntry>>,
    pub controller: UseStateHandle<Option<SharedController>>,
}

#[hook]
pub fn use_app_state() -> AppState {
    AppState {
        mood: use_state(|| MoodKey::Relax),
        distance: use_state(|| AttrValue::from(DEFAULT_DISTANCE_KM)),
        busy: use_state(|| false),
        notice: use_state(|| None::<Notice>),
        logs: use_state(Vec::<WalkLogEntry>::new),
        controller: use_state(|| None::<SharedController>),
    }
}

impl AppState {
    pub fn show(&self, notice: Notice) {
        self.notice.set(Some(notice));
    }

    #[must_use]
    pub fn ready(&self) -> bool {
        self.controller.is_some()
    }
}

/// Take the controller for one action, or the busy notice when another
/// action still holds it.
///
/// # Errors
///
/// Returns the busy [`Notice`] while the lock is held elsewhere.
pub fn acquire<T>(controller: &Mutex<T>) -> Result<MutexGuard<'_, T>, Notice> {
    controller
        .try_lock()
        .ok_or_else(|| Notice::error(messages::BUSY_MESSAGE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_action_gets_the_busy_notice() {
        let shared = Rc::new(Mutex::new(0_u32));
        let mut first = acquire(&shared).unwrap();
        *first += 1;

        let err = acquire(&shared).err();
        assert_eq!(err, Some(Notice::error(messages::BUSY_MESSAGE)));

        drop(first);
        assert_eq!(*acquire(&shared).unwrap(), 1);
    }
}
