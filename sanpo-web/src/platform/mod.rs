//! Browser implementations of the walk engine's collaborator traits.

pub mod config;
pub mod geolocation;
pub mod leaflet;
pub mod routing;
pub mod storage;

pub use geolocation::BrowserGeolocation;
pub use leaflet::LeafletMap;
pub use routing::FetchRouter;
pub use storage::{BrowserStore, WebStorageError};

use sanpo_core::{SeededSource, SystemClock, WalkConfig, WalkController, WalkError};

/// Walk controller wired to browser collaborators.
pub type WebController =
    WalkController<BrowserGeolocation, FetchRouter, LeafletMap, BrowserStore, SystemClock>;

/// Build the browser controller around an already mounted map.
///
/// # Errors
///
/// Returns [`WalkError::Config`] when `config` fails validation.
pub fn web_controller(config: WalkConfig, map: LeafletMap) -> Result<WebController, WalkError> {
    let router = FetchRouter::new(&config);
    WalkController::new(
        config,
        BrowserGeolocation,
        router,
        map,
        BrowserStore,
        SystemClock,
        SeededSource::from_entropy(),
    )
}
