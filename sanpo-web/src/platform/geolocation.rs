//! `navigator.geolocation` provider.
use js_sys::{Function, Promise, Reflect};
use sanpo_core::{Coordinate, GeolocationError, GeolocationProvider, PositionOptions};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::dom;

// `GeolocationPositionError.code` values.
const PERMISSION_DENIED: u32 = 1;
const TIMEOUT: u32 = 3;

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserGeolocation;

impl GeolocationProvider for BrowserGeolocation {
    async fn current_position(
        &self,
        options: PositionOptions,
    ) -> Result<Coordinate, GeolocationError> {
        let geolocation = dom::window()
            .ok_or(GeolocationError::Unsupported)?
            .navigator()
            .geolocation()
            .map_err(|_| GeolocationError::Unsupported)?;

        let js_options = web_sys::PositionOptions::new();
        js_options.set_enable_high_accuracy(options.high_accuracy);
        js_options.set_timeout(options.timeout_ms);

        let promise = Promise::new(&mut |resolve: Function, reject: Function| {
            let failed = reject.clone();
            if let Err(err) = geolocation.get_current_position_with_error_callback_and_options(
                &resolve,
                Some(&reject),
                &js_options,
            ) {
                let _ = failed.call1(&JsValue::UNDEFINED, &err);
            }
        });

        let position = JsFuture::from(promise).await.map_err(|err| position_error(&err))?;
        coordinate_from_position(&position)
    }
}

fn position_error(err: &JsValue) -> GeolocationError {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let code = Reflect::get(err, &"code".into())
        .ok()
        .and_then(|code| code.as_f64())
        .map(|code| code as u32);
    match code {
        Some(PERMISSION_DENIED) => GeolocationError::PermissionDenied,
        Some(TIMEOUT) => GeolocationError::Timeout,
        _ => {
            let message = Reflect::get(err, &"message".into())
                .ok()
                .and_then(|m| m.as_string())
                .unwrap_or_else(|| dom::js_error_message(err));
            GeolocationError::Unavailable(message)
        }
    }
}

fn coordinate_from_position(position: &JsValue) -> Result<Coordinate, GeolocationError> {
    let coords = Reflect::get(position, &"coords".into())
        .map_err(|e| GeolocationError::Unavailable(dom::js_error_message(&e)))?;
    let read = |field: &str| {
        Reflect::get(&coords, &field.into())
            .ok()
            .and_then(|value| value.as_f64())
            .ok_or_else(|| GeolocationError::Unavailable(format!("position has no {field}")))
    };
    let lat = read("latitude")?;
    let lng = read("longitude")?;
    Ok(Coordinate::new(lat, lng))
}
