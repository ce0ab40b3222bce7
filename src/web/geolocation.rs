//! [`Geolocation`] over `navigator.geolocation`.

use futures_util::future::LocalBoxFuture;
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Position;

use crate::domain::Coordinates;
use crate::host::Geolocation;
use crate::web::describe;

/// The browser's position provider.
#[derive(Debug, Clone)]
pub struct BrowserGeolocation {
    geolocation: web_sys::Geolocation,
}

impl BrowserGeolocation {
    #[must_use]
    pub const fn new(geolocation: web_sys::Geolocation) -> Self {
        Self { geolocation }
    }
}

/// Code of a `PositionError`, `0` for anything else.
fn error_code(error: &JsValue) -> u16 {
    Reflect::get(error, &JsValue::from_str("code"))
        .ok()
        .and_then(|code| code.as_f64())
        .map_or(0, |code| code as u16)
}

impl Geolocation for BrowserGeolocation {
    fn current_position(&self) -> LocalBoxFuture<'_, Result<Coordinates, u16>> {
        Box::pin(async move {
            let promise = Promise::new(&mut |resolve: Function, reject: Function| {
                if let Err(err) = self
                    .geolocation
                    .get_current_position_with_error_callback(&resolve, Some(&reject))
                {
                    let _ = reject.call1(&JsValue::NULL, &err);
                }
            });

            match JsFuture::from(promise).await {
                Ok(value) => {
                    let position: Position = value.unchecked_into();
                    let coords = position.coords();
                    Ok(Coordinates {
                        latitude: coords.latitude(),
                        longitude: coords.longitude(),
                    })
                }
                Err(err) => {
                    tracing::error!(error = %describe(&err), "position request rejected");
                    Err(error_code(&err))
                }
            }
        })
    }
}
