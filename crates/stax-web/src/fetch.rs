//! The single network round-trip behind a remote level load.
//! No retry here: a failure becomes a retryable state in the core and
//! retry is a user action.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

/// One GET against `url`. Resolves to `(status, body)` for the core to
/// decode, or a transport error string when no response arrived at all.
pub async fn fetch_level(url: &str) -> Result<(u16, String), String> {
    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|err| format!("fetch failed: {:?}", err))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| "fetch did not yield a Response".to_string())?;
    let status = response.status();
    let text_promise: js_sys::Promise = response
        .text()
        .map_err(|err| format!("body unavailable: {:?}", err))?;
    let body = JsFuture::from(text_promise)
        .await
        .map_err(|err| format!("body read failed: {:?}", err))?;
    Ok((status, body.as_string().unwrap_or_default()))
}
