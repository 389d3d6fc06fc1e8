//! Embedding detection and the host-client handshake.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Window;

use crate::flags::DEFAULT_USERNAME;

/// Global the host page attaches its embed client to.
const EMBED_CLIENT_GLOBAL: &str = "openchat";
const INITIALISE_FN: &str = "initialise";
const USERNAME_FIELD: &str = "username";

/// True when the page runs inside a frame. A cross-origin `top` access
/// throws, which only happens inside a frame, so that counts as embedded.
pub fn is_embedded(window: &Window) -> bool {
    match window.top() {
        Ok(Some(top)) => {
            let own: &JsValue = window.as_ref();
            own != top.as_ref()
        }
        _ => true,
    }
}

pub fn has_touch(window: &Window) -> bool {
    js_sys::Reflect::has(window.as_ref(), &JsValue::from_str("ontouchstart")).unwrap_or(false)
}

/// Resolves the display name for this session.
///
/// Top-level pages skip the handshake entirely. Embedded pages await the
/// host client; a rejected handshake or a missing username falls back to the
/// placeholder instead of leaving the shell unmounted.
pub async fn resolve_username(window: &Window) -> String {
    if !is_embedded(window) {
        return DEFAULT_USERNAME.to_string();
    }

    match initialise_host_client(window).await {
        Ok(username) => username,
        Err(error) => {
            web_sys::console::warn_2(
                &JsValue::from_str("host handshake failed, using placeholder username"),
                &error,
            );
            DEFAULT_USERNAME.to_string()
        }
    }
}

async fn initialise_host_client(window: &Window) -> Result<String, JsValue> {
    let client = js_sys::Reflect::get(window.as_ref(), &JsValue::from_str(EMBED_CLIENT_GLOBAL))?;
    if client.is_undefined() || client.is_null() {
        return Err(JsValue::from_str("embed client global missing"));
    }

    let initialise = js_sys::Reflect::get(&client, &JsValue::from_str(INITIALISE_FN))?
        .dyn_into::<js_sys::Function>()?;
    let promise: js_sys::Promise = initialise.call0(&client)?.dyn_into()?;
    let resolved = JsFuture::from(promise).await?;

    let username = js_sys::Reflect::get(&resolved, &JsValue::from_str(USERNAME_FIELD))?;
    username
        .as_string()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| JsValue::from_str("handshake reported no username"))
}
