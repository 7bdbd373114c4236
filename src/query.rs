//! Bridge Token URL Handling
//!
//! The legacy app hands over a short-lived bridge token as a `bridgeToken`
//! query parameter. It is read once on startup and scrubbed from the address
//! bar without a reload, so a page refresh can never replay it.

use percent_encoding::percent_decode_str;

/// Query parameter carrying the bridge token.
pub const BRIDGE_TOKEN_PARAM: &str = "bridgeToken";

/// Pull a parameter's value out of a raw query string (`?a=1&b=2` or `a=1&b=2`).
/// The value is percent-decoded; tokens travel encoded in the URL but must be
/// sent verbatim as the exchange bearer.
pub fn query_param(search: &str, key: &str) -> Option<String> {
    let search = search.strip_prefix('?').unwrap_or(search);
    for pair in search.split('&') {
        let mut parts = pair.splitn(2, '=');
        if parts.next() == Some(key) {
            let raw = parts.next().unwrap_or("");
            return Some(percent_decode_str(raw).decode_utf8_lossy().into_owned());
        }
    }
    None
}

/// Remove a parameter from a raw query string, preserving every other pair.
/// Returns the new query string without a leading `?`, empty if nothing is left.
pub fn strip_query_param(search: &str, key: &str) -> String {
    let search = search.strip_prefix('?').unwrap_or(search);
    search
        .split('&')
        .filter(|pair| !pair.is_empty() && pair.splitn(2, '=').next() != Some(key))
        .collect::<Vec<_>>()
        .join("&")
}

/// Bridge token from the current page URL, if any.
pub fn bridge_token_from_location() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    query_param(&search, BRIDGE_TOKEN_PARAM).filter(|t| !t.is_empty())
}

/// Rewrite the address bar without the bridge token, keeping path, remaining
/// query and hash. Uses replaceState so there is no reload and no history entry.
pub fn scrub_bridge_token_from_location() {
    let Some(win) = web_sys::window() else { return };
    let location = win.location();
    let (Ok(path), Ok(search), Ok(hash)) = (location.pathname(), location.search(), location.hash())
    else {
        return;
    };

    let remaining = strip_query_param(&search, BRIDGE_TOKEN_PARAM);
    let mut url = path;
    if !remaining.is_empty() {
        url.push('?');
        url.push_str(&remaining);
    }
    url.push_str(&hash);

    if let Ok(history) = win.history() {
        let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url));
    }
}
