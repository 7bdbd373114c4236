//! Persisted Session
//!
//! The session (API token + user) is process-wide state written only by the
//! auth bridge and read by every authenticated request. Components receive it
//! as an injected `SessionProvider` instead of reading storage directly.

use crate::models::Session;

/// Storage key for the serialized session blob.
const SESSION_KEY: &str = "leadflow.session";

/// Injected session capability.
///
/// Token and user are one atomic unit: `set` and `clear` replace or remove
/// the whole session, so no reader can ever observe one without the other.
pub trait SessionProvider {
    fn get(&self) -> Option<Session>;
    fn set(&self, session: &Session);
    fn clear(&self);

    /// Bearer token for outbound requests, if authenticated.
    fn api_token(&self) -> Option<String> {
        self.get().map(|s| s.api_token)
    }
}

/// Session store over browser localStorage.
///
/// The whole session is one JSON value under one key, which survives page
/// reloads and makes set/clear atomic by construction.
#[derive(Clone, Default)]
pub struct BrowserSession;

impl BrowserSession {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl SessionProvider for BrowserSession {
    fn get(&self) -> Option<Session> {
        let raw = Self::storage()?.get_item(SESSION_KEY).ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                // A corrupt blob is as good as no session
                crate::log::console_log(&format!("[SESSION] Discarding corrupt session: {}", e));
                self.clear();
                None
            }
        }
    }

    fn set(&self, session: &Session) {
        if let Some(storage) = Self::storage() {
            if let Ok(raw) = serde_json::to_string(session) {
                let _ = storage.set_item(SESSION_KEY, &raw);
            }
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(SESSION_KEY);
        }
    }
}
