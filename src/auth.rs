//! Auth Bridge
//!
//! Establishes and maintains a validated API session from either a single-use
//! bridge token (handed over by the legacy app in the URL) or stored
//! credentials, and gates the rest of the app.
//!
//! Startup flow: bridge token present -> exchange it exactly once; a failed
//! exchange is logged and absorbed, falling through to the stored-session
//! check. A stored session authenticates optimistically (stale user) and is
//! verified asynchronously; a rejected verify clears it. The bridge token is
//! scrubbed from the URL whether or not the exchange succeeded, so a reload
//! can never replay a dead token.

use std::rc::Rc;

use crate::api::IdentityProvider;
use crate::error::AuthError;
use crate::log::console_log as log;
use crate::models::{Session, SessionUser};
use crate::session::SessionProvider;

/// What startup found.
#[derive(Debug, Clone, PartialEq)]
pub enum StartupSession {
    /// Nothing usable; the app shows the login form.
    None,
    /// Fresh session from a successful bridge exchange.
    Fresh(SessionUser),
    /// Stored session restored optimistically; caller must run
    /// `verify_stored` next and react to its outcome.
    Stale(SessionUser),
}

/// Outcome of the startup path.
#[derive(Debug, Clone, PartialEq)]
pub struct StartupOutcome {
    pub session: StartupSession,
    /// A bridge token was consumed (success or failure) and must be
    /// scrubbed from the URL.
    pub scrub_url: bool,
}

/// Token-bridging session authority. The only writer of the persisted session.
pub struct AuthBridge {
    identity: Rc<dyn IdentityProvider>,
    session: Rc<dyn SessionProvider>,
}

impl AuthBridge {
    pub fn new(identity: Rc<dyn IdentityProvider>, session: Rc<dyn SessionProvider>) -> Self {
        Self { identity, session }
    }

    /// Run the startup path: one exchange attempt if a bridge token is
    /// present, then the stored-session check. Never fails; the worst
    /// outcome is `StartupSession::None`.
    pub async fn startup(&self, bridge_token: Option<&str>) -> StartupOutcome {
        let mut scrub_url = false;

        if let Some(token) = bridge_token {
            scrub_url = true;
            match self.identity.exchange_bridge_token(token).await {
                Ok(session) => {
                    self.session.set(&session);
                    log("[AUTH] Bridge token exchanged");
                    return StartupOutcome {
                        session: StartupSession::Fresh(session.user),
                        scrub_url,
                    };
                }
                Err(e) => {
                    // Absorbed: fall through to the stored-session check
                    log(&format!("[AUTH] Bridge exchange failed, falling through: {}", e));
                }
            }
        }

        match self.session.get() {
            Some(stored) => StartupOutcome {
                session: StartupSession::Stale(stored.user),
                scrub_url,
            },
            None => StartupOutcome {
                session: StartupSession::None,
                scrub_url,
            },
        }
    }

    /// Verify the stored token against the server. Success refreshes the
    /// stored user; any failure (network or rejection) clears the session.
    /// Not retryable.
    pub async fn verify_stored(&self) -> Result<SessionUser, AuthError> {
        let Some(stored) = self.session.get() else {
            return Err(AuthError::Verification(crate::error::ApiError::Network(
                "no stored session".to_string(),
            )));
        };

        match self.identity.verify(&stored.api_token).await {
            Ok(user) => {
                self.session.set(&Session {
                    api_token: stored.api_token,
                    user: user.clone(),
                });
                log("[AUTH] Stored session verified");
                Ok(user)
            }
            Err(e) => {
                log(&format!("[AUTH] Stored session rejected, clearing: {}", e));
                self.session.clear();
                Err(AuthError::Verification(e))
            }
        }
    }

    /// Two-step login: credentials -> bridge token -> API token. Any step's
    /// failure surfaces to the caller and leaves the session unchanged.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionUser, AuthError> {
        let bridge_token = self
            .identity
            .bridge_token_by_credentials(email, password)
            .await
            .map_err(AuthError::Credentials)?;

        let session = self
            .identity
            .exchange_bridge_token(&bridge_token)
            .await
            .map_err(AuthError::Exchange)?;

        self.session.set(&session);
        log("[AUTH] Logged in");
        Ok(session.user)
    }

    /// Clear the session unconditionally. Remote invalidation is best-effort;
    /// its failure never blocks the local clear.
    pub async fn logout(&self) {
        if let Some(token) = self.session.api_token() {
            if let Err(e) = self.identity.invalidate(&token).await {
                log(&format!("[AUTH] Remote invalidation failed, ignoring: {}", e));
            }
        }
        self.session.clear();
        log("[AUTH] Logged out");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use async_trait::async_trait;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct MemorySession(RefCell<Option<Session>>);

    impl SessionProvider for MemorySession {
        fn get(&self) -> Option<Session> {
            self.0.borrow().clone()
        }
        fn set(&self, session: &Session) {
            *self.0.borrow_mut() = Some(session.clone());
        }
        fn clear(&self) {
            *self.0.borrow_mut() = None;
        }
    }

    fn user(name: &str) -> SessionUser {
        SessionUser {
            id: 1,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
        }
    }

    /// Scriptable identity double recording every exchange attempt.
    #[derive(Default)]
    struct FakeIdentity {
        accept_bridge_token: RefCell<Option<String>>,
        exchange_calls: RefCell<Vec<String>>,
        verify_ok: Cell<bool>,
        credentials_ok: Cell<bool>,
        invalidate_fails: Cell<bool>,
        invalidate_calls: Cell<u32>,
    }

    #[async_trait(?Send)]
    impl IdentityProvider for FakeIdentity {
        async fn exchange_bridge_token(&self, bridge_token: &str) -> Result<Session, ApiError> {
            self.exchange_calls.borrow_mut().push(bridge_token.to_string());
            let accepted = self.accept_bridge_token.borrow().as_deref() == Some(bridge_token);
            if accepted {
                // Single use: a second exchange of the same token fails
                self.accept_bridge_token.borrow_mut().take();
                Ok(Session {
                    api_token: "api-tok".to_string(),
                    user: user("Bridget"),
                })
            } else {
                Err(ApiError::Rejected {
                    status: 401,
                    message: "token expired".to_string(),
                })
            }
        }

        async fn verify(&self, _api_token: &str) -> Result<SessionUser, ApiError> {
            if self.verify_ok.get() {
                Ok(user("Verified"))
            } else {
                Err(ApiError::Rejected {
                    status: 401,
                    message: "unauthenticated".to_string(),
                })
            }
        }

        async fn bridge_token_by_credentials(
            &self,
            _email: &str,
            _password: &str,
        ) -> Result<String, ApiError> {
            if self.credentials_ok.get() {
                let token = "fresh-bridge".to_string();
                *self.accept_bridge_token.borrow_mut() = Some(token.clone());
                Ok(token)
            } else {
                Err(ApiError::Rejected {
                    status: 422,
                    message: "bad credentials".to_string(),
                })
            }
        }

        async fn invalidate(&self, _api_token: &str) -> Result<(), ApiError> {
            self.invalidate_calls.set(self.invalidate_calls.get() + 1);
            if self.invalidate_fails.get() {
                Err(ApiError::Network("gone away".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn bridge(identity: Rc<FakeIdentity>, session: Rc<MemorySession>) -> AuthBridge {
        AuthBridge::new(identity, session)
    }

    #[test]
    fn test_startup_with_valid_bridge_token() {
        let identity = Rc::new(FakeIdentity::default());
        *identity.accept_bridge_token.borrow_mut() = Some("good123".to_string());
        let session = Rc::new(MemorySession::default());
        let auth = bridge(identity.clone(), session.clone());

        let outcome = block_on(auth.startup(Some("good123")));

        assert_eq!(outcome.session, StartupSession::Fresh(user("Bridget")));
        assert!(outcome.scrub_url);
        // Token and user persisted together
        let stored = session.get().expect("session persisted");
        assert_eq!(stored.api_token, "api-tok");
        assert_eq!(stored.user, user("Bridget"));
    }

    #[test]
    fn test_startup_expired_bridge_token_falls_through_unauthenticated() {
        let identity = Rc::new(FakeIdentity::default());
        let session = Rc::new(MemorySession::default());
        let auth = bridge(identity.clone(), session.clone());

        let outcome = block_on(auth.startup(Some("expired123")));

        // Failure is absorbed; the dead token is still scrubbed so a reload
        // cannot replay it
        assert_eq!(outcome.session, StartupSession::None);
        assert!(outcome.scrub_url);
        assert_eq!(identity.exchange_calls.borrow().len(), 1);
        assert!(session.get().is_none());
    }

    #[test]
    fn test_startup_failed_exchange_falls_through_to_stored_session() {
        let identity = Rc::new(FakeIdentity::default());
        let session = Rc::new(MemorySession::default());
        session.set(&Session {
            api_token: "old-tok".to_string(),
            user: user("Stored"),
        });
        let auth = bridge(identity, session.clone());

        let outcome = block_on(auth.startup(Some("expired123")));

        assert_eq!(outcome.session, StartupSession::Stale(user("Stored")));
        assert!(outcome.scrub_url);
        // The stored session was not touched by the failed exchange
        assert_eq!(session.get().unwrap().api_token, "old-tok");
    }

    #[test]
    fn test_startup_without_token_or_session() {
        let identity = Rc::new(FakeIdentity::default());
        let session = Rc::new(MemorySession::default());
        let auth = bridge(identity.clone(), session);

        let outcome = block_on(auth.startup(None));

        assert_eq!(outcome.session, StartupSession::None);
        assert!(!outcome.scrub_url);
        assert!(identity.exchange_calls.borrow().is_empty());
    }

    #[test]
    fn test_bridge_token_single_use() {
        let identity = Rc::new(FakeIdentity::default());
        *identity.accept_bridge_token.borrow_mut() = Some("once".to_string());
        let session = Rc::new(MemorySession::default());
        let auth = bridge(identity.clone(), session.clone());

        let first = block_on(auth.startup(Some("once")));
        assert!(matches!(first.session, StartupSession::Fresh(_)));

        // Forced replay of the same token: the exchange itself never
        // succeeds twice. (Naturally it cannot even be re-triggered, since
        // scrub_url was already reported true.)
        session.clear();
        let second = block_on(auth.startup(Some("once")));
        assert_eq!(second.session, StartupSession::None);
        assert_eq!(identity.exchange_calls.borrow().len(), 2);
    }

    #[test]
    fn test_verify_refreshes_user() {
        let identity = Rc::new(FakeIdentity::default());
        identity.verify_ok.set(true);
        let session = Rc::new(MemorySession::default());
        session.set(&Session {
            api_token: "old-tok".to_string(),
            user: user("Stale"),
        });
        let auth = bridge(identity, session.clone());

        let fresh = block_on(auth.verify_stored()).expect("verify");

        assert_eq!(fresh, user("Verified"));
        let stored = session.get().unwrap();
        assert_eq!(stored.user, user("Verified"));
        assert_eq!(stored.api_token, "old-tok");
    }

    #[test]
    fn test_verify_failure_clears_session() {
        let identity = Rc::new(FakeIdentity::default());
        let session = Rc::new(MemorySession::default());
        session.set(&Session {
            api_token: "rejected-tok".to_string(),
            user: user("Stale"),
        });
        let auth = bridge(identity, session.clone());

        let err = block_on(auth.verify_stored()).unwrap_err();

        assert!(matches!(err, AuthError::Verification(_)));
        assert!(session.get().is_none());
    }

    #[test]
    fn test_login_happy_path() {
        let identity = Rc::new(FakeIdentity::default());
        identity.credentials_ok.set(true);
        let session = Rc::new(MemorySession::default());
        let auth = bridge(identity, session.clone());

        let logged_in = block_on(auth.login("sam@example.com", "hunter2")).expect("login");

        assert_eq!(logged_in, user("Bridget"));
        assert_eq!(session.get().unwrap().api_token, "api-tok");
    }

    #[test]
    fn test_login_bad_credentials_surfaces_and_leaves_session_alone() {
        let identity = Rc::new(FakeIdentity::default());
        let session = Rc::new(MemorySession::default());
        session.set(&Session {
            api_token: "existing".to_string(),
            user: user("Existing"),
        });
        let auth = bridge(identity.clone(), session.clone());

        let err = block_on(auth.login("sam@example.com", "wrong")).unwrap_err();

        assert!(matches!(err, AuthError::Credentials(_)));
        // No exchange was even attempted
        assert!(identity.exchange_calls.borrow().is_empty());
        assert_eq!(session.get().unwrap().api_token, "existing");
    }

    #[test]
    fn test_logout_clears_even_when_remote_invalidation_fails() {
        let identity = Rc::new(FakeIdentity::default());
        identity.invalidate_fails.set(true);
        let session = Rc::new(MemorySession::default());
        session.set(&Session {
            api_token: "tok".to_string(),
            user: user("Out"),
        });
        let auth = bridge(identity.clone(), session.clone());

        block_on(auth.logout());

        assert!(session.get().is_none());
        assert_eq!(identity.invalidate_calls.get(), 1);
    }
}
