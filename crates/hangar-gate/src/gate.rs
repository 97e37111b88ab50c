//! The session gate and the per-console session it guards.

use std::collections::HashMap;
use std::sync::Mutex;

use subtle::ConstantTimeEq;

use hangar_core::config::GateSettings;

use crate::clock::{Clock, SystemClock};
use crate::token::{self, Token};
use crate::AuthError;

/// Whether a session currently holds a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
}

/// Per-console session state. Owned by the caller, never global.
#[derive(Debug, Default)]
pub struct Session {
    token: Option<Token>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Holding a token does not mean it is still fresh; use
    /// [`SessionGate::check`] for that.
    pub fn state(&self) -> SessionState {
        match self.token {
            Some(_) => SessionState::Authenticated,
            None => SessionState::Unauthenticated,
        }
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }
}

/// Checks the shared password and the freshness of issued tokens.
///
/// Tokens dropped by [`SessionGate::logout`] are remembered until they
/// would have expired anyway, so a copy taken before logout stops
/// validating.
pub struct SessionGate<C: Clock = SystemClock> {
    secret: String,
    ttl_secs: i64,
    clock: C,
    // Raw token -> issued_at.
    revoked: Mutex<HashMap<String, i64>>,
}

impl SessionGate<SystemClock> {
    pub fn new(secret: impl Into<String>, ttl_secs: i64) -> Self {
        Self::with_clock(secret, ttl_secs, SystemClock)
    }

    pub fn from_settings(settings: &GateSettings) -> Self {
        Self::new(settings.password.clone(), settings.token_ttl_secs)
    }
}

impl<C: Clock> SessionGate<C> {
    pub fn with_clock(secret: impl Into<String>, ttl_secs: i64, clock: C) -> Self {
        Self {
            secret: secret.into(),
            ttl_secs,
            clock,
            revoked: Mutex::new(HashMap::new()),
        }
    }

    /// Check the password and, on success, store a fresh token in `session`.
    ///
    /// A wrong password leaves the session exactly as it was.
    pub fn login(&self, session: &mut Session, attempt: &str) -> Result<(), AuthError> {
        let matches: bool = attempt.as_bytes().ct_eq(self.secret.as_bytes()).into();
        if !matches {
            tracing::warn!("Login rejected: incorrect password");
            return Err(AuthError::BadCredentials);
        }

        let issued_at = self.clock.now_secs();
        session.token = Some(Token::issue(issued_at));
        tracing::info!(issued_at, ttl_secs = self.ttl_secs, "Login successful");
        Ok(())
    }

    /// Whether `token` is present, well formed, younger than the TTL, and
    /// has not been logged out.
    pub fn is_valid(&self, token: Option<&str>) -> bool {
        self.validate(token).is_ok()
    }

    /// Guard for protected operations.
    pub fn check(&self, session: &Session) -> Result<(), AuthError> {
        self.validate(session.token.as_ref().map(Token::as_str))
    }

    fn validate(&self, raw: Option<&str>) -> Result<(), AuthError> {
        token::validate(raw, self.clock.now_secs(), self.ttl_secs)?;
        match raw {
            Some(raw) if self.is_revoked(raw) => Err(AuthError::Revoked),
            _ => Ok(()),
        }
    }

    fn is_revoked(&self, raw: &str) -> bool {
        self.revoked
            .lock()
            .map(|revoked| revoked.contains_key(raw))
            // A poisoned lock fails closed.
            .unwrap_or(true)
    }

    pub fn is_authenticated(&self, session: &Session) -> bool {
        self.check(session).is_ok()
    }

    /// Drop the session's token unconditionally and revoke it.
    pub fn logout(&self, session: &mut Session) {
        let Some(token) = session.token.take() else {
            return;
        };

        let now = self.clock.now_secs();
        let ttl_secs = self.ttl_secs;
        match self.revoked.lock() {
            Ok(mut revoked) => {
                let live = |issued_at: i64| now.saturating_sub(issued_at) < ttl_secs;
                revoked.retain(|_, issued_at| live(*issued_at));
                if let Ok(issued_at) = token.issued_at() {
                    if live(issued_at) {
                        revoked.insert(token.as_str().to_string(), issued_at);
                    }
                }
            }
            Err(e) => tracing::error!(error = %e, "Revocation list unavailable"),
        }
        tracing::info!("Logged out");
    }
}
