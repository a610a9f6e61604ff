//! Top-level screen selection.
//!
//! The shell has exactly two screens: `Unauthenticated` while the session
//! store holds no identity (landing text plus the login or signup form) and
//! `Authenticated` otherwise (dashboard plus listing search). The only
//! transitions are a successful auth submit and an explicit logout.

#[cfg(test)]
#[path = "shell_test.rs"]
mod shell_test;

use super::session::SessionStore;

/// Which auth form the unauthenticated screen shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Unauthenticated(AuthMode),
    Authenticated,
}

impl Screen {
    #[must_use]
    pub fn of(session: &SessionStore, mode: AuthMode) -> Self {
        if session.is_authenticated() { Self::Authenticated } else { Self::Unauthenticated(mode) }
    }
}
