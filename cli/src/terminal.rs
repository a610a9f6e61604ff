//! Composition root for the terminal: owns the session store, the gateway
//! and every page's state.
//!
//! DESIGN
//! ======
//! There is no reactive runtime here, so pages do not watch the session.
//! After anything that can change it, the terminal calls [`Terminal::sync`],
//! which reloads each mounted page whose data was loaded under an older
//! session epoch (a new login, a different role) and clears pages entirely
//! once signed out. Data fetched for a previous session is never rendered.

#[cfg(test)]
#[path = "terminal_test.rs"]
mod terminal_test;

use std::sync::Arc;

use agricompass::net::api::{ApiClient, TransportError};
use agricompass::net::http::ReqwestTransport;
use agricompass::pages::auth::{LoginForm, SignupForm, Submit};
use agricompass::pages::dashboard::DashboardState;
use agricompass::pages::explorer::ExplorerState;
use agricompass::state::session::SessionStore;
use agricompass::state::shell::{AuthMode, Screen};

use crate::config::ClientConfig;
use crate::storage::FileStorage;

#[derive(Debug)]
pub struct Terminal {
    api: ApiClient,
    session: SessionStore,
    mode: AuthMode,
    pub login: LoginForm,
    pub signup: SignupForm,
    pub dashboard: DashboardState,
    pub explorer: ExplorerState,
    explorer_epoch: Option<u64>,
}

impl Terminal {
    pub fn new(api: ApiClient, session: SessionStore) -> Self {
        Self {
            api,
            session,
            mode: AuthMode::default(),
            login: LoginForm::default(),
            signup: SignupForm::default(),
            dashboard: DashboardState::default(),
            explorer: ExplorerState::default(),
            explorer_epoch: None,
        }
    }

    /// Wire the `reqwest` transport and file-backed session storage.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(config.connect_timeout)?;
        let api = ApiClient::new(config.backend_url.clone(), Arc::new(transport));
        let session = SessionStore::restore(FileStorage::open(&config.session_file));
        Ok(Self::new(api, session))
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        Screen::of(&self.session, self.mode)
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn set_mode(&mut self, mode: AuthMode) {
        self.mode = mode;
    }

    /// Submit the login form; on success the screen becomes authenticated
    /// and the authenticated pages are mounted.
    pub async fn submit_login(&mut self) -> Submit {
        let outcome = self.login.submit(&self.api, &mut self.session).await;
        if outcome == Submit::SignedIn {
            self.login = LoginForm::default();
            self.sync().await;
        }
        outcome
    }

    /// Submit the signup form; same transition rules as [`Terminal::submit_login`].
    pub async fn submit_signup(&mut self) -> Submit {
        let outcome = self.signup.submit(&self.api, &mut self.session).await;
        if outcome == Submit::SignedIn {
            self.signup = SignupForm::default();
            self.sync().await;
        }
        outcome
    }

    /// Clear the session and every page's data; back to the login form.
    pub fn logout(&mut self) {
        self.session.logout();
        self.mode = AuthMode::Login;
        self.unmount();
    }

    /// Bring mounted pages in line with the current session.
    pub async fn sync(&mut self) {
        if !self.session.is_authenticated() {
            self.unmount();
            return;
        }
        self.mount_dashboard().await;
        self.mount_explorer().await;
    }

    /// Load the dashboard unless it already holds data for this session.
    pub async fn mount_dashboard(&mut self) {
        if !self.session.is_authenticated() || self.dashboard.is_current(&self.session) {
            return;
        }
        self.dashboard.load(&self.api, &self.session).await;
    }

    /// Explicit dashboard refresh, regardless of staleness.
    pub async fn refresh_dashboard(&mut self) {
        if self.session.is_authenticated() {
            self.dashboard.load(&self.api, &self.session).await;
        }
    }

    /// Run the initial search unless one already ran for this session.
    pub async fn mount_explorer(&mut self) {
        if !self.session.is_authenticated() || self.explorer_epoch == Some(self.session.epoch()) {
            return;
        }
        self.search().await;
    }

    /// The explicit "Search" action; always issues a request.
    pub async fn search(&mut self) {
        if !self.session.is_authenticated() {
            return;
        }
        self.explorer.search(&self.api, self.session.credential()).await;
        self.explorer_epoch = Some(self.session.epoch());
    }

    fn unmount(&mut self) {
        self.dashboard.reset();
        self.explorer = ExplorerState::default();
        self.explorer_epoch = None;
    }

    /// Whether any visible page carries an inline error.
    #[must_use]
    pub fn has_error(&self) -> bool {
        match self.screen() {
            Screen::Unauthenticated(AuthMode::Login) => self.login.error.is_some(),
            Screen::Unauthenticated(AuthMode::Signup) => self.signup.error.is_some(),
            Screen::Authenticated => self.dashboard.error.is_some() || self.explorer.error.is_some(),
        }
    }
}
