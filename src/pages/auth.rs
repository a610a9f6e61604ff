//! Login and signup forms.
//!
//! SYSTEM CONTEXT
//! ==============
//! These are the only views that establish a session. A successful submit
//! writes identity and credential into the session store, which is what moves
//! the shell from unauthenticated to authenticated. A failed submit keeps the
//! form contents and shows the gateway's message inline.
//!
//! Each form splits a submit into `begin` (gate on `loading`, build the
//! request) and `finish` (clear `loading`, keep the error or hand back the
//! new session), so the components can await between the two without holding
//! a borrow of the form.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;

use crate::net::api::{ApiClient, ApiError};
use crate::net::types::{Identity, LoginRequest, LoginResponse, Role, SignupRequest, SignupResponse};
use crate::state::session::SessionStore;

/// Outcome of a form submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submit {
    /// The session store now holds the new session.
    SignedIn,
    /// The request failed; the message is in the form's `error`.
    Failed,
    /// A previous submission is still in flight; nothing was sent.
    Busy,
}

/// A session ready to be installed with [`SessionStore::establish`].
#[derive(Clone, Debug, PartialEq)]
pub struct NewSession {
    pub identity: Identity,
    pub credential: String,
}

#[derive(Clone, Debug, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub loading: bool,
    pub error: Option<String>,
}

impl LoginForm {
    /// Start a submission. `None` while one is already in flight.
    pub fn begin(&mut self) -> Option<LoginRequest> {
        if self.loading {
            return None;
        }
        self.error = None;
        self.loading = true;
        Some(LoginRequest { email: self.email.clone(), password: self.password.clone() })
    }

    pub fn finish(&mut self, result: Result<LoginResponse, ApiError>) -> Option<NewSession> {
        self.loading = false;
        match result {
            Ok(res) => Some(NewSession {
                identity: Identity { id: res.id, name: res.name, role: res.role },
                credential: res.token,
            }),
            Err(e) => {
                self.error = Some(e.message().to_owned());
                None
            }
        }
    }

    pub async fn submit(&mut self, api: &ApiClient, session: &mut SessionStore) -> Submit {
        let Some(request) = self.begin() else {
            return Submit::Busy;
        };
        let result = api.login(&request).await;
        match self.finish(result) {
            Some(new) => {
                session.establish(new.identity, new.credential);
                Submit::SignedIn
            }
            None => Submit::Failed,
        }
    }

    #[must_use]
    pub fn button_label(&self) -> &'static str {
        if self.loading { "Signing in..." } else { "Sign in" }
    }
}

#[derive(Clone, Debug)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub region: String,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for SignupForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: String::new(),
            role: Role::Farmer,
            region: String::new(),
            loading: false,
            error: None,
        }
    }
}

impl SignupForm {
    /// Start a submission. `None` while one is already in flight.
    pub fn begin(&mut self) -> Option<SignupRequest> {
        if self.loading {
            return None;
        }
        self.error = None;
        self.loading = true;
        Some(SignupRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            role: self.role,
            region: self.region.clone(),
        })
    }

    /// The backend does not echo name and role, so they come from the
    /// request that was actually sent.
    pub fn finish(&mut self, submitted: &SignupRequest, result: Result<SignupResponse, ApiError>) -> Option<NewSession> {
        self.loading = false;
        match result {
            Ok(res) => Some(NewSession {
                identity: Identity { id: res.id, name: submitted.name.clone(), role: submitted.role },
                credential: res.token,
            }),
            Err(e) => {
                self.error = Some(e.message().to_owned());
                None
            }
        }
    }

    pub async fn submit(&mut self, api: &ApiClient, session: &mut SessionStore) -> Submit {
        let Some(request) = self.begin() else {
            return Submit::Busy;
        };
        let result = api.signup(&request).await;
        match self.finish(&request, result) {
            Some(new) => {
                session.establish(new.identity, new.credential);
                Submit::SignedIn
            }
            None => Submit::Failed,
        }
    }

    #[must_use]
    pub fn button_label(&self) -> &'static str {
        if self.loading { "Creating..." } else { "Create account" }
    }
}

/// Roles offered by the signup form, in display order.
pub const SIGNUP_ROLES: [Role; 3] = [Role::Farmer, Role::Buyer, Role::Officer];

#[must_use]
pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::Farmer => "Farmer",
        Role::Buyer => "Buyer",
        Role::Officer => "Field Officer",
    }
}

#[component]
pub fn LoginView() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionStore>>();
    let api = expect_context::<ApiClient>();
    let form = RwSignal::new(LoginForm::default());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(request) = form.try_update(LoginForm::begin).flatten() else {
            return;
        };
        let api = api.clone();
        leptos::task::spawn_local(async move {
            let result = api.login(&request).await;
            if let Some(new) = form.try_update(|f| f.finish(result)).flatten() {
                session.update(|s| s.establish(new.identity, new.credential));
            }
        });
    };

    view! {
        <div class="auth-card">
            <h2 class="auth-card__title">"Welcome back"</h2>
            <form class="auth-form" on:submit=on_submit>
                <input
                    class="auth-input"
                    placeholder="Email"
                    prop:value=move || form.with(|f| f.email.clone())
                    on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                />
                <input
                    class="auth-input"
                    type="password"
                    placeholder="Password"
                    prop:value=move || form.with(|f| f.password.clone())
                    on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                />
                <Show when=move || form.with(|f| f.error.is_some())>
                    <p class="auth-error">{move || form.with(|f| f.error.clone().unwrap_or_default())}</p>
                </Show>
                <button class="auth-button" type="submit" disabled=move || form.with(|f| f.loading)>
                    {move || form.with(LoginForm::button_label)}
                </button>
            </form>
        </div>
    }
}

#[component]
pub fn SignupView() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionStore>>();
    let api = expect_context::<ApiClient>();
    let form = RwSignal::new(SignupForm::default());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(request) = form.try_update(SignupForm::begin).flatten() else {
            return;
        };
        let api = api.clone();
        leptos::task::spawn_local(async move {
            let result = api.signup(&request).await;
            if let Some(new) = form.try_update(|f| f.finish(&request, result)).flatten() {
                session.update(|s| s.establish(new.identity, new.credential));
            }
        });
    };

    let on_role = move |ev: leptos::ev::Event| {
        if let Ok(role) = event_target_value(&ev).parse::<Role>() {
            form.update(|f| f.role = role);
        }
    };

    view! {
        <div class="auth-card">
            <h2 class="auth-card__title">"Create your account"</h2>
            <form class="auth-form" on:submit=on_submit>
                <input
                    class="auth-input"
                    placeholder="Full name"
                    prop:value=move || form.with(|f| f.name.clone())
                    on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                />
                <input
                    class="auth-input"
                    placeholder="Email"
                    prop:value=move || form.with(|f| f.email.clone())
                    on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                />
                <input
                    class="auth-input"
                    type="password"
                    placeholder="Password"
                    prop:value=move || form.with(|f| f.password.clone())
                    on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                />
                <select
                    class="auth-input"
                    prop:value=move || form.with(|f| f.role.as_str())
                    on:change=on_role
                >
                    {SIGNUP_ROLES
                        .iter()
                        .map(|role| view! { <option value=role.as_str()>{role_label(*role)}</option> })
                        .collect::<Vec<_>>()}
                </select>
                <input
                    class="auth-input"
                    placeholder="Region/Location"
                    prop:value=move || form.with(|f| f.region.clone())
                    on:input=move |ev| form.update(|f| f.region = event_target_value(&ev))
                />
                <Show when=move || form.with(|f| f.error.is_some())>
                    <p class="auth-error">{move || form.with(|f| f.error.clone().unwrap_or_default())}</p>
                </Show>
                <button class="auth-button auth-button--signup" type="submit" disabled=move || form.with(|f| f.loading)>
                    {move || form.with(SignupForm::button_label)}
                </button>
            </form>
        </div>
    }
}
