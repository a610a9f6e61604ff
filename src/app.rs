//! Root application component, HTML shell and the two-screen layout.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` is the composition root. It restores the session store, places it
//! in context as an `RwSignal<SessionStore>` next to the [`ApiClient`], and
//! renders [`Shell`]. Pages read both from context; the auth views and the
//! dashboard's logout button are the only writers of the session.
//!
//! [`ApiClient`]: crate::net::api::ApiClient

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};

use crate::net::browser::browser_client;
use crate::pages::auth::{LoginView, SignupView};
use crate::pages::dashboard::Dashboard;
use crate::pages::explorer::ListingExplorer;
use crate::state::session::SessionStore;
use crate::state::shell::{AuthMode, Screen};

pub const BRAND: &str = "Agricompass";
pub const TAGLINE: &str = "A trusted B2B marketplace connecting farmers with buyers and field officers. \
                           Create an account to start listing produce or sourcing supplies.";
pub const HIGHLIGHTS: [&str; 4] = [
    "Role-based access for farmers, buyers, and officers",
    "Browse live produce listings with filters",
    "Place and track orders",
    "Simple messaging for coordination",
];

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(restore_session());
    provide_context(session);
    provide_context(browser_client());

    view! {
        <Stylesheet id="leptos" href="/pkg/agricompass.css"/>
        <Title text=BRAND/>
        <Shell/>
    }
}

#[cfg(feature = "hydrate")]
fn restore_session() -> SessionStore {
    SessionStore::restore(crate::util::storage::LocalStorage)
}

#[cfg(not(feature = "hydrate"))]
fn restore_session() -> SessionStore {
    SessionStore::restore(crate::util::storage::MemoryStorage::new())
}

/// Landing plus auth forms while signed out; dashboard plus listing search
/// once a session exists.
#[component]
pub fn Shell() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionStore>>();
    let mode = RwSignal::new(AuthMode::default());

    // The session lives in localStorage, which the server cannot read.
    // Nothing renders until mounted so server and client markup agree.
    let mounted = RwSignal::new(false);
    Effect::new(move || mounted.set(true));

    // Logout always lands on the login form.
    Effect::new(move || {
        if !session.with(SessionStore::is_authenticated) {
            mode.set(AuthMode::Login);
        }
    });

    let authenticated = move || session.with(|s| Screen::of(s, mode.get_untracked())) == Screen::Authenticated;

    view! {
        <Show when=move || mounted.get()>
            <Show when=authenticated fallback=move || view! { <Landing mode=mode/> }>
                <main class="shell shell--authenticated">
                    <Dashboard/>
                    <ListingExplorer/>
                </main>
            </Show>
        </Show>
    }
}

#[component]
fn Landing(mode: RwSignal<AuthMode>) -> impl IntoView {
    view! {
        <main class="shell shell--landing">
            <div class="landing__intro">
                <h1 class="landing__brand">{BRAND}</h1>
                <p class="landing__tagline">{TAGLINE}</p>
                <ul class="landing__highlights">
                    {HIGHLIGHTS.iter().map(|item| view! { <li>{*item}</li> }).collect::<Vec<_>>()}
                </ul>
            </div>
            <div class="landing__auth">
                <div class="landing__tabs">
                    <button
                        class="landing__tab"
                        class:landing__tab--active=move || mode.get() == AuthMode::Login
                        on:click=move |_| mode.set(AuthMode::Login)
                    >
                        "Login"
                    </button>
                    <button
                        class="landing__tab"
                        class:landing__tab--active=move || mode.get() == AuthMode::Signup
                        on:click=move |_| mode.set(AuthMode::Signup)
                    >
                        "Sign up"
                    </button>
                </div>
                <Show when=move || mode.get() == AuthMode::Login fallback=|| view! { <SignupView/> }>
                    <LoginView/>
                </Show>
            </div>
        </main>
    }
}
