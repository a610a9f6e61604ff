//! Role-aware dashboard: active listings for everyone, orders for buyers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted by the shell once a session exists. The component reloads
//! whenever the session's [`LoadStamp`] changes, so a re-login (same role or
//! not) always refetches.
//!
//! DESIGN
//! ======
//! A load is split into `begin` (mark loading), [`fetch_dashboard`] (the
//! awaited requests, with a snapshot of the credential) and `finish` (apply).
//! `finish` drops results whose stamp no longer matches the session, so a
//! response that lands after logout or a role switch never shows up.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::components::listing_card::{CardStyle, ListingCard};
use crate::components::order_row::OrderRow;
use crate::net::api::ApiClient;
use crate::net::types::{Identity, Listing, Order, Role};
use crate::state::session::SessionStore;

/// Endpoints a dashboard load hits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DashboardFetch {
    Listings,
    Orders,
}

/// Listings are fetched for every role, orders only for buyers.
#[must_use]
pub fn fetch_plan(role: Role) -> Vec<DashboardFetch> {
    if role.sees_orders() {
        vec![DashboardFetch::Listings, DashboardFetch::Orders]
    } else {
        vec![DashboardFetch::Listings]
    }
}

/// The session generation and role a load ran under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadStamp {
    pub role: Role,
    pub epoch: u64,
}

impl LoadStamp {
    #[must_use]
    pub fn of(session: &SessionStore) -> Option<Self> {
        session.role().map(|role| Self { role, epoch: session.epoch() })
    }
}

/// Results of one load, not yet applied.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardLoad {
    pub stamp: LoadStamp,
    pub listings: Option<Vec<Listing>>,
    pub orders: Option<Vec<Order>>,
    pub error: Option<String>,
}

/// Run the fetch plan for `stamp.role` in order, stopping at the first error.
pub async fn fetch_dashboard(api: &ApiClient, credential: Option<&str>, stamp: LoadStamp) -> DashboardLoad {
    tracing::debug!(role = %stamp.role, epoch = stamp.epoch, "dashboard load");
    let mut load = DashboardLoad { stamp, listings: None, orders: None, error: None };
    for fetch in fetch_plan(stamp.role) {
        let result = match fetch {
            DashboardFetch::Listings => api.listings(credential, "").await.map(|l| load.listings = Some(l)),
            DashboardFetch::Orders => api.orders(credential).await.map(|o| load.orders = Some(o)),
        };
        if let Err(e) = result {
            load.error = Some(e.message().to_owned());
            break;
        }
    }
    load
}

#[derive(Clone, Debug, Default)]
pub struct DashboardState {
    pub listings: Vec<Listing>,
    pub orders: Vec<Order>,
    pub error: Option<String>,
    pub loading: bool,
    loaded: Option<LoadStamp>,
}

impl DashboardState {
    #[must_use]
    pub fn loaded(&self) -> Option<LoadStamp> {
        self.loaded
    }

    /// Whether the held data belongs to the current session.
    #[must_use]
    pub fn is_current(&self, session: &SessionStore) -> bool {
        self.loaded.is_some() && self.loaded == LoadStamp::of(session)
    }

    /// Drop all loaded data.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn begin(&mut self) {
        self.error = None;
        self.loading = true;
    }

    /// Apply `load` if it still matches `current`. Returns whether it was
    /// applied. Data from earlier loads survives a partial failure.
    pub fn finish(&mut self, load: DashboardLoad, current: Option<LoadStamp>) -> bool {
        if current != Some(load.stamp) {
            tracing::debug!(epoch = load.stamp.epoch, "dropping stale dashboard load");
            return false;
        }
        if let Some(listings) = load.listings {
            self.listings = listings;
        }
        if let Some(orders) = load.orders {
            self.orders = orders;
        }
        if !load.stamp.role.sees_orders() {
            self.orders.clear();
        }
        self.error = load.error;
        self.loaded = Some(load.stamp);
        self.loading = false;
        true
    }

    /// Begin, fetch and finish in one step against `session`.
    pub async fn load(&mut self, api: &ApiClient, session: &SessionStore) {
        let Some(stamp) = LoadStamp::of(session) else {
            self.reset();
            return;
        };
        self.begin();
        let load = fetch_dashboard(api, session.credential(), stamp).await;
        self.finish(load, LoadStamp::of(session));
    }
}

/// `Hello, <name>`, or `Hello, there` without a usable name.
#[must_use]
pub fn greeting(identity: Option<&Identity>) -> String {
    let name = identity.map(|i| i.name.as_str()).filter(|n| !n.is_empty()).unwrap_or("there");
    format!("Hello, {name}")
}

#[must_use]
pub fn caption(identity: Option<&Identity>) -> String {
    format!("Your {} dashboard", identity.map(|i| i.role.as_str()).unwrap_or_default())
}

#[component]
pub fn Dashboard() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionStore>>();
    let api = expect_context::<ApiClient>();
    let state = RwSignal::new(DashboardState::default());

    let stamp = Memo::new(move |_| session.with(LoadStamp::of));
    Effect::new(move || {
        let Some(stamp) = stamp.get() else {
            state.update(DashboardState::reset);
            return;
        };
        let credential = session.with_untracked(|s| s.credential().map(ToOwned::to_owned));
        state.update(DashboardState::begin);
        let api = api.clone();
        leptos::task::spawn_local(async move {
            let load = fetch_dashboard(&api, credential.as_deref(), stamp).await;
            let current = session.with_untracked(LoadStamp::of);
            state.update(|s| {
                s.finish(load, current);
            });
        });
    });

    let on_logout = move |_| session.update(SessionStore::logout);
    let shows_orders = move || session.with(|s| s.role().is_some_and(Role::sees_orders));

    view! {
        <section class="dashboard">
            <div class="dashboard__header">
                <div>
                    <h2 class="dashboard__greeting">{move || session.with(|s| greeting(s.identity()))}</h2>
                    <p class="dashboard__caption">{move || session.with(|s| caption(s.identity()))}</p>
                </div>
                <button class="dashboard__logout" on:click=on_logout>"Log out"</button>
            </div>
            <Show when=move || state.with(|s| s.error.is_some())>
                <p class="dashboard__error">{move || state.with(|s| s.error.clone().unwrap_or_default())}</p>
            </Show>
            <div class="dashboard__panels">
                <div class="dashboard__panel">
                    <div class="dashboard__panel-head">
                        <h3>"Active listings"</h3>
                        <span class="pill">{move || state.with(|s| s.listings.len())}</span>
                    </div>
                    <div class="dashboard__list">
                        {move || {
                            state.with(|s| {
                                s.listings
                                    .iter()
                                    .cloned()
                                    .map(|listing| view! { <ListingCard listing=listing style=CardStyle::DASHBOARD/> })
                                    .collect::<Vec<_>>()
                            })
                        }}
                        <Show when=move || state.with(|s| s.listings.is_empty())>
                            <p class="dashboard__empty">"No listings yet."</p>
                        </Show>
                    </div>
                </div>
                <Show when=shows_orders>
                    <div class="dashboard__panel">
                        <div class="dashboard__panel-head">
                            <h3>"Recent orders"</h3>
                            <span class="pill">{move || state.with(|s| s.orders.len())}</span>
                        </div>
                        <div class="dashboard__list">
                            {move || {
                                state.with(|s| {
                                    s.orders
                                        .iter()
                                        .cloned()
                                        .map(|order| view! { <OrderRow order=order/> })
                                        .collect::<Vec<_>>()
                                })
                            }}
                            <Show when=move || state.with(|s| s.orders.is_empty())>
                                <p class="dashboard__empty">"No orders yet."</p>
                            </Show>
                        </div>
                    </div>
                </Show>
            </div>
        </section>
    }
}
