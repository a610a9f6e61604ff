//! Listing search with backend-side filtering.
//!
//! The explorer keeps only its filter fields and the latest results. Each
//! search rebuilds the query string from scratch, so nothing from a previous
//! filter state leaks into the next request. There is no debounce and no
//! result cache. The component searches once on mount and again on every
//! press of the search button.

#[cfg(test)]
#[path = "explorer_test.rs"]
mod explorer_test;

use leptos::prelude::*;

use crate::components::listing_card::{CardStyle, ListingCard};
use crate::net::api::{ApiClient, ApiError};
use crate::net::types::{LISTING_CATEGORIES, Listing};
use crate::state::session::SessionStore;

/// Free-form filter inputs. Empty fields are omitted; everything else is
/// sent exactly as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingFilters {
    pub q: String,
    pub category: String,
    pub region: String,
    pub min_price: String,
    pub max_price: String,
}

impl ListingFilters {
    /// Non-empty filters as `(name, value)` pairs.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("q", self.q.as_str()),
            ("category", self.category.as_str()),
            ("region", self.region.as_str()),
            ("min_price", self.min_price.as_str()),
            ("max_price", self.max_price.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }

    /// Form-urlencoded query string without the leading `?`.
    #[must_use]
    pub fn query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs())
            .finish()
    }
}

/// Display label for a category value, e.g. `grains` -> `Grains`.
#[must_use]
pub fn category_label(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Clone, Debug, Default)]
pub struct ExplorerState {
    pub filters: ListingFilters,
    pub items: Vec<Listing>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ExplorerState {
    /// Mark a search in flight and return its query string.
    pub fn begin_search(&mut self) -> String {
        self.loading = true;
        self.error = None;
        let query = self.filters.query_string();
        tracing::debug!(%query, "listing search");
        query
    }

    /// Apply a search result. A failure keeps the previous results.
    pub fn finish_search(&mut self, result: Result<Vec<Listing>, ApiError>) {
        match result {
            Ok(items) => self.items = items,
            Err(e) => self.error = Some(e.message().to_owned()),
        }
        self.loading = false;
    }

    /// Run the search with the current filters, replacing prior results.
    pub async fn search(&mut self, api: &ApiClient, credential: Option<&str>) {
        let query = self.begin_search();
        let result = api.listings(credential, &query).await;
        self.finish_search(result);
    }
}

#[component]
pub fn ListingExplorer() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionStore>>();
    let api = expect_context::<ApiClient>();
    let state = RwSignal::new(ExplorerState::default());

    let search = Callback::new(move |()| {
        let Some(query) = state.try_update(ExplorerState::begin_search) else {
            return;
        };
        let (epoch, credential) = session.with_untracked(|s| (s.epoch(), s.credential().map(ToOwned::to_owned)));
        let api = api.clone();
        leptos::task::spawn_local(async move {
            let result = api.listings(credential.as_deref(), &query).await;
            if session.with_untracked(SessionStore::epoch) != epoch {
                state.update(|s| s.loading = false);
                return;
            }
            state.update(|s| s.finish_search(result));
        });
    });

    Effect::new(move || search.run(()));

    view! {
        <section class="explorer">
            <div class="explorer__filters">
                <input
                    class="explorer__input"
                    placeholder="Search"
                    prop:value=move || state.with(|s| s.filters.q.clone())
                    on:input=move |ev| state.update(|s| s.filters.q = event_target_value(&ev))
                />
                <select
                    class="explorer__input"
                    prop:value=move || state.with(|s| s.filters.category.clone())
                    on:change=move |ev| state.update(|s| s.filters.category = event_target_value(&ev))
                >
                    <option value="">"All categories"</option>
                    {LISTING_CATEGORIES
                        .iter()
                        .map(|category| view! { <option value=*category>{category_label(category)}</option> })
                        .collect::<Vec<_>>()}
                </select>
                <input
                    class="explorer__input"
                    placeholder="Region"
                    prop:value=move || state.with(|s| s.filters.region.clone())
                    on:input=move |ev| state.update(|s| s.filters.region = event_target_value(&ev))
                />
                <input
                    class="explorer__input explorer__input--price"
                    placeholder="Min $"
                    prop:value=move || state.with(|s| s.filters.min_price.clone())
                    on:input=move |ev| state.update(|s| s.filters.min_price = event_target_value(&ev))
                />
                <input
                    class="explorer__input explorer__input--price"
                    placeholder="Max $"
                    prop:value=move || state.with(|s| s.filters.max_price.clone())
                    on:input=move |ev| state.update(|s| s.filters.max_price = event_target_value(&ev))
                />
                <button class="explorer__search" on:click=move |_| search.run(())>"Search"</button>
            </div>
            <Show
                when=move || !state.with(|s| s.loading)
                fallback=|| view! { <p class="explorer__loading">"Loading..."</p> }
            >
                <Show when=move || state.with(|s| s.error.is_some())>
                    <p class="explorer__error">{move || state.with(|s| s.error.clone().unwrap_or_default())}</p>
                </Show>
                <div class="explorer__results">
                    {move || {
                        state.with(|s| {
                            s.items
                                .iter()
                                .cloned()
                                .map(|listing| view! { <ListingCard listing=listing style=CardStyle::EXPLORER/> })
                                .collect::<Vec<_>>()
                        })
                    }}
                    <Show when=move || state.with(|s| s.items.is_empty())>
                        <p class="explorer__empty">"No results."</p>
                    </Show>
                </div>
            </Show>
        </section>
    }
}
