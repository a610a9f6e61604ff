//! Plain-text rendering of page state, one `Display` type per screen part.
//!
//! The text mirrors the browser markup line for line: same labels, same
//! placeholders, same empty-state messages.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::fmt;

use agricompass::app::{BRAND, TAGLINE};
use agricompass::components::listing_card::{self, CardStyle};
use agricompass::components::order_row::order_summary;
use agricompass::net::types::{Listing, Order};
use agricompass::pages::auth::{LoginForm, SignupForm, role_label};
use agricompass::pages::dashboard::{DashboardState, caption, greeting};
use agricompass::pages::explorer::ExplorerState;
use agricompass::state::session::SessionStore;
use agricompass::state::shell::{AuthMode, Screen};

use crate::terminal::Terminal;

/// One-line status header.
pub struct Header<'a>(pub &'a SessionStore);

impl fmt::Display for Header<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.identity() {
            Some(identity) => writeln!(f, "{BRAND} | signed in as {} ({})", identity.name, identity.role),
            None => writeln!(f, "{BRAND} | signed out"),
        }
    }
}

pub struct LoginText<'a>(pub &'a LoginForm);

impl fmt::Display for LoginText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let form = self.0;
        writeln!(f, "Welcome back")?;
        writeln!(f, "  Email: {}", form.email)?;
        writeln!(f, "  Password: {}", mask(&form.password))?;
        if let Some(error) = &form.error {
            writeln!(f, "  ! {error}")?;
        }
        writeln!(f, "  [{}]", form.button_label())
    }
}

pub struct SignupText<'a>(pub &'a SignupForm);

impl fmt::Display for SignupText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let form = self.0;
        writeln!(f, "Create your account")?;
        writeln!(f, "  Full name: {}", form.name)?;
        writeln!(f, "  Email: {}", form.email)?;
        writeln!(f, "  Password: {}", mask(&form.password))?;
        writeln!(f, "  Role: {}", role_label(form.role))?;
        writeln!(f, "  Region/Location: {}", form.region)?;
        if let Some(error) = &form.error {
            writeln!(f, "  ! {error}")?;
        }
        writeln!(f, "  [{}]", form.button_label())
    }
}

pub struct ListingText<'a>(pub &'a Listing, pub CardStyle);

impl fmt::Display for ListingText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self(listing, style) = *self;
        writeln!(f, "- {}  {}", listing.title, listing_card::price_label(listing))?;
        writeln!(
            f,
            "    {}  {}",
            listing_card::location_label(listing, style),
            listing_card::quantity_label(listing)
        )?;
        if let Some(grade) = listing_card::grade_label(listing, style) {
            writeln!(f, "    {grade}")?;
        }
        Ok(())
    }
}

pub struct OrderText<'a>(pub &'a Order);

impl fmt::Display for OrderText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let order = self.0;
        writeln!(f, "- {}", order_summary(order))?;
        writeln!(f, "    Status: {}  Total: {}", order.status, order.total_amount)
    }
}

pub struct DashboardText<'a> {
    pub state: &'a DashboardState,
    pub session: &'a SessionStore,
}

impl fmt::Display for DashboardText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let identity = self.session.identity();
        writeln!(f, "{}", greeting(identity))?;
        writeln!(f, "{}", caption(identity))?;
        if let Some(error) = &self.state.error {
            writeln!(f, "! {error}")?;
        }

        writeln!(f, "\nActive listings ({})", self.state.listings.len())?;
        if self.state.listings.is_empty() {
            writeln!(f, "  No listings yet.")?;
        }
        for listing in &self.state.listings {
            write!(f, "{}", ListingText(listing, CardStyle::DASHBOARD))?;
        }

        if identity.is_some_and(|i| i.role.sees_orders()) {
            writeln!(f, "\nRecent orders ({})", self.state.orders.len())?;
            if self.state.orders.is_empty() {
                writeln!(f, "  No orders yet.")?;
            }
            for order in &self.state.orders {
                write!(f, "{}", OrderText(order))?;
            }
        }
        Ok(())
    }
}

pub struct ExplorerText<'a>(pub &'a ExplorerState);

impl fmt::Display for ExplorerText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        writeln!(f, "Listings")?;
        let pairs = state.filters.pairs();
        if !pairs.is_empty() {
            let summary: Vec<String> = pairs.iter().map(|(k, v)| format!("{k}={v:?}")).collect();
            writeln!(f, "  Filters: {}", summary.join(", "))?;
        }
        if state.loading {
            return writeln!(f, "  Loading...");
        }
        if let Some(error) = &state.error {
            writeln!(f, "! {error}")?;
        }
        if state.items.is_empty() {
            writeln!(f, "  No results.")?;
        }
        for item in &state.items {
            write!(f, "{}", ListingText(item, CardStyle::EXPLORER))?;
        }
        Ok(())
    }
}

/// The whole current screen, header first.
pub struct ScreenText<'a>(pub &'a Terminal);

impl fmt::Display for ScreenText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terminal = self.0;
        write!(f, "{}", Header(terminal.session()))?;
        match terminal.screen() {
            Screen::Unauthenticated(mode) => {
                writeln!(f, "{TAGLINE}\n")?;
                match mode {
                    AuthMode::Login => write!(f, "[Login]  Sign up\n\n{}", LoginText(&terminal.login)),
                    AuthMode::Signup => write!(f, " Login  [Sign up]\n\n{}", SignupText(&terminal.signup)),
                }
            }
            Screen::Authenticated => {
                let dashboard = DashboardText { state: &terminal.dashboard, session: terminal.session() };
                write!(f, "\n{dashboard}\n{}", ExplorerText(&terminal.explorer))
            }
        }
    }
}

fn mask(secret: &str) -> String {
    "*".repeat(secret.chars().count())
}
