//! Card for a single listing, shared by the dashboard and the explorer.
//!
//! DESIGN
//! ======
//! The two screens differ only in the placeholder for a missing region and
//! whether the quality grade is shown, so that is all `CardStyle` carries.

#[cfg(test)]
#[path = "listing_card_test.rs"]
mod listing_card_test;

use leptos::prelude::*;

use crate::net::types::Listing;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardStyle {
    pub unknown_region: &'static str,
    pub show_grade: bool,
}

impl CardStyle {
    pub const DASHBOARD: Self = Self { unknown_region: "Unknown region", show_grade: false };
    pub const EXPLORER: Self = Self { unknown_region: "Unknown", show_grade: true };
}

/// Region, or the style's placeholder when missing or empty.
#[must_use]
pub fn region_label(listing: &Listing, style: CardStyle) -> &str {
    listing
        .region
        .as_deref()
        .filter(|r| !r.is_empty())
        .unwrap_or(style.unknown_region)
}

/// `region • category`.
#[must_use]
pub fn location_label(listing: &Listing, style: CardStyle) -> String {
    format!("{} \u{2022} {}", region_label(listing, style), listing.category)
}

/// `unit_price / unit`, amounts shown exactly as the backend sent them.
#[must_use]
pub fn price_label(listing: &Listing) -> String {
    format!("{} / {}", listing.unit_price, listing.unit)
}

#[must_use]
pub fn quantity_label(listing: &Listing) -> String {
    format!("Qty: {}", listing.quantity_available)
}

/// `Grade X` when the style shows grades and the listing has been graded.
#[must_use]
pub fn grade_label(listing: &Listing, style: CardStyle) -> Option<String> {
    if !style.show_grade {
        return None;
    }
    listing
        .quality_grade
        .as_deref()
        .filter(|g| !g.is_empty())
        .map(|g| format!("Grade {g}"))
}

#[component]
pub fn ListingCard(listing: Listing, style: CardStyle) -> impl IntoView {
    let location = location_label(&listing, style);
    let price = price_label(&listing);
    let quantity = quantity_label(&listing);
    let grade = grade_label(&listing, style);

    view! {
        <div class="listing-card">
            <div class="listing-card__main">
                <p class="listing-card__title">{listing.title}</p>
                <p class="listing-card__location">{location}</p>
                {grade.map(|grade| view! { <p class="listing-card__grade">{grade}</p> })}
            </div>
            <div class="listing-card__numbers">
                <p class="listing-card__price">{price}</p>
                <p class="listing-card__qty">{quantity}</p>
            </div>
        </div>
    }
}
