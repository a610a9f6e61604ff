//! Reusable view components shared across pages.

pub mod listing_card;
pub mod order_row;
