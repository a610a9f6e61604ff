//! One row of the buyer's recent orders.

#[cfg(test)]
#[path = "order_row_test.rs"]
mod order_row_test;

use leptos::prelude::*;

use crate::net::types::Order;

/// Summarize the first item and how many more follow, e.g.
/// `Maize +2 more`. Orders with no titled first item fall back to the id.
#[must_use]
pub fn order_summary(order: &Order) -> String {
    let first = order
        .items
        .first()
        .and_then(|item| item.title.as_deref())
        .map_or_else(|| format!("Order #{}", order.id), ToOwned::to_owned);
    match order.items.len() {
        0 | 1 => first,
        n => format!("{first} +{} more", n - 1),
    }
}

#[component]
pub fn OrderRow(order: Order) -> impl IntoView {
    let summary = order_summary(&order);
    let status = format!("Status: {}", order.status);
    let total = format!("Total: {}", order.total_amount);

    view! {
        <div class="order-row">
            <div class="order-row__main">
                <p class="order-row__summary">{summary}</p>
                <p class="order-row__status">{status}</p>
            </div>
            <p class="order-row__total">{total}</p>
        </div>
    }
}
