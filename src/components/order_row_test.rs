use super::*;
use crate::net::types::{Amount, OrderItem, RecordId};

fn order(titles: &[&str]) -> Order {
    Order {
        id: RecordId::Int(100),
        status: "pending".to_owned(),
        items: titles.iter().map(|t| OrderItem { title: Some((*t).to_owned()) }).collect(),
        total_amount: Amount::Number(250.into()),
    }
}

#[test]
fn single_item_has_no_suffix() {
    assert_eq!(order_summary(&order(&["Maize"])), "Maize");
}

#[test]
fn extra_items_are_counted() {
    assert_eq!(order_summary(&order(&["Maize", "Beans", "Yam"])), "Maize +2 more");
}

#[test]
fn empty_order_falls_back_to_id() {
    assert_eq!(order_summary(&order(&[])), "Order #100");
}

#[test]
fn untitled_first_item_falls_back_to_id() {
    let mut o = order(&["Maize", "Beans"]);
    o.items[0].title = None;
    assert_eq!(order_summary(&o), "Order #100 +1 more");
}

#[test]
fn text_ids_are_shown_as_is() {
    let o = Order { id: RecordId::Text("ord-7".to_owned()), ..order(&[]) };
    assert_eq!(order_summary(&o), "Order #ord-7");
}
