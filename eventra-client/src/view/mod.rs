//! Pure mappings from backend models to fragments.
//!
//! Same input, same fragment; nothing here fetches or caches.

pub mod admin;
pub mod bookings;
pub mod events;
pub mod fragment;
pub mod nav;
pub mod seats;

use chrono::NaiveDateTime;
use eventra_shared::Money;

pub use fragment::{Action, AdminTab, Element, Node};

pub(crate) fn when(at: &NaiveDateTime) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

pub(crate) fn dollars(amount: Money) -> String {
    format!("${}", amount)
}

pub(crate) fn para(text: impl Into<String>) -> Element {
    Element::new("p").text(text)
}

/// `<p>` with an empty-state message.
pub(crate) fn empty(message: &str) -> Element {
    Element::new("p").class("empty").text(message)
}
