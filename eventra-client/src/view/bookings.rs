use eventra_shared::models::MyBooking;

use super::{dollars, empty, para, when, Element};

pub fn my_bookings(bookings: &[MyBooking]) -> Element {
    let list = Element::new("div").id("myBookingsList");
    if bookings.is_empty() {
        return list.child(empty("No bookings yet."));
    }
    list.children(bookings.iter().map(|b| {
        Element::new("div")
            .class("booking-item")
            .child(
                Element::new("div")
                    .class("ticket-left")
                    .child(Element::new("h3").class("ticket-title").text(&b.event_title))
                    .child(para(when(&b.date)).class("ticket-info"))
                    .child(Element::new("div").class("ticket-seats").text(format!("Seats: {}", b.seats)))
                    .child(Element::new("strong").text(format!("Total: {}", dollars(b.total_amount)))),
            )
            .child(
                Element::new("div").class("ticket-right").child(
                    Element::new("span")
                        .class(format!("ticket-status {}", b.status))
                        .text(b.status.to_string()),
                ),
            )
    }))
}
