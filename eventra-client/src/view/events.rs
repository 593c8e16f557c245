use eventra_shared::models::{
    EventAnalytics, EventBooking, EventDetails, EventStatus, OrganizerEvent, OrganizerStats,
    PublicEvent,
};
use eventra_shared::Id;

use super::{dollars, empty, para, when, Action, Element};

pub fn public_events(events: &[PublicEvent]) -> Element {
    let list = Element::new("div").id("publicEventsList");
    if events.is_empty() {
        return list.child(empty("No upcoming events."));
    }
    list.children(events.iter().map(|e| {
        Element::new("div")
            .class("event-card")
            .child(Element::new("h3").text(&e.title))
            .child(para(format!("{} | {}", e.venue, dollars(e.base_price))))
            .child(para(when(&e.date_time)))
            .child(
                Element::new("button")
                    .class("btn-primary")
                    .text("Book Tickets")
                    .on(Action::BookTickets {
                        event_id: e.id.clone(),
                    }),
            )
    }))
}

pub fn event_info(event: &EventDetails) -> Element {
    Element::new("div")
        .id("eventInfo")
        .child(Element::new("h1").text(&event.title))
        .child(para(event.description.clone().unwrap_or_default()))
        .child(para(format!(
            "Venue: {}, {}",
            event.venue_name, event.venue_address
        )))
        .child(para(format!("Date: {}", when(&event.date_time))))
}

fn status_class(status: EventStatus) -> &'static str {
    match status {
        EventStatus::Active => "status-active",
        EventStatus::Cancelled => "status-cancelled",
        EventStatus::Suspended => "status-suspended",
    }
}

pub(crate) fn status_badge(status: EventStatus) -> Element {
    Element::new("span").class(status_class(status)).text(status.as_str())
}

pub fn organizer_events(events: &[OrganizerEvent]) -> Element {
    let list = Element::new("div").id("eventsList");
    if events.is_empty() {
        return list.child(empty("No events found."));
    }
    list.children(events.iter().map(|e| {
        Element::new("div")
            .class("event-card")
            .child(Element::new("h3").text(&e.title))
            .child(para(format!("Date: {}", when(&e.date_time))))
            .child(Element::new("p").text("Status: ").child(status_badge(e.status)))
            .child(
                Element::new("button")
                    .class("btn-primary manage-btn")
                    .text("Manage")
                    .on(Action::ManageEvent {
                        event_id: e.id.clone(),
                        title: e.title.clone(),
                        status: e.status,
                    }),
            )
    }))
}

pub fn organizer_stats(stats: &OrganizerStats) -> Element {
    Element::new("div")
        .id("organizerStats")
        .child(stat("globalEvents", "Events", stats.total_events.to_string()))
        .child(stat("globalTickets", "Tickets Sold", stats.total_tickets_sold.to_string()))
        .child(stat("globalRevenue", "Revenue", dollars(stats.total_revenue)))
}

pub(crate) fn stat(id: &str, label: &str, value: String) -> Element {
    Element::new("div")
        .class("stat-card")
        .child(Element::new("h4").text(label))
        .child(Element::new("span").id(id).text(value))
}

/// The organizer's toggle: active events can be cancelled, anything else
/// re-activated.
pub fn status_toggle(event_id: &Id, status: EventStatus) -> Element {
    let (label, class, next) = if status == EventStatus::Active {
        ("Cancel Event", "btn-danger", EventStatus::Cancelled)
    } else {
        ("Re-activate Event", "btn-success", EventStatus::Active)
    };
    Element::new("button")
        .id("toggleStatusBtn")
        .class(class)
        .text(label)
        .on(Action::SetEventStatus {
            event_id: event_id.clone(),
            status: next,
        })
}

pub fn event_analytics(stats: &EventAnalytics) -> Element {
    Element::new("div")
        .id("eventAnalytics")
        .child(stat("statCapacity", "Capacity", stats.total_capacity.to_string()))
        .child(stat("statSold", "Sold", stats.sold_tickets.to_string()))
        .child(stat("statRemaining", "Remaining", stats.remaining_tickets.to_string()))
        .child(stat("statRevenue", "Revenue", dollars(stats.total_revenue)))
}

pub fn event_bookings(bookings: &[EventBooking]) -> Element {
    let list = Element::new("div").id("eventBookingsList");
    if bookings.is_empty() {
        return list.child(empty("No bookings yet."));
    }
    list.children(bookings.iter().map(|b| {
        Element::new("div")
            .class("booking-item")
            .child(
                Element::new("div")
                    .child(Element::new("h4").text(format!("{} ({})", b.customer_name, b.customer_email)))
                    .child(para(format!("Seats: {}", b.seats)))
                    .child(para(format!("Ordered: {}", when(&b.date)))),
            )
            .child(
                Element::new("div")
                    .child(para(dollars(b.total_amount)))
                    .child(
                        Element::new("span")
                            .class(format!("ticket-status {}", b.status))
                            .text(b.status.to_string()),
                    ),
            )
    }))
}

/// Manage panel for one organizer event. Sections that failed to load are
/// left out.
pub fn manage_panel(
    event_id: &Id,
    title: &str,
    status: EventStatus,
    analytics: Option<&EventAnalytics>,
    bookings: Option<&[EventBooking]>,
) -> Element {
    let mut panel = Element::new("div")
        .id("manageEventModal")
        .child(Element::new("h2").id("manageEventTitle").text(format!("Manage: {}", title)))
        .child(Element::new("p").text("Status: ").child(status_badge(status).id("currentStatus")))
        .child(status_toggle(event_id, status));
    if let Some(stats) = analytics {
        panel = panel.child(event_analytics(stats));
    }
    if let Some(bookings) = bookings {
        panel = panel.child(event_bookings(bookings));
    }
    panel
}
