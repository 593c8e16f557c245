//! Backend endpoints and client page locations.

pub const AUTH_LOGIN: &str = "/api/auth/login";
pub const AUTH_REGISTER: &str = "/api/auth/register";
pub const AUTH_REFRESH: &str = "/api/auth/refresh";

pub const EVENTS: &str = "/api/events/";
pub const EVENTS_BASE: &str = "/api/events";
pub const VENUES: &str = "/api/events/venues";
pub const ORGANIZER_EVENTS: &str = "/api/events/organizer";
pub const ORGANIZER_STATS: &str = "/api/events/organizer/stats";

pub const BOOKINGS_BASE: &str = "/api/bookings";
pub const BOOKINGS_LOCK: &str = "/api/bookings/lock";
pub const BOOKINGS_CONFIRM: &str = "/api/bookings/confirm";
pub const BOOKINGS_MINE: &str = "/api/bookings/my";

pub const ADMIN_STATS: &str = "/api/admin/stats";
pub const ADMIN_USERS: &str = "/api/admin/users";
pub const ADMIN_EVENTS: &str = "/api/admin/events";

pub const PAGE_HOME: &str = "/";
pub const PAGE_LOGIN: &str = "/login";
pub const PAGE_REGISTER: &str = "/register";
pub const PAGE_MY_BOOKINGS: &str = "/my-bookings";
pub const PAGE_ORGANIZER: &str = "/organizer/dashboard";
pub const PAGE_CREATE_VENUE: &str = "/organizer/create-venue";
pub const PAGE_CREATE_EVENT: &str = "/organizer/create-event";
pub const PAGE_ADMIN: &str = "/admin/dashboard";

pub fn event(event_id: impl std::fmt::Display) -> String {
    format!("{}/{}", EVENTS_BASE, event_id)
}

pub fn event_analytics(event_id: impl std::fmt::Display) -> String {
    format!("{}/{}/analytics", EVENTS_BASE, event_id)
}

pub fn event_bookings(event_id: impl std::fmt::Display) -> String {
    format!("{}/{}/bookings", EVENTS_BASE, event_id)
}

pub fn event_status(event_id: impl std::fmt::Display) -> String {
    format!("{}/{}/status", EVENTS_BASE, event_id)
}

pub fn event_seats(event_id: impl std::fmt::Display) -> String {
    format!("{}/{}/seats", BOOKINGS_BASE, event_id)
}

pub fn ticket(booking_id: impl std::fmt::Display) -> String {
    format!("{}/ticket/{}", BOOKINGS_BASE, booking_id)
}

pub fn admin_user_role(user_id: impl std::fmt::Display) -> String {
    format!("{}/{}/role", ADMIN_USERS, user_id)
}

pub fn admin_event_status(event_id: impl std::fmt::Display) -> String {
    format!("{}/{}/status", ADMIN_EVENTS, event_id)
}

pub fn event_page(event_id: impl std::fmt::Display) -> String {
    format!("/events/{}", event_id)
}
