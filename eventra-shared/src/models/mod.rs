pub mod admin;
pub mod auth;
pub mod bookings;
pub mod events;

use serde::{Deserialize, Serialize};

pub use admin::{AdminEvent, AdminStats, AdminUser, RoleUpdate};
pub use auth::{LoginRequest, LoginResponse, RefreshResponse, RegisterRequest, Role};
pub use bookings::{
    BookingStatus, ConfirmRequest, ConfirmResponse, LockRequest, LockResponse, MyBooking, Seat,
    SeatStatus,
};
pub use events::{
    EventAnalytics, EventBooking, EventDetails, EventStatus, NewEvent, NewVenue, OrganizerEvent,
    OrganizerStats, PublicEvent, StatusUpdate, Venue,
};

/// Body the backend attaches to most responses, and to every error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub msg: Option<String>,
}

/// Response to create endpoints (`POST /api/events/`, `POST /api/events/venues`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Created {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub id: Option<crate::Id>,
}
