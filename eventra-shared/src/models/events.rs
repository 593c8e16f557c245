use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Id, Money};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventStatus {
    Active,
    Cancelled,
    Suspended,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Active => "Active",
            EventStatus::Cancelled => "Cancelled",
            EventStatus::Suspended => "Suspended",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `GET /api/events/`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PublicEvent {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date_time: NaiveDateTime,
    pub venue: String,
    pub base_price: Money,
}

/// `GET /api/events/{id}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventDetails {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date_time: NaiveDateTime,
    pub venue_name: String,
    pub venue_address: String,
    pub base_price: Money,
    pub status: EventStatus,
}

/// `GET /api/events/organizer`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrganizerEvent {
    pub id: Id,
    pub title: String,
    pub date_time: NaiveDateTime,
    pub status: EventStatus,
}

/// `GET /api/events/{id}/analytics`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventAnalytics {
    pub total_capacity: i64,
    pub sold_tickets: i64,
    pub remaining_tickets: i64,
    pub total_revenue: Money,
}

/// `GET /api/events/organizer/stats`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrganizerStats {
    pub total_events: i64,
    pub total_revenue: Money,
    pub total_tickets_sold: i64,
}

/// `GET /api/events/{id}/bookings`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventBooking {
    pub booking_id: Id,
    pub customer_name: String,
    pub customer_email: String,
    pub status: crate::models::BookingStatus,
    pub total_amount: Money,
    pub seats: String,
    pub date: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Venue {
    pub id: Id,
    pub name: String,
    pub address: String,
    pub capacity: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewVenue {
    pub name: String,
    pub address: String,
    pub capacity: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewEvent {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ISO 8601 local date-time, as typed into the form.
    pub date_time: String,
    pub venue_id: Id,
    pub base_price: Money,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
    pub status: EventStatus,
}
