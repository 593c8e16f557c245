use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Id, Money};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Selected,
    Booked,
    Locked,
}

impl SeatStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeatStatus::Available => "available",
            SeatStatus::Selected => "selected",
            SeatStatus::Booked => "booked",
            SeatStatus::Locked => "locked",
        }
    }
}

/// One seat of `GET /api/bookings/{event_id}/seats`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Seat {
    pub id: Id,
    pub row: String,
    pub number: u32,
    #[serde(rename = "type", default)]
    pub seat_type: Option<String>,
    pub price: Money,
    pub status: SeatStatus,
}

impl Seat {
    /// `A12`
    pub fn label(&self) -> String {
        format!("{}{}", self.row, self.number)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LockRequest {
    pub event_id: Id,
    pub seat_ids: Vec<Id>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LockResponse {
    pub booking_id: Id,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfirmRequest {
    pub booking_id: Id,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConfirmResponse {
    pub booking_id: Id,
    #[serde(default)]
    pub msg: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Failed,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Cancelled => "Cancelled",
            BookingStatus::Failed => "Failed",
        };
        f.write_str(s)
    }
}

/// `GET /api/bookings/my`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MyBooking {
    pub id: Id,
    pub event_title: String,
    pub date: NaiveDateTime,
    pub status: BookingStatus,
    pub seats: String,
    pub total_amount: Money,
}
