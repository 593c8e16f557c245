use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::{EventStatus, Role};
use crate::{Id, Money};

/// `GET /api/admin/stats`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AdminStats {
    pub users: i64,
    pub events: i64,
    pub revenue: Money,
}

/// `GET /api/admin/users`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AdminUser {
    pub id: Id,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// `GET /api/admin/events`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AdminEvent {
    pub id: Id,
    pub title: String,
    pub organizer: String,
    pub date: NaiveDateTime,
    pub status: EventStatus,
    pub revenue: Money,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleUpdate {
    pub role: Role,
}
