use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registration binding one person to one event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Attendee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub event_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewAttendee {
    pub name: String,
    pub email: String,
    pub event_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterAttendeeRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttendeeResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<Attendee> for AttendeeResponse {
    fn from(attendee: Attendee) -> Self {
        Self {
            id: attendee.id,
            name: attendee.name,
            email: attendee.email,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AttendeeListResponse {
    pub attendees: Vec<AttendeeResponse>,
}
