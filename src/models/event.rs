use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored event. Timestamps are always UTC; conversion to the display
/// zone happens when building an [`EventResponse`].
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub max_capacity: i32,
}

/// Validated event data ready for insertion, timestamps already normalized
/// to UTC.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub max_capacity: i32,
}

/// Create-event payload. Timestamps arrive as strings so values without a
/// zone offset can be interpreted in the configured default zone.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    pub location: String,
    pub start_time: String,
    pub end_time: String,
    pub max_capacity: i32,
}

/// Event as returned to callers, timestamps converted to the display zone.
#[derive(Debug, Clone, Serialize)]
pub struct EventResponse {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub max_capacity: i32,
}

impl EventResponse {
    pub fn from_event(event: Event, display_zone: Tz) -> Self {
        Self {
            id: event.id,
            name: event.name,
            location: event.location,
            start_time: event.start_time.with_timezone(&display_zone).fixed_offset(),
            end_time: event.end_time.with_timezone(&display_zone).fixed_offset(),
            max_capacity: event.max_capacity,
        }
    }
}
