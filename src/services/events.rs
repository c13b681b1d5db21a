use std::sync::Arc;

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::models::{CreateEventRequest, Event, NewEvent};
use crate::repositories::EventRepository;
use crate::utils::error::AppError;

const MIN_CAPACITY: i32 = 1;
// Exclusive upper bound.
const CAPACITY_LIMIT: i32 = 1000;

/// Event lifecycle: create with validation, list upcoming, read, delete.
#[derive(Clone)]
pub struct EventService {
    events: Arc<dyn EventRepository>,
    default_input_zone: Tz,
}

impl EventService {
    pub fn new(events: Arc<dyn EventRepository>, default_input_zone: Tz) -> Self {
        Self {
            events,
            default_input_zone,
        }
    }

    /// Validates and stores a new event. All checks run before any
    /// persistence call; timestamps are normalized to UTC on the way in.
    pub async fn create_event(&self, input: CreateEventRequest) -> Result<Event, AppError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(AppError::ValidationError(
                "name must not be empty".to_string(),
            ));
        }

        let location = input.location.trim();
        if location.is_empty() {
            return Err(AppError::ValidationError(
                "location must not be empty".to_string(),
            ));
        }

        if !(MIN_CAPACITY..CAPACITY_LIMIT).contains(&input.max_capacity) {
            return Err(AppError::ValidationError(format!(
                "max capacity must be between {} and {}",
                MIN_CAPACITY,
                CAPACITY_LIMIT - 1
            )));
        }

        let start_time = normalize_timestamp(&input.start_time, self.default_input_zone)
            .map_err(|msg| AppError::ValidationError(format!("start_time: {msg}")))?;
        let end_time = normalize_timestamp(&input.end_time, self.default_input_zone)
            .map_err(|msg| AppError::ValidationError(format!("end_time: {msg}")))?;

        if start_time >= end_time {
            return Err(AppError::ValidationError(
                "start_time must be before end_time".to_string(),
            ));
        }

        let event = self
            .events
            .insert(NewEvent {
                name: name.to_string(),
                location: location.to_string(),
                start_time,
                end_time,
                max_capacity: input.max_capacity,
            })
            .await?;

        tracing::info!(event_id = event.id, name = %event.name, "Event created");
        Ok(event)
    }

    /// Events whose start time is at or after now, in insertion order.
    /// No matches is an empty list, never an error.
    pub async fn list_upcoming(&self, limit: i64, offset: i64) -> Result<Vec<Event>, AppError> {
        let events = self
            .events
            .fetch_upcoming(Utc::now(), limit.max(0), offset.max(0))
            .await?;
        Ok(events)
    }

    pub async fn get_event(&self, id: i64) -> Result<Event, AppError> {
        self.events
            .fetch_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event with id {id} not found")))
    }

    pub async fn delete_event(&self, id: i64) -> Result<Event, AppError> {
        let deleted = self
            .events
            .delete_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event with id {id} not found")))?;

        tracing::info!(event_id = deleted.id, "Event deleted");
        Ok(deleted)
    }
}

/// Parses an event timestamp and normalizes it to UTC. Values carrying a
/// zone offset are converted directly; bare local timestamps are
/// interpreted in `default_zone` first. Local times that are ambiguous or
/// nonexistent in that zone are rejected.
fn normalize_timestamp(raw: &str, default_zone: Tz) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map_err(|_| format!("'{raw}' is not a valid timestamp"))?;

    match default_zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(..) | LocalResult::None => Err(format!(
            "'{raw}' has no unique interpretation in {default_zone}"
        )),
    }
}
