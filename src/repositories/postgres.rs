use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{AttendeeRepository, EventRepository, StoreError};
use crate::models::{Attendee, Event, NewAttendee, NewEvent};

const EVENT_COLUMNS: &str = "id, name, location, start_time, end_time, max_capacity";
const ATTENDEE_COLUMNS: &str = "id, name, email, event_id";

/// PostgreSQL backend. One pool, one statement per operation; the
/// registration workflow provides what little serialization is needed.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgStore {
    async fn insert(&self, event: NewEvent) -> Result<Event, StoreError> {
        let stored = sqlx::query_as::<_, Event>(&format!(
            "INSERT INTO events (name, location, start_time, end_time, max_capacity) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {EVENT_COLUMNS}"
        ))
        .bind(&event.name)
        .bind(&event.location)
        .bind(event.start_time)
        .bind(event.end_time)
        .bind(event.max_capacity)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    async fn fetch_by_id(&self, id: i64) -> Result<Option<Event>, StoreError> {
        let event =
            sqlx::query_as::<_, Event>(&format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(event)
    }

    async fn fetch_upcoming(
        &self,
        after: DateTime<Utc>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Event>, StoreError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events \
             WHERE start_time >= $1 ORDER BY id LIMIT $2 OFFSET $3"
        ))
        .bind(after)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    async fn delete_by_id(&self, id: i64) -> Result<Option<Event>, StoreError> {
        let deleted = sqlx::query_as::<_, Event>(&format!(
            "DELETE FROM events WHERE id = $1 RETURNING {EVENT_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted)
    }
}

#[async_trait]
impl AttendeeRepository for PgStore {
    async fn insert(&self, attendee: NewAttendee) -> Result<Attendee, StoreError> {
        let stored = sqlx::query_as::<_, Attendee>(&format!(
            "INSERT INTO attendees (name, email, event_id) \
             VALUES ($1, $2, $3) RETURNING {ATTENDEE_COLUMNS}"
        ))
        .bind(&attendee.name)
        .bind(&attendee.email)
        .bind(attendee.event_id)
        .fetch_one(&self.pool)
        .await
        .map_err(into_store_error)?;

        Ok(stored)
    }

    async fn fetch_for_event(&self, event_id: i64) -> Result<Vec<Attendee>, StoreError> {
        let attendees = sqlx::query_as::<_, Attendee>(&format!(
            "SELECT {ATTENDEE_COLUMNS} FROM attendees WHERE event_id = $1 ORDER BY id"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(attendees)
    }

    async fn find_by_event_and_email(
        &self,
        event_id: i64,
        email: &str,
    ) -> Result<Option<Attendee>, StoreError> {
        let attendee = sqlx::query_as::<_, Attendee>(&format!(
            "SELECT {ATTENDEE_COLUMNS} FROM attendees WHERE event_id = $1 AND email = $2"
        ))
        .bind(event_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(attendee)
    }

    async fn count_for_event(&self, event_id: i64) -> Result<i64, StoreError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM attendees WHERE event_id = $1")
                .bind(event_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}

fn into_store_error(e: sqlx::Error) -> StoreError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::UniqueViolation,
        _ => StoreError::Database(e),
    }
}
