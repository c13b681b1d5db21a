//! Storage abstraction for events and attendees.
//!
//! The [`EventRepository`] and [`AttendeeRepository`] traits keep the
//! workflows independent of the storage technology. Two backends are
//! provided: [`PgStore`] (PostgreSQL, production) and [`MemoryStore`]
//! (in-process, used by the test suite).

mod memory;
mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::models::{Attendee, Event, NewAttendee, NewEvent};

/// Storage failure surfaced by a repository.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("unique constraint violated")]
    UniqueViolation,

    /// Any other driver failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Inserts the event and returns it with its store-assigned id.
    async fn insert(&self, event: NewEvent) -> Result<Event, StoreError>;

    async fn fetch_by_id(&self, id: i64) -> Result<Option<Event>, StoreError>;

    /// Events starting at or after `after`, in insertion order, paginated.
    async fn fetch_upcoming(
        &self,
        after: DateTime<Utc>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Event>, StoreError>;

    /// Removes the event and returns it, or `None` if it was absent.
    async fn delete_by_id(&self, id: i64) -> Result<Option<Event>, StoreError>;
}

#[async_trait]
pub trait AttendeeRepository: Send + Sync {
    /// Inserts the attendee and returns it with its store-assigned id.
    ///
    /// Fails with [`StoreError::UniqueViolation`] when the event already has
    /// a registration under the same email.
    async fn insert(&self, attendee: NewAttendee) -> Result<Attendee, StoreError>;

    /// All attendees of the event, in insertion order.
    async fn fetch_for_event(&self, event_id: i64) -> Result<Vec<Attendee>, StoreError>;

    async fn find_by_event_and_email(
        &self,
        event_id: i64,
        email: &str,
    ) -> Result<Option<Attendee>, StoreError>;

    async fn count_for_event(&self, event_id: i64) -> Result<i64, StoreError>;
}
