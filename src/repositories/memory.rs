use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{AttendeeRepository, EventRepository, StoreError};
use crate::models::{Attendee, Event, NewAttendee, NewEvent};

/// In-process backend mirroring the observable behavior of [`PgStore`]:
/// insertion-ordered rows, cascading event deletes, and the
/// `(event_id, email)` uniqueness rejection.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Tables>>,
}

#[derive(Default)]
struct Tables {
    next_event_id: i64,
    events: Vec<Event>,
    next_attendee_id: i64,
    attendees: Vec<Attendee>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for MemoryStore {
    async fn insert(&self, event: NewEvent) -> Result<Event, StoreError> {
        let mut tables = self.inner.write().await;
        tables.next_event_id += 1;
        let stored = Event {
            id: tables.next_event_id,
            name: event.name,
            location: event.location,
            start_time: event.start_time,
            end_time: event.end_time,
            max_capacity: event.max_capacity,
        };
        tables.events.push(stored.clone());
        Ok(stored)
    }

    async fn fetch_by_id(&self, id: i64) -> Result<Option<Event>, StoreError> {
        let tables = self.inner.read().await;
        Ok(tables.events.iter().find(|e| e.id == id).cloned())
    }

    async fn fetch_upcoming(
        &self,
        after: DateTime<Utc>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Event>, StoreError> {
        let tables = self.inner.read().await;
        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(tables
            .events
            .iter()
            .filter(|e| e.start_time >= after)
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn delete_by_id(&self, id: i64) -> Result<Option<Event>, StoreError> {
        let mut tables = self.inner.write().await;
        let position = tables.events.iter().position(|e| e.id == id);
        match position {
            Some(index) => {
                let removed = tables.events.remove(index);
                // Same cascade the Postgres schema applies.
                tables.attendees.retain(|a| a.event_id != id);
                Ok(Some(removed))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl AttendeeRepository for MemoryStore {
    async fn insert(&self, attendee: NewAttendee) -> Result<Attendee, StoreError> {
        let mut tables = self.inner.write().await;
        let duplicate = tables
            .attendees
            .iter()
            .any(|a| a.event_id == attendee.event_id && a.email == attendee.email);
        if duplicate {
            return Err(StoreError::UniqueViolation);
        }
        tables.next_attendee_id += 1;
        let stored = Attendee {
            id: tables.next_attendee_id,
            name: attendee.name,
            email: attendee.email,
            event_id: attendee.event_id,
        };
        tables.attendees.push(stored.clone());
        Ok(stored)
    }

    async fn fetch_for_event(&self, event_id: i64) -> Result<Vec<Attendee>, StoreError> {
        let tables = self.inner.read().await;
        Ok(tables
            .attendees
            .iter()
            .filter(|a| a.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn find_by_event_and_email(
        &self,
        event_id: i64,
        email: &str,
    ) -> Result<Option<Attendee>, StoreError> {
        let tables = self.inner.read().await;
        Ok(tables
            .attendees
            .iter()
            .find(|a| a.event_id == event_id && a.email == email)
            .cloned())
    }

    async fn count_for_event(&self, event_id: i64) -> Result<i64, StoreError> {
        let tables = self.inner.read().await;
        Ok(tables
            .attendees
            .iter()
            .filter(|a| a.event_id == event_id)
            .count() as i64)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn sample_event(hour: u32) -> NewEvent {
        NewEvent {
            name: "Standup".to_string(),
            location: "Room 4".to_string(),
            start_time: Utc.with_ymd_and_hms(2030, 1, 1, hour, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2030, 1, 1, hour + 1, 0, 0).unwrap(),
            max_capacity: 10,
        }
    }

    #[tokio::test]
    async fn test_ids_are_assigned_sequentially() {
        let store = MemoryStore::new();
        let first = EventRepository::insert(&store, sample_event(9)).await.unwrap();
        let second = EventRepository::insert(&store, sample_event(11)).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_delete_cascades_to_attendees() {
        let store = MemoryStore::new();
        let event = EventRepository::insert(&store, sample_event(9)).await.unwrap();
        AttendeeRepository::insert(
            &store,
            NewAttendee {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                event_id: event.id,
            },
        )
        .await
        .unwrap();

        let removed = store.delete_by_id(event.id).await.unwrap();
        assert_eq!(removed.map(|e| e.id), Some(event.id));
        assert_eq!(store.count_for_event(event.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected_at_the_store() {
        let store = MemoryStore::new();
        let event = EventRepository::insert(&store, sample_event(9)).await.unwrap();
        let new = |email: &str| NewAttendee {
            name: "Ada".to_string(),
            email: email.to_string(),
            event_id: event.id,
        };

        AttendeeRepository::insert(&store, new("ada@example.com")).await.unwrap();
        let err = AttendeeRepository::insert(&store, new("ada@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation));
    }
}
