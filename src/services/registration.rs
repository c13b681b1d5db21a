use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use regex::Regex;
use tokio::sync::Mutex;

use crate::models::{Attendee, NewAttendee, RegisterAttendeeRequest};
use crate::repositories::{AttendeeRepository, EventRepository, StoreError};
use crate::utils::error::AppError;

/// Registration workflow: capacity and duplicate checks, then insert.
///
/// The check-then-insert sequence runs under a per-event async mutex so two
/// concurrent registrations against the same event cannot both pass the
/// capacity or duplicate check before either writes. The store's
/// `(event_id, email)` uniqueness backstops the duplicate check across
/// processes.
#[derive(Clone)]
pub struct RegistrationService {
    events: Arc<dyn EventRepository>,
    attendees: Arc<dyn AttendeeRepository>,
    event_locks: Arc<DashMap<i64, Arc<Mutex<()>>>>,
}

impl RegistrationService {
    pub fn new(events: Arc<dyn EventRepository>, attendees: Arc<dyn AttendeeRepository>) -> Self {
        Self {
            events,
            attendees,
            event_locks: Arc::new(DashMap::new()),
        }
    }

    fn lock_for(&self, event_id: i64) -> Arc<Mutex<()>> {
        self.event_locks
            .entry(event_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    pub async fn register_attendee(
        &self,
        event_id: i64,
        input: RegisterAttendeeRequest,
    ) -> Result<Attendee, AppError> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::InvalidPayload(
                "name must not be empty".to_string(),
            ));
        }

        let email = input.email.trim().to_string();
        if !is_valid_email(&email) {
            return Err(AppError::InvalidPayload(format!(
                "'{email}' is not a valid email address"
            )));
        }

        let lock = self.lock_for(event_id);
        let _guard = lock.lock().await;

        let event = self
            .events
            .fetch_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::UnknownEvent("Event not found".to_string()))?;

        let registered = self.attendees.count_for_event(event_id).await?;
        if registered >= i64::from(event.max_capacity) {
            return Err(AppError::EventFull("Event is full".to_string()));
        }

        if self
            .attendees
            .find_by_event_and_email(event_id, &email)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateRegistration(
                "Duplicate registration".to_string(),
            ));
        }

        let attendee = self
            .attendees
            .insert(NewAttendee {
                name,
                email,
                event_id,
            })
            .await
            .map_err(|e| match e {
                StoreError::UniqueViolation => {
                    AppError::DuplicateRegistration("Duplicate registration".to_string())
                }
                other => AppError::from(other),
            })?;

        tracing::info!(event_id, attendee_id = attendee.id, "Attendee registered");
        Ok(attendee)
    }

    /// All attendees of the event, insertion order. An unknown event id
    /// yields an empty list, not an error.
    pub async fn list_attendees(&self, event_id: i64) -> Result<Vec<Attendee>, AppError> {
        Ok(self.attendees.fetch_for_event(event_id).await?)
    }
}

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Syntactic check only: one `@`, no whitespace, a dot in the domain.
fn is_valid_email(email: &str) -> bool {
    let pattern = EMAIL_PATTERN.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
    });
    pattern.is_match(email)
}
