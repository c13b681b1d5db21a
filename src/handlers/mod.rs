use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::models::{
    AttendeeListResponse, AttendeeResponse, CreateEventRequest, EventResponse,
    RegisterAttendeeRequest,
};
use crate::routes::AppState;
use crate::utils::error::AppError;
use crate::utils::response::success;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "rollcall-api",
    };

    success(payload, "Health check successful").into_response()
}

pub async fn create_event(
    State(state): State<AppState>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<Json<EventResponse>, AppError> {
    let event = state.events.create_event(payload).await?;
    Ok(Json(EventResponse::from_event(event, state.display_zone)))
}

#[derive(Debug, Deserialize)]
pub struct ListEventsQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<Vec<EventResponse>>, AppError> {
    let events = state.events.list_upcoming(query.limit, query.offset).await?;
    let body = events
        .into_iter()
        .map(|event| EventResponse::from_event(event, state.display_zone))
        .collect();
    Ok(Json(body))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<EventResponse>, AppError> {
    let event = state.events.get_event(id).await?;
    Ok(Json(EventResponse::from_event(event, state.display_zone)))
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<EventResponse>, AppError> {
    let event = state.events.delete_event(id).await?;
    Ok(Json(EventResponse::from_event(event, state.display_zone)))
}

pub async fn register_attendee(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    Json(payload): Json<RegisterAttendeeRequest>,
) -> Result<Json<AttendeeResponse>, AppError> {
    let attendee = state
        .registration
        .register_attendee(event_id, payload)
        .await?;
    Ok(Json(AttendeeResponse::from(attendee)))
}

pub async fn list_attendees(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<AttendeeListResponse>, AppError> {
    let attendees = state.registration.list_attendees(event_id).await?;
    Ok(Json(AttendeeListResponse {
        attendees: attendees.into_iter().map(AttendeeResponse::from).collect(),
    }))
}
