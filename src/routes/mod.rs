use axum::{
    routing::{get, post},
    Router,
};
use chrono_tz::Tz;
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, create_security_headers_layer};
use crate::handlers::{
    create_event, delete_event, get_event, health_check, list_attendees, list_events,
    register_attendee,
};
use crate::services::{EventService, RegistrationService};

#[derive(Clone)]
pub struct AppState {
    pub events: EventService,
    pub registration: RegistrationService,
    pub display_zone: Tz,
}

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/events", post(create_event).get(list_events))
        .route("/events/:id", get(get_event).delete(delete_event))
        .route("/events/:id/register", post(register_attendee))
        .route("/events/:id/attendees", get(list_attendees))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(create_security_headers_layer())
        .layer(create_cors_layer())
}
