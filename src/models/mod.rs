pub mod attendee;
pub mod event;

pub use attendee::{
    Attendee, AttendeeListResponse, AttendeeResponse, NewAttendee, RegisterAttendeeRequest,
};
pub use event::{CreateEventRequest, Event, EventResponse, NewEvent};
