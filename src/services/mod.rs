mod events;
mod registration;

pub use events::EventService;
pub use registration::RegistrationService;
