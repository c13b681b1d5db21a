// Configuration and HTTP layers (CORS, security headers)
pub mod config;

// Request handlers
pub mod handlers;

// Domain records and wire schemas
pub mod models;

// Storage abstraction and backends
pub mod repositories;

// Router wiring and shared application state
pub mod routes;

// Event and registration workflows
pub mod services;

// Error type and response envelope
pub mod utils;
