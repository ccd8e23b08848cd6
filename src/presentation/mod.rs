// Presentation layer - HTTP API consumed by the console UI
pub mod app_state;
pub mod handlers;
pub mod http_error;
pub mod router;
