//! HTTP API handlers for day-web

pub mod auth;
pub mod events;
pub mod health;
pub mod sketches;

pub use auth::auth_middleware;
pub use events::list_events;
pub use health::health_routes;
pub use sketches::{delete_sketch, get_sketch};
