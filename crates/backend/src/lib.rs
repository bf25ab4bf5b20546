//! Patient dashboard backend for the dental clinic.

use std::sync::Arc;

use chrono::NaiveDate;

pub mod auth;
pub mod config;
pub mod error;
mod handlers;
pub mod render;
pub mod repository;
pub mod routes;
pub mod services;

use auth::AuthConfig;
use repository::AppointmentSource;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub auth_config: AuthConfig,
    pub appointments: Arc<dyn AppointmentSource>,
    /// Calendar day requests are evaluated against
    pub today: fn() -> NaiveDate,
}

impl AppState {
    pub fn new(auth_config: AuthConfig, appointments: Arc<dyn AppointmentSource>) -> Self {
        Self {
            auth_config,
            appointments,
            today: local_today,
        }
    }
}

/// Today's date on the server's local clock.
pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
