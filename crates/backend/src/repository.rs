//! Appointment data access.
//!
//! Appointments are owned by an external system; this module only defines the
//! seam the dashboard reads through, plus the implementations it ships with.
//!
//! Every source returns a user's appointments ordered by date ascending. The
//! next-appointment rule takes the first eligible record in that order, so a
//! source that cannot guarantee ordering must sort before returning.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use shared_types::Appointment;

/// Read-only source of appointments for the current user.
#[async_trait]
pub trait AppointmentSource: Send + Sync {
    /// All appointments belonging to `user_email`, ordered by date ascending.
    ///
    /// Unknown users yield an empty list rather than an error.
    async fn user_appointments(&self, user_email: &str) -> Result<Vec<Appointment>>;
}

/// Stable sort by calendar day; records on the same day keep their order.
pub fn sort_by_day(appointments: &mut [Appointment]) {
    appointments.sort_by_key(|appointment| appointment.date);
}

/// Decode one user's records out of a raw snapshot.
///
/// Keys are matched case-insensitively and lists under keys differing only
/// in case are concatenated in key order. Records that do not decode as an
/// [`Appointment`] are skipped, so one bad entry never hides the others.
fn decode_user(snapshot: BTreeMap<String, Value>, user_email: &str) -> Vec<Appointment> {
    let wanted = user_email.to_lowercase();
    let mut appointments = Vec::new();

    for (email, records) in snapshot {
        if email.to_lowercase() != wanted {
            continue;
        }
        let records = match records {
            Value::Array(records) => records,
            _ => {
                tracing::warn!("Skipping appointments for {}: expected a list", email);
                continue;
            }
        };

        for (index, record) in records.into_iter().enumerate() {
            match serde_json::from_value::<Appointment>(record) {
                Ok(appointment) => appointments.push(appointment),
                Err(e) => tracing::warn!("Skipping appointment #{} for {}: {}", index, email, e),
            }
        }
    }

    sort_by_day(&mut appointments);
    appointments
}

/// Appointments read from a JSON snapshot on every call.
///
/// The file holds an object mapping user email to that user's appointments:
///
/// ```json
/// { "patient@example.com": [ { "date": "2024-06-20", "time": "10:30 AM",
///   "status": "CONFIRMED", "doctorName": "Dr. Molar", "reason": "Cleaning" } ] }
/// ```
///
/// Only the requested user's records are decoded.
#[derive(Debug, Clone)]
pub struct JsonFileAppointments {
    path: PathBuf,
}

impl JsonFileAppointments {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl AppointmentSource for JsonFileAppointments {
    async fn user_appointments(&self, user_email: &str) -> Result<Vec<Appointment>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        let snapshot: BTreeMap<String, Value> = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid appointments JSON in {}", self.path.display()))?;

        Ok(decode_user(snapshot, user_email))
    }
}

/// In-process appointment store, used for tests and local previews.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAppointments {
    by_user: HashMap<String, Vec<Appointment>>,
}

impl InMemoryAppointments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add appointments for `email`, appending to any already held.
    pub fn with_user(mut self, email: &str, appointments: Vec<Appointment>) -> Self {
        self.by_user
            .entry(email.to_lowercase())
            .or_default()
            .extend(appointments);
        self
    }
}

#[async_trait]
impl AppointmentSource for InMemoryAppointments {
    async fn user_appointments(&self, user_email: &str) -> Result<Vec<Appointment>> {
        let mut appointments = self
            .by_user
            .get(&user_email.to_lowercase())
            .cloned()
            .unwrap_or_default();
        sort_by_day(&mut appointments);
        Ok(appointments)
    }
}
