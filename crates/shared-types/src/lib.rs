use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of an appointment as reported by the clinic's records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AppointmentStatus::Confirmed => "CONFIRMED",
            AppointmentStatus::Completed => "COMPLETED",
            AppointmentStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "CONFIRMED" => Some(AppointmentStatus::Confirmed),
            "COMPLETED" => Some(AppointmentStatus::Completed),
            "CANCELLED" => Some(AppointmentStatus::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Appointment record as supplied by the upstream data source.
///
/// Field names follow the upstream camelCase JSON. `date` is a calendar day;
/// `time` is display text only and never takes part in comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(with = "calendar_day")]
    pub date: NaiveDate,
    pub time: String,
    pub status: AppointmentStatus,
    pub doctor_name: String,
    pub reason: String,
}

/// Parse an ISO-8601 date or timestamp into the calendar day it names.
///
/// Accepts `2024-06-20`, `2024-06-20T09:30:00` and RFC 3339 timestamps with an
/// offset. Offset timestamps keep the day as written in their own offset.
pub fn parse_calendar_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(day);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }
    raw.parse::<NaiveDateTime>().ok().map(|dt| dt.date())
}

/// Serde adapter storing a calendar day as `YYYY-MM-DD`.
pub mod calendar_day {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(day: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&day.format("%Y-%m-%d"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_calendar_day(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid ISO-8601 date: {}", raw)))
    }
}

/// Display-ready view of the next appointment, computed for a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentCard {
    pub appointment: Appointment,
    pub is_today: bool,
    /// Long form, e.g. "Thursday, June 20, 2024"
    pub formatted_date: String,
    /// "Today" or "Upcoming"
    pub badge: String,
    /// "Today" or the weekday name
    pub day_label: String,
    pub time_caption: String,
    /// Footer such as "+2 more upcoming appointments"; absent when none remain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub more_note: Option<String>,
}

/// API response for the dashboard's next-appointment widget.
///
/// `next` is `None` when the empty state should be shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextAppointmentResponse {
    pub next: Option<AppointmentCard>,
    pub remaining_count: usize,
}

impl NextAppointmentResponse {
    pub fn empty() -> Self {
        NextAppointmentResponse {
            next: None,
            remaining_count: 0,
        }
    }
}

/// Current user as seen by the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUserResponse {
    pub email: String,
    pub name: Option<String>,
}
