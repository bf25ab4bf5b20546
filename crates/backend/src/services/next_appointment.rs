//! Next-appointment selection and card presentation.
//!
//! Pure functions over an already fetched appointment list. The evaluation day
//! is always passed in by the caller; nothing here reads the clock.

use chrono::NaiveDate;
use shared_types::{Appointment, AppointmentCard, AppointmentStatus, NextAppointmentResponse};

pub const TODAY_LABEL: &str = "Today";
pub const UPCOMING_LABEL: &str = "Upcoming";
pub const TIME_CAPTION: &str = "Local time";

const LONG_DATE_FORMAT: &str = "%A, %B %-d, %Y";
const WEEKDAY_FORMAT: &str = "%A";

/// The first eligible appointment and how many eligible ones follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextAppointment<'a> {
    pub appointment: &'a Appointment,
    pub remaining_count: usize,
}

/// Confirmed and dated today or later.
pub fn is_eligible(appointment: &Appointment, today: NaiveDate) -> bool {
    appointment.status == AppointmentStatus::Confirmed && appointment.date >= today
}

/// Pick the next appointment from `appointments` as of `today`.
///
/// Filtering is stable and no sort is applied: the first eligible record in
/// input order wins, so callers must pass a date-ascending list.
pub fn select_next_appointment(
    appointments: &[Appointment],
    today: NaiveDate,
) -> Option<NextAppointment<'_>> {
    let mut eligible = appointments.iter().filter(|a| is_eligible(a, today));
    let appointment = eligible.next()?;

    Some(NextAppointment {
        appointment,
        remaining_count: eligible.count(),
    })
}

/// Footer for the card, e.g. "+2 more upcoming appointments".
pub fn more_upcoming_note(remaining_count: usize) -> Option<String> {
    match remaining_count {
        0 => None,
        1 => Some("+1 more upcoming appointment".to_string()),
        n => Some(format!("+{} more upcoming appointments", n)),
    }
}

pub fn build_card(next: &NextAppointment<'_>, today: NaiveDate) -> AppointmentCard {
    let date = next.appointment.date;
    let is_today = date == today;

    AppointmentCard {
        appointment: next.appointment.clone(),
        is_today,
        formatted_date: date.format(LONG_DATE_FORMAT).to_string(),
        badge: if is_today { TODAY_LABEL } else { UPCOMING_LABEL }.to_string(),
        day_label: if is_today {
            TODAY_LABEL.to_string()
        } else {
            date.format(WEEKDAY_FORMAT).to_string()
        },
        time_caption: TIME_CAPTION.to_string(),
        more_note: more_upcoming_note(next.remaining_count),
    }
}

/// Selection plus presentation, as served by the API.
pub fn next_appointment_response(
    appointments: &[Appointment],
    today: NaiveDate,
) -> NextAppointmentResponse {
    match select_next_appointment(appointments, today) {
        Some(next) => NextAppointmentResponse {
            next: Some(build_card(&next, today)),
            remaining_count: next.remaining_count,
        },
        None => NextAppointmentResponse::empty(),
    }
}
