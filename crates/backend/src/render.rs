//! Server-side rendering for the dashboard.
//!
//! Produces plain HTML strings; every value that came from appointment data
//! goes through [`escape_html`].

use shared_types::{AppointmentCard, NextAppointmentResponse};

use crate::auth::AuthUser;

pub const PAGE_TITLE: &str = "MyDental Assistant";

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// The "Next Appointment" card.
pub fn next_appointment_card(card: &AppointmentCard) -> String {
    let appointment = &card.appointment;
    let more = card
        .more_note
        .as_ref()
        .map(|note| format!("\n    <p class=\"more-upcoming\">{}</p>", escape_html(note)))
        .unwrap_or_default();

    format!(
        r#"<section class="card next-appointment">
  <h2>Next Appointment</h2>
  <div class="card-header">
    <span class="badge">{badge}</span>
    <span class="status">{status}</span>
  </div>
  <div class="card-body">
    <div class="detail doctor">
      <p class="primary">{doctor}</p>
      <p class="secondary">{reason}</p>
    </div>
    <div class="detail date">
      <p class="primary">{date}</p>
      <p class="secondary">{day}</p>
    </div>
    <div class="detail time">
      <p class="primary">{time}</p>
      <p class="secondary">{time_caption}</p>
    </div>{more}
  </div>
</section>"#,
        badge = escape_html(&card.badge),
        status = escape_html(appointment.status.as_str()),
        doctor = escape_html(&appointment.doctor_name),
        reason = escape_html(&appointment.reason),
        date = escape_html(&card.formatted_date),
        day = escape_html(&card.day_label),
        time = escape_html(&appointment.time),
        time_caption = escape_html(&card.time_caption),
        more = more,
    )
}

/// Placeholder shown when there is no upcoming confirmed appointment.
pub fn no_next_appointments() -> String {
    r#"<section class="card next-appointment empty">
  <h2>Next Appointment</h2>
  <p class="primary">No upcoming appointments</p>
  <p class="secondary">Book an appointment to see it here.</p>
</section>"#
        .to_string()
}

/// Card or empty state, whichever the response calls for.
pub fn next_appointment_widget(response: &NextAppointmentResponse) -> String {
    match &response.next {
        Some(card) => next_appointment_card(card),
        None => no_next_appointments(),
    }
}

/// Full dashboard page around `body`.
pub fn dashboard_page(user: &AuthUser, body: &str) -> String {
    let greeting = user.name.as_deref().unwrap_or(&user.email);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title}</title>
</head>
<body class="dark">
  <main class="dashboard">
    <h1>Welcome back, {greeting}</h1>
{body}
  </main>
</body>
</html>"#,
        title = PAGE_TITLE,
        greeting = escape_html(greeting),
        body = body,
    )
}

/// Terminal rendering of the card, used by the CLI.
pub fn card_text(card: &AppointmentCard) -> String {
    let appointment = &card.appointment;
    let mut lines = vec![
        format!("Next Appointment [{}] {}", card.badge, appointment.status),
        format!("  {} - {}", appointment.doctor_name, appointment.reason),
        format!("  {} ({})", card.formatted_date, card.day_label),
        format!("  {} ({})", appointment.time, card.time_caption),
    ];
    if let Some(note) = &card.more_note {
        lines.push(format!("  {}", note));
    }
    lines.join("\n")
}
