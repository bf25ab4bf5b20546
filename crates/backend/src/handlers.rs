use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::Html,
    Extension,
};
use shared_types::{Appointment, NextAppointmentResponse};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::{render, services, AppState};

pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Fetch the user's appointments, treating a failed fetch as an empty list.
async fn appointments_or_empty(state: &AppState, user: &AuthUser) -> Vec<Appointment> {
    match state.appointments.user_appointments(&user.email).await {
        Ok(appointments) => appointments,
        Err(e) => {
            tracing::warn!(
                "Failed to load appointments for {}, showing empty state: {:?}",
                user.email,
                e
            );
            Vec::new()
        }
    }
}

fn next_for(state: &AppState, appointments: &[Appointment]) -> NextAppointmentResponse {
    let today = (state.today)();
    let response = services::next_appointment_response(appointments, today);
    tracing::debug!(
        "Next appointment as of {}: present={} remaining={}",
        today,
        response.next.is_some(),
        response.remaining_count
    );
    response
}

// Appointment handlers
pub async fn list_appointments(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Vec<Appointment>>> {
    let appointments = state.appointments.user_appointments(&user.email).await?;
    Ok(Json(appointments))
}

pub async fn next_appointment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Json<NextAppointmentResponse> {
    let appointments = appointments_or_empty(&state, &user).await;
    Json(next_for(&state, &appointments))
}

// Dashboard page
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Html<String> {
    let appointments = appointments_or_empty(&state, &user).await;
    let widget = render::next_appointment_widget(&next_for(&state, &appointments));
    Html(render::dashboard_page(&user, &widget))
}

pub async fn not_found() -> ApiError {
    ApiError::not_found("Route")
}
