use axum::{middleware, routing::get, Router};

use crate::{auth, handlers, AppState};

/// Build the application router.
///
/// Everything except `/health` requires a valid identity-provider token.
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/auth/me", get(auth::auth_me))
        // Appointment routes
        .route("/api/appointments", get(handlers::list_appointments))
        .route("/api/appointments/next", get(handlers::next_appointment))
        // Server-rendered dashboard
        .route("/dashboard", get(handlers::dashboard))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(protected)
        .fallback(handlers::not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{jwt, AuthConfig};
    use crate::repository::{AppointmentSource, InMemoryAppointments, JsonFileAppointments};
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use chrono::NaiveDate;
    use http_body_util::BodyExt;
    use shared_types::{Appointment, AppointmentStatus, NextAppointmentResponse};
    use std::io::Write;
    use std::sync::Arc;
    use tower::ServiceExt;

    const PATIENT: &str = "patient@example.com";

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 19).unwrap()
    }

    fn auth_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "router-test-secret".to_string(),
            allowed_emails: vec![],
            token_duration_days: 7,
            cookie_name: "auth_token".to_string(),
            issuer: None,
            audience: None,
        }
    }

    fn appt(date: &str, status: AppointmentStatus, reason: &str) -> Appointment {
        Appointment {
            id: None,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            time: "10:30 AM".to_string(),
            status,
            doctor_name: "Dr. Ada Molar".to_string(),
            reason: reason.to_string(),
        }
    }

    fn app_with(source: Arc<dyn AppointmentSource>) -> Router {
        let mut state = AppState::new(auth_config(), source);
        state.today = fixed_today;
        create_router(state)
    }

    fn app() -> Router {
        let source = InMemoryAppointments::new().with_user(
            PATIENT,
            vec![
                appt("2024-06-18", AppointmentStatus::Confirmed, "Past checkup"),
                appt("2024-06-19", AppointmentStatus::Cancelled, "Cancelled visit"),
                appt("2024-06-20", AppointmentStatus::Confirmed, "Cleaning"),
                appt("2024-06-27", AppointmentStatus::Confirmed, "Filling"),
                appt("2024-07-04", AppointmentStatus::Confirmed, "Whitening"),
            ],
        );
        app_with(Arc::new(source))
    }

    fn token_for(email: &str) -> String {
        jwt::create_token(&auth_config(), email, Some("Pat".to_string())).unwrap()
    }

    fn make_request(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);

        if let Some(t) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
        }

        builder.body(Body::empty()).unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn health_is_public() {
        let response = app().oneshot(make_request("/health", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn protected_routes_require_token() {
        for uri in [
            "/api/auth/me",
            "/api/appointments",
            "/api/appointments/next",
            "/dashboard",
        ] {
            let response = app().oneshot(make_request(uri, None)).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        }

        let response = app()
            .oneshot(make_request("/dashboard", Some("not-a-jwt")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn me_returns_current_user() {
        let token = token_for(PATIENT);
        let response = app()
            .oneshot(make_request("/api/auth/me", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["email"], PATIENT);
        assert_eq!(json["name"], "Pat");
    }

    #[tokio::test]
    async fn cookie_token_is_accepted() {
        let token = token_for(PATIENT);
        let request = Request::builder()
            .uri("/api/auth/me")
            .header(header::COOKIE, format!("auth_token={token}"))
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn next_appointment_json() {
        let token = token_for(PATIENT);
        let response = app()
            .oneshot(make_request("/api/appointments/next", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: NextAppointmentResponse =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body.remaining_count, 2);

        let card = body.next.unwrap();
        assert_eq!(card.appointment.reason, "Cleaning");
        assert_eq!(card.badge, "Upcoming");
        assert_eq!(card.formatted_date, "Thursday, June 20, 2024");
        assert_eq!(
            card.more_note.as_deref(),
            Some("+2 more upcoming appointments")
        );
    }

    #[tokio::test]
    async fn list_returns_all_appointments() {
        let token = token_for(PATIENT);
        let response = app()
            .oneshot(make_request("/api/appointments", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let list: Vec<Appointment> = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(list.len(), 5);
    }

    #[tokio::test]
    async fn dashboard_renders_card() {
        let token = token_for(PATIENT);
        let response = app()
            .oneshot(make_request("/dashboard", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_string(response).await;
        assert!(html.contains("Welcome back, Pat"));
        assert!(html.contains("Cleaning"));
        assert!(html.contains("+2 more upcoming appointments"));
        assert!(!html.contains("No upcoming appointments"));
    }

    #[tokio::test]
    async fn dashboard_empty_state_for_user_without_appointments() {
        let token = token_for("new-patient@example.com");
        let response = app()
            .oneshot(make_request("/dashboard", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("No upcoming appointments"));
    }

    #[tokio::test]
    async fn failed_fetch_renders_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonFileAppointments::new(dir.path().join("missing.json"));
        let token = token_for(PATIENT);

        let response = app_with(Arc::new(source.clone()))
            .oneshot(make_request("/dashboard", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("No upcoming appointments"));

        let response = app_with(Arc::new(source.clone()))
            .oneshot(make_request("/api/appointments/next", Some(&token)))
            .await
            .unwrap();
        let body: NextAppointmentResponse =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body, NextAppointmentResponse::empty());

        // The raw listing surfaces the failure instead.
        let response = app_with(Arc::new(source))
            .oneshot(make_request("/api/appointments", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body_string(response).await.contains("missing.json"));
    }

    #[tokio::test]
    async fn bad_record_of_another_user_does_not_blank_dashboard() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "patient@example.com": [
                    {{"date": "2024-06-20", "time": "10:30 AM", "status": "CONFIRMED",
                      "doctorName": "Dr. Ada Molar", "reason": "Cleaning"}}
                ],
                "someone-else@example.com": [
                    {{"date": "2024-06-21", "time": "9:00 AM", "status": "PENDING",
                      "doctorName": "Dr. Ada Molar", "reason": "Checkup"}}
                ]
            }}"#
        )
        .unwrap();
        let token = token_for(PATIENT);

        let response = app_with(Arc::new(JsonFileAppointments::new(file.path())))
            .oneshot(make_request("/dashboard", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_string(response).await;
        assert!(html.contains("Cleaning"));
        assert!(!html.contains("No upcoming appointments"));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = app().oneshot(make_request("/nope", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
