use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use chemtrack_core::health::{healthz, readyz};
use chemtrack_core::middleware::request_id_layer;

use crate::handlers::{
    chemical_form::{create_form, list_forms, list_units},
    report::{export_csv, run_report},
    reset::{request_reset, resend_otp, reset_password, verify_otp},
    user::{get_user, login, logout, signup},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Accounts
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/session", delete(logout))
        .route("/user/{id}", get(get_user))
        // Chemical forms
        .route("/chemical_forms", post(create_form))
        .route("/chemical_forms/{user_id}", get(list_forms))
        .route("/units/{user_id}", get(list_units))
        // Reports
        .route("/reports/{user_id}", get(run_report))
        .route("/reports/{user_id}/csv", get(export_csv))
        // Password reset
        .route("/request-reset", post(request_reset))
        .route("/resend-otp", post(resend_otp))
        .route("/verify-otp", post(verify_otp))
        .route("/reset-password", post(reset_password))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
