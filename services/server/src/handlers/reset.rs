use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::ChemtrackError;
use crate::state::AppState;
use crate::usecase::reset::{
    RequestResetInput, RequestResetUseCase, ResendOtpUseCase, ResetPasswordInput,
    ResetPasswordUseCase, VerifyOtpInput, VerifyOtpUseCase,
};

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn message(text: &str) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: text.to_owned(),
    })
}

// ── POST /request-reset ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RequestResetRequest {
    pub email: Option<String>,
}

pub async fn request_reset(
    State(state): State<AppState>,
    Json(body): Json<RequestResetRequest>,
) -> Result<Json<MessageResponse>, ChemtrackError> {
    let email = body.email.ok_or(ChemtrackError::MissingField("email"))?;
    let usecase = RequestResetUseCase {
        users: state.user_repo(),
        challenges: state.otp_repo(),
        mailer: state.mailer(),
    };
    usecase.execute(RequestResetInput { email }).await?;
    Ok(message("OTP sent to your email"))
}

// ── POST /resend-otp ─────────────────────────────────────────────────────────

pub async fn resend_otp(
    State(state): State<AppState>,
    Json(body): Json<RequestResetRequest>,
) -> Result<Json<MessageResponse>, ChemtrackError> {
    let email = body.email.ok_or(ChemtrackError::MissingField("email"))?;
    let usecase = ResendOtpUseCase {
        users: state.user_repo(),
        challenges: state.otp_repo(),
        mailer: state.mailer(),
    };
    usecase.execute(RequestResetInput { email }).await?;
    Ok(message("New OTP sent to your email"))
}

// ── POST /verify-otp ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyOtpRequest {
    pub email: Option<String>,
    #[serde(alias = "code")]
    pub otp: Option<String>,
}

pub async fn verify_otp(
    State(state): State<AppState>,
    Json(body): Json<VerifyOtpRequest>,
) -> Result<Json<MessageResponse>, ChemtrackError> {
    let email = body.email.ok_or(ChemtrackError::MissingField("email"))?;
    let code = body.otp.ok_or(ChemtrackError::MissingField("otp"))?;
    let usecase = VerifyOtpUseCase {
        challenges: state.otp_repo(),
    };
    usecase.execute(VerifyOtpInput { email, code }).await?;
    Ok(message("OTP verified"))
}

// ── POST /reset-password ─────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: Option<String>,
    pub new_password: Option<String>,
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, ChemtrackError> {
    let email = body.email.ok_or(ChemtrackError::MissingField("email"))?;
    let new_password = body
        .new_password
        .ok_or(ChemtrackError::MissingField("newPassword"))?;
    let usecase = ResetPasswordUseCase {
        users: state.user_repo(),
        challenges: state.otp_repo(),
        hasher: state.hasher(),
    };
    usecase
        .execute(ResetPasswordInput {
            email,
            new_password,
        })
        .await?;
    Ok(message("Password updated successfully"))
}
