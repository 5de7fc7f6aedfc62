use axum::{Json, extract::Path, extract::State, http::HeaderMap, http::StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ChemtrackError;
use crate::identity::{Identity, bearer_token};
use crate::state::AppState;
use crate::usecase::user::{
    GetUserUseCase, LoginInput, LoginUseCase, LogoutUseCase, SignupInput, SignupUseCase,
};

// ── POST /signup ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub message: String,
    pub user_id: String,
    pub first_name: String,
    pub email: String,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ChemtrackError> {
    let usecase = SignupUseCase {
        users: state.user_repo(),
        hasher: state.hasher(),
    };
    let user = usecase
        .execute(SignupInput {
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            phone: body.phone,
            password: body.password,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "Signup successful".to_owned(),
            user_id: user.id.to_string(),
            first_name: user.first_name,
            email: user.email,
        }),
    ))
}

// ── POST /login ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: String,
    pub token: String,
    #[serde(serialize_with = "chemtrack_core::serde::to_rfc3339_ms")]
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ChemtrackError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        sessions: state.session_repo(),
        hasher: state.hasher(),
    };
    let output = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(LoginResponse {
        user_id: output.user_id.to_string(),
        token: output.token,
        expires_at: output.expires_at,
    }))
}

// ── DELETE /session ──────────────────────────────────────────────────────────

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ChemtrackError> {
    let token = bearer_token(&headers).ok_or(ChemtrackError::InvalidSession)?;
    let usecase = LogoutUseCase {
        sessions: state.session_repo(),
    };
    usecase.execute(&token).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /user/{id} ───────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub first_name: String,
}

pub async fn get_user(
    _identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, ChemtrackError> {
    let usecase = GetUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(id).await?;
    Ok(Json(UserResponse {
        first_name: user.first_name,
    }))
}
