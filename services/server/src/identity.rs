//! Bearer-session identity extractor.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::SessionRepository as _;
use crate::error::ChemtrackError;
use crate::state::AppState;

/// Authenticated caller, resolved from the `Authorization: Bearer <token>`
/// header against the session store.
///
/// Rejects with `InvalidSession` (401) when the header is absent/malformed,
/// the token is unknown, or the session is expired or revoked. Ownership
/// checks (403) are done by handlers after extraction.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
}

/// Extract the bearer token from an `Authorization` header, if present.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(axum::http::header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_owned())
    }
}

impl FromRequestParts<AppState> for Identity {
    type Rejection = ChemtrackError;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // Extract values synchronously, then return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = bearer_token(&parts.headers);
        let sessions = state.session_repo();

        async move {
            let token = token.ok_or(ChemtrackError::InvalidSession)?;
            let session = sessions
                .find_by_token(&token)
                .await?
                .ok_or(ChemtrackError::InvalidSession)?;
            if !session.is_active_at(Utc::now()) {
                return Err(ChemtrackError::InvalidSession);
            }
            Ok(Self {
                user_id: session.user_id,
            })
        }
    }
}
