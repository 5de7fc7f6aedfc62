use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Chemtrack service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum ChemtrackError {
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("sap code must be 'SAP' followed by digits")]
    InvalidCodeFormat,
    #[error("Email already registered")]
    EmailTaken,
    #[error("user not found")]
    UserNotFound,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("session expired")]
    InvalidSession,
    #[error("forbidden")]
    Forbidden,
    #[error("no reset code issued")]
    NoChallenge,
    #[error("incorrect code")]
    IncorrectCode,
    #[error("code expired")]
    CodeExpired,
    #[error("code already used")]
    CodeConsumed,
    #[error("code not verified")]
    VerificationRequired,
    #[error("wait before requesting another code")]
    TooSoon,
    #[error("password must be at least 8 characters")]
    WeakPassword,
    #[error("failed to send email")]
    MailDelivery(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ChemtrackError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MISSING_FIELD",
            Self::InvalidCodeFormat => "INVALID_CODE_FORMAT",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidSession => "INVALID_SESSION",
            Self::Forbidden => "FORBIDDEN",
            Self::NoChallenge => "NO_CHALLENGE",
            Self::IncorrectCode => "INCORRECT_CODE",
            Self::CodeExpired => "CODE_EXPIRED",
            Self::CodeConsumed => "CODE_CONSUMED",
            Self::VerificationRequired => "VERIFICATION_REQUIRED",
            Self::TooSoon => "TOO_SOON",
            Self::WeakPassword => "WEAK_PASSWORD",
            Self::MailDelivery(_) => "MAIL_DELIVERY",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ChemtrackError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MissingField(_)
            | Self::InvalidCodeFormat
            | Self::IncorrectCode
            | Self::CodeExpired
            | Self::CodeConsumed
            | Self::VerificationRequired
            | Self::WeakPassword => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::InvalidSession => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserNotFound | Self::NoChallenge => StatusCode::NOT_FOUND,
            Self::EmailTaken => StatusCode::CONFLICT,
            Self::TooSoon => StatusCode::TOO_MANY_REQUESTS,
            Self::MailDelivery(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 5xx only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Dependency failures need the anyhow chain logged so the root cause is traceable.
        match &self {
            Self::Internal(e) => tracing::error!(error = %e, kind = "INTERNAL", "internal error"),
            Self::MailDelivery(e) => {
                tracing::error!(error = %e, kind = "MAIL_DELIVERY", "mail delivery failed");
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
