use chrono::{Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

use crate::domain::repository::{PasswordHasher, SessionRepository, UserRepository};
use crate::domain::types::{SESSION_TOKEN_LEN, SESSION_TTL_SECS, Session, User};
use crate::error::ChemtrackError;

/// Charset for opaque session tokens (alphanumeric).
const TOKEN_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

fn generate_token() -> String {
    let mut rng = rand::rng();
    (0..SESSION_TOKEN_LEN)
        .map(|_| TOKEN_CHARSET[rng.random_range(0..TOKEN_CHARSET.len())] as char)
        .collect()
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ChemtrackError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(ChemtrackError::MissingField(field)),
    }
}

// ── Signup ───────────────────────────────────────────────────────────────────

pub struct SignupInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
}

pub struct SignupUseCase<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    pub users: U,
    pub hasher: H,
}

impl<U, H> SignupUseCase<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    pub async fn execute(&self, input: SignupInput) -> Result<User, ChemtrackError> {
        let first_name = required(input.first_name, "firstName")?;
        let last_name = required(input.last_name, "lastName")?;
        let email = required(input.email, "email")?;
        let phone = required(input.phone, "phone")?;
        let password = required(input.password, "password")?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(ChemtrackError::EmailTaken);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            first_name,
            last_name,
            email,
            phone,
            password_hash: self.hasher.hash(&password)?,
            created_at: now,
            updated_at: now,
        };
        self.users.create(&user).await?;
        Ok(user)
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub user_id: Uuid,
    pub token: String,
    pub expires_at: chrono::DateTime<Utc>,
}

pub struct LoginUseCase<U, S, H>
where
    U: UserRepository,
    S: SessionRepository,
    H: PasswordHasher,
{
    pub users: U,
    pub sessions: S,
    pub hasher: H,
}

impl<U, S, H> LoginUseCase<U, S, H>
where
    U: UserRepository,
    S: SessionRepository,
    H: PasswordHasher,
{
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, ChemtrackError> {
        let email = required(input.email, "email")?;
        let password = required(input.password, "password")?;

        // Unknown email and wrong password are indistinguishable to the caller.
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(ChemtrackError::InvalidCredentials)?;

        if !self.hasher.verify(&password, &user.password_hash)? {
            return Err(ChemtrackError::InvalidCredentials);
        }

        let now = Utc::now();
        let session = Session {
            id: Uuid::now_v7(),
            user_id: user.id,
            token: generate_token(),
            expires_at: now + Duration::seconds(SESSION_TTL_SECS),
            revoked_at: None,
            created_at: now,
        };
        self.sessions.create(&session).await?;

        Ok(LoginOutput {
            user_id: user.id,
            token: session.token,
            expires_at: session.expires_at,
        })
    }
}

// ── Logout ───────────────────────────────────────────────────────────────────

pub struct LogoutUseCase<S: SessionRepository> {
    pub sessions: S,
}

impl<S: SessionRepository> LogoutUseCase<S> {
    pub async fn execute(&self, token: &str) -> Result<(), ChemtrackError> {
        let session = self
            .sessions
            .find_by_token(token)
            .await?
            .ok_or(ChemtrackError::InvalidSession)?;
        self.sessions.revoke(session.id).await
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetUserUseCase<U> {
    pub async fn execute(&self, user_id: Uuid) -> Result<User, ChemtrackError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(ChemtrackError::UserNotFound)
    }
}
