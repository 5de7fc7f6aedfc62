use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Registered user account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Daily chemical-balance record. Immutable once created; `closing` and
/// `reported_balance` are derived from the three input quantities at
/// construction time and never stored independently of them.
#[derive(Debug, Clone)]
pub struct ChemicalRecord {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub date: NaiveDate,
    pub unit: String,
    pub chemical: String,
    pub uom: String,
    pub sap_code: String,
    pub opening: Decimal,
    pub received: Decimal,
    pub consumption: Decimal,
    pub closing: Decimal,
    pub reported_balance: Decimal,
    pub remarks: String,
    pub created_at: DateTime<Utc>,
}

/// One-time password-reset code bound to an email.
#[derive(Debug, Clone)]
pub struct OtpChallenge {
    pub id: Uuid,
    pub email: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub verified_at: Option<DateTime<Utc>>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Lifecycle state of an [`OtpChallenge`], derived from its timestamps.
///
/// `Used` is terminal and wins over everything; an unverified or verified
/// challenge whose window has lapsed is `Expired`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeStatus {
    Active,
    Verified,
    Used,
    Expired,
}

impl OtpChallenge {
    pub fn status_at(&self, now: DateTime<Utc>) -> ChallengeStatus {
        if self.used_at.is_some() {
            ChallengeStatus::Used
        } else if now > self.expires_at {
            ChallengeStatus::Expired
        } else if self.verified_at.is_some() {
            ChallengeStatus::Verified
        } else {
            ChallengeStatus::Active
        }
    }

    /// Whether this challenge blocks a resend at `now`: still unexpired and
    /// issued less than [`OTP_RESEND_COOLDOWN_SECS`] ago.
    pub fn throttles_resend_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
            && now - self.created_at < Duration::seconds(OTP_RESEND_COOLDOWN_SECS)
    }
}

/// Server-issued login session.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.revoked_at.is_none() && self.expires_at > now
    }
}

/// Reset-code length in decimal digits.
pub const OTP_CODE_LEN: usize = 6;

/// Reset-code time-to-live in seconds (5 minutes).
pub const OTP_TTL_SECS: i64 = 300;

/// Minimum age of the newest unexpired challenge before a resend is allowed.
pub const OTP_RESEND_COOLDOWN_SECS: i64 = 60;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Session token length in characters.
pub const SESSION_TOKEN_LEN: usize = 32;

/// Session time-to-live in seconds (7 days).
pub const SESSION_TTL_SECS: i64 = 604800;
