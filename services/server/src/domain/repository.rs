#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{ChemicalRecord, OtpChallenge, Session, User};
use crate::error::ChemtrackError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ChemtrackError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ChemtrackError>;
    async fn create(&self, user: &User) -> Result<(), ChemtrackError>;

    /// Overwrite the stored password hash (reset flow only).
    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), ChemtrackError>;
}

/// Repository for submitted chemical-balance records. Records are
/// insert-only; there is no update or delete.
pub trait ChemicalFormRepository: Send + Sync {
    async fn create(&self, record: &ChemicalRecord) -> Result<(), ChemtrackError>;
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<ChemicalRecord>, ChemtrackError>;
}

/// Repository for one-time reset challenges. Lookup always takes the newest
/// challenge per email; older rows are retained as history.
pub trait OtpRepository: Send + Sync {
    async fn find_latest(&self, email: &str) -> Result<Option<OtpChallenge>, ChemtrackError>;

    async fn create(&self, challenge: &OtpChallenge) -> Result<(), ChemtrackError>;

    /// Insert unless the newest challenge for the email still throttles a
    /// resend. The read-check-insert sequence runs in a single transaction
    /// so two concurrent resends cannot both pass the throttle. Returns
    /// `false` when throttled.
    async fn create_unless_recent(
        &self,
        challenge: &OtpChallenge,
    ) -> Result<bool, ChemtrackError>;

    /// Mark a challenge verified (sets `verified_at`).
    async fn mark_verified(&self, id: Uuid) -> Result<(), ChemtrackError>;

    /// Mark a challenge used (sets `used_at`); terminal.
    async fn mark_used(&self, id: Uuid) -> Result<(), ChemtrackError>;

    /// Remove a challenge. Used to roll back issuance when the notification
    /// email cannot be delivered.
    async fn delete(&self, id: Uuid) -> Result<(), ChemtrackError>;
}

/// Repository for login sessions.
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &Session) -> Result<(), ChemtrackError>;
    async fn find_by_token(&self, token: &str) -> Result<Option<Session>, ChemtrackError>;

    /// Revoke a session (sets `revoked_at`).
    async fn revoke(&self, id: Uuid) -> Result<(), ChemtrackError>;
}

/// Outbound mail transport. Implementations must bound the send with a
/// timeout and surface failure rather than hang.
pub trait Mailer: Send + Sync {
    async fn send_otp(&self, to: &str, code: &str) -> Result<(), ChemtrackError>;
}

/// One-way password hashing primitive.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, ChemtrackError>;
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, ChemtrackError>;
}
