use chrono::{Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

use crate::domain::repository::{Mailer, OtpRepository, PasswordHasher, UserRepository};
use crate::domain::types::{
    ChallengeStatus, MIN_PASSWORD_LEN, OTP_CODE_LEN, OTP_TTL_SECS, OtpChallenge,
};
use crate::error::ChemtrackError;

/// Charset for reset codes: decimal digits, leading zeros preserved.
const DIGITS: &[u8] = b"0123456789";

fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..OTP_CODE_LEN)
        .map(|_| DIGITS[rng.random_range(0..DIGITS.len())] as char)
        .collect()
}

fn new_challenge(email: &str) -> OtpChallenge {
    let now = Utc::now();
    OtpChallenge {
        id: Uuid::new_v4(),
        email: email.to_owned(),
        code: generate_code(),
        expires_at: now + Duration::seconds(OTP_TTL_SECS),
        verified_at: None,
        used_at: None,
        created_at: now,
    }
}

// ── RequestReset ─────────────────────────────────────────────────────────────

pub struct RequestResetInput {
    pub email: String,
}

pub struct RequestResetUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: Mailer,
{
    pub users: U,
    pub challenges: O,
    pub mailer: M,
}

impl<U, O, M> RequestResetUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: Mailer,
{
    pub async fn execute(&self, input: RequestResetInput) -> Result<(), ChemtrackError> {
        self.users
            .find_by_email(&input.email)
            .await?
            .ok_or(ChemtrackError::UserNotFound)?;

        let challenge = new_challenge(&input.email);
        self.challenges.create(&challenge).await?;

        // Issuance and notification are one unit: a code the user never
        // received must not stay redeemable.
        if let Err(err) = self.mailer.send_otp(&challenge.email, &challenge.code).await {
            self.challenges.delete(challenge.id).await?;
            return Err(err);
        }
        Ok(())
    }
}

// ── ResendOtp ────────────────────────────────────────────────────────────────

pub struct ResendOtpUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: Mailer,
{
    pub users: U,
    pub challenges: O,
    pub mailer: M,
}

impl<U, O, M> ResendOtpUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: Mailer,
{
    pub async fn execute(&self, input: RequestResetInput) -> Result<(), ChemtrackError> {
        self.users
            .find_by_email(&input.email)
            .await?
            .ok_or(ChemtrackError::UserNotFound)?;

        // The throttle decision and the insert run atomically in the store;
        // the new challenge supersedes any prior one for this email.
        let challenge = new_challenge(&input.email);
        if !self.challenges.create_unless_recent(&challenge).await? {
            return Err(ChemtrackError::TooSoon);
        }

        if let Err(err) = self.mailer.send_otp(&challenge.email, &challenge.code).await {
            self.challenges.delete(challenge.id).await?;
            return Err(err);
        }
        Ok(())
    }
}

// ── VerifyOtp ────────────────────────────────────────────────────────────────

pub struct VerifyOtpInput {
    pub email: String,
    pub code: String,
}

pub struct VerifyOtpUseCase<O: OtpRepository> {
    pub challenges: O,
}

impl<O: OtpRepository> VerifyOtpUseCase<O> {
    pub async fn execute(&self, input: VerifyOtpInput) -> Result<(), ChemtrackError> {
        let challenge = self
            .challenges
            .find_latest(&input.email)
            .await?
            .ok_or(ChemtrackError::NoChallenge)?;

        if challenge.code != input.code {
            return Err(ChemtrackError::IncorrectCode);
        }
        match challenge.status_at(Utc::now()) {
            ChallengeStatus::Expired => Err(ChemtrackError::CodeExpired),
            // One-shot: a verified or spent code cannot be verified again.
            ChallengeStatus::Verified | ChallengeStatus::Used => Err(ChemtrackError::CodeConsumed),
            ChallengeStatus::Active => {
                self.challenges.mark_verified(challenge.id).await?;
                Ok(())
            }
        }
    }
}

// ── ResetPassword ────────────────────────────────────────────────────────────

pub struct ResetPasswordInput {
    pub email: String,
    pub new_password: String,
}

pub struct ResetPasswordUseCase<U, O, H>
where
    U: UserRepository,
    O: OtpRepository,
    H: PasswordHasher,
{
    pub users: U,
    pub challenges: O,
    pub hasher: H,
}

impl<U, O, H> ResetPasswordUseCase<U, O, H>
where
    U: UserRepository,
    O: OtpRepository,
    H: PasswordHasher,
{
    pub async fn execute(&self, input: ResetPasswordInput) -> Result<(), ChemtrackError> {
        if input.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ChemtrackError::WeakPassword);
        }

        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(ChemtrackError::UserNotFound)?;

        let challenge = self
            .challenges
            .find_latest(&input.email)
            .await?
            .ok_or(ChemtrackError::NoChallenge)?;

        match challenge.status_at(Utc::now()) {
            ChallengeStatus::Active => return Err(ChemtrackError::VerificationRequired),
            ChallengeStatus::Used => return Err(ChemtrackError::CodeConsumed),
            ChallengeStatus::Expired => return Err(ChemtrackError::CodeExpired),
            ChallengeStatus::Verified => {}
        }

        let password_hash = self.hasher.hash(&input.new_password)?;
        self.users
            .update_password_hash(user.id, &password_hash)
            .await?;
        self.challenges.mark_used(challenge.id).await
    }
}
