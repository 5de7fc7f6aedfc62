use std::sync::{Arc, Mutex};

use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use chemtrack_server::domain::repository::{
    ChemicalFormRepository, Mailer, OtpRepository, PasswordHasher, SessionRepository,
    UserRepository,
};
use chemtrack_server::domain::types::{ChemicalRecord, OTP_TTL_SECS, OtpChallenge, Session, User};
use chemtrack_server::error::ChemtrackError;

// ── MockUserRepo ─────────────────────────────────────────────────────────────

pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Shared handle to the internal user list for post-execution inspection.
    pub fn users_handle(&self) -> Arc<Mutex<Vec<User>>> {
        Arc::clone(&self.users)
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ChemtrackError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ChemtrackError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), ChemtrackError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), ChemtrackError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.password_hash = password_hash.to_owned();
            user.updated_at = Utc::now();
        }
        Ok(())
    }
}

// ── MockFormRepo ─────────────────────────────────────────────────────────────

pub struct MockFormRepo {
    pub records: Arc<Mutex<Vec<ChemicalRecord>>>,
}

impl MockFormRepo {
    pub fn new(records: Vec<ChemicalRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn records_handle(&self) -> Arc<Mutex<Vec<ChemicalRecord>>> {
        Arc::clone(&self.records)
    }
}

impl ChemicalFormRepository for MockFormRepo {
    async fn create(&self, record: &ChemicalRecord) -> Result<(), ChemtrackError> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<ChemicalRecord>, ChemtrackError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect())
    }
}

// ── MockOtpRepo ──────────────────────────────────────────────────────────────

pub struct MockOtpRepo {
    pub challenges: Arc<Mutex<Vec<OtpChallenge>>>,
}

impl MockOtpRepo {
    pub fn new(challenges: Vec<OtpChallenge>) -> Self {
        Self {
            challenges: Arc::new(Mutex::new(challenges)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn challenges_handle(&self) -> Arc<Mutex<Vec<OtpChallenge>>> {
        Arc::clone(&self.challenges)
    }
}

impl OtpRepository for MockOtpRepo {
    async fn find_latest(&self, email: &str) -> Result<Option<OtpChallenge>, ChemtrackError> {
        Ok(self
            .challenges
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|c| c.email == email)
            .cloned())
    }

    async fn create(&self, challenge: &OtpChallenge) -> Result<(), ChemtrackError> {
        self.challenges.lock().unwrap().push(challenge.clone());
        Ok(())
    }

    async fn create_unless_recent(
        &self,
        challenge: &OtpChallenge,
    ) -> Result<bool, ChemtrackError> {
        let mut challenges = self.challenges.lock().unwrap();
        let now = Utc::now();
        if let Some(latest) = challenges.iter().rev().find(|c| c.email == challenge.email) {
            if latest.throttles_resend_at(now) {
                return Ok(false);
            }
        }
        challenges.push(challenge.clone());
        Ok(true)
    }

    async fn mark_verified(&self, id: Uuid) -> Result<(), ChemtrackError> {
        let mut challenges = self.challenges.lock().unwrap();
        if let Some(c) = challenges.iter_mut().find(|c| c.id == id) {
            c.verified_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn mark_used(&self, id: Uuid) -> Result<(), ChemtrackError> {
        let mut challenges = self.challenges.lock().unwrap();
        if let Some(c) = challenges.iter_mut().find(|c| c.id == id) {
            c.used_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), ChemtrackError> {
        self.challenges.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }
}

// ── MockSessionRepo ──────────────────────────────────────────────────────────

pub struct MockSessionRepo {
    pub sessions: Arc<Mutex<Vec<Session>>>,
}

impl MockSessionRepo {
    pub fn new(sessions: Vec<Session>) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(sessions)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn sessions_handle(&self) -> Arc<Mutex<Vec<Session>>> {
        Arc::clone(&self.sessions)
    }
}

impl SessionRepository for MockSessionRepo {
    async fn create(&self, session: &Session) -> Result<(), ChemtrackError> {
        self.sessions.lock().unwrap().push(session.clone());
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Session>, ChemtrackError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.token == token)
            .cloned())
    }

    async fn revoke(&self, id: Uuid) -> Result<(), ChemtrackError> {
        let mut sessions = self.sessions.lock().unwrap();
        if let Some(s) = sessions.iter_mut().find(|s| s.id == id) {
            s.revoked_at = Some(Utc::now());
        }
        Ok(())
    }
}

// ── MockMailer ───────────────────────────────────────────────────────────────

pub struct MockMailer {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
    pub fail: bool,
}

impl MockMailer {
    pub fn working() -> Self {
        Self {
            sent: Arc::new(Mutex::new(vec![])),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            sent: Arc::new(Mutex::new(vec![])),
            fail: true,
        }
    }

    pub fn sent_handle(&self) -> Arc<Mutex<Vec<(String, String)>>> {
        Arc::clone(&self.sent)
    }
}

impl Mailer for MockMailer {
    async fn send_otp(&self, to: &str, code: &str) -> Result<(), ChemtrackError> {
        if self.fail {
            return Err(ChemtrackError::MailDelivery(anyhow::anyhow!(
                "mail api unreachable"
            )));
        }
        self.sent.lock().unwrap().push((to.to_owned(), code.to_owned()));
        Ok(())
    }
}

// ── MockHasher ───────────────────────────────────────────────────────────────

/// Deterministic stand-in for the argon2 adapter.
pub struct MockHasher;

impl PasswordHasher for MockHasher {
    fn hash(&self, password: &str) -> Result<String, ChemtrackError> {
        Ok(format!("hashed:{password}"))
    }

    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, ChemtrackError> {
        Ok(password_hash == format!("hashed:{password}"))
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
}

pub fn test_user() -> User {
    let now = Utc::now();
    User {
        id: Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap(),
        first_name: "Asha".to_owned(),
        last_name: "Nair".to_owned(),
        email: "asha@example.com".to_owned(),
        phone: "9876543210".to_owned(),
        password_hash: "hashed:password123".to_owned(),
        created_at: now,
        updated_at: now,
    }
}

pub fn test_record(owner_id: Uuid, unit: &str, date: NaiveDate) -> ChemicalRecord {
    ChemicalRecord {
        id: Uuid::now_v7(),
        owner_id,
        date,
        unit: unit.to_owned(),
        chemical: "Caustic Soda".to_owned(),
        uom: "kg".to_owned(),
        sap_code: "SAP1001".to_owned(),
        opening: dec("100.00"),
        received: dec("25.00"),
        consumption: dec("40.00"),
        closing: dec("85.00"),
        reported_balance: dec("85.00"),
        remarks: String::new(),
        created_at: Utc::now(),
    }
}

pub fn test_challenge(email: &str, code: &str) -> OtpChallenge {
    let now = Utc::now();
    OtpChallenge {
        id: Uuid::new_v4(),
        email: email.to_owned(),
        code: code.to_owned(),
        expires_at: now + Duration::seconds(OTP_TTL_SECS),
        verified_at: None,
        used_at: None,
        created_at: now,
    }
}
