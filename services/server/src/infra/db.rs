use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use chemtrack_schema::{chemical_forms, otp_challenges, sessions, users};

use crate::domain::repository::{
    ChemicalFormRepository, OtpRepository, SessionRepository, UserRepository,
};
use crate::domain::types::{ChemicalRecord, OtpChallenge, Session, User};
use crate::error::ChemtrackError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ChemtrackError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ChemtrackError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<(), ChemtrackError> {
        users::ActiveModel {
            id: Set(user.id),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            email: Set(user.email.clone()),
            phone: Set(user.phone.clone()),
            password_hash: Set(user.password_hash.clone()),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(())
    }

    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), ChemtrackError> {
        users::ActiveModel {
            id: Set(id),
            password_hash: Set(password_hash.to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update user password hash")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        first_name: model.first_name,
        last_name: model.last_name,
        email: model.email,
        phone: model.phone,
        password_hash: model.password_hash,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Chemical form repository ─────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbChemicalFormRepository {
    pub db: DatabaseConnection,
}

impl ChemicalFormRepository for DbChemicalFormRepository {
    async fn create(&self, record: &ChemicalRecord) -> Result<(), ChemtrackError> {
        chemical_forms::ActiveModel {
            id: Set(record.id),
            owner_id: Set(record.owner_id),
            date: Set(record.date),
            unit: Set(record.unit.clone()),
            chemical: Set(record.chemical.clone()),
            uom: Set(record.uom.clone()),
            sap_code: Set(record.sap_code.clone()),
            opening: Set(record.opening),
            received: Set(record.received),
            consumption: Set(record.consumption),
            closing: Set(record.closing),
            reported_balance: Set(record.reported_balance),
            remarks: Set(record.remarks.clone()),
            created_at: Set(record.created_at),
        }
        .insert(&self.db)
        .await
        .context("create chemical form")?;
        Ok(())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<ChemicalRecord>, ChemtrackError> {
        let models = chemical_forms::Entity::find()
            .filter(chemical_forms::Column::OwnerId.eq(owner_id))
            .order_by_asc(chemical_forms::Column::Date)
            .all(&self.db)
            .await
            .context("list chemical forms by owner")?;
        Ok(models.into_iter().map(record_from_model).collect())
    }
}

fn record_from_model(model: chemical_forms::Model) -> ChemicalRecord {
    ChemicalRecord {
        id: model.id,
        owner_id: model.owner_id,
        date: model.date,
        unit: model.unit,
        chemical: model.chemical,
        uom: model.uom,
        sap_code: model.sap_code,
        opening: model.opening,
        received: model.received,
        consumption: model.consumption,
        closing: model.closing,
        reported_balance: model.reported_balance,
        remarks: model.remarks,
        created_at: model.created_at,
    }
}

// ── OTP challenge repository ─────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOtpRepository {
    pub db: DatabaseConnection,
}

impl OtpRepository for DbOtpRepository {
    async fn find_latest(&self, email: &str) -> Result<Option<OtpChallenge>, ChemtrackError> {
        let model = otp_challenges::Entity::find()
            .filter(otp_challenges::Column::Email.eq(email))
            .order_by_desc(otp_challenges::Column::CreatedAt)
            .one(&self.db)
            .await
            .context("find latest otp challenge")?;
        Ok(model.map(challenge_from_model))
    }

    async fn create(&self, challenge: &OtpChallenge) -> Result<(), ChemtrackError> {
        insert_challenge(&self.db, challenge)
            .await
            .context("create otp challenge")?;
        Ok(())
    }

    async fn create_unless_recent(
        &self,
        challenge: &OtpChallenge,
    ) -> Result<bool, ChemtrackError> {
        // Read-check-insert in one transaction so two concurrent resends for
        // the same email cannot both pass the throttle.
        let challenge = challenge.clone();
        let inserted = self
            .db
            .transaction::<_, bool, sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    let now = Utc::now();
                    let latest = otp_challenges::Entity::find()
                        .filter(otp_challenges::Column::Email.eq(challenge.email.clone()))
                        .order_by_desc(otp_challenges::Column::CreatedAt)
                        .one(txn)
                        .await?;
                    if let Some(latest) = latest.map(challenge_from_model) {
                        if latest.throttles_resend_at(now) {
                            return Ok(false);
                        }
                    }
                    insert_challenge(txn, &challenge).await?;
                    Ok(true)
                })
            })
            .await
            .context("create otp challenge unless recent")?;
        Ok(inserted)
    }

    async fn mark_verified(&self, id: Uuid) -> Result<(), ChemtrackError> {
        otp_challenges::ActiveModel {
            id: Set(id),
            verified_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("mark otp challenge verified")?;
        Ok(())
    }

    async fn mark_used(&self, id: Uuid) -> Result<(), ChemtrackError> {
        otp_challenges::ActiveModel {
            id: Set(id),
            used_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("mark otp challenge used")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), ChemtrackError> {
        otp_challenges::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete otp challenge")?;
        Ok(())
    }
}

async fn insert_challenge<C>(conn: &C, challenge: &OtpChallenge) -> Result<(), sea_orm::DbErr>
where
    C: sea_orm::ConnectionTrait,
{
    otp_challenges::ActiveModel {
        id: Set(challenge.id),
        email: Set(challenge.email.clone()),
        code: Set(challenge.code.clone()),
        expires_at: Set(challenge.expires_at),
        verified_at: Set(challenge.verified_at),
        used_at: Set(challenge.used_at),
        created_at: Set(challenge.created_at),
    }
    .insert(conn)
    .await?;
    Ok(())
}

fn challenge_from_model(model: otp_challenges::Model) -> OtpChallenge {
    OtpChallenge {
        id: model.id,
        email: model.email,
        code: model.code,
        expires_at: model.expires_at,
        verified_at: model.verified_at,
        used_at: model.used_at,
        created_at: model.created_at,
    }
}

// ── Session repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSessionRepository {
    pub db: DatabaseConnection,
}

impl SessionRepository for DbSessionRepository {
    async fn create(&self, session: &Session) -> Result<(), ChemtrackError> {
        sessions::ActiveModel {
            id: Set(session.id),
            user_id: Set(session.user_id),
            token: Set(session.token.clone()),
            expires_at: Set(session.expires_at),
            revoked_at: Set(session.revoked_at),
            created_at: Set(session.created_at),
        }
        .insert(&self.db)
        .await
        .context("create session")?;
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Session>, ChemtrackError> {
        let model = sessions::Entity::find()
            .filter(sessions::Column::Token.eq(token))
            .one(&self.db)
            .await
            .context("find session by token")?;
        Ok(model.map(session_from_model))
    }

    async fn revoke(&self, id: Uuid) -> Result<(), ChemtrackError> {
        sessions::ActiveModel {
            id: Set(id),
            revoked_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("revoke session")?;
        Ok(())
    }
}

fn session_from_model(model: sessions::Model) -> Session {
    Session {
        id: model.id,
        user_id: model.user_id,
        token: model.token,
        expires_at: model.expires_at,
        revoked_at: model.revoked_at,
        created_at: model.created_at,
    }
}
