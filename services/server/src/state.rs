use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbChemicalFormRepository, DbOtpRepository, DbSessionRepository, DbUserRepository,
};
use crate::infra::hash::ArgonHasher;
use crate::infra::mailer::HttpMailer;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub mailer: HttpMailer,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn form_repo(&self) -> DbChemicalFormRepository {
        DbChemicalFormRepository {
            db: self.db.clone(),
        }
    }

    pub fn otp_repo(&self) -> DbOtpRepository {
        DbOtpRepository {
            db: self.db.clone(),
        }
    }

    pub fn session_repo(&self) -> DbSessionRepository {
        DbSessionRepository {
            db: self.db.clone(),
        }
    }

    pub fn mailer(&self) -> HttpMailer {
        self.mailer.clone()
    }

    pub fn hasher(&self) -> ArgonHasher {
        ArgonHasher
    }
}
