use axum::{Json, extract::Path, extract::State, http::StatusCode};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::balance::SubmissionDraft;
use crate::domain::types::ChemicalRecord;
use crate::error::ChemtrackError;
use crate::identity::Identity;
use crate::state::AppState;
use crate::usecase::form::{ListFormsUseCase, ListUnitsUseCase, SubmitFormUseCase};

// ── POST /chemical_forms ─────────────────────────────────────────────────────

/// Form submission body. Client-computed `closing`/`sapBalance` fields are
/// ignored if present (unknown fields are skipped); the balances are derived
/// server-side. The legacy field spellings are accepted as aliases.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFormRequest {
    #[serde(rename = "user_id")]
    pub user_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub unit: Option<String>,
    pub chemical: Option<String>,
    pub uom: Option<String>,
    #[serde(alias = "sapcode")]
    pub sap_code: Option<String>,
    pub opening: Option<Decimal>,
    #[serde(alias = "receive")]
    pub received: Option<Decimal>,
    pub consumption: Option<Decimal>,
    pub remarks: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChemicalRecordResponse {
    pub id: String,
    pub owner_id: String,
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
    #[serde(serialize_with = "chemtrack_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ChemicalRecord> for ChemicalRecordResponse {
    fn from(record: ChemicalRecord) -> Self {
        Self {
            id: record.id.to_string(),
            owner_id: record.owner_id.to_string(),
            date: record.date,
            unit: record.unit,
            chemical: record.chemical,
            uom: record.uom,
            sap_code: record.sap_code,
            opening: record.opening,
            received: record.received,
            consumption: record.consumption,
            closing: record.closing,
            reported_balance: record.reported_balance,
            remarks: record.remarks,
            created_at: record.created_at,
        }
    }
}

pub async fn create_form(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateFormRequest>,
) -> Result<(StatusCode, Json<ChemicalRecordResponse>), ChemtrackError> {
    let owner_id = body.user_id.ok_or(ChemtrackError::MissingField("user_id"))?;
    if owner_id != identity.user_id {
        return Err(ChemtrackError::Forbidden);
    }
    let usecase = SubmitFormUseCase {
        forms: state.form_repo(),
    };
    let record = usecase
        .execute(
            owner_id,
            SubmissionDraft {
                date: body.date,
                unit: body.unit,
                chemical: body.chemical,
                uom: body.uom,
                sap_code: body.sap_code,
                opening: body.opening,
                received: body.received,
                consumption: body.consumption,
                remarks: body.remarks,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(record.into())))
}

// ── GET /chemical_forms/{user_id} ────────────────────────────────────────────

pub async fn list_forms(
    identity: Identity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<ChemicalRecordResponse>>, ChemtrackError> {
    if user_id != identity.user_id {
        return Err(ChemtrackError::Forbidden);
    }
    let usecase = ListFormsUseCase {
        forms: state.form_repo(),
    };
    let records = usecase.execute(user_id).await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

// ── GET /units/{user_id} ─────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UnitsResponse {
    pub units: Vec<String>,
}

pub async fn list_units(
    identity: Identity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UnitsResponse>, ChemtrackError> {
    if user_id != identity.user_id {
        return Err(ChemtrackError::Forbidden);
    }
    let usecase = ListUnitsUseCase {
        forms: state.form_repo(),
    };
    let units = usecase.execute(user_id).await?;
    Ok(Json(UnitsResponse { units }))
}
