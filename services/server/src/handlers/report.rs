use axum::http::header;
use axum::response::IntoResponse;
use axum::{Json, extract::Path, extract::Query, extract::State};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::report::{DateRange, UnitSelector};
use crate::error::ChemtrackError;
use crate::handlers::chemical_form::ChemicalRecordResponse;
use crate::identity::Identity;
use crate::state::AppState;
use crate::usecase::report::{CSV_FILE_NAME, ExportCsvUseCase, ReportQuery, RunReportUseCase};

#[derive(Deserialize)]
pub struct ReportParams {
    pub unit: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// A one-sided date range is a client mistake, not an open interval.
fn build_query(params: ReportParams) -> Result<ReportQuery, ChemtrackError> {
    let unit = params
        .unit
        .as_deref()
        .map(UnitSelector::parse)
        .unwrap_or(UnitSelector::All);
    let range = match (params.from, params.to) {
        (Some(from), Some(to)) => Some(DateRange { from, to }),
        (None, None) => None,
        (Some(_), None) => return Err(ChemtrackError::MissingField("to")),
        (None, Some(_)) => return Err(ChemtrackError::MissingField("from")),
    };
    Ok(ReportQuery { unit, range })
}

// ── GET /reports/{user_id} ───────────────────────────────────────────────────

pub async fn run_report(
    identity: Identity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<ReportParams>,
) -> Result<Json<Vec<ChemicalRecordResponse>>, ChemtrackError> {
    if user_id != identity.user_id {
        return Err(ChemtrackError::Forbidden);
    }
    let query = build_query(params)?;
    let usecase = RunReportUseCase {
        forms: state.form_repo(),
    };
    let records = usecase.execute(user_id, &query).await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

// ── GET /reports/{user_id}/csv ───────────────────────────────────────────────

pub async fn export_csv(
    identity: Identity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<ReportParams>,
) -> Result<impl IntoResponse, ChemtrackError> {
    if user_id != identity.user_id {
        return Err(ChemtrackError::Forbidden);
    }
    let query = build_query(params)?;
    let usecase = ExportCsvUseCase {
        forms: state.form_repo(),
    };
    let csv = usecase.execute(user_id, &query).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{CSV_FILE_NAME}\""),
            ),
        ],
        csv,
    ))
}
