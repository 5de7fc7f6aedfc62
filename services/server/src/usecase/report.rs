use uuid::Uuid;

use crate::domain::report::{self, DateRange, UnitSelector};
use crate::domain::repository::ChemicalFormRepository;
use crate::domain::types::ChemicalRecord;
use crate::error::ChemtrackError;

/// Download filename for the CSV export.
pub const CSV_FILE_NAME: &str = "chemical-report.csv";

/// Filter criteria for a report run.
#[derive(Debug, Clone)]
pub struct ReportQuery {
    pub unit: UnitSelector,
    pub range: Option<DateRange>,
}

// ── RunReport ────────────────────────────────────────────────────────────────

pub struct RunReportUseCase<F: ChemicalFormRepository> {
    pub forms: F,
}

impl<F: ChemicalFormRepository> RunReportUseCase<F> {
    pub async fn execute(
        &self,
        owner_id: Uuid,
        query: &ReportQuery,
    ) -> Result<Vec<ChemicalRecord>, ChemtrackError> {
        let records = self.forms.list_by_owner(owner_id).await?;
        Ok(report::filter(records, &query.unit, query.range))
    }
}

// ── ExportCsv ────────────────────────────────────────────────────────────────

pub struct ExportCsvUseCase<F: ChemicalFormRepository> {
    pub forms: F,
}

impl<F: ChemicalFormRepository> ExportCsvUseCase<F> {
    pub async fn execute(
        &self,
        owner_id: Uuid,
        query: &ReportQuery,
    ) -> Result<String, ChemtrackError> {
        let records = self.forms.list_by_owner(owner_id).await?;
        let filtered = report::filter(records, &query.unit, query.range);
        report::to_csv(&filtered)
    }
}
