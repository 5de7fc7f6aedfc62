use uuid::Uuid;

use crate::domain::balance::{SubmissionDraft, validate_submission};
use crate::domain::report;
use crate::domain::repository::ChemicalFormRepository;
use crate::domain::types::ChemicalRecord;
use crate::error::ChemtrackError;

// ── SubmitForm ───────────────────────────────────────────────────────────────

pub struct SubmitFormUseCase<F: ChemicalFormRepository> {
    pub forms: F,
}

impl<F: ChemicalFormRepository> SubmitFormUseCase<F> {
    /// Validate the draft, derive the balances server-side and persist the
    /// record. Validation runs before any persistence attempt.
    pub async fn execute(
        &self,
        owner_id: Uuid,
        draft: SubmissionDraft,
    ) -> Result<ChemicalRecord, ChemtrackError> {
        let record = validate_submission(draft)?.into_record(owner_id);
        self.forms.create(&record).await?;
        Ok(record)
    }
}

// ── ListForms ────────────────────────────────────────────────────────────────

pub struct ListFormsUseCase<F: ChemicalFormRepository> {
    pub forms: F,
}

impl<F: ChemicalFormRepository> ListFormsUseCase<F> {
    pub async fn execute(&self, owner_id: Uuid) -> Result<Vec<ChemicalRecord>, ChemtrackError> {
        self.forms.list_by_owner(owner_id).await
    }
}

// ── ListUnits ────────────────────────────────────────────────────────────────

pub struct ListUnitsUseCase<F: ChemicalFormRepository> {
    pub forms: F,
}

impl<F: ChemicalFormRepository> ListUnitsUseCase<F> {
    pub async fn execute(&self, owner_id: Uuid) -> Result<Vec<String>, ChemtrackError> {
        let records = self.forms.list_by_owner(owner_id).await?;
        Ok(report::list_units(&records))
    }
}
