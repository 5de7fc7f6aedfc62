//! Daily balance computation and submission validation.

use chrono::{NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use crate::domain::types::ChemicalRecord;
use crate::error::ChemtrackError;

/// Closing balance for a reporting day: `opening + received - consumption`,
/// rounded half-up to 2 decimal places. Negative results are valid and
/// signal a shortage.
pub fn compute_closing(opening: Decimal, received: Decimal, consumption: Decimal) -> Decimal {
    (opening + received - consumption)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Balance reported to the upstream inventory system. Identity today; kept
/// as a separate step so an upstream adjustment can be applied without
/// touching the closing-balance contract.
pub fn derive_reported_balance(closing: Decimal) -> Decimal {
    closing
}

/// Validate an SAP material code: literal `SAP` prefix followed by one or
/// more decimal digits.
pub fn is_valid_sap_code(code: &str) -> bool {
    match code.strip_prefix("SAP") {
        Some(digits) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// Raw form submission as it arrives over the wire. Every field is optional
/// until [`validate_submission`] has run.
#[derive(Debug, Clone, Default)]
pub struct SubmissionDraft {
    pub date: Option<NaiveDate>,
    pub unit: Option<String>,
    pub chemical: Option<String>,
    pub uom: Option<String>,
    pub sap_code: Option<String>,
    pub opening: Option<Decimal>,
    pub received: Option<Decimal>,
    pub consumption: Option<Decimal>,
    pub remarks: Option<String>,
}

/// A structurally valid submission. The only path from here to a persisted
/// record is [`Submission::into_record`], which recomputes the derived
/// balances — client-supplied values never survive the trust boundary.
#[derive(Debug, Clone)]
pub struct Submission {
    pub date: NaiveDate,
    pub unit: String,
    pub chemical: String,
    pub uom: String,
    pub sap_code: String,
    pub opening: Decimal,
    pub received: Decimal,
    pub consumption: Decimal,
    pub remarks: String,
}

fn required_text(
    value: Option<String>,
    field: &'static str,
) -> Result<String, ChemtrackError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(ChemtrackError::MissingField(field)),
    }
}

/// Structural validation, run before any persistence and before the balance
/// computation. Only presence and the SAP-code format are checked; numeric
/// magnitudes are unconstrained.
pub fn validate_submission(draft: SubmissionDraft) -> Result<Submission, ChemtrackError> {
    let date = draft.date.ok_or(ChemtrackError::MissingField("date"))?;
    let unit = required_text(draft.unit, "unit")?;
    let chemical = required_text(draft.chemical, "chemical")?;
    let uom = required_text(draft.uom, "uom")?;
    let sap_code = required_text(draft.sap_code, "sapCode")?;
    let opening = draft
        .opening
        .ok_or(ChemtrackError::MissingField("opening"))?;
    let received = draft
        .received
        .ok_or(ChemtrackError::MissingField("received"))?;
    let consumption = draft
        .consumption
        .ok_or(ChemtrackError::MissingField("consumption"))?;

    if !is_valid_sap_code(&sap_code) {
        return Err(ChemtrackError::InvalidCodeFormat);
    }

    Ok(Submission {
        date,
        unit,
        chemical,
        uom,
        sap_code,
        opening,
        received,
        consumption,
        remarks: draft.remarks.unwrap_or_default(),
    })
}

impl Submission {
    /// Build the persisted record, deriving `closing` and
    /// `reported_balance` from the three input quantities.
    pub fn into_record(self, owner_id: Uuid) -> ChemicalRecord {
        let closing = compute_closing(self.opening, self.received, self.consumption);
        let reported_balance = derive_reported_balance(closing);
        ChemicalRecord {
            id: Uuid::now_v7(),
            owner_id,
            date: self.date,
            unit: self.unit,
            chemical: self.chemical,
            uom: self.uom,
            sap_code: self.sap_code,
            opening: self.opening,
            received: self.received,
            consumption: self.consumption,
            closing,
            reported_balance,
            remarks: self.remarks,
            created_at: Utc::now(),
        }
    }
}
