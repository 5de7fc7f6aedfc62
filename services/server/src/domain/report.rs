//! Report filtering and CSV serialization over a user's submitted records.

use anyhow::Context as _;
use chrono::NaiveDate;

use crate::domain::types::ChemicalRecord;
use crate::error::ChemtrackError;

/// Sentinel unit-selector value meaning "no unit constraint".
pub const ALL_UNITS: &str = "All Units";

/// Column order of the CSV export. Fixed; the report table renders the same
/// columns in the same order.
pub const CSV_HEADER: [&str; 11] = [
    "Date",
    "Unit",
    "Chemical",
    "UOM",
    "SAP Code",
    "Opening",
    "Received",
    "Consumption",
    "Closing",
    "SAP Balance",
    "Remarks",
];

/// Unit constraint for a report query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitSelector {
    All,
    Unit(String),
}

impl UnitSelector {
    /// Parse a selector value; the [`ALL_UNITS`] sentinel and blank input
    /// both mean unconstrained.
    pub fn parse(value: &str) -> Self {
        if value.trim().is_empty() || value == ALL_UNITS {
            Self::All
        } else {
            Self::Unit(value.to_owned())
        }
    }

    fn matches(&self, unit: &str) -> bool {
        match self {
            Self::All => true,
            Self::Unit(selected) => selected == unit,
        }
    }
}

/// Inclusive calendar-date range. No time-of-day component is involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// Distinct units across the given records, in first-seen order.
pub fn list_units(records: &[ChemicalRecord]) -> Vec<String> {
    let mut units: Vec<String> = Vec::new();
    for record in records {
        if !units.iter().any(|u| u == &record.unit) {
            units.push(record.unit.clone());
        }
    }
    units
}

/// Records matching the unit selector and (when set) the inclusive date
/// range. With `UnitSelector::All` and no range this is the identity, and
/// the operation is idempotent for any fixed predicate.
pub fn filter(
    records: Vec<ChemicalRecord>,
    unit: &UnitSelector,
    range: Option<DateRange>,
) -> Vec<ChemicalRecord> {
    records
        .into_iter()
        .filter(|record| {
            unit.matches(&record.unit)
                && range.is_none_or(|r| r.contains(record.date))
        })
        .collect()
}

/// Serialize records as CSV: the fixed header row plus one row per record.
/// Fields containing delimiters, quotes or newlines are quoted with
/// embedded quotes doubled.
pub fn to_csv(records: &[ChemicalRecord]) -> Result<String, ChemtrackError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(CSV_HEADER)
        .context("write report csv header")?;
    for record in records {
        writer
            .write_record([
                record.date.to_string(),
                record.unit.clone(),
                record.chemical.clone(),
                record.uom.clone(),
                record.sap_code.clone(),
                record.opening.to_string(),
                record.received.to_string(),
                record.consumption.to_string(),
                record.closing.to_string(),
                record.reported_balance.to_string(),
                record.remarks.clone(),
            ])
            .context("write report csv row")?;
    }
    let data = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flush report csv: {e}"))?;
    String::from_utf8(data)
        .context("report csv is not utf-8")
        .map_err(ChemtrackError::from)
}
