use chemtrack_server::domain::report::{DateRange, UnitSelector};
use chemtrack_server::usecase::report::{ExportCsvUseCase, ReportQuery, RunReportUseCase};
use uuid::Uuid;

use crate::helpers::{MockFormRepo, day, test_record};

fn unconstrained() -> ReportQuery {
    ReportQuery {
        unit: UnitSelector::All,
        range: None,
    }
}

#[tokio::test]
async fn should_return_all_owner_records_when_unconstrained() {
    let owner = Uuid::now_v7();
    let uc = RunReportUseCase {
        forms: MockFormRepo::new(vec![
            test_record(owner, "Unit A", day(1)),
            test_record(owner, "Unit B", day(2)),
        ]),
    };

    let records = uc.execute(owner, &unconstrained()).await.unwrap();
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn should_filter_by_unit_and_inclusive_range() {
    let owner = Uuid::now_v7();
    let uc = RunReportUseCase {
        forms: MockFormRepo::new(vec![
            test_record(owner, "Unit A", day(1)),
            test_record(owner, "Unit A", day(2)),
            test_record(owner, "Unit A", day(5)),
            test_record(owner, "Unit B", day(2)),
        ]),
    };

    let query = ReportQuery {
        unit: UnitSelector::parse("Unit A"),
        range: Some(DateRange {
            from: day(2),
            to: day(5),
        }),
    };
    let records = uc.execute(owner, &query).await.unwrap();

    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.unit == "Unit A"));
    assert!(records.iter().any(|r| r.date == day(2)));
    assert!(records.iter().any(|r| r.date == day(5)));
}

#[tokio::test]
async fn should_return_empty_result_for_unmatched_filter() {
    let owner = Uuid::now_v7();
    let uc = RunReportUseCase {
        forms: MockFormRepo::new(vec![test_record(owner, "Unit A", day(1))]),
    };

    let query = ReportQuery {
        unit: UnitSelector::parse("Unit Z"),
        range: None,
    };
    let records = uc.execute(owner, &query).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn should_export_header_and_one_row_per_record() {
    let owner = Uuid::now_v7();
    let uc = ExportCsvUseCase {
        forms: MockFormRepo::new(vec![test_record(owner, "Unit A", day(1))]),
    };

    let csv = uc.execute(owner, &unconstrained()).await.unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "Date,Unit,Chemical,UOM,SAP Code,Opening,Received,Consumption,Closing,SAP Balance,Remarks"
    );
    assert_eq!(lines[1].split(',').count(), 11);
}

#[tokio::test]
async fn should_quote_comma_remarks_in_export() {
    let owner = Uuid::now_v7();
    let mut record = test_record(owner, "Unit A", day(1));
    record.remarks = "spill, contained on site".to_owned();
    let uc = ExportCsvUseCase {
        forms: MockFormRepo::new(vec![record]),
    };

    let csv = uc.execute(owner, &unconstrained()).await.unwrap();
    assert!(csv.contains("\"spill, contained on site\""));
}

#[tokio::test]
async fn should_export_only_filtered_rows() {
    let owner = Uuid::now_v7();
    let uc = ExportCsvUseCase {
        forms: MockFormRepo::new(vec![
            test_record(owner, "Unit A", day(1)),
            test_record(owner, "Unit B", day(1)),
        ]),
    };

    let query = ReportQuery {
        unit: UnitSelector::parse("Unit B"),
        range: None,
    };
    let csv = uc.execute(owner, &query).await.unwrap();

    assert_eq!(csv.lines().count(), 2);
    assert!(csv.contains("Unit B"));
    assert!(!csv.contains("Unit A"));
}
