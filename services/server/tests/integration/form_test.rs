use chemtrack_server::domain::balance::SubmissionDraft;
use chemtrack_server::error::ChemtrackError;
use chemtrack_server::usecase::form::{ListFormsUseCase, ListUnitsUseCase, SubmitFormUseCase};
use uuid::Uuid;

use crate::helpers::{MockFormRepo, day, dec, test_record};

fn draft() -> SubmissionDraft {
    SubmissionDraft {
        date: Some(day(1)),
        unit: Some("Unit A".to_owned()),
        chemical: Some("Caustic Soda".to_owned()),
        uom: Some("kg".to_owned()),
        sap_code: Some("SAP1001".to_owned()),
        opening: Some(dec("2.65")),
        received: Some(dec("6.32")),
        consumption: Some(dec("26.14")),
        remarks: None,
    }
}

#[tokio::test]
async fn should_persist_record_with_server_derived_balances() {
    let owner = Uuid::now_v7();
    let repo = MockFormRepo::empty();
    let records_handle = repo.records_handle();
    let uc = SubmitFormUseCase { forms: repo };

    let record = uc.execute(owner, draft()).await.unwrap();

    assert_eq!(record.owner_id, owner);
    assert_eq!(record.closing, dec("-17.17"));
    assert_eq!(record.reported_balance, dec("-17.17"));

    let records = records_handle.lock().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].closing, dec("-17.17"));
}

#[tokio::test]
async fn should_not_persist_submission_with_missing_field() {
    let repo = MockFormRepo::empty();
    let records_handle = repo.records_handle();
    let uc = SubmitFormUseCase { forms: repo };

    let mut bad = draft();
    bad.uom = None;
    let result = uc.execute(Uuid::now_v7(), bad).await;

    assert!(matches!(result, Err(ChemtrackError::MissingField("uom"))));
    assert!(
        records_handle.lock().unwrap().is_empty(),
        "validation failure must not reach the store"
    );
}

#[tokio::test]
async fn should_reject_malformed_sap_code() {
    let uc = SubmitFormUseCase {
        forms: MockFormRepo::empty(),
    };

    let mut bad = draft();
    bad.sap_code = Some("1234".to_owned());
    let result = uc.execute(Uuid::now_v7(), bad).await;

    assert!(matches!(result, Err(ChemtrackError::InvalidCodeFormat)));
}

#[tokio::test]
async fn should_list_only_owner_records() {
    let owner = Uuid::now_v7();
    let other = Uuid::now_v7();
    let uc = ListFormsUseCase {
        forms: MockFormRepo::new(vec![
            test_record(owner, "Unit A", day(1)),
            test_record(other, "Unit B", day(1)),
            test_record(owner, "Unit C", day(2)),
        ]),
    };

    let records = uc.execute(owner).await.unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.owner_id == owner));
}

#[tokio::test]
async fn should_list_distinct_units_for_owner() {
    let owner = Uuid::now_v7();
    let uc = ListUnitsUseCase {
        forms: MockFormRepo::new(vec![
            test_record(owner, "Unit A", day(1)),
            test_record(owner, "Unit A", day(2)),
            test_record(owner, "Unit B", day(3)),
        ]),
    };

    let units = uc.execute(owner).await.unwrap();
    assert_eq!(units, vec!["Unit A", "Unit B"]);
}
