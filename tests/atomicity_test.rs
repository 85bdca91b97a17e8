mod common;

use assert_matches::assert_matches;
use common::{current_year, final_request, process_request, TestApp};
use inspection_engine::dto::{CallFilters, StageDetailView};
use inspection_engine::entities::inspection::{final_inspection_detail, CallStage};
use inspection_engine::errors::ServiceError;
use rust_decimal_macros::dec;
use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait, Statement};

#[tokio::test]
async fn failed_child_insert_leaves_no_trace() {
    let app = TestApp::new().await;
    let db = &*app.state.db;

    let before = app.service().sequence_counter(CallStage::Final).await.unwrap();

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "DROP TABLE final_lot_details".to_string(),
    ))
    .await
    .unwrap();

    let err = app
        .service()
        .create_final_call(final_request(&[("L1", dec!(5))], &[]))
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::DatabaseError(_));

    let attempted = format!("FINAL-IC-{}-0001", current_year());
    assert_matches!(
        app.service().get_by_ic_number(&attempted).await,
        Err(ServiceError::NotFound(_))
    );

    let after = app.service().sequence_counter(CallStage::Final).await.unwrap();
    assert_eq!(after.current_sequence, before.current_sequence);
    assert_eq!(after.last_issued, before.last_issued);

    let details = final_inspection_detail::Entity::find().count(db).await.unwrap();
    assert_eq!(details, 0);

    let filters = CallFilters {
        stage: Some(CallStage::Final),
        ..Default::default()
    };
    let (_, total) = app.service().get_all_calls(filters, 1, 10).await.unwrap();
    assert_eq!(total, 0);
}

#[tokio::test]
async fn one_bad_process_reference_rejects_the_final_call() {
    let app = TestApp::new().await;
    let rm = app.create_approved_rm(&[("H1", dec!(100))]).await;
    let process = app
        .service()
        .create_process_call(process_request(&rm.ic_number, "H1", dec!(10)))
        .await
        .unwrap();

    let err = app
        .service()
        .create_final_call(final_request(
            &[("L1", dec!(5))],
            &[process.ic_number.as_str(), "PROC-IC-2025-9999"],
        ))
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));

    // A raw material call is not a process reference either.
    let err = app
        .service()
        .create_final_call(final_request(&[("L1", dec!(5))], &[rm.ic_number.as_str()]))
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));

    let counter = app.service().sequence_counter(CallStage::Final).await.unwrap();
    assert_eq!(counter.current_sequence, 0);
}

#[tokio::test]
async fn final_call_writes_lots_and_mappings_together() {
    let app = TestApp::new().await;
    let rm = app.create_approved_rm(&[("H1", dec!(100))]).await;
    let p1 = app
        .service()
        .create_process_call(process_request(&rm.ic_number, "H1", dec!(10)))
        .await
        .unwrap();
    let p2 = app
        .service()
        .create_process_call(process_request(&rm.ic_number, "H1", dec!(20)))
        .await
        .unwrap();

    let created = app
        .service()
        .create_final_call(final_request(
            &[("L1", dec!(4)), ("L2", dec!(6.5))],
            &[p1.ic_number.as_str(), p2.ic_number.as_str()],
        ))
        .await
        .unwrap();
    assert_eq!(created.ic_number, format!("FINAL-IC-{}-0001", current_year()));

    let view = app.service().get_by_ic_number(&created.ic_number).await.unwrap();
    match view.detail {
        Some(StageDetailView::Final(detail)) => {
            assert_eq!(detail.total_lots, 2);
            assert_eq!(detail.total_offered_qty, Some(dec!(10.5)));
            assert_eq!(detail.lots.len(), 2);
            let mut refs = detail.process_ic_numbers.clone();
            refs.sort();
            let mut expected = vec![p1.ic_number.clone(), p2.ic_number.clone()];
            expected.sort();
            assert_eq!(refs, expected);
        }
        other => panic!("unexpected detail {:?}", other),
    }
}

#[tokio::test]
async fn final_call_needs_lots() {
    let app = TestApp::new().await;

    let err = app
        .service()
        .create_final_call(final_request(&[], &[]))
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::MissingField(ref f) if f == "lots");

    let err = app
        .service()
        .create_final_call(final_request(&[("L1", dec!(1)), ("L1", dec!(2))], &[]))
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));
}
