mod common;

use assert_matches::assert_matches;
use common::{process_request, TestApp};
use futures::future::join_all;
use inspection_engine::dto::{ProcessCallRequest, StageDetailView};
use inspection_engine::entities::inspection::{CallStage, CallStatus};
use inspection_engine::errors::ServiceError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[tokio::test]
async fn offers_draw_down_the_heat_budget() {
    let app = TestApp::new().await;
    let rm = app.create_approved_rm(&[("H1", dec!(100))]).await;

    let first = app
        .service()
        .create_process_call(process_request(&rm.ic_number, "H1", dec!(60)))
        .await
        .expect("60 of 100 fits");
    let availability = app.service().get_heat_availability(&rm.ic_number).await.unwrap();
    assert_eq!(availability.heat("H1").unwrap().remaining_qty, dec!(40));

    let err = app
        .service()
        .create_process_call(process_request(&rm.ic_number, "H1", dec!(41)))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        ServiceError::QuantityExceeded { offered, available }
            if offered == dec!(41) && available == dec!(40)
    );

    let third = app
        .service()
        .create_process_call(process_request(&rm.ic_number, "H1", dec!(40)))
        .await
        .expect("exactly the remainder is allowed");

    let availability = app.service().get_heat_availability(&rm.ic_number).await.unwrap();
    let heat = availability.heat("H1").unwrap();
    assert_eq!(heat.accepted_qty, dec!(100));
    assert_eq!(heat.consumed_qty, dec!(100));
    assert_eq!(heat.remaining_qty, Decimal::ZERO);
    assert_eq!(heat.process_call_count, 2);

    // The rejected attempt consumed no number.
    let year = common::current_year();
    assert_eq!(first.ic_number, format!("PROC-IC-{}-0001", year));
    assert_eq!(third.ic_number, format!("PROC-IC-{}-0002", year));
}

#[tokio::test]
async fn offer_equal_to_accepted_quantity_is_accepted() {
    let app = TestApp::new().await;
    let rm = app.create_approved_rm(&[("H7", dec!(12.5))]).await;

    app.service()
        .create_process_call(process_request(&rm.ic_number, "H7", dec!(12.5)))
        .await
        .expect("boundary is inclusive");

    let err = app
        .service()
        .create_process_call(process_request(&rm.ic_number, "H7", dec!(0.001)))
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::QuantityExceeded { available, .. } if available.is_zero());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_offers_never_overdraw_a_heat() {
    let app = TestApp::new().await;
    let rm = app.create_approved_rm(&[("H1", dec!(100))]).await;

    let mut tasks = Vec::new();
    for _ in 0..20 {
        let service = app.service().clone();
        let request = process_request(&rm.ic_number, "H1", dec!(10));
        tasks.push(tokio::spawn(async move { service.create_process_call(request).await }));
    }

    let mut accepted = 0;
    for joined in join_all(tasks).await {
        match joined.expect("task joined") {
            Ok(_) => accepted += 1,
            Err(err) => assert_matches!(err, ServiceError::QuantityExceeded { .. }),
        }
    }
    assert_eq!(accepted, 10);

    let availability = app.service().get_heat_availability(&rm.ic_number).await.unwrap();
    let heat = availability.heat("H1").unwrap();
    assert_eq!(heat.consumed_qty, dec!(100));
    assert_eq!(heat.remaining_qty, Decimal::ZERO);
    assert_eq!(heat.process_call_count, 10);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_offers_on_a_file_database_fill_the_heat_exactly() {
    let dir = tempfile::tempdir().expect("temp dir");
    let app = TestApp::file_backed(&dir).await;
    let rm = app.create_approved_rm(&[("H1", dec!(100))]).await;

    let tasks: Vec<_> = (0..20)
        .map(|_| {
            let service = app.service().clone();
            let request = process_request(&rm.ic_number, "H1", dec!(10));
            tokio::spawn(async move { service.create_process_call(request).await })
        })
        .collect();

    let mut accepted = 0;
    let mut exceeded = 0;
    for joined in join_all(tasks).await {
        match joined.expect("task joined") {
            Ok(_) => accepted += 1,
            Err(ServiceError::QuantityExceeded { .. }) => exceeded += 1,
            Err(other) => panic!("unexpected rejection: {}", other),
        }
    }
    assert_eq!(accepted, 10);
    assert_eq!(exceeded, 10);

    let availability = app.service().get_heat_availability(&rm.ic_number).await.unwrap();
    let heat = availability.heat("H1").unwrap();
    assert_eq!(heat.consumed_qty, dec!(100));
    assert_eq!(heat.remaining_qty, Decimal::ZERO);
}

#[tokio::test]
async fn heats_have_separate_budgets() {
    let app = TestApp::new().await;
    let rm = app
        .create_approved_rm(&[("H1", dec!(10)), ("H2", dec!(20))])
        .await;

    app.service()
        .create_process_call(process_request(&rm.ic_number, "H1", dec!(10)))
        .await
        .unwrap();
    app.service()
        .create_process_call(process_request(&rm.ic_number, "H2", dec!(15)))
        .await
        .unwrap();

    let availability = app.service().get_heat_availability(&rm.ic_number).await.unwrap();
    assert_eq!(availability.heat("H1").unwrap().remaining_qty, Decimal::ZERO);
    assert_eq!(availability.heat("H2").unwrap().remaining_qty, dec!(5));
}

#[tokio::test]
async fn pending_upstream_is_rejected() {
    let app = TestApp::new().await;
    let rm = app.create_rm(&[("H1", dec!(100))]).await;

    let err = app
        .service()
        .create_process_call(process_request(&rm.ic_number, "H1", dec!(1)))
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::UpstreamNotApproved(_));

    app.set_status(&rm.ic_number, CallStatus::Rejected).await;
    let err = app
        .service()
        .create_process_call(process_request(&rm.ic_number, "H1", dec!(1)))
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::UpstreamNotApproved(_));
}

#[tokio::test]
async fn unknown_or_wrong_stage_upstream_is_rejected() {
    let app = TestApp::new().await;

    let err = app
        .service()
        .create_process_call(process_request("RM-IC-2025-9999", "H1", dec!(1)))
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::UpstreamNotApproved(_));

    let rm = app.create_approved_rm(&[("H1", dec!(100))]).await;
    let process = app
        .service()
        .create_process_call(process_request(&rm.ic_number, "H1", dec!(1)))
        .await
        .unwrap();
    app.set_status(&process.ic_number, CallStatus::Approved).await;

    let err = app
        .service()
        .create_process_call(process_request(&process.ic_number, "H1", dec!(1)))
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::UpstreamNotApproved(_));
}

#[tokio::test]
async fn heat_absent_from_upstream_is_heat_not_found() {
    let app = TestApp::new().await;
    let rm = app.create_approved_rm(&[("H1", dec!(100))]).await;

    let err = app
        .service()
        .create_process_call(process_request(&rm.ic_number, "H9", dec!(1)))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        ServiceError::HeatNotFound { ref heat_number, .. } if heat_number == "H9"
    );
}

#[tokio::test]
async fn required_process_fields_are_missing_field_errors() {
    let app = TestApp::new().await;
    let rm = app.create_approved_rm(&[("H1", dec!(100))]).await;
    let base = process_request(&rm.ic_number, "H1", dec!(1));

    let cases: Vec<(&str, ProcessCallRequest)> = vec![
        ("rm_ic_number", ProcessCallRequest { rm_ic_number: None, ..base.clone() }),
        ("heat_number", ProcessCallRequest { heat_number: None, ..base.clone() }),
        ("lot_number", ProcessCallRequest { lot_number: None, ..base.clone() }),
        ("offered_qty", ProcessCallRequest { offered_qty: None, ..base.clone() }),
        ("offered_qty", ProcessCallRequest { offered_qty: Some(Decimal::ZERO), ..base.clone() }),
        ("offered_qty", ProcessCallRequest { offered_qty: Some(dec!(-3)), ..base.clone() }),
    ];

    for (field, request) in cases {
        let err = app.service().create_process_call(request).await.unwrap_err();
        assert_matches!(err, ServiceError::MissingField(ref f) if f == field, "field {}", field);
    }

    let counter = app.service().sequence_counter(CallStage::Process).await.unwrap();
    assert_eq!(counter.current_sequence, 0);
}

#[tokio::test]
async fn process_call_snapshots_upstream_heat() {
    let app = TestApp::new().await;
    let rm = app.create_approved_rm(&[("H1", dec!(100))]).await;

    let created = app
        .service()
        .create_process_call(process_request(&rm.ic_number, "H1", dec!(25)))
        .await
        .unwrap();

    let view = app.service().get_by_ic_number(&created.ic_number).await.unwrap();
    assert_eq!(view.call.stage, CallStage::Process);
    assert_eq!(view.call.status, CallStatus::Pending);
    match view.detail {
        Some(StageDetailView::Process(detail)) => {
            assert_eq!(detail.rm_ic_number, rm.ic_number);
            assert_eq!(detail.rm_call_id, Some(rm.call_id));
            assert_eq!(detail.offered_qty, dec!(25));
            assert_eq!(detail.total_accepted_qty_rm, dec!(100));
            assert_eq!(detail.manufacturer.as_deref(), Some("Steel Mill Ltd"));
            assert_eq!(detail.unit_of_measurement, "MT");
        }
        other => panic!("unexpected detail {:?}", other),
    }
}
