#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::{Datelike, Utc};
use inspection_engine::{
    config::AppConfig,
    db,
    dto::{
        CallHeader, CreatedCall, FinalCallRequest, HeatEntry, LotEntry, ProcessCallRequest,
        RawMaterialCallRequest,
    },
    entities::inspection::{inspection_call, CallStatus},
    services::InspectionCallService,
    AppState,
};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Application state backed by a fresh in-memory SQLite database with
/// migrations applied. The pool holds one connection, so every
/// transaction runs to completion before the next one starts.
pub struct TestApp {
    pub state: AppState,
    router: Router,
}

pub fn test_config() -> AppConfig {
    let mut cfg = AppConfig::new(
        "sqlite::memory:".to_string(),
        "127.0.0.1".to_string(),
        18_080,
        "test".to_string(),
    );
    cfg.db_max_connections = 1;
    cfg.db_min_connections = 1;
    cfg.db_acquire_timeout_secs = 120;
    cfg.db_idle_timeout_secs = 3_600;
    cfg.create_retry_backoff_ms = 1;
    cfg
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Test app over a caller-supplied database, e.g. a SQLite file.
    pub async fn with_database_url(url: &str) -> Self {
        let mut cfg = test_config();
        cfg.database_url = url.to_string();
        Self::with_config(cfg).await
    }

    /// Test app over a SQLite file configured the way a deployment would
    /// be: a multi-connection pool and the default retry budget.
    pub async fn file_backed(dir: &tempfile::TempDir) -> Self {
        let mut cfg = test_config();
        cfg.database_url = format!("sqlite://{}?mode=rwc", dir.path().join("calls.db").display());
        cfg.db_max_connections = 10;
        cfg.db_min_connections = 2;
        cfg.create_max_attempts = 3;
        cfg.create_retry_backoff_ms = 50;
        Self::with_config(cfg).await
    }

    pub async fn with_config(cfg: AppConfig) -> Self {
        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg, None);
        let router = inspection_engine::app_router(state.clone());
        Self { state, router }
    }

    pub fn service(&self) -> &InspectionCallService {
        &self.state.inspection_calls
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("router response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("response body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    /// Raw material call with one heat per `(heat_number, accepted_qty)` pair.
    pub async fn create_rm(&self, heats: &[(&str, Decimal)]) -> CreatedCall {
        self.service()
            .create_raw_material_call(rm_request(heats))
            .await
            .expect("raw material call created")
    }

    /// Raw material call that has passed inspection.
    pub async fn create_approved_rm(&self, heats: &[(&str, Decimal)]) -> CreatedCall {
        let created = self.create_rm(heats).await;
        self.set_status(&created.ic_number, CallStatus::Approved).await;
        created
    }

    pub async fn set_status(&self, ic_number: &str, status: CallStatus) {
        let call = inspection_call::Entity::find()
            .filter(inspection_call::Column::IcNumber.eq(ic_number))
            .one(&*self.state.db)
            .await
            .expect("query call")
            .expect("call exists");
        let mut active: inspection_call::ActiveModel = call.into();
        active.status = Set(status);
        active.update(&*self.state.db).await.expect("update status");
    }
}

pub fn current_year() -> i32 {
    Utc::now().year()
}

pub fn header() -> CallHeader {
    CallHeader {
        po_no: Some("PO-2025-0042".to_string()),
        vendor_name: Some("Acme Forge".to_string()),
        ..Default::default()
    }
}

pub fn rm_request(heats: &[(&str, Decimal)]) -> RawMaterialCallRequest {
    RawMaterialCallRequest {
        header: header(),
        item_description: Some("ERC clip bar stock".to_string()),
        heats: heats
            .iter()
            .map(|(number, accepted)| HeatEntry {
                heat_number: Some(number.to_string()),
                manufacturer: Some("Steel Mill Ltd".to_string()),
                offered_qty: Some(*accepted),
                accepted_qty: Some(*accepted),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

pub fn process_request(rm_ic_number: &str, heat_number: &str, offered: Decimal) -> ProcessCallRequest {
    ProcessCallRequest {
        header: header(),
        rm_ic_number: Some(rm_ic_number.to_string()),
        heat_number: Some(heat_number.to_string()),
        lot_number: Some("LOT-1".to_string()),
        offered_qty: Some(offered),
        ..Default::default()
    }
}

pub fn final_request(lots: &[(&str, Decimal)], process_ic_numbers: &[&str]) -> FinalCallRequest {
    FinalCallRequest {
        header: header(),
        product_description: Some("Elastic rail clip".to_string()),
        lots: lots
            .iter()
            .map(|(number, qty)| LotEntry {
                lot_number: Some(number.to_string()),
                heat_number: None,
                offered_qty: Some(*qty),
            })
            .collect(),
        process_ic_numbers: process_ic_numbers.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}
