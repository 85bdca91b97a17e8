//! Call Lifecycle Service
//!
//! Orchestrates creation of inspection calls: one transaction per attempt
//! running validate, allocate and write, committed only when all three
//! succeed. Read-side queries go straight to the record store.

use chrono::Utc;
use metrics::counter;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::config::AppConfig;
use crate::db::retry::{with_retry, RetryConfig, TransientStorePolicy};
use crate::dto::{
    CallFilters, CreatedCall, FinalCallRequest, HeatAvailability, HeatAvailabilityItem,
    InspectionCallSummary, InspectionCallView, ProcessCallRequest, RawMaterialCallRequest,
    StagePayload,
};
use crate::entities::inspection::{sequence_counter, CallStage};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::services::inspection_store::{InspectionStore, NewCall};
use crate::services::sequence::SequenceAllocator;
use crate::services::stage_validator::StageValidator;

/// Service for creating and querying inspection calls
#[derive(Clone)]
pub struct InspectionCallService {
    db: Arc<DatabaseConnection>,
    allocator: SequenceAllocator,
    store: InspectionStore,
    validator: StageValidator,
    retry: RetryConfig,
    event_sender: Option<EventSender>,
}

/// What a committed create reports to the audit channel.
struct Committed {
    created: CreatedCall,
    call: NewCall,
}

impl InspectionCallService {
    pub fn new(db: Arc<DatabaseConnection>, retry: RetryConfig) -> Self {
        let store = InspectionStore::new();
        Self {
            db,
            allocator: SequenceAllocator::new(),
            validator: StageValidator::new(store.clone()),
            store,
            retry,
            event_sender: None,
        }
    }

    pub fn from_config(db: Arc<DatabaseConnection>, config: &AppConfig) -> Self {
        Self::new(
            db,
            RetryConfig::new(config.create_max_attempts, config.create_retry_backoff()),
        )
    }

    pub fn with_event_sender(mut self, event_sender: EventSender) -> Self {
        self.event_sender = Some(event_sender);
        self
    }

    pub async fn create_raw_material_call(
        &self,
        request: RawMaterialCallRequest,
    ) -> Result<CreatedCall, ServiceError> {
        self.create_call(StagePayload::RawMaterial(request)).await
    }

    pub async fn create_process_call(
        &self,
        request: ProcessCallRequest,
    ) -> Result<CreatedCall, ServiceError> {
        self.create_call(StagePayload::Process(request)).await
    }

    pub async fn create_final_call(
        &self,
        request: FinalCallRequest,
    ) -> Result<CreatedCall, ServiceError> {
        self.create_call(StagePayload::Final(request)).await
    }

    /// Creates a call of any stage. Lock conflicts re-run the whole attempt.
    #[instrument(skip(self, payload), fields(stage = %payload.stage()))]
    pub async fn create_call(&self, payload: StagePayload) -> Result<CreatedCall, ServiceError> {
        let stage = payload.stage();
        let result = with_retry(&self.retry, TransientStorePolicy, |attempt| {
            self.create_once(&payload, attempt)
        })
        .await;

        match result {
            Ok(committed) => {
                counter!("inspection.calls.created", 1, "stage" => stage.as_str());
                info!(
                    ic_number = %committed.created.ic_number,
                    stage = %stage,
                    call_id = %committed.created.call_id,
                    "Inspection call created"
                );
                self.publish(&committed).await;
                Ok(committed.created)
            }
            Err(err) => {
                counter!("inspection.calls.rejected", 1, "kind" => err.kind());
                if err.is_configuration_error() {
                    error!(stage = %stage, kind = err.kind(), error = %err, "Inspection call creation misconfigured");
                } else {
                    warn!(stage = %stage, kind = err.kind(), error = %err, "Inspection call rejected");
                }
                Err(err)
            }
        }
    }

    async fn create_once(
        &self,
        payload: &StagePayload,
        attempt: u32,
    ) -> Result<Committed, ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::db_error)?;

        match self.write_call(&txn, payload).await {
            Ok(committed) => {
                txn.commit().await.map_err(ServiceError::db_error)?;
                Ok(committed)
            }
            Err(err) => {
                if let Err(rollback_err) = txn.rollback().await {
                    error!(attempt, error = %rollback_err, "Failed to roll back inspection call transaction");
                }
                Err(err)
            }
        }
    }

    async fn write_call(
        &self,
        txn: &DatabaseTransaction,
        payload: &StagePayload,
    ) -> Result<Committed, ServiceError> {
        let call = self.validator.validate(txn, payload).await?;
        let ic_number = self.allocator.allocate(txn, call.stage()).await?;
        let created = self.store.create_call(txn, &ic_number, call.clone()).await?;
        Ok(Committed { created, call })
    }

    async fn publish(&self, committed: &Committed) {
        let Some(sender) = &self.event_sender else {
            return;
        };

        let mut events = vec![Event::InspectionCallCreated {
            call_id: committed.created.call_id,
            ic_number: committed.created.ic_number.clone(),
            stage: committed.call.stage(),
            po_no: committed.call.header().po_no.clone(),
            timestamp: Utc::now(),
        }];
        if let NewCall::Process(process) = &committed.call {
            events.push(Event::HeatQuantityDrawn {
                rm_ic_number: process.rm_ic_number.clone(),
                heat_number: process.heat_number.clone(),
                process_ic_number: committed.created.ic_number.clone(),
                offered_qty: process.offered_qty,
                remaining_qty: process.remaining_after,
            });
        }

        for event in events {
            if let Err(e) = sender.send(event).await {
                warn!(ic_number = %committed.created.ic_number, error = %e, "Failed to send audit event");
            }
        }
    }

    /// Newest-first page of calls. `page` is 1-based.
    #[instrument(skip(self))]
    pub async fn get_all_calls(
        &self,
        filters: CallFilters,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<InspectionCallSummary>, u64), ServiceError> {
        self.store
            .list_calls(&*self.db, &filters, page.max(1), limit)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_by_ic_number(&self, ic_number: &str) -> Result<InspectionCallView, ServiceError> {
        self.store.get_by_ic_number(&*self.db, ic_number).await
    }

    /// Approved calls raised against one purchase order.
    #[instrument(skip(self))]
    pub async fn get_approved_for_po(
        &self,
        po_no: &str,
        stage: Option<CallStage>,
    ) -> Result<Vec<InspectionCallSummary>, ServiceError> {
        let po_no = po_no.trim();
        if po_no.is_empty() {
            return Err(ServiceError::missing("po_no"));
        }
        self.store.list_approved(&*self.db, stage, Some(po_no)).await
    }

    /// Remaining acceptable quantity per heat of a raw material call.
    #[instrument(skip(self))]
    pub async fn get_heat_availability(
        &self,
        rm_ic_number: &str,
    ) -> Result<HeatAvailability, ServiceError> {
        let conn = &*self.db;
        let call = self
            .store
            .find_call(conn, rm_ic_number)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("inspection call {}", rm_ic_number.trim())))?;
        if call.stage != CallStage::RawMaterial {
            return Err(ServiceError::ValidationError(format!(
                "{} is a {} call, not a raw material call",
                call.ic_number, call.stage
            )));
        }

        let heats = match self.store.rm_detail(conn, call.id).await? {
            Some(detail) => self.store.heat_rows(conn, detail.id).await?,
            None => Vec::new(),
        };
        let consumption = self.store.consumption_by_heat(conn, &call.ic_number).await?;

        let heats = heats
            .into_iter()
            .map(|heat| {
                let accepted_qty = heat.accepted_or_zero();
                let used = consumption.get(&heat.heat_number).copied().unwrap_or_default();
                HeatAvailabilityItem {
                    remaining_qty: (accepted_qty - used.consumed_qty).max(Decimal::ZERO),
                    heat_number: heat.heat_number,
                    manufacturer: heat.manufacturer,
                    accepted_qty,
                    consumed_qty: used.consumed_qty,
                    process_call_count: used.process_call_count,
                }
            })
            .collect();

        Ok(HeatAvailability {
            rm_ic_number: call.ic_number,
            rm_call_id: call.id,
            status: call.status,
            heats,
        })
    }

    /// Stored counter state for one call type.
    pub async fn sequence_counter(
        &self,
        stage: CallStage,
    ) -> Result<sequence_counter::Model, ServiceError> {
        self.allocator.current(&*self.db, stage).await
    }
}
