//! Inspection Record Store
//!
//! Transactional writes and joined reads for inspection calls, their stage
//! detail row and child rows. Every method takes the connection to run on;
//! writes must be given the caller's open transaction.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};
use std::collections::BTreeMap;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::dto::{
    CallFilters, CreatedCall, FinalDetailView, InspectionCallSummary, InspectionCallView,
    ProcessDetailView, RawMaterialDetailView, StageDetailView,
};
use crate::entities::inspection::{
    final_inspection_detail, final_lot_detail, final_process_mapping, inspection_call,
    process_inspection_detail, process_rm_mapping, rm_heat_quantity, rm_inspection_detail,
    CallStage, CallStatus,
};
use crate::errors::ServiceError;
use crate::services::sequence::IcNumber;

/// Header fields of a call after normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewCallHeader {
    pub po_no: String,
    pub po_serial_no: Option<String>,
    pub vendor_name: Option<String>,
    pub company_name: Option<String>,
    pub unit_name: Option<String>,
    pub place_of_inspection: Option<String>,
    pub desired_inspection_date: Option<NaiveDate>,
    pub actual_inspection_date: Option<NaiveDate>,
    pub remarks: Option<String>,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewHeatQuantity {
    pub heat_number: String,
    pub manufacturer: Option<String>,
    pub offered_qty: Option<Decimal>,
    pub accepted_qty: Option<Decimal>,
    pub rejected_qty: Option<Decimal>,
    pub tc_number: Option<String>,
    pub tc_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRawMaterialCall {
    pub header: NewCallHeader,
    pub item_description: Option<String>,
    pub item_quantity: Option<Decimal>,
    pub total_offered_qty: Option<Decimal>,
    pub total_accepted_qty: Option<Decimal>,
    pub unit_of_measurement: String,
    pub heats: Vec<NewHeatQuantity>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProcessCall {
    pub header: NewCallHeader,
    pub rm_call_id: Uuid,
    pub rm_ic_number: String,
    pub heat_number: String,
    pub lot_number: String,
    pub manufacturer: Option<String>,
    pub offered_qty: Decimal,
    /// Heat accepted quantity the offer was validated against
    pub total_accepted_qty_rm: Decimal,
    /// Budget left on the heat once this call commits
    pub remaining_after: Decimal,
    pub unit_of_measurement: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewLot {
    pub lot_number: String,
    pub heat_number: Option<String>,
    pub offered_qty: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRef {
    pub call_id: Uuid,
    pub ic_number: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewFinalCall {
    pub header: NewCallHeader,
    pub product_description: Option<String>,
    pub total_offered_qty: Option<Decimal>,
    pub unit_of_measurement: String,
    pub lots: Vec<NewLot>,
    pub process_refs: Vec<ProcessRef>,
}

/// A validated call, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub enum NewCall {
    RawMaterial(NewRawMaterialCall),
    Process(NewProcessCall),
    Final(NewFinalCall),
}

impl NewCall {
    pub fn stage(&self) -> CallStage {
        match self {
            NewCall::RawMaterial(_) => CallStage::RawMaterial,
            NewCall::Process(_) => CallStage::Process,
            NewCall::Final(_) => CallStage::Final,
        }
    }

    pub fn header(&self) -> &NewCallHeader {
        match self {
            NewCall::RawMaterial(call) => &call.header,
            NewCall::Process(call) => &call.header,
            NewCall::Final(call) => &call.header,
        }
    }
}

/// Committed consumption of one heat by process calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeatConsumption {
    pub consumed_qty: Decimal,
    pub process_call_count: u64,
}

#[derive(Debug, Clone, Default)]
pub struct InspectionStore;

impl InspectionStore {
    pub fn new() -> Self {
        Self
    }

    /// Inserts the call row, its stage detail and every child collection.
    /// Any failed insert leaves the caller's transaction to roll back.
    #[instrument(skip(self, conn, ic_number, call), fields(ic_number = %ic_number))]
    pub async fn create_call<C>(
        &self,
        conn: &C,
        ic_number: &IcNumber,
        call: NewCall,
    ) -> Result<CreatedCall, ServiceError>
    where
        C: ConnectionTrait,
    {
        let stage = call.stage();
        if ic_number.stage != stage {
            return Err(ServiceError::InternalError(format!(
                "identifier {} issued for a {} call",
                ic_number, stage
            )));
        }

        let header = call.header().clone();
        let parent = inspection_call::ActiveModel {
            ic_number: Set(ic_number.to_string()),
            stage: Set(stage),
            po_no: Set(header.po_no),
            po_serial_no: Set(header.po_serial_no),
            vendor_name: Set(header.vendor_name),
            company_name: Set(header.company_name),
            unit_name: Set(header.unit_name),
            place_of_inspection: Set(header.place_of_inspection),
            desired_inspection_date: Set(header.desired_inspection_date),
            actual_inspection_date: Set(header.actual_inspection_date),
            remarks: Set(header.remarks),
            status: Set(CallStatus::Pending),
            created_by: Set(header.created_by),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(ServiceError::db_error)?;

        match call {
            NewCall::RawMaterial(rm) => self.insert_raw_material(conn, parent.id, rm).await?,
            NewCall::Process(process) => self.insert_process(conn, parent.id, process).await?,
            NewCall::Final(fin) => self.insert_final(conn, parent.id, fin).await?,
        }

        debug!(call_id = %parent.id, "Inspection call rows written");
        Ok(CreatedCall {
            ic_number: parent.ic_number,
            call_id: parent.id,
        })
    }

    async fn insert_raw_material<C>(
        &self,
        conn: &C,
        call_id: Uuid,
        rm: NewRawMaterialCall,
    ) -> Result<(), ServiceError>
    where
        C: ConnectionTrait,
    {
        let detail = rm_inspection_detail::ActiveModel {
            call_id: Set(call_id),
            item_description: Set(rm.item_description),
            item_quantity: Set(rm.item_quantity),
            total_offered_qty: Set(rm.total_offered_qty),
            total_accepted_qty: Set(rm.total_accepted_qty),
            unit_of_measurement: Set(rm.unit_of_measurement),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(ServiceError::db_error)?;

        if rm.heats.is_empty() {
            return Ok(());
        }

        let now = Utc::now();
        let rows = rm.heats.into_iter().map(|heat| rm_heat_quantity::ActiveModel {
            id: Set(Uuid::new_v4()),
            rm_detail_id: Set(detail.id),
            heat_number: Set(heat.heat_number),
            manufacturer: Set(heat.manufacturer),
            offered_qty: Set(heat.offered_qty),
            accepted_qty: Set(heat.accepted_qty),
            rejected_qty: Set(heat.rejected_qty),
            tc_number: Set(heat.tc_number),
            tc_date: Set(heat.tc_date),
            created_at: Set(now),
        });
        rm_heat_quantity::Entity::insert_many(rows)
            .exec_without_returning(conn)
            .await
            .map_err(ServiceError::db_error)?;
        Ok(())
    }

    async fn insert_process<C>(
        &self,
        conn: &C,
        call_id: Uuid,
        process: NewProcessCall,
    ) -> Result<(), ServiceError>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now();
        let detail = process_inspection_detail::ActiveModel {
            id: Set(Uuid::new_v4()),
            call_id: Set(call_id),
            rm_ic_number: Set(process.rm_ic_number.clone()),
            heat_number: Set(process.heat_number.clone()),
            lot_number: Set(process.lot_number),
            manufacturer: Set(process.manufacturer),
            offered_qty: Set(process.offered_qty),
            total_accepted_qty_rm: Set(process.total_accepted_qty_rm),
            unit_of_measurement: Set(process.unit_of_measurement),
            created_at: Set(now),
        }
        .insert(conn)
        .await
        .map_err(ServiceError::db_error)?;

        process_rm_mapping::ActiveModel {
            id: Set(Uuid::new_v4()),
            process_detail_id: Set(detail.id),
            rm_call_id: Set(process.rm_call_id),
            rm_ic_number: Set(process.rm_ic_number),
            heat_number: Set(process.heat_number),
            created_at: Set(now),
        }
        .insert(conn)
        .await
        .map_err(ServiceError::db_error)?;
        Ok(())
    }

    async fn insert_final<C>(
        &self,
        conn: &C,
        call_id: Uuid,
        fin: NewFinalCall,
    ) -> Result<(), ServiceError>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now();
        let total_lots = i32::try_from(fin.lots.len())
            .map_err(|_| ServiceError::ValidationError("too many lots".to_string()))?;
        let detail = final_inspection_detail::ActiveModel {
            id: Set(Uuid::new_v4()),
            call_id: Set(call_id),
            product_description: Set(fin.product_description),
            total_lots: Set(total_lots),
            total_offered_qty: Set(fin.total_offered_qty),
            unit_of_measurement: Set(fin.unit_of_measurement),
            created_at: Set(now),
        }
        .insert(conn)
        .await
        .map_err(ServiceError::db_error)?;

        if !fin.lots.is_empty() {
            let lots = fin.lots.into_iter().map(|lot| final_lot_detail::ActiveModel {
                id: Set(Uuid::new_v4()),
                final_detail_id: Set(detail.id),
                lot_number: Set(lot.lot_number),
                heat_number: Set(lot.heat_number),
                offered_qty: Set(lot.offered_qty),
                created_at: Set(now),
            });
            final_lot_detail::Entity::insert_many(lots)
                .exec_without_returning(conn)
                .await
                .map_err(ServiceError::db_error)?;
        }

        if !fin.process_refs.is_empty() {
            let mappings = fin
                .process_refs
                .into_iter()
                .map(|process| final_process_mapping::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    final_detail_id: Set(detail.id),
                    process_call_id: Set(process.call_id),
                    process_ic_number: Set(process.ic_number),
                    created_at: Set(now),
                });
            final_process_mapping::Entity::insert_many(mappings)
                .exec_without_returning(conn)
                .await
                .map_err(ServiceError::db_error)?;
        }
        Ok(())
    }

    pub async fn find_call<C>(
        &self,
        conn: &C,
        ic_number: &str,
    ) -> Result<Option<inspection_call::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        inspection_call::Entity::find()
            .filter(inspection_call::Column::IcNumber.eq(ic_number.trim()))
            .one(conn)
            .await
            .map_err(ServiceError::db_error)
    }

    /// Loads a call with its stage detail and children.
    #[instrument(skip(self, conn))]
    pub async fn get_by_ic_number<C>(
        &self,
        conn: &C,
        ic_number: &str,
    ) -> Result<InspectionCallView, ServiceError>
    where
        C: ConnectionTrait,
    {
        let call = self
            .find_call(conn, ic_number)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("inspection call {}", ic_number.trim())))?;
        let detail = self.load_detail(conn, &call).await?;
        Ok(InspectionCallView {
            call: call.into(),
            detail,
        })
    }

    async fn load_detail<C>(
        &self,
        conn: &C,
        call: &inspection_call::Model,
    ) -> Result<Option<StageDetailView>, ServiceError>
    where
        C: ConnectionTrait,
    {
        let view = match call.stage {
            CallStage::RawMaterial => {
                let Some(detail) = rm_inspection_detail::Entity::find()
                    .filter(rm_inspection_detail::Column::CallId.eq(call.id))
                    .one(conn)
                    .await
                    .map_err(ServiceError::db_error)?
                else {
                    return Ok(None);
                };
                let heats = self.heat_rows(conn, detail.id).await?;
                StageDetailView::RawMaterial(RawMaterialDetailView::new(detail, heats))
            }
            CallStage::Process => {
                let Some(detail) = process_inspection_detail::Entity::find()
                    .filter(process_inspection_detail::Column::CallId.eq(call.id))
                    .one(conn)
                    .await
                    .map_err(ServiceError::db_error)?
                else {
                    return Ok(None);
                };
                let mapping = process_rm_mapping::Entity::find()
                    .filter(process_rm_mapping::Column::ProcessDetailId.eq(detail.id))
                    .one(conn)
                    .await
                    .map_err(ServiceError::db_error)?;
                StageDetailView::Process(ProcessDetailView::new(
                    detail,
                    mapping.map(|m| m.rm_call_id),
                ))
            }
            CallStage::Final => {
                let Some(detail) = final_inspection_detail::Entity::find()
                    .filter(final_inspection_detail::Column::CallId.eq(call.id))
                    .one(conn)
                    .await
                    .map_err(ServiceError::db_error)?
                else {
                    return Ok(None);
                };
                let lots = final_lot_detail::Entity::find()
                    .filter(final_lot_detail::Column::FinalDetailId.eq(detail.id))
                    .order_by_asc(final_lot_detail::Column::LotNumber)
                    .all(conn)
                    .await
                    .map_err(ServiceError::db_error)?;
                let process_ic_numbers = final_process_mapping::Entity::find()
                    .filter(final_process_mapping::Column::FinalDetailId.eq(detail.id))
                    .order_by_asc(final_process_mapping::Column::ProcessIcNumber)
                    .all(conn)
                    .await
                    .map_err(ServiceError::db_error)?
                    .into_iter()
                    .map(|m| m.process_ic_number)
                    .collect();
                StageDetailView::Final(FinalDetailView::new(detail, lots, process_ic_numbers))
            }
        };
        Ok(Some(view))
    }

    fn filtered(filters: &CallFilters) -> Select<inspection_call::Entity> {
        let mut query = inspection_call::Entity::find();
        if let Some(stage) = filters.stage {
            query = query.filter(inspection_call::Column::Stage.eq(stage));
        }
        if let Some(status) = filters.status {
            query = query.filter(inspection_call::Column::Status.eq(status));
        }
        if let Some(po_no) = filters.po_no.as_deref() {
            query = query.filter(inspection_call::Column::PoNo.eq(po_no));
        }
        query
            .order_by_desc(inspection_call::Column::CreatedAt)
            .order_by_desc(inspection_call::Column::IcNumber)
    }

    /// Newest-first page of calls matching `filters`, with the total match count.
    pub async fn list_calls<C>(
        &self,
        conn: &C,
        filters: &CallFilters,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<InspectionCallSummary>, u64), ServiceError>
    where
        C: ConnectionTrait,
    {
        let paginator = Self::filtered(filters).paginate(conn, limit.max(1));
        let total = paginator.num_items().await.map_err(ServiceError::db_error)?;
        let calls = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(ServiceError::db_error)?;
        Ok((calls.into_iter().map(Into::into).collect(), total))
    }

    /// Approved calls, optionally narrowed by stage and purchase order.
    pub async fn list_approved<C>(
        &self,
        conn: &C,
        stage: Option<CallStage>,
        po_no: Option<&str>,
    ) -> Result<Vec<InspectionCallSummary>, ServiceError>
    where
        C: ConnectionTrait,
    {
        let filters = CallFilters {
            stage,
            status: Some(CallStatus::Approved),
            po_no: po_no.map(str::to_string),
        };
        let calls = Self::filtered(&filters)
            .all(conn)
            .await
            .map_err(ServiceError::db_error)?;
        Ok(calls.into_iter().map(Into::into).collect())
    }

    pub async fn rm_detail<C>(
        &self,
        conn: &C,
        call_id: Uuid,
    ) -> Result<Option<rm_inspection_detail::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        rm_inspection_detail::Entity::find()
            .filter(rm_inspection_detail::Column::CallId.eq(call_id))
            .one(conn)
            .await
            .map_err(ServiceError::db_error)
    }

    pub async fn heat_rows<C>(
        &self,
        conn: &C,
        rm_detail_id: Uuid,
    ) -> Result<Vec<rm_heat_quantity::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        rm_heat_quantity::Entity::find()
            .filter(rm_heat_quantity::Column::RmDetailId.eq(rm_detail_id))
            .order_by_asc(rm_heat_quantity::Column::HeatNumber)
            .all(conn)
            .await
            .map_err(ServiceError::db_error)
    }

    /// Reads one heat row with an exclusive row lock (`FOR UPDATE` where the
    /// backend supports it). Concurrent process calls on the same heat queue here.
    pub async fn lock_heat<C>(
        &self,
        conn: &C,
        rm_detail_id: Uuid,
        heat_number: &str,
    ) -> Result<Option<rm_heat_quantity::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        rm_heat_quantity::Entity::find()
            .filter(rm_heat_quantity::Column::RmDetailId.eq(rm_detail_id))
            .filter(rm_heat_quantity::Column::HeatNumber.eq(heat_number))
            .lock_exclusive()
            .one(conn)
            .await
            .map_err(ServiceError::db_error)
    }

    /// Sum of offered quantity over committed process calls drawing on one heat.
    pub async fn heat_consumption<C>(
        &self,
        conn: &C,
        rm_ic_number: &str,
        heat_number: &str,
    ) -> Result<HeatConsumption, ServiceError>
    where
        C: ConnectionTrait,
    {
        let offers = process_inspection_detail::Entity::find()
            .filter(process_inspection_detail::Column::RmIcNumber.eq(rm_ic_number))
            .filter(process_inspection_detail::Column::HeatNumber.eq(heat_number))
            .all(conn)
            .await
            .map_err(ServiceError::db_error)?;

        Ok(offers
            .iter()
            .fold(HeatConsumption::default(), |acc, offer| HeatConsumption {
                consumed_qty: acc.consumed_qty + offer.offered_qty,
                process_call_count: acc.process_call_count + 1,
            }))
    }

    /// Consumption of every heat of a raw material call, keyed by heat number.
    pub async fn consumption_by_heat<C>(
        &self,
        conn: &C,
        rm_ic_number: &str,
    ) -> Result<BTreeMap<String, HeatConsumption>, ServiceError>
    where
        C: ConnectionTrait,
    {
        let offers = process_inspection_detail::Entity::find()
            .filter(process_inspection_detail::Column::RmIcNumber.eq(rm_ic_number))
            .all(conn)
            .await
            .map_err(ServiceError::db_error)?;

        let mut by_heat: BTreeMap<String, HeatConsumption> = BTreeMap::new();
        for offer in offers {
            let entry = by_heat.entry(offer.heat_number).or_default();
            entry.consumed_qty += offer.offered_qty;
            entry.process_call_count += 1;
        }
        Ok(by_heat)
    }
}
