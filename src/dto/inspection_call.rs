use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::normalize::{
    blank_string_as_none, identifier_list, lenient_date, lenient_decimal, null_as_empty,
};
use crate::entities::inspection::{
    final_inspection_detail, final_lot_detail, inspection_call, process_inspection_detail,
    rm_heat_quantity, rm_inspection_detail, CallStage, CallStatus,
};

/// Fields shared by every stage of inspection call.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct CallHeader {
    #[serde(default, deserialize_with = "blank_string_as_none")]
    pub po_no: Option<String>,
    #[serde(default, deserialize_with = "blank_string_as_none")]
    pub po_serial_no: Option<String>,
    #[serde(default, deserialize_with = "blank_string_as_none")]
    pub vendor_name: Option<String>,
    #[serde(default, deserialize_with = "blank_string_as_none")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "blank_string_as_none")]
    pub unit_name: Option<String>,
    #[serde(default, deserialize_with = "blank_string_as_none")]
    pub place_of_inspection: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    #[schema(value_type = Option<String>, format = Date)]
    pub desired_inspection_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    #[schema(value_type = Option<String>, format = Date)]
    pub actual_inspection_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_string_as_none")]
    pub remarks: Option<String>,
    #[serde(default, deserialize_with = "blank_string_as_none")]
    pub created_by: Option<String>,
}

/// One heat offered on a raw material call.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct HeatEntry {
    #[serde(default, deserialize_with = "blank_string_as_none")]
    pub heat_number: Option<String>,
    #[serde(default, deserialize_with = "blank_string_as_none")]
    pub manufacturer: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schema(value_type = Option<String>)]
    pub offered_qty: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schema(value_type = Option<String>)]
    pub accepted_qty: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schema(value_type = Option<String>)]
    pub rejected_qty: Option<Decimal>,
    #[serde(default, deserialize_with = "blank_string_as_none")]
    pub tc_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    #[schema(value_type = Option<String>, format = Date)]
    pub tc_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct RawMaterialCallRequest {
    #[serde(flatten)]
    pub header: CallHeader,
    #[serde(default, deserialize_with = "blank_string_as_none")]
    pub item_description: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schema(value_type = Option<String>)]
    pub item_quantity: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schema(value_type = Option<String>)]
    pub total_offered_qty: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schema(value_type = Option<String>)]
    pub total_accepted_qty: Option<Decimal>,
    #[serde(default, deserialize_with = "blank_string_as_none")]
    pub unit_of_measurement: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub heats: Vec<HeatEntry>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct ProcessCallRequest {
    #[serde(flatten)]
    pub header: CallHeader,
    #[serde(default, deserialize_with = "blank_string_as_none")]
    pub rm_ic_number: Option<String>,
    #[serde(default, deserialize_with = "blank_string_as_none")]
    pub heat_number: Option<String>,
    #[serde(default, deserialize_with = "blank_string_as_none")]
    pub lot_number: Option<String>,
    #[serde(default, deserialize_with = "blank_string_as_none")]
    pub manufacturer: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schema(value_type = Option<String>)]
    pub offered_qty: Option<Decimal>,
    #[serde(default, deserialize_with = "blank_string_as_none")]
    pub unit_of_measurement: Option<String>,
}

/// One lot offered on a final call.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct LotEntry {
    #[serde(default, deserialize_with = "blank_string_as_none")]
    pub lot_number: Option<String>,
    #[serde(default, deserialize_with = "blank_string_as_none")]
    pub heat_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schema(value_type = Option<String>)]
    pub offered_qty: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct FinalCallRequest {
    #[serde(flatten)]
    pub header: CallHeader,
    #[serde(default, deserialize_with = "blank_string_as_none")]
    pub product_description: Option<String>,
    #[serde(default, deserialize_with = "blank_string_as_none")]
    pub unit_of_measurement: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub lots: Vec<LotEntry>,
    #[serde(default, deserialize_with = "identifier_list")]
    pub process_ic_numbers: Vec<String>,
}

/// Creation payload for any stage; the variant decides which fields apply.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(tag = "stage", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StagePayload {
    RawMaterial(RawMaterialCallRequest),
    Process(ProcessCallRequest),
    Final(FinalCallRequest),
}

impl StagePayload {
    pub fn stage(&self) -> CallStage {
        match self {
            StagePayload::RawMaterial(_) => CallStage::RawMaterial,
            StagePayload::Process(_) => CallStage::Process,
            StagePayload::Final(_) => CallStage::Final,
        }
    }

    pub fn header(&self) -> &CallHeader {
        match self {
            StagePayload::RawMaterial(req) => &req.header,
            StagePayload::Process(req) => &req.header,
            StagePayload::Final(req) => &req.header,
        }
    }
}

/// Returned by every successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreatedCall {
    pub ic_number: String,
    pub call_id: Uuid,
}

/// Parsed list filters.
#[derive(Debug, Clone, Default)]
pub struct CallFilters {
    pub stage: Option<CallStage>,
    pub status: Option<CallStatus>,
    pub po_no: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListCallsQuery {
    /// RAW_MATERIAL, PROCESS or FINAL
    pub stage: Option<String>,
    /// PENDING, APPROVED or REJECTED
    pub status: Option<String>,
    pub po_no: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ApprovedCallsQuery {
    pub po_no: Option<String>,
    pub stage: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InspectionCallSummary {
    pub id: Uuid,
    pub ic_number: String,
    pub stage: CallStage,
    pub po_no: String,
    pub po_serial_no: Option<String>,
    pub vendor_name: Option<String>,
    pub company_name: Option<String>,
    pub unit_name: Option<String>,
    pub place_of_inspection: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    pub desired_inspection_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date)]
    pub actual_inspection_date: Option<NaiveDate>,
    pub remarks: Option<String>,
    pub status: CallStatus,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<inspection_call::Model> for InspectionCallSummary {
    fn from(model: inspection_call::Model) -> Self {
        Self {
            id: model.id,
            ic_number: model.ic_number,
            stage: model.stage,
            po_no: model.po_no,
            po_serial_no: model.po_serial_no,
            vendor_name: model.vendor_name,
            company_name: model.company_name,
            unit_name: model.unit_name,
            place_of_inspection: model.place_of_inspection,
            desired_inspection_date: model.desired_inspection_date,
            actual_inspection_date: model.actual_inspection_date,
            remarks: model.remarks,
            status: model.status,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HeatQuantityView {
    pub heat_number: String,
    pub manufacturer: Option<String>,
    #[schema(value_type = Option<String>)]
    pub offered_qty: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub accepted_qty: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub rejected_qty: Option<Decimal>,
    pub tc_number: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    pub tc_date: Option<NaiveDate>,
}

impl From<rm_heat_quantity::Model> for HeatQuantityView {
    fn from(model: rm_heat_quantity::Model) -> Self {
        Self {
            heat_number: model.heat_number,
            manufacturer: model.manufacturer,
            offered_qty: model.offered_qty,
            accepted_qty: model.accepted_qty,
            rejected_qty: model.rejected_qty,
            tc_number: model.tc_number,
            tc_date: model.tc_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RawMaterialDetailView {
    pub item_description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub item_quantity: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub total_offered_qty: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub total_accepted_qty: Option<Decimal>,
    pub unit_of_measurement: String,
    pub heats: Vec<HeatQuantityView>,
}

impl RawMaterialDetailView {
    pub fn new(detail: rm_inspection_detail::Model, heats: Vec<rm_heat_quantity::Model>) -> Self {
        Self {
            item_description: detail.item_description,
            item_quantity: detail.item_quantity,
            total_offered_qty: detail.total_offered_qty,
            total_accepted_qty: detail.total_accepted_qty,
            unit_of_measurement: detail.unit_of_measurement,
            heats: heats.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProcessDetailView {
    pub rm_ic_number: String,
    pub rm_call_id: Option<Uuid>,
    pub heat_number: String,
    pub lot_number: String,
    pub manufacturer: Option<String>,
    #[schema(value_type = String)]
    pub offered_qty: Decimal,
    #[schema(value_type = String)]
    pub total_accepted_qty_rm: Decimal,
    pub unit_of_measurement: String,
}

impl ProcessDetailView {
    pub fn new(detail: process_inspection_detail::Model, rm_call_id: Option<Uuid>) -> Self {
        Self {
            rm_ic_number: detail.rm_ic_number,
            rm_call_id,
            heat_number: detail.heat_number,
            lot_number: detail.lot_number,
            manufacturer: detail.manufacturer,
            offered_qty: detail.offered_qty,
            total_accepted_qty_rm: detail.total_accepted_qty_rm,
            unit_of_measurement: detail.unit_of_measurement,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LotView {
    pub lot_number: String,
    pub heat_number: Option<String>,
    #[schema(value_type = Option<String>)]
    pub offered_qty: Option<Decimal>,
}

impl From<final_lot_detail::Model> for LotView {
    fn from(model: final_lot_detail::Model) -> Self {
        Self {
            lot_number: model.lot_number,
            heat_number: model.heat_number,
            offered_qty: model.offered_qty,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FinalDetailView {
    pub product_description: Option<String>,
    pub total_lots: i32,
    #[schema(value_type = Option<String>)]
    pub total_offered_qty: Option<Decimal>,
    pub unit_of_measurement: String,
    pub lots: Vec<LotView>,
    pub process_ic_numbers: Vec<String>,
}

impl FinalDetailView {
    pub fn new(
        detail: final_inspection_detail::Model,
        lots: Vec<final_lot_detail::Model>,
        process_ic_numbers: Vec<String>,
    ) -> Self {
        Self {
            product_description: detail.product_description,
            total_lots: detail.total_lots,
            total_offered_qty: detail.total_offered_qty,
            unit_of_measurement: detail.unit_of_measurement,
            lots: lots.into_iter().map(Into::into).collect(),
            process_ic_numbers,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StageDetailView {
    RawMaterial(RawMaterialDetailView),
    Process(ProcessDetailView),
    Final(FinalDetailView),
}

/// A call with its stage detail and child rows.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InspectionCallView {
    #[serde(flatten)]
    pub call: InspectionCallSummary,
    pub detail: Option<StageDetailView>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HeatAvailabilityItem {
    pub heat_number: String,
    pub manufacturer: Option<String>,
    #[schema(value_type = String)]
    pub accepted_qty: Decimal,
    /// Sum of offered quantity across committed process calls on this heat
    #[schema(value_type = String)]
    pub consumed_qty: Decimal,
    #[schema(value_type = String)]
    pub remaining_qty: Decimal,
    pub process_call_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HeatAvailability {
    pub rm_ic_number: String,
    pub rm_call_id: Uuid,
    pub status: CallStatus,
    pub heats: Vec<HeatAvailabilityItem>,
}

impl HeatAvailability {
    pub fn heat(&self, heat_number: &str) -> Option<&HeatAvailabilityItem> {
        self.heats.iter().find(|h| h.heat_number == heat_number)
    }
}
