//! Stage Validator
//!
//! Turns a normalized creation payload into a [`NewCall`] or rejects it.
//! Checks that depend on stored state run on the caller's transaction, and the
//! process quantity check reads the heat under an exclusive lock so two
//! concurrent offers on one heat cannot both pass against the same budget.

use rust_decimal::Decimal;
use sea_orm::ConnectionTrait;
use std::collections::HashSet;
use tracing::{debug, instrument};

use crate::dto::normalize::DEFAULT_UNIT_OF_MEASUREMENT;
use crate::dto::{
    CallHeader, FinalCallRequest, ProcessCallRequest, RawMaterialCallRequest, StagePayload,
};
use crate::entities::inspection::CallStage;
use crate::errors::ServiceError;
use crate::services::inspection_store::{
    InspectionStore, NewCall, NewCallHeader, NewFinalCall, NewHeatQuantity, NewLot,
    NewProcessCall, NewRawMaterialCall, ProcessRef,
};

#[derive(Debug, Clone, Default)]
pub struct StageValidator {
    store: InspectionStore,
}

fn required(value: &Option<String>, field: &str) -> Result<String, ServiceError> {
    value.clone().ok_or_else(|| ServiceError::missing(field))
}

fn non_negative(value: Option<Decimal>, field: &str) -> Result<Option<Decimal>, ServiceError> {
    match value {
        Some(v) if v.is_sign_negative() && !v.is_zero() => Err(ServiceError::ValidationError(
            format!("{} must not be negative", field),
        )),
        other => Ok(other),
    }
}

fn unit_or_default(unit: &Option<String>) -> String {
    unit.clone()
        .unwrap_or_else(|| DEFAULT_UNIT_OF_MEASUREMENT.to_string())
}

fn sum_or_zero<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Option<Decimal>>,
{
    values.into_iter().flatten().sum()
}

fn ensure_unique<'a, I>(values: I, what: &str) -> Result<(), ServiceError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value) {
            return Err(ServiceError::ValidationError(format!(
                "duplicate {} {}",
                what, value
            )));
        }
    }
    Ok(())
}

fn validate_header(header: &CallHeader) -> Result<NewCallHeader, ServiceError> {
    Ok(NewCallHeader {
        po_no: required(&header.po_no, "po_no")?,
        po_serial_no: header.po_serial_no.clone(),
        vendor_name: header.vendor_name.clone(),
        company_name: header.company_name.clone(),
        unit_name: header.unit_name.clone(),
        place_of_inspection: header.place_of_inspection.clone(),
        desired_inspection_date: header.desired_inspection_date,
        actual_inspection_date: header.actual_inspection_date,
        remarks: header.remarks.clone(),
        created_by: header.created_by.clone(),
    })
}

impl StageValidator {
    pub fn new(store: InspectionStore) -> Self {
        Self { store }
    }

    /// Validates `payload` against the latest committed state visible to `conn`.
    #[instrument(skip(self, conn, payload), fields(stage = %payload.stage()))]
    pub async fn validate<C>(&self, conn: &C, payload: &StagePayload) -> Result<NewCall, ServiceError>
    where
        C: ConnectionTrait,
    {
        match payload {
            StagePayload::RawMaterial(req) => {
                Self::validate_raw_material(req).map(NewCall::RawMaterial)
            }
            StagePayload::Process(req) => self
                .validate_process(conn, req)
                .await
                .map(NewCall::Process),
            StagePayload::Final(req) => self.validate_final(conn, req).await.map(NewCall::Final),
        }
    }

    /// Raw material calls have no upstream; every heat row needs a heat number.
    pub fn validate_raw_material(
        req: &RawMaterialCallRequest,
    ) -> Result<NewRawMaterialCall, ServiceError> {
        let header = validate_header(&req.header)?;

        let mut heats = Vec::with_capacity(req.heats.len());
        for entry in &req.heats {
            heats.push(NewHeatQuantity {
                heat_number: required(&entry.heat_number, "heat_number")?,
                manufacturer: entry.manufacturer.clone(),
                offered_qty: non_negative(entry.offered_qty, "offered_qty")?,
                accepted_qty: non_negative(entry.accepted_qty, "accepted_qty")?,
                rejected_qty: non_negative(entry.rejected_qty, "rejected_qty")?,
                tc_number: entry.tc_number.clone(),
                tc_date: entry.tc_date,
            });
        }
        ensure_unique(heats.iter().map(|h| h.heat_number.as_str()), "heat number")?;

        let (total_offered_qty, total_accepted_qty) = if heats.is_empty() {
            (
                non_negative(req.total_offered_qty, "total_offered_qty")?,
                non_negative(req.total_accepted_qty, "total_accepted_qty")?,
            )
        } else {
            (
                Some(sum_or_zero(heats.iter().map(|h| h.offered_qty))),
                Some(sum_or_zero(heats.iter().map(|h| h.accepted_qty))),
            )
        };

        Ok(NewRawMaterialCall {
            header,
            item_description: req.item_description.clone(),
            item_quantity: non_negative(req.item_quantity, "item_quantity")?,
            total_offered_qty,
            total_accepted_qty,
            unit_of_measurement: unit_or_default(&req.unit_of_measurement),
            heats,
        })
    }

    /// Checks the upstream raw material call and draws the offer from the
    /// heat's remaining accepted quantity. Equal to the remainder is allowed.
    pub async fn validate_process<C>(
        &self,
        conn: &C,
        req: &ProcessCallRequest,
    ) -> Result<NewProcessCall, ServiceError>
    where
        C: ConnectionTrait,
    {
        let rm_ic_number = required(&req.rm_ic_number, "rm_ic_number")?;
        let heat_number = required(&req.heat_number, "heat_number")?;
        let lot_number = required(&req.lot_number, "lot_number")?;
        let offered_qty = req
            .offered_qty
            .filter(|qty| *qty > Decimal::ZERO)
            .ok_or_else(|| ServiceError::missing("offered_qty"))?;
        let header = validate_header(&req.header)?;

        let upstream = self
            .store
            .find_call(conn, &rm_ic_number)
            .await?
            .ok_or_else(|| {
                ServiceError::UpstreamNotApproved(format!(
                    "raw material call {} does not exist",
                    rm_ic_number
                ))
            })?;
        if upstream.stage != CallStage::RawMaterial {
            return Err(ServiceError::UpstreamNotApproved(format!(
                "{} is a {} call, not a raw material call",
                rm_ic_number, upstream.stage
            )));
        }
        if !upstream.is_approved() {
            return Err(ServiceError::UpstreamNotApproved(format!(
                "raw material call {} is not approved",
                rm_ic_number
            )));
        }

        let heat_not_found = || ServiceError::HeatNotFound {
            rm_ic_number: rm_ic_number.clone(),
            heat_number: heat_number.clone(),
        };
        let rm_detail = self
            .store
            .rm_detail(conn, upstream.id)
            .await?
            .ok_or_else(heat_not_found)?;
        let heat = self
            .store
            .lock_heat(conn, rm_detail.id, &heat_number)
            .await?
            .ok_or_else(heat_not_found)?;

        // Re-read after the lock so the sum reflects every offer committed before us.
        let consumption = self
            .store
            .heat_consumption(conn, &rm_ic_number, &heat_number)
            .await?;
        let accepted = heat.accepted_or_zero();
        let available = (accepted - consumption.consumed_qty).max(Decimal::ZERO);

        debug!(
            %rm_ic_number,
            %heat_number,
            %accepted,
            consumed = %consumption.consumed_qty,
            %offered_qty,
            "Checking heat quantity budget"
        );

        if offered_qty > available {
            return Err(ServiceError::QuantityExceeded {
                offered: offered_qty,
                available,
            });
        }

        Ok(NewProcessCall {
            header,
            rm_call_id: upstream.id,
            rm_ic_number: upstream.ic_number,
            heat_number,
            lot_number,
            manufacturer: req.manufacturer.clone().or(heat.manufacturer),
            offered_qty,
            total_accepted_qty_rm: accepted,
            remaining_after: available - offered_qty,
            unit_of_measurement: unit_or_default(&req.unit_of_measurement),
        })
    }

    /// Every lot needs a lot number and every referenced process call must
    /// exist. One bad reference rejects the whole call.
    pub async fn validate_final<C>(
        &self,
        conn: &C,
        req: &FinalCallRequest,
    ) -> Result<NewFinalCall, ServiceError>
    where
        C: ConnectionTrait,
    {
        if req.lots.is_empty() {
            return Err(ServiceError::missing("lots"));
        }
        let header = validate_header(&req.header)?;

        let mut lots = Vec::with_capacity(req.lots.len());
        for entry in &req.lots {
            lots.push(NewLot {
                lot_number: required(&entry.lot_number, "lot_number")?,
                heat_number: entry.heat_number.clone(),
                offered_qty: non_negative(entry.offered_qty, "offered_qty")?,
            });
        }
        ensure_unique(lots.iter().map(|l| l.lot_number.as_str()), "lot number")?;
        ensure_unique(
            req.process_ic_numbers.iter().map(String::as_str),
            "process inspection call",
        )?;

        let mut process_refs = Vec::with_capacity(req.process_ic_numbers.len());
        for ic_number in &req.process_ic_numbers {
            let call = self.store.find_call(conn, ic_number).await?.ok_or_else(|| {
                ServiceError::ValidationError(format!(
                    "process inspection call {} does not exist",
                    ic_number
                ))
            })?;
            if call.stage != CallStage::Process {
                return Err(ServiceError::ValidationError(format!(
                    "{} is a {} call, not a process call",
                    ic_number, call.stage
                )));
            }
            process_refs.push(ProcessRef {
                call_id: call.id,
                ic_number: call.ic_number,
            });
        }

        Ok(NewFinalCall {
            header,
            product_description: req.product_description.clone(),
            total_offered_qty: Some(sum_or_zero(lots.iter().map(|l| l.offered_qty))),
            unit_of_measurement: unit_or_default(&req.unit_of_measurement),
            lots,
            process_refs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::HeatEntry;
    use assert_matches::assert_matches;
    use rust_decimal_macros::dec;

    fn header() -> CallHeader {
        CallHeader {
            po_no: Some("PO-17".into()),
            ..Default::default()
        }
    }

    fn heat(number: Option<&str>, offered: Option<Decimal>, accepted: Option<Decimal>) -> HeatEntry {
        HeatEntry {
            heat_number: number.map(str::to_string),
            offered_qty: offered,
            accepted_qty: accepted,
            ..Default::default()
        }
    }

    #[test]
    fn raw_material_totals_come_from_heats() {
        let req = RawMaterialCallRequest {
            header: header(),
            heats: vec![
                heat(Some("H1"), Some(dec!(120)), Some(dec!(100))),
                heat(Some("H2"), None, Some(dec!(35.5))),
            ],
            ..Default::default()
        };

        let call = StageValidator::validate_raw_material(&req).unwrap();
        assert_eq!(call.total_offered_qty, Some(dec!(120)));
        assert_eq!(call.total_accepted_qty, Some(dec!(135.5)));
        assert_eq!(call.unit_of_measurement, "MT");
        assert_eq!(call.heats.len(), 2);
    }

    #[test]
    fn raw_material_without_heats_keeps_supplied_totals() {
        let req = RawMaterialCallRequest {
            header: header(),
            total_offered_qty: Some(dec!(10)),
            unit_of_measurement: Some("KG".into()),
            ..Default::default()
        };

        let call = StageValidator::validate_raw_material(&req).unwrap();
        assert_eq!(call.total_offered_qty, Some(dec!(10)));
        assert_eq!(call.total_accepted_qty, None);
        assert_eq!(call.unit_of_measurement, "KG");
    }

    #[test]
    fn raw_material_heat_without_number_is_missing_field() {
        let req = RawMaterialCallRequest {
            header: header(),
            heats: vec![heat(Some("H1"), None, Some(dec!(1))), heat(None, None, Some(dec!(5)))],
            ..Default::default()
        };

        assert_matches!(
            StageValidator::validate_raw_material(&req),
            Err(ServiceError::MissingField(field)) if field == "heat_number"
        );
    }

    #[test]
    fn raw_material_rejects_duplicate_heats() {
        let req = RawMaterialCallRequest {
            header: header(),
            heats: vec![heat(Some("H1"), None, None), heat(Some("H1"), None, None)],
            ..Default::default()
        };

        assert_matches!(
            StageValidator::validate_raw_material(&req),
            Err(ServiceError::ValidationError(_))
        );
    }

    #[test]
    fn raw_material_rejects_negative_quantities() {
        let req = RawMaterialCallRequest {
            header: header(),
            heats: vec![heat(Some("H1"), None, Some(dec!(-1)))],
            ..Default::default()
        };

        assert_matches!(
            StageValidator::validate_raw_material(&req),
            Err(ServiceError::ValidationError(_))
        );
    }

    #[test]
    fn purchase_order_is_required() {
        let req = RawMaterialCallRequest::default();
        assert_matches!(
            StageValidator::validate_raw_material(&req),
            Err(ServiceError::MissingField(field)) if field == "po_no"
        );
    }
}
