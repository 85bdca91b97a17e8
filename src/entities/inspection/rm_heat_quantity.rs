use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Heat-level quantities recorded on a raw material call. The accepted
/// quantity is the ceiling downstream process calls draw against.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rm_heat_quantities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub rm_detail_id: Uuid,
    pub heat_number: String,
    pub manufacturer: Option<String>,
    pub offered_qty: Option<Decimal>,
    pub accepted_qty: Option<Decimal>,
    pub rejected_qty: Option<Decimal>,
    pub tc_number: Option<String>,
    pub tc_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rm_inspection_detail::Entity",
        from = "Column::RmDetailId",
        to = "super::rm_inspection_detail::Column::Id",
        on_delete = "Cascade"
    )]
    RmInspectionDetail,
}

impl Related<super::rm_inspection_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RmInspectionDetail.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Accepted quantity, with an unrecorded value counting as zero.
    pub fn accepted_or_zero(&self) -> Decimal {
        self.accepted_qty.unwrap_or(Decimal::ZERO)
    }
}
