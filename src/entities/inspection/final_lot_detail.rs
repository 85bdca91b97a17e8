use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "final_lot_details")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub final_detail_id: Uuid,
    pub lot_number: String,
    pub heat_number: Option<String>,
    pub offered_qty: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::final_inspection_detail::Entity",
        from = "Column::FinalDetailId",
        to = "super::final_inspection_detail::Column::Id",
        on_delete = "Cascade"
    )]
    FinalInspectionDetail,
}

impl Related<super::final_inspection_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FinalInspectionDetail.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
