use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "final_inspection_details")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub call_id: Uuid,
    pub product_description: Option<String>,
    pub total_lots: i32,
    pub total_offered_qty: Option<Decimal>,
    pub unit_of_measurement: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::inspection_call::Entity",
        from = "Column::CallId",
        to = "super::inspection_call::Column::Id",
        on_delete = "Cascade"
    )]
    InspectionCall,
    #[sea_orm(has_many = "super::final_lot_detail::Entity")]
    Lots,
    #[sea_orm(has_many = "super::final_process_mapping::Entity")]
    ProcessMappings,
}

impl Related<super::inspection_call::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InspectionCall.def()
    }
}

impl Related<super::final_lot_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lots.def()
    }
}

impl Related<super::final_process_mapping::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProcessMappings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
