use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "process_inspection_details")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub call_id: Uuid,
    pub rm_ic_number: String,
    pub heat_number: String,
    pub lot_number: String,
    pub manufacturer: Option<String>,
    pub offered_qty: Decimal,
    /// Accepted quantity of the heat at validation time
    pub total_accepted_qty_rm: Decimal,
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
    #[sea_orm(has_many = "super::process_rm_mapping::Entity")]
    RmMappings,
}

impl Related<super::inspection_call::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InspectionCall.def()
    }
}

impl Related<super::process_rm_mapping::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RmMappings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
