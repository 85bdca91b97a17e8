use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Provenance link from a process call to the raw material heat it draws on.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "process_rm_mappings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub process_detail_id: Uuid,
    pub rm_call_id: Uuid,
    pub rm_ic_number: String,
    pub heat_number: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::process_inspection_detail::Entity",
        from = "Column::ProcessDetailId",
        to = "super::process_inspection_detail::Column::Id",
        on_delete = "Cascade"
    )]
    ProcessInspectionDetail,
}

impl Related<super::process_inspection_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProcessInspectionDetail.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
