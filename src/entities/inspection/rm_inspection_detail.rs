use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelBehavior, ActiveValue, ConnectionTrait};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rm_inspection_details")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub call_id: Uuid,
    pub item_description: Option<String>,
    pub item_quantity: Option<Decimal>,
    pub total_offered_qty: Option<Decimal>,
    pub total_accepted_qty: Option<Decimal>,
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
    #[sea_orm(has_many = "super::rm_heat_quantity::Entity")]
    HeatQuantities,
}

impl Related<super::inspection_call::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InspectionCall.def()
    }
}

impl Related<super::rm_heat_quantity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HeatQuantities.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert {
            if let ActiveValue::NotSet = self.id {
                self.id = ActiveValue::Set(Uuid::new_v4());
            }
            if let ActiveValue::NotSet = self.created_at {
                self.created_at = ActiveValue::Set(Utc::now());
            }
        }
        Ok(self)
    }
}
