//! Counter rows backing gapless per-type, per-year call numbering.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "ic_sequence_counters")]
pub struct Model {
    /// Stored stage name, e.g. `RAW_MATERIAL`
    #[sea_orm(primary_key, auto_increment = false)]
    pub call_type: String,
    pub prefix: String,
    pub current_year: i32,
    pub current_sequence: i32,
    pub last_issued: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
