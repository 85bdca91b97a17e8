use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelBehavior, ActiveValue, ConnectionTrait};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::ServiceError;

/// Pipeline position of an inspection call.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallStage {
    #[sea_orm(string_value = "RAW_MATERIAL")]
    RawMaterial,
    #[sea_orm(string_value = "PROCESS")]
    Process,
    #[sea_orm(string_value = "FINAL")]
    Final,
}

impl CallStage {
    pub const ALL: [CallStage; 3] = [CallStage::RawMaterial, CallStage::Process, CallStage::Final];

    /// Identifier prefix issued for calls of this stage.
    pub fn prefix(self) -> &'static str {
        match self {
            CallStage::RawMaterial => "RM-IC",
            CallStage::Process => "PROC-IC",
            CallStage::Final => "FINAL-IC",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CallStage::RawMaterial => "RAW_MATERIAL",
            CallStage::Process => "PROCESS",
            CallStage::Final => "FINAL",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|stage| stage.prefix() == prefix)
    }
}

impl fmt::Display for CallStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CallStage {
    type Err = ServiceError;

    /// Accepts the stored name (`RAW_MATERIAL`), a kebab/lowercase spelling
    /// (`raw-material`, `process`) or the identifier prefix (`RM-IC`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        match normalized.as_str() {
            "RAW_MATERIAL" | "RAWMATERIAL" | "RM" | "RM_IC" => Ok(CallStage::RawMaterial),
            "PROCESS" | "PROC" | "PROC_IC" => Ok(CallStage::Process),
            "FINAL" | "FINAL_IC" => Ok(CallStage::Final),
            _ => Err(ServiceError::UnknownSequenceType(s.trim().to_string())),
        }
    }
}

/// Approval state, written by the external approval workflow.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "APPROVED")]
    Approved,
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
}

impl FromStr for CallStatus {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(CallStatus::Pending),
            "APPROVED" => Ok(CallStatus::Approved),
            "REJECTED" => Ok(CallStatus::Rejected),
            other => Err(ServiceError::ValidationError(format!(
                "unknown call status: {}",
                other
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inspection_calls")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub ic_number: String,
    pub stage: CallStage,
    pub po_no: String,
    pub po_serial_no: Option<String>,
    pub vendor_name: Option<String>,
    pub company_name: Option<String>,
    pub unit_name: Option<String>,
    pub place_of_inspection: Option<String>,
    pub desired_inspection_date: Option<NaiveDate>,
    pub actual_inspection_date: Option<NaiveDate>,
    pub remarks: Option<String>,
    pub status: CallStatus,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::rm_inspection_detail::Entity")]
    RmInspectionDetail,
    #[sea_orm(has_one = "super::process_inspection_detail::Entity")]
    ProcessInspectionDetail,
    #[sea_orm(has_one = "super::final_inspection_detail::Entity")]
    FinalInspectionDetail,
}

impl Related<super::rm_inspection_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RmInspectionDetail.def()
    }
}

impl Related<super::process_inspection_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProcessInspectionDetail.def()
    }
}

impl Related<super::final_inspection_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FinalInspectionDetail.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now();

        if insert {
            if let ActiveValue::NotSet = self.id {
                self.id = ActiveValue::Set(Uuid::new_v4());
            }

            if let ActiveValue::NotSet = self.status {
                self.status = ActiveValue::Set(CallStatus::Pending);
            }

            if let ActiveValue::NotSet = self.created_at {
                self.created_at = ActiveValue::Set(now);
            }
        }

        self.updated_at = ActiveValue::Set(now);

        Ok(self)
    }
}

impl Model {
    pub fn is_approved(&self) -> bool {
        self.status == CallStatus::Approved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_parses_common_spellings() {
        assert_eq!("raw-material".parse::<CallStage>().unwrap(), CallStage::RawMaterial);
        assert_eq!("RAW_MATERIAL".parse::<CallStage>().unwrap(), CallStage::RawMaterial);
        assert_eq!("PROC-IC".parse::<CallStage>().unwrap(), CallStage::Process);
        assert_eq!("final".parse::<CallStage>().unwrap(), CallStage::Final);
    }

    #[test]
    fn unknown_stage_is_an_unknown_sequence_type() {
        let err = "DISPATCH".parse::<CallStage>().unwrap_err();
        assert!(matches!(err, ServiceError::UnknownSequenceType(ref t) if t == "DISPATCH"));
    }

    #[test]
    fn prefixes_round_trip() {
        for stage in CallStage::ALL {
            assert_eq!(CallStage::from_prefix(stage.prefix()), Some(stage));
        }
    }
}
