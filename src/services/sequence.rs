//! Sequence Allocator
//!
//! Issues `PREFIX-YYYY-NNNN` identifiers from one counter row per call type.
//! Allocation must run inside the transaction that inserts the call, so a
//! rolled-back create never consumes a number.

use chrono::{DateTime, Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QuerySelect, Set};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, error, instrument};

use crate::entities::inspection::{sequence_counter, CallStage};
use crate::errors::ServiceError;

static IC_NUMBER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<prefix>[A-Z]+-IC)-(?P<year>\d{4})-(?P<seq>\d{4,})$").unwrap()
});

/// A parsed inspection call identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IcNumber {
    pub stage: CallStage,
    pub year: i32,
    pub sequence: u32,
}

impl IcNumber {
    pub fn new(stage: CallStage, year: i32, sequence: u32) -> Self {
        Self {
            stage,
            year,
            sequence,
        }
    }

    pub fn prefix(&self) -> &'static str {
        self.stage.prefix()
    }

    /// Parses `PREFIX-YYYY-NNNN`. An unknown prefix is a configuration-level
    /// `UnknownSequenceType`; any other malformation is a `ValidationError`.
    pub fn parse(raw: &str) -> Result<Self, ServiceError> {
        let raw = raw.trim();
        let caps = IC_NUMBER_PATTERN.captures(raw).ok_or_else(|| {
            ServiceError::ValidationError(format!("malformed inspection call number: {}", raw))
        })?;

        let prefix = &caps["prefix"];
        let stage = CallStage::from_prefix(prefix)
            .ok_or_else(|| ServiceError::UnknownSequenceType(prefix.to_string()))?;
        let year = caps["year"].parse::<i32>().map_err(|_| {
            ServiceError::ValidationError(format!("malformed year in {}", raw))
        })?;
        let sequence = caps["seq"].parse::<u32>().map_err(|_| {
            ServiceError::ValidationError(format!("malformed sequence in {}", raw))
        })?;
        if sequence == 0 {
            return Err(ServiceError::ValidationError(format!(
                "sequence must start at 0001: {}",
                raw
            )));
        }

        Ok(Self::new(stage, year, sequence))
    }
}

impl fmt::Display for IcNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:04}-{:04}", self.prefix(), self.year, self.sequence)
    }
}

impl FromStr for IcNumber {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Allocates identifiers from the `ic_sequence_counters` table.
#[derive(Debug, Clone, Default)]
pub struct SequenceAllocator;

impl SequenceAllocator {
    pub fn new() -> Self {
        Self
    }

    /// Issues the next identifier for `stage` using the wall-clock year.
    pub async fn allocate<C>(&self, conn: &C, stage: CallStage) -> Result<IcNumber, ServiceError>
    where
        C: ConnectionTrait,
    {
        self.allocate_at(conn, stage, Utc::now()).await
    }

    /// Issues the next identifier as of `now`. The counter row is read with an
    /// exclusive lock held until the caller's transaction ends.
    #[instrument(skip(self, conn))]
    pub async fn allocate_at<C>(
        &self,
        conn: &C,
        stage: CallStage,
        now: DateTime<Utc>,
    ) -> Result<IcNumber, ServiceError>
    where
        C: ConnectionTrait,
    {
        let counter = sequence_counter::Entity::find_by_id(stage.as_str().to_string())
            .lock_exclusive()
            .one(conn)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| {
                error!(stage = %stage, "Sequence counter row missing");
                ServiceError::SequenceNotInitialized(stage.to_string())
            })?;

        let year = now.year();
        let next = if counter.current_year != year {
            debug!(
                stage = %stage,
                previous_year = counter.current_year,
                year,
                "Sequence year rollover"
            );
            1
        } else {
            counter.current_sequence + 1
        };

        let sequence = u32::try_from(next).map_err(|_| {
            ServiceError::InternalError(format!("sequence overflow for {}", stage))
        })?;
        let ic_number = IcNumber::new(stage, year, sequence);

        let mut active: sequence_counter::ActiveModel = counter.into();
        active.current_year = Set(year);
        active.current_sequence = Set(next);
        active.last_issued = Set(Some(ic_number.to_string()));
        active.updated_at = Set(now);
        active.update(conn).await.map_err(ServiceError::db_error)?;

        debug!(ic_number = %ic_number, "Allocated inspection call number");
        Ok(ic_number)
    }

    /// Reads the stored counter state without locking it.
    pub async fn current<C>(
        &self,
        conn: &C,
        stage: CallStage,
    ) -> Result<sequence_counter::Model, ServiceError>
    where
        C: ConnectionTrait,
    {
        sequence_counter::Entity::find_by_id(stage.as_str().to_string())
            .one(conn)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::SequenceNotInitialized(stage.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_four_digit_padding() {
        assert_eq!(
            IcNumber::new(CallStage::RawMaterial, 2025, 1).to_string(),
            "RM-IC-2025-0001"
        );
        assert_eq!(
            IcNumber::new(CallStage::Process, 2025, 42).to_string(),
            "PROC-IC-2025-0042"
        );
        assert_eq!(
            IcNumber::new(CallStage::Final, 2026, 9999).to_string(),
            "FINAL-IC-2026-9999"
        );
    }

    #[test]
    fn sequences_past_9999_are_not_truncated() {
        assert_eq!(
            IcNumber::new(CallStage::RawMaterial, 2025, 10_000).to_string(),
            "RM-IC-2025-10000"
        );
    }

    #[test]
    fn parses_identifiers() {
        let ic = IcNumber::parse("PROC-IC-2025-0007").unwrap();
        assert_eq!(ic.stage, CallStage::Process);
        assert_eq!(ic.year, 2025);
        assert_eq!(ic.sequence, 7);
    }

    #[test]
    fn rejects_malformed_identifiers() {
        for raw in ["", "RM-IC-25-0001", "RM-IC-2025-1", "RM-IC-2025-0000", "rm-ic-2025-0001"] {
            assert!(
                matches!(IcNumber::parse(raw), Err(ServiceError::ValidationError(_))),
                "{} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn unknown_prefix_is_unknown_sequence_type() {
        assert!(matches!(
            IcNumber::parse("DISP-IC-2025-0001"),
            Err(ServiceError::UnknownSequenceType(ref p)) if p == "DISP-IC"
        ));
    }
}
