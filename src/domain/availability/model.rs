//! Availability rule entity

use chrono::{DateTime, Utc};

use crate::domain::DomainResult;
use crate::shared::errors::DomainError;

pub const DEFAULT_OPENS_AT: &str = "09:00";
pub const DEFAULT_CLOSES_AT: &str = "22:00";

/// A weekly opening window, or a blocked date, for one space.
///
/// `start_time` / `end_time` are `HH:MM` wall-clock strings; lexical order
/// equals chronological order for that format.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityRule {
    pub id: String,
    pub space_id: String,
    /// 0 = Sunday … 6 = Saturday
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    pub block_date: Option<DateTime<Utc>>,
    pub is_blocked: bool,
    pub created_at: DateTime<Utc>,
}

/// Partial update; `None` leaves a field unchanged.
///
/// `block_date: Some(None)` clears the blocked date.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityPatch {
    pub day_of_week: Option<i32>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub block_date: Option<Option<DateTime<Utc>>>,
    pub is_blocked: Option<bool>,
}

impl AvailabilityRule {
    pub fn validate(&self) -> DomainResult<()> {
        if !(0..=6).contains(&self.day_of_week) {
            return Err(DomainError::Validation(format!(
                "day_of_week must be 0-6, got {}",
                self.day_of_week
            )));
        }
        if self.start_time >= self.end_time {
            return Err(DomainError::Validation(format!(
                "start_time {} must be before end_time {}",
                self.start_time, self.end_time
            )));
        }
        Ok(())
    }

    /// Apply `patch` and re-validate. The rule is left untouched on error.
    pub fn apply(&mut self, patch: AvailabilityPatch) -> DomainResult<()> {
        let mut next = self.clone();
        if let Some(day) = patch.day_of_week {
            next.day_of_week = day;
        }
        if let Some(start) = patch.start_time {
            next.start_time = start;
        }
        if let Some(end) = patch.end_time {
            next.end_time = end;
        }
        if let Some(block_date) = patch.block_date {
            next.block_date = block_date;
        }
        if let Some(blocked) = patch.is_blocked {
            next.is_blocked = blocked;
        }
        next.validate()?;
        *self = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> AvailabilityRule {
        AvailabilityRule {
            id: "A1".into(),
            space_id: "S1".into(),
            day_of_week: 1,
            start_time: DEFAULT_OPENS_AT.into(),
            end_time: DEFAULT_CLOSES_AT.into(),
            block_date: None,
            is_blocked: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert!(rule().validate().is_ok());
    }

    #[test]
    fn rejects_day_out_of_range() {
        let mut r = rule();
        r.day_of_week = 7;
        assert!(r.validate().is_err());
    }

    #[test]
    fn rejects_inverted_hours() {
        let mut r = rule();
        r.start_time = "18:00".into();
        r.end_time = "08:00".into();
        assert!(r.validate().is_err());
    }

    #[test]
    fn patch_updates_only_given_fields() {
        let mut r = rule();
        r.apply(AvailabilityPatch {
            end_time: Some("20:00".into()),
            is_blocked: Some(true),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(r.start_time, "09:00");
        assert_eq!(r.end_time, "20:00");
        assert!(r.is_blocked);
        assert_eq!(r.day_of_week, 1);
    }

    #[test]
    fn invalid_patch_leaves_rule_unchanged() {
        let mut r = rule();
        let before = r.clone();
        let result = r.apply(AvailabilityPatch {
            start_time: Some("23:00".into()),
            ..Default::default()
        });
        assert!(result.is_err());
        assert_eq!(r, before);
    }

    #[test]
    fn patch_can_clear_block_date() {
        let mut r = rule();
        r.block_date = Some(Utc::now());
        r.apply(AvailabilityPatch {
            block_date: Some(None),
            ..Default::default()
        })
        .unwrap();
        assert!(r.block_date.is_none());
    }
}
