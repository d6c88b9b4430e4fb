//! Schedule slot domain entity

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::shared::{DomainError, DomainResult};

/// Slot status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SlotStatus {
    /// Open for booking
    Available,
    /// Taken by an appointment
    Booked,
    /// Held back by staff (maintenance, cleaning, ...)
    Blocked,
    Cancelled,
}

impl SlotStatus {
    pub const ALL: [SlotStatus; 4] = [
        Self::Available,
        Self::Booked,
        Self::Blocked,
        Self::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Booked => "Booked",
            Self::Blocked => "Blocked",
            Self::Cancelled => "Cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl std::fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A time window in a clinic room
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSlot {
    pub id: String,
    /// Room this slot belongs to
    pub room_id: String,
    pub practitioner: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: SlotStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `end` must be strictly after `start`.
pub fn validate_window(start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<()> {
    if end <= start {
        return Err(DomainError::Validation(
            "endTime must be after startTime".into(),
        ));
    }
    Ok(())
}

impl ScheduleSlot {
    pub fn new(
        room_id: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> DomainResult<Self> {
        validate_window(start_time, end_time)?;
        let now = Utc::now();
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            room_id: room_id.into(),
            practitioner: None,
            start_time,
            end_time,
            status: SlotStatus::Available,
            notes: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_open(&self) -> bool {
        self.status == SlotStatus::Available
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// Available → Booked. Any other state is a conflict.
    pub fn book(&mut self) -> DomainResult<()> {
        if !self.is_open() {
            return Err(DomainError::Conflict(format!(
                "Slot {} is {} and cannot be booked",
                self.id, self.status
            )));
        }
        self.status = SlotStatus::Booked;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.status = SlotStatus::Cancelled;
        self.updated_at = Utc::now();
    }
}

/// Criteria for listing slots. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotFilter {
    pub room_id: Option<String>,
    pub status: Option<SlotStatus>,
    pub practitioner: Option<String>,
    /// Slots starting at or after this instant
    pub from: Option<DateTime<Utc>>,
    /// Slots ending at or before this instant
    pub to: Option<DateTime<Utc>>,
}

impl SlotFilter {
    pub fn for_room(room_id: impl Into<String>) -> Self {
        Self {
            room_id: Some(room_id.into()),
            ..Default::default()
        }
    }

    pub fn matches(&self, slot: &ScheduleSlot) -> bool {
        if self.room_id.as_ref().is_some_and(|r| *r != slot.room_id) {
            return false;
        }
        if self.status.is_some_and(|s| s != slot.status) {
            return false;
        }
        if let Some(ref who) = self.practitioner {
            if slot.practitioner.as_deref() != Some(who.as_str()) {
                return false;
            }
        }
        if self.from.is_some_and(|from| slot.start_time < from) {
            return false;
        }
        if self.to.is_some_and(|to| slot.end_time > to) {
            return false;
        }
        true
    }
}

// ── Tests ──────────────────────────────────────────────────────
