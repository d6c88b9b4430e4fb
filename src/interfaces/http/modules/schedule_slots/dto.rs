//! Schedule slot DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::application::{NewSlot, SlotChanges};
use crate::domain::schedule_slot::{ScheduleSlot, SlotFilter, SlotStatus};
use crate::shared::DomainError;

fn validate_status(value: &str) -> Result<(), ValidationError> {
    SlotStatus::parse(value).map(|_| ()).ok_or_else(|| {
        ValidationError::new("status")
            .with_message("must be one of Available, Booked, Blocked, Cancelled".into())
    })
}

/// A schedule slot
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSlotResponse {
    pub id: String,
    pub room_id: String,
    pub practitioner: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub duration_minutes: i64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ScheduleSlot> for ScheduleSlotResponse {
    fn from(s: ScheduleSlot) -> Self {
        Self {
            duration_minutes: s.duration_minutes(),
            id: s.id,
            room_id: s.room_id,
            practitioner: s.practitioner,
            start_time: s.start_time,
            end_time: s.end_time,
            status: s.status.to_string(),
            notes: s.notes,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSlotRequest {
    #[validate(length(min = 1, message = "roomId is required"))]
    pub room_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[validate(length(min = 1, max = 100))]
    pub practitioner: Option<String>,
    /// Defaults to Available
    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

impl From<CreateSlotRequest> for NewSlot {
    fn from(req: CreateSlotRequest) -> Self {
        Self {
            room_id: req.room_id,
            start_time: req.start_time,
            end_time: req.end_time,
            practitioner: req.practitioner,
            status: req.status.as_deref().and_then(SlotStatus::parse),
            notes: req.notes,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSlotRequest {
    #[validate(length(min = 1))]
    pub room_id: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    #[validate(length(min = 1, max = 100))]
    pub practitioner: Option<String>,
    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

impl From<UpdateSlotRequest> for SlotChanges {
    fn from(req: UpdateSlotRequest) -> Self {
        Self {
            room_id: req.room_id,
            start_time: req.start_time,
            end_time: req.end_time,
            practitioner: req.practitioner,
            status: req.status.as_deref().and_then(SlotStatus::parse),
            notes: req.notes,
        }
    }
}

/// Optional body of `POST /schedule-slots/{id}/book`
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookSlotRequest {
    #[validate(length(min = 1, max = 100))]
    pub practitioner: Option<String>,
}

/// Slot list filters and field selection.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SlotListParams {
    /// Space-separated fields to include, or `-field` to exclude
    pub select: Option<String>,
    pub room_id: Option<String>,
    pub status: Option<String>,
    pub practitioner: Option<String>,
    /// RFC 3339; slots starting at or after
    pub from: Option<String>,
    /// RFC 3339; slots ending at or before
    pub to: Option<String>,
}

fn parse_instant(field: &str, raw: &str) -> Result<DateTime<Utc>, DomainError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| DomainError::Validation(format!("{} must be an RFC 3339 timestamp", field)))
}

impl SlotListParams {
    pub fn filter(&self) -> Result<SlotFilter, DomainError> {
        let status = match self.status.as_deref() {
            Some(raw) => Some(SlotStatus::parse(raw).ok_or_else(|| {
                DomainError::Validation(format!("unknown status '{}'", raw))
            })?),
            None => None,
        };
        Ok(SlotFilter {
            room_id: self.room_id.clone(),
            status,
            practitioner: self.practitioner.clone(),
            from: self
                .from
                .as_deref()
                .map(|raw| parse_instant("from", raw))
                .transpose()?,
            to: self
                .to
                .as_deref()
                .map(|raw| parse_instant("to", raw))
                .transpose()?,
        })
    }
}
