//! Clinic room DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::application::{NewRoom, RoomChanges};
use crate::domain::clinic_room::{ClinicRoom, RoomFilter, RoomType};
use crate::shared::DomainError;

fn validate_room_type(value: &str) -> Result<(), ValidationError> {
    match RoomType::parse(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("room_type")
            .with_message("must be one of Consultation, Examination, Procedure, Imaging, Laboratory, Other".into())),
    }
}

/// A clinic room
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClinicRoomResponse {
    pub id: String,
    pub name: String,
    pub room_number: String,
    pub floor: i32,
    pub room_type: String,
    pub capacity: i32,
    pub equipment: Vec<String>,
    pub is_active: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ClinicRoom> for ClinicRoomResponse {
    fn from(r: ClinicRoom) -> Self {
        Self {
            id: r.id,
            name: r.name,
            room_number: r.room_number,
            floor: r.floor,
            room_type: r.room_type.to_string(),
            capacity: r.capacity,
            equipment: r.equipment,
            is_active: r.is_active,
            notes: r.notes,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    #[validate(length(min = 1, max = 100, message = "room name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 20))]
    pub room_number: String,
    /// Consultation, Examination, Procedure, Imaging, Laboratory or Other
    #[validate(custom(function = "validate_room_type"))]
    pub room_type: String,
    pub floor: Option<i32>,
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
    pub equipment: Option<Vec<String>>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

impl From<CreateRoomRequest> for NewRoom {
    fn from(req: CreateRoomRequest) -> Self {
        Self {
            name: req.name,
            room_number: req.room_number,
            room_type: RoomType::parse(&req.room_type).unwrap_or(RoomType::Other),
            floor: req.floor,
            capacity: req.capacity,
            equipment: req.equipment.unwrap_or_default(),
            notes: req.notes,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub room_number: Option<String>,
    #[validate(custom(function = "validate_room_type"))]
    pub room_type: Option<String>,
    pub floor: Option<i32>,
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
    pub equipment: Option<Vec<String>>,
    pub is_active: Option<bool>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

impl From<UpdateRoomRequest> for RoomChanges {
    fn from(req: UpdateRoomRequest) -> Self {
        Self {
            name: req.name,
            room_number: req.room_number,
            room_type: req.room_type.as_deref().and_then(RoomType::parse),
            floor: req.floor,
            capacity: req.capacity,
            equipment: req.equipment,
            is_active: req.is_active,
            notes: req.notes,
        }
    }
}

/// Room list filters and field selection.
///
/// Values arrive as text and are checked by [`RoomListParams::filter`].
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RoomListParams {
    /// Space-separated fields to include, or `-field` to exclude
    pub select: Option<String>,
    /// Substring of name or room number
    pub search: Option<String>,
    pub room_type: Option<String>,
    pub floor: Option<String>,
    pub is_active: Option<String>,
}

fn parse_bool(field: &str, value: &str) -> Result<bool, DomainError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(DomainError::Validation(format!(
            "{} must be true or false",
            field
        ))),
    }
}

impl RoomListParams {
    pub fn filter(&self) -> Result<RoomFilter, DomainError> {
        let room_type = match self.room_type.as_deref() {
            Some(raw) => Some(RoomType::parse(raw).ok_or_else(|| {
                DomainError::Validation(format!("unknown roomType '{}'", raw))
            })?),
            None => None,
        };
        let floor = match self.floor.as_deref() {
            Some(raw) => Some(raw.trim().parse::<i32>().map_err(|_| {
                DomainError::Validation(format!("floor must be an integer, got '{}'", raw))
            })?),
            None => None,
        };
        let is_active = self
            .is_active
            .as_deref()
            .map(|raw| parse_bool("isActive", raw))
            .transpose()?;

        Ok(RoomFilter {
            search: self.search.clone().filter(|s| !s.trim().is_empty()),
            room_type,
            floor,
            is_active,
        })
    }
}
