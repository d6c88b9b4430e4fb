//! Clinic room domain entity

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Kind of room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoomType {
    Consultation,
    Examination,
    Procedure,
    Imaging,
    Laboratory,
    Other,
}

impl RoomType {
    pub const ALL: [RoomType; 6] = [
        Self::Consultation,
        Self::Examination,
        Self::Procedure,
        Self::Imaging,
        Self::Laboratory,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Consultation => "Consultation",
            Self::Examination => "Examination",
            Self::Procedure => "Procedure",
            Self::Imaging => "Imaging",
            Self::Laboratory => "Laboratory",
            Self::Other => "Other",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A bookable room in the clinic
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicRoom {
    pub id: String,
    pub name: String,
    /// Human-facing room number, unique across the clinic
    pub room_number: String,
    pub floor: i32,
    pub room_type: RoomType,
    /// How many people the room holds
    pub capacity: i32,
    pub equipment: Vec<String>,
    /// Inactive rooms stay listed but should not get new slots
    pub is_active: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ClinicRoom {
    pub fn new(
        name: impl Into<String>,
        room_number: impl Into<String>,
        room_type: RoomType,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            room_number: room_number.into(),
            floor: 0,
            room_type,
            capacity: 1,
            equipment: Vec::new(),
            is_active: true,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Criteria for listing rooms. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomFilter {
    /// Case-insensitive substring of name or room number
    pub search: Option<String>,
    pub room_type: Option<RoomType>,
    pub floor: Option<i32>,
    pub is_active: Option<bool>,
}

impl RoomFilter {
    pub fn matches(&self, room: &ClinicRoom) -> bool {
        if let Some(ref search) = self.search {
            let needle = search.to_lowercase();
            if !room.name.to_lowercase().contains(&needle)
                && !room.room_number.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if self.room_type.is_some_and(|t| t != room.room_type) {
            return false;
        }
        if self.floor.is_some_and(|f| f != room.floor) {
            return false;
        }
        if self.is_active.is_some_and(|a| a != room.is_active) {
            return false;
        }
        true
    }
}

// ── Tests ──────────────────────────────────────────────────────
