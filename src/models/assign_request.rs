use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::models::EntityId;

/// Integer status code of an assign request.
///
/// Only `5` has a known meaning (approved). Other codes are carried through
/// untouched until the backend publishes its enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignRequestStatus {
    Approved,
    Other(i32),
}

impl AssignRequestStatus {
    pub const APPROVED: i32 = 5;

    pub fn code(self) -> i32 {
        match self {
            AssignRequestStatus::Approved => Self::APPROVED,
            AssignRequestStatus::Other(code) => code,
        }
    }

    pub fn is_approved(self) -> bool {
        matches!(self, AssignRequestStatus::Approved)
    }
}

impl From<i32> for AssignRequestStatus {
    fn from(code: i32) -> Self {
        if code == Self::APPROVED {
            AssignRequestStatus::Approved
        } else {
            AssignRequestStatus::Other(code)
        }
    }
}

impl Serialize for AssignRequestStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}

impl<'de> Deserialize<'de> for AssignRequestStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i32::deserialize(deserializer).map(AssignRequestStatus::from)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default)]
    pub message: Option<String>,
    pub status: AssignRequestStatus,
    pub course_element_id: EntityId,
    #[serde(default)]
    pub assigned_lecturer_id: Option<EntityId>,
    #[serde(rename = "assignedByHODId", alias = "assignedByHoDId", default)]
    pub assigned_by_hod_id: Option<EntityId>,
    #[serde(default)]
    pub assigned_at: Option<String>,
}
