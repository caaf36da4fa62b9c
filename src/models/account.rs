use serde::{Deserialize, Serialize};

use crate::models::{EntityId, null_as_default};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    HoD,
    Lecturer,
    Student,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::HoD => "head of department",
            Role::Lecturer => "lecturer",
            Role::Student => "student",
        }
    }
}

/// Role-specific record wrapping an account.
pub trait RoleRecord {
    fn role_id(&self) -> &EntityId;
    fn account_id(&self) -> &EntityId;
    fn account_code(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoD {
    #[serde(rename = "hoDId", alias = "hodId")]
    pub hod_id: EntityId,
    pub account_id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub account_code: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lecturer {
    pub lecturer_id: EntityId,
    pub account_id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub account_code: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub student_id: EntityId,
    pub account_id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub account_code: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

macro_rules! role_record {
    ($t:ty, $id:ident) => {
        impl RoleRecord for $t {
            fn role_id(&self) -> &EntityId {
                &self.$id
            }

            fn account_id(&self) -> &EntityId {
                &self.account_id
            }

            fn account_code(&self) -> &str {
                &self.account_code
            }
        }
    };
}

role_record!(HoD, hod_id);
role_record!(Lecturer, lecturer_id);
role_record!(Student, student_id);
