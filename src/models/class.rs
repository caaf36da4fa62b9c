use serde::{Deserialize, Serialize};

use crate::models::{EntityId, null_as_default};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub class_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_student: i32,
    #[serde(default)]
    pub lecturer_id: Option<EntityId>,
    #[serde(default)]
    pub semester_course_id: Option<EntityId>,
}

/// One student's enrolment in a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentGroup {
    #[serde(default)]
    pub id: EntityId,
    pub student_id: EntityId,
    pub class_id: EntityId,
    #[serde(default)]
    pub enrollment_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}
