use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{
    AssignRequest, AssignRequestStatus, Class, Course, CourseElement, EntityId, null_as_default,
};

/// Uniform response wrapper; reads carry their payload under `result`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub result: Option<T>,
    pub message: Option<String>,
    pub status_code: Option<u16>,
    pub is_success: Option<bool>,
}

impl<T> Envelope<T> {
    pub fn empty() -> Self {
        Self {
            result: None,
            message: None,
            status_code: None,
            is_success: None,
        }
    }

    /// Write acknowledgements count as failed only when the backend says so.
    pub fn is_success(&self) -> bool {
        self.is_success != Some(false) && self.status_code.is_none_or(|code| code < 400)
    }

    pub fn into_result(self, what: &str) -> Result<T, AppError> {
        match self.result {
            Some(result) => Ok(result),
            None => Err(AppError::RemoteFailure(
                self.message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| format!("No result returned for {}", what)),
            )),
        }
    }
}

/// Write acknowledgement as returned by every POST/PUT/DELETE.
pub type WriteAck = Envelope<serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDetail {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default, alias = "code", deserialize_with = "null_as_default")]
    pub semester_code: String,
    #[serde(default)]
    pub academic_year: Option<i32>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub semester_courses: Vec<PlanSemesterCourse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSemesterCourse {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default)]
    pub semester_id: EntityId,
    #[serde(default)]
    pub course_id: EntityId,
    #[serde(rename = "createdByHODAccountCode", default, deserialize_with = "null_as_default")]
    pub created_by_hod_account_code: String,
    #[serde(default)]
    pub course: Option<Course>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub course_elements: Vec<CourseElement>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub classes: Vec<Class>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub assign_requests: Vec<AssignRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterRequest {
    pub semester_code: String,
    pub academic_year: Option<i32>,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterCourseRequest {
    pub semester_id: EntityId,
    pub course_id: EntityId,
    #[serde(rename = "createdByHODAccountCode")]
    pub created_by_hod_account_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseElementRequest {
    pub name: String,
    pub description: Option<String>,
    pub weight: f64,
    pub semester_course_id: EntityId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRequest {
    pub class_code: String,
    pub total_student: i32,
    pub lecturer_id: Option<EntityId>,
    pub semester_course_id: EntityId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentGroupRequest {
    pub student_id: EntityId,
    pub class_id: EntityId,
    pub enrollment_date: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequestRequest {
    pub message: Option<String>,
    pub status: AssignRequestStatus,
    pub course_element_id: EntityId,
    pub assigned_lecturer_id: EntityId,
    #[serde(rename = "assignedByHODId")]
    pub assigned_by_hod_id: EntityId,
}
