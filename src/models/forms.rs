//! Form values as entered in the plan screens, and their conversion into
//! request bodies. Validation runs on the entered values.

use chrono::Utc;

use crate::api::dto::{
    AssignRequestRequest, ClassRequest, CourseElementRequest, SemesterCourseRequest,
    SemesterRequest, StudentGroupRequest,
};
use crate::error::AppError;
use crate::models::semester::validate_date_range;
use crate::models::{
    AssignRequest, AssignRequestStatus, Class, CourseElement, EntityId, Semester, StudentGroup,
    percent_to_weight, weight_to_percent,
};

fn require(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

fn require_id(value: &EntityId, field: &str) -> Result<(), AppError> {
    require(value.as_str(), field)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SemesterForm {
    pub semester_code: String,
    pub academic_year: Option<i32>,
    pub start_date: String,
    pub end_date: String,
}

impl SemesterForm {
    pub fn from_semester(semester: &Semester) -> Self {
        Self {
            semester_code: semester.semester_code.clone(),
            academic_year: semester.academic_year,
            start_date: semester.start_date.clone(),
            end_date: semester.end_date.clone(),
        }
    }

    pub fn to_request(&self) -> Result<SemesterRequest, AppError> {
        require(&self.semester_code, "Semester code")?;
        validate_date_range(&self.start_date, &self.end_date)?;
        Ok(SemesterRequest {
            semester_code: self.semester_code.trim().to_string(),
            academic_year: self.academic_year,
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseLinkForm {
    pub semester_id: EntityId,
    pub course_id: EntityId,
    pub hod_account_code: String,
}

impl CourseLinkForm {
    pub fn to_request(&self) -> Result<SemesterCourseRequest, AppError> {
        require_id(&self.semester_id, "Semester")?;
        require_id(&self.course_id, "Course")?;
        require(&self.hod_account_code, "Head of department")?;
        Ok(SemesterCourseRequest {
            semester_id: self.semester_id.clone(),
            course_id: self.course_id.clone(),
            created_by_hod_account_code: self.hod_account_code.clone(),
        })
    }
}

/// Course element form. `weight_percent` is what the user types (0 - 100);
/// the request carries the stored fraction.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseElementForm {
    pub name: String,
    pub description: Option<String>,
    pub weight_percent: f64,
    pub semester_course_id: EntityId,
}

impl CourseElementForm {
    pub fn from_element(element: &CourseElement) -> Self {
        Self {
            name: element.name.clone(),
            description: element.description.clone(),
            weight_percent: weight_to_percent(element.weight),
            semester_course_id: element.semester_course_id.clone().unwrap_or_default(),
        }
    }

    pub fn to_request(&self) -> Result<CourseElementRequest, AppError> {
        require(&self.name, "Name")?;
        require_id(&self.semester_course_id, "Semester course")?;
        if !(0.0..=100.0).contains(&self.weight_percent) {
            return Err(AppError::Validation(
                "Weight must be between 0 and 100".to_string(),
            ));
        }
        Ok(CourseElementRequest {
            name: self.name.trim().to_string(),
            description: self.description.clone(),
            weight: percent_to_weight(self.weight_percent),
            semester_course_id: self.semester_course_id.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassForm {
    pub class_code: String,
    pub total_student: i32,
    pub lecturer_id: Option<EntityId>,
    pub semester_course_id: EntityId,
}

impl ClassForm {
    pub fn from_class(class: &Class) -> Self {
        Self {
            class_code: class.class_code.clone(),
            total_student: class.total_student,
            lecturer_id: class.lecturer_id.clone(),
            semester_course_id: class.semester_course_id.clone().unwrap_or_default(),
        }
    }

    pub fn to_request(&self) -> Result<ClassRequest, AppError> {
        require(&self.class_code, "Class code")?;
        require_id(&self.semester_course_id, "Semester course")?;
        if self.total_student < 0 {
            return Err(AppError::Validation(
                "Total students cannot be negative".to_string(),
            ));
        }
        Ok(ClassRequest {
            class_code: self.class_code.trim().to_string(),
            total_student: self.total_student,
            lecturer_id: self.lecturer_id.clone().filter(|id| !id.is_empty()),
            semester_course_id: self.semester_course_id.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentGroupForm {
    pub student_id: EntityId,
    pub class_id: EntityId,
    pub enrollment_date: Option<String>,
    pub description: Option<String>,
}

impl StudentGroupForm {
    pub fn from_group(group: &StudentGroup) -> Self {
        Self {
            student_id: group.student_id.clone(),
            class_id: group.class_id.clone(),
            enrollment_date: group.enrollment_date.clone(),
            description: group.description.clone(),
        }
    }

    pub fn to_request(&self) -> Result<StudentGroupRequest, AppError> {
        require_id(&self.student_id, "Student")?;
        require_id(&self.class_id, "Class")?;
        Ok(StudentGroupRequest {
            student_id: self.student_id.clone(),
            class_id: self.class_id.clone(),
            enrollment_date: self
                .enrollment_date
                .clone()
                .unwrap_or_else(|| Utc::now().to_rfc3339()),
            description: self.description.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignRequestForm {
    pub message: Option<String>,
    pub status: AssignRequestStatus,
    pub course_element_id: EntityId,
    pub assigned_lecturer_id: EntityId,
    pub assigned_by_hod_id: EntityId,
}

impl AssignRequestForm {
    pub fn from_request(request: &AssignRequest) -> Self {
        Self {
            message: request.message.clone(),
            status: request.status,
            course_element_id: request.course_element_id.clone(),
            assigned_lecturer_id: request.assigned_lecturer_id.clone().unwrap_or_default(),
            assigned_by_hod_id: request.assigned_by_hod_id.clone().unwrap_or_default(),
        }
    }

    pub fn to_request(&self) -> Result<AssignRequestRequest, AppError> {
        require_id(&self.course_element_id, "Course element")?;
        require_id(&self.assigned_lecturer_id, "Lecturer")?;
        require_id(&self.assigned_by_hod_id, "Head of department")?;
        Ok(AssignRequestRequest {
            message: self.message.clone(),
            status: self.status,
            course_element_id: self.course_element_id.clone(),
            assigned_lecturer_id: self.assigned_lecturer_id.clone(),
            assigned_by_hod_id: self.assigned_by_hod_id.clone(),
        })
    }
}
