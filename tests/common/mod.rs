#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use plan_client::api::PlanApi;
use plan_client::api::dto::{
    AssignRequestRequest, ClassRequest, CourseElementRequest, PlanDetail, SemesterCourseRequest,
    SemesterRequest, StudentGroupRequest, WriteAck,
};
use plan_client::error::AppError;
use plan_client::models::{Course, EntityId, HoD, Lecturer, Semester, Student, StudentGroup};
use plan_client::services::{Notifier, Toast};
use serde_json::json;
use tokio::sync::Barrier;

/// In-memory backend that records what was asked of it.
#[derive(Default)]
pub struct FakePlanApi {
    pub plan: Option<PlanDetail>,
    pub hods: Vec<HoD>,
    pub lecturers: Vec<Lecturer>,
    pub rosters: HashMap<String, Vec<StudentGroup>>,
    pub failing_rosters: HashSet<String>,
    pub delete_error: Mutex<Option<String>>,
    /// When set, the plan and HoD fetches each wait here before answering.
    pub plan_gate: Option<Barrier>,
    /// When set, every roster fetch waits here before answering.
    pub roster_gate: Option<Barrier>,

    pub plan_calls: AtomicUsize,
    pub hod_calls: AtomicUsize,
    pub roster_calls: AtomicUsize,
    pub writes: Mutex<Vec<(String, Option<EntityId>, serde_json::Value)>>,
}

impl FakePlanApi {
    pub fn plan_calls(&self) -> usize {
        self.plan_calls.load(Ordering::SeqCst)
    }

    pub fn hod_calls(&self) -> usize {
        self.hod_calls.load(Ordering::SeqCst)
    }

    pub fn roster_calls(&self) -> usize {
        self.roster_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.plan_calls() + self.hod_calls() + self.roster_calls() + self.writes().len()
    }

    pub fn writes(&self) -> Vec<(String, Option<EntityId>, serde_json::Value)> {
        self.writes.lock().unwrap().clone()
    }

    fn record(&self, op: &str, id: Option<&EntityId>, body: serde_json::Value) -> Result<WriteAck, AppError> {
        self.writes
            .lock()
            .unwrap()
            .push((op.to_string(), id.cloned(), body));
        Ok(serde_json::from_value(json!({ "statusCode": 200, "message": null })).unwrap())
    }

    fn record_delete(&self, op: &str, id: &EntityId) -> Result<WriteAck, AppError> {
        if let Some(message) = self.delete_error.lock().unwrap().clone() {
            return Err(AppError::RemoteFailure(message));
        }
        self.record(op, Some(id), serde_json::Value::Null)
    }
}

#[async_trait]
impl PlanApi for FakePlanApi {
    async fn fetch_plan_detail(&self, _semester_code: &str) -> Result<PlanDetail, AppError> {
        self.plan_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.plan_gate {
            gate.wait().await;
        }
        self.plan
            .clone()
            .ok_or_else(|| AppError::RemoteFailure("Semester not found".to_string()))
    }

    async fn fetch_semesters(&self) -> Result<Vec<Semester>, AppError> {
        Ok(Vec::new())
    }

    async fn fetch_courses(&self) -> Result<Vec<Course>, AppError> {
        Ok(Vec::new())
    }

    async fn fetch_hods(&self) -> Result<Vec<HoD>, AppError> {
        self.hod_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.plan_gate {
            gate.wait().await;
        }
        Ok(self.hods.clone())
    }

    async fn fetch_lecturers(&self) -> Result<Vec<Lecturer>, AppError> {
        Ok(self.lecturers.clone())
    }

    async fn fetch_students(&self) -> Result<Vec<Student>, AppError> {
        Ok(Vec::new())
    }

    async fn fetch_student_groups(&self, class_id: &EntityId) -> Result<Vec<StudentGroup>, AppError> {
        self.roster_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.roster_gate {
            gate.wait().await;
        }
        if self.failing_rosters.contains(class_id.as_str()) {
            return Err(AppError::RemoteFailure("connection reset".to_string()));
        }
        Ok(self.rosters.get(class_id.as_str()).cloned().unwrap_or_default())
    }

    async fn create_semester(&self, req: &SemesterRequest) -> Result<WriteAck, AppError> {
        self.record("create_semester", None, serde_json::to_value(req).unwrap())
    }

    async fn update_semester(&self, id: &EntityId, req: &SemesterRequest) -> Result<WriteAck, AppError> {
        self.record("update_semester", Some(id), serde_json::to_value(req).unwrap())
    }

    async fn delete_semester(&self, id: &EntityId) -> Result<WriteAck, AppError> {
        self.record_delete("delete_semester", id)
    }

    async fn create_semester_course(&self, req: &SemesterCourseRequest) -> Result<WriteAck, AppError> {
        self.record("create_semester_course", None, serde_json::to_value(req).unwrap())
    }

    async fn update_semester_course(&self, id: &EntityId, req: &SemesterCourseRequest) -> Result<WriteAck, AppError> {
        self.record("update_semester_course", Some(id), serde_json::to_value(req).unwrap())
    }

    async fn delete_semester_course(&self, id: &EntityId) -> Result<WriteAck, AppError> {
        self.record_delete("delete_semester_course", id)
    }

    async fn create_course_element(&self, req: &CourseElementRequest) -> Result<WriteAck, AppError> {
        self.record("create_course_element", None, serde_json::to_value(req).unwrap())
    }

    async fn update_course_element(&self, id: &EntityId, req: &CourseElementRequest) -> Result<WriteAck, AppError> {
        self.record("update_course_element", Some(id), serde_json::to_value(req).unwrap())
    }

    async fn delete_course_element(&self, id: &EntityId) -> Result<WriteAck, AppError> {
        self.record_delete("delete_course_element", id)
    }

    async fn create_class(&self, req: &ClassRequest) -> Result<WriteAck, AppError> {
        self.record("create_class", None, serde_json::to_value(req).unwrap())
    }

    async fn update_class(&self, id: &EntityId, req: &ClassRequest) -> Result<WriteAck, AppError> {
        self.record("update_class", Some(id), serde_json::to_value(req).unwrap())
    }

    async fn delete_class(&self, id: &EntityId) -> Result<WriteAck, AppError> {
        self.record_delete("delete_class", id)
    }

    async fn create_student_group(&self, req: &StudentGroupRequest) -> Result<WriteAck, AppError> {
        self.record("create_student_group", None, serde_json::to_value(req).unwrap())
    }

    async fn update_student_group(&self, id: &EntityId, req: &StudentGroupRequest) -> Result<WriteAck, AppError> {
        self.record("update_student_group", Some(id), serde_json::to_value(req).unwrap())
    }

    async fn delete_student_group(&self, id: &EntityId) -> Result<WriteAck, AppError> {
        self.record_delete("delete_student_group", id)
    }

    async fn create_assign_request(&self, req: &AssignRequestRequest) -> Result<WriteAck, AppError> {
        self.record("create_assign_request", None, serde_json::to_value(req).unwrap())
    }

    async fn update_assign_request(&self, id: &EntityId, req: &AssignRequestRequest) -> Result<WriteAck, AppError> {
        self.record("update_assign_request", Some(id), serde_json::to_value(req).unwrap())
    }

    async fn delete_assign_request(&self, id: &EntityId) -> Result<WriteAck, AppError> {
        self.record_delete("delete_assign_request", id)
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub toasts: Mutex<Vec<Toast>>,
}

impl RecordingNotifier {
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        self.toasts.lock().unwrap().push(toast);
    }
}

/// HoD list with account 42 registered as HOD007 (numeric account id).
pub fn hods() -> Vec<HoD> {
    serde_json::from_value(json!([
        { "hoDId": "7", "accountId": 42, "accountCode": "HOD007", "fullName": "Nguyen Van A" },
        { "hoDId": "9", "accountId": 99, "accountCode": "HOD999", "fullName": "Tran Thi B" }
    ]))
    .unwrap()
}

/// FALL2025 with one semester course owned by HOD007 and one by HOD999.
pub fn fall_2025_plan() -> PlanDetail {
    serde_json::from_value(json!({
        "id": 1,
        "semesterCode": "FALL2025",
        "academicYear": 2025,
        "startDate": "2025-09-01T00:00:00",
        "endDate": "2025-12-20T00:00:00",
        "semesterCourses": [
            {
                "id": 10,
                "semesterId": 1,
                "courseId": "3",
                "createdByHODAccountCode": "HOD007",
                "course": { "id": 3, "name": "Programming Fundamentals", "code": "PRF192" },
                "courseElements": [
                    { "id": 20, "name": "Lab 1", "weight": 0.25 },
                    { "id": 21, "name": "Practical exam", "weight": 0.75 }
                ],
                "classes": [
                    { "id": 5, "classCode": "SE1801", "totalStudent": 30, "lecturerId": "L1" },
                    { "id": "6", "classCode": "SE1802", "totalStudent": 28 }
                ],
                "assignRequests": [
                    { "id": 100, "status": 5, "courseElementId": 20, "assignedLecturerId": "L1", "assignedByHODId": 7 },
                    { "id": 102, "status": 1, "courseElementId": "21", "assignedLecturerId": "L2", "assignedByHODId": 7 }
                ]
            },
            {
                "id": 11,
                "semesterId": 1,
                "courseId": 4,
                "createdByHODAccountCode": "HOD999",
                "course": { "id": 4, "name": "Database Systems", "code": "DBI202" },
                "courseElements": [ { "id": 30, "name": "Assignment", "weight": 0.4 } ],
                "classes": [ { "id": 7, "classCode": "SE1803", "totalStudent": 25 } ],
                "assignRequests": [
                    { "id": 101, "status": 5, "courseElementId": 30, "assignedLecturerId": "L3", "assignedByHODId": 9 }
                ]
            }
        ]
    }))
    .unwrap()
}

pub fn student(id: &str, class_id: i64, student_id: &str) -> StudentGroup {
    serde_json::from_value(json!({
        "id": id,
        "studentId": student_id,
        "classId": class_id,
        "enrollmentDate": "2025-09-02T00:00:00"
    }))
    .unwrap()
}

/// FALL2025 backend where every roster answers: class 5 has one student,
/// class 6 has two.
pub fn healthy_api() -> FakePlanApi {
    let mut rosters = HashMap::new();
    rosters.insert("5".to_string(), vec![student("500", 5, "S1")]);
    rosters.insert(
        "6".to_string(),
        vec![student("600", 6, "S2"), student("601", 6, "S1")],
    );
    FakePlanApi {
        plan: Some(fall_2025_plan()),
        hods: hods(),
        rosters,
        ..Default::default()
    }
}
