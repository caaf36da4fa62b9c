pub mod dto;

use std::env;

use async_trait::async_trait;
use reqwest::{Client, Method, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::api::dto::{
    AssignRequestRequest, ClassRequest, CourseElementRequest, Envelope, PlanDetail,
    SemesterCourseRequest, SemesterRequest, StudentGroupRequest, WriteAck,
};
use crate::error::AppError;
use crate::models::{Course, EntityId, HoD, Lecturer, Semester, Student, StudentGroup};

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub access_token: Option<String>,
}

impl ApiConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let base_url = env::var("PLAN_API_BASE_URL")
            .map_err(|_| AppError::Config("PLAN_API_BASE_URL is not set".to_string()))?;
        let access_token = env::var("PLAN_API_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token,
        })
    }
}

/// One call per (entity, verb). Reads unwrap the envelope's `result`;
/// writes hand back the whole acknowledgement envelope.
#[async_trait]
pub trait PlanApi: Send + Sync {
    async fn fetch_plan_detail(&self, semester_code: &str) -> Result<PlanDetail, AppError>;
    async fn fetch_semesters(&self) -> Result<Vec<Semester>, AppError>;
    async fn fetch_courses(&self) -> Result<Vec<Course>, AppError>;
    async fn fetch_hods(&self) -> Result<Vec<HoD>, AppError>;
    async fn fetch_lecturers(&self) -> Result<Vec<Lecturer>, AppError>;
    async fn fetch_students(&self) -> Result<Vec<Student>, AppError>;
    async fn fetch_student_groups(&self, class_id: &EntityId) -> Result<Vec<StudentGroup>, AppError>;

    async fn create_semester(&self, req: &SemesterRequest) -> Result<WriteAck, AppError>;
    async fn update_semester(&self, id: &EntityId, req: &SemesterRequest) -> Result<WriteAck, AppError>;
    async fn delete_semester(&self, id: &EntityId) -> Result<WriteAck, AppError>;

    async fn create_semester_course(&self, req: &SemesterCourseRequest) -> Result<WriteAck, AppError>;
    async fn update_semester_course(&self, id: &EntityId, req: &SemesterCourseRequest) -> Result<WriteAck, AppError>;
    async fn delete_semester_course(&self, id: &EntityId) -> Result<WriteAck, AppError>;

    async fn create_course_element(&self, req: &CourseElementRequest) -> Result<WriteAck, AppError>;
    async fn update_course_element(&self, id: &EntityId, req: &CourseElementRequest) -> Result<WriteAck, AppError>;
    async fn delete_course_element(&self, id: &EntityId) -> Result<WriteAck, AppError>;

    async fn create_class(&self, req: &ClassRequest) -> Result<WriteAck, AppError>;
    async fn update_class(&self, id: &EntityId, req: &ClassRequest) -> Result<WriteAck, AppError>;
    async fn delete_class(&self, id: &EntityId) -> Result<WriteAck, AppError>;

    async fn create_student_group(&self, req: &StudentGroupRequest) -> Result<WriteAck, AppError>;
    async fn update_student_group(&self, id: &EntityId, req: &StudentGroupRequest) -> Result<WriteAck, AppError>;
    async fn delete_student_group(&self, id: &EntityId) -> Result<WriteAck, AppError>;

    async fn create_assign_request(&self, req: &AssignRequestRequest) -> Result<WriteAck, AppError>;
    async fn update_assign_request(&self, id: &EntityId, req: &AssignRequestRequest) -> Result<WriteAck, AppError>;
    async fn delete_assign_request(&self, id: &EntityId) -> Result<WriteAck, AppError>;
}

pub struct HttpPlanApi {
    client: Client,
    config: ApiConfig,
}

impl HttpPlanApi {
    pub fn new(config: ApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    /// Appends `segments` to the base URL, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| AppError::Config(format!("Invalid PLAN_API_BASE_URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Config(format!("{} cannot be a base URL", self.config.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<reqwest::RequestBuilder, AppError> {
        let builder = self.client.request(method, self.url(segments)?);
        Ok(match &self.config.access_token {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        })
    }

    async fn get_result<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
        what: &str,
    ) -> Result<T, AppError> {
        let mut builder = self.request(Method::GET, segments)?;
        if !query.is_empty() {
            builder = builder.query(query);
        }
        tracing::debug!("GET /{}", segments.join("/"));
        let response = builder.send().await?;
        let envelope: Envelope<T> = read_envelope(response).await?;
        envelope.into_result(what)
    }

    async fn write<B: Serialize + Sync + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<WriteAck, AppError> {
        tracing::debug!("{} /{}", method, segments.join("/"));
        let mut builder = self.request(method, segments)?;
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = builder.send().await?;
        read_envelope(response).await
    }

    async fn delete(&self, segments: &[&str]) -> Result<WriteAck, AppError> {
        self.write::<()>(Method::DELETE, segments, None).await
    }
}

async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<Envelope<T>, AppError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<Envelope<serde_json::Value>>(&body)
            .ok()
            .and_then(|envelope| envelope.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with status {}", status));
        tracing::warn!("API error {}: {}", status, message);
        return Err(AppError::RemoteFailure(message));
    }

    if body.trim().is_empty() {
        return Ok(Envelope::empty());
    }

    serde_json::from_str::<Envelope<T>>(&body).map_err(|e| {
        tracing::error!("Failed to parse: {}", e);
        AppError::RemoteFailure(format!("Failed to parse response: {}", e))
    })
}

#[async_trait]
impl PlanApi for HttpPlanApi {
    async fn fetch_plan_detail(&self, semester_code: &str) -> Result<PlanDetail, AppError> {
        self.get_result(&["api", "Semester", semester_code, "plan-detail"], &[], "semester plan detail")
            .await
    }

    async fn fetch_semesters(&self) -> Result<Vec<Semester>, AppError> {
        self.get_result(&["api", "Semester", "list"], &[], "semesters").await
    }

    async fn fetch_courses(&self) -> Result<Vec<Course>, AppError> {
        self.get_result(&["api", "Course", "list"], &[], "courses").await
    }

    async fn fetch_hods(&self) -> Result<Vec<HoD>, AppError> {
        self.get_result(&["api", "HoD", "list"], &[], "heads of department").await
    }

    async fn fetch_lecturers(&self) -> Result<Vec<Lecturer>, AppError> {
        self.get_result(&["api", "Lecturer", "list"], &[], "lecturers").await
    }

    async fn fetch_students(&self) -> Result<Vec<Student>, AppError> {
        self.get_result(&["api", "Student", "list"], &[], "students").await
    }

    async fn fetch_student_groups(&self, class_id: &EntityId) -> Result<Vec<StudentGroup>, AppError> {
        self.get_result(
            &["api", "StudentGroup", "list"],
            &[("classId", class_id.as_str())],
            "student groups",
        )
        .await
    }

    async fn create_semester(&self, req: &SemesterRequest) -> Result<WriteAck, AppError> {
        self.write(Method::POST, &["api", "Semester"], Some(req)).await
    }

    async fn update_semester(&self, id: &EntityId, req: &SemesterRequest) -> Result<WriteAck, AppError> {
        self.write(Method::PUT, &["api", "Semester", id.as_str()], Some(req)).await
    }

    async fn delete_semester(&self, id: &EntityId) -> Result<WriteAck, AppError> {
        self.delete(&["api", "Semester", id.as_str()]).await
    }

    async fn create_semester_course(&self, req: &SemesterCourseRequest) -> Result<WriteAck, AppError> {
        self.write(Method::POST, &["api", "SemesterCourse"], Some(req)).await
    }

    async fn update_semester_course(&self, id: &EntityId, req: &SemesterCourseRequest) -> Result<WriteAck, AppError> {
        self.write(Method::PUT, &["api", "SemesterCourse", id.as_str()], Some(req)).await
    }

    async fn delete_semester_course(&self, id: &EntityId) -> Result<WriteAck, AppError> {
        self.delete(&["api", "SemesterCourse", id.as_str()]).await
    }

    async fn create_course_element(&self, req: &CourseElementRequest) -> Result<WriteAck, AppError> {
        self.write(Method::POST, &["api", "CourseElements"], Some(req)).await
    }

    async fn update_course_element(&self, id: &EntityId, req: &CourseElementRequest) -> Result<WriteAck, AppError> {
        self.write(Method::PUT, &["api", "CourseElements", id.as_str()], Some(req)).await
    }

    async fn delete_course_element(&self, id: &EntityId) -> Result<WriteAck, AppError> {
        self.delete(&["api", "CourseElements", id.as_str()]).await
    }

    async fn create_class(&self, req: &ClassRequest) -> Result<WriteAck, AppError> {
        self.write(Method::POST, &["api", "Class"], Some(req)).await
    }

    async fn update_class(&self, id: &EntityId, req: &ClassRequest) -> Result<WriteAck, AppError> {
        self.write(Method::PUT, &["api", "Class", id.as_str()], Some(req)).await
    }

    async fn delete_class(&self, id: &EntityId) -> Result<WriteAck, AppError> {
        self.delete(&["api", "Class", id.as_str()]).await
    }

    async fn create_student_group(&self, req: &StudentGroupRequest) -> Result<WriteAck, AppError> {
        self.write(Method::POST, &["api", "StudentGroup"], Some(req)).await
    }

    async fn update_student_group(&self, id: &EntityId, req: &StudentGroupRequest) -> Result<WriteAck, AppError> {
        self.write(Method::PUT, &["api", "StudentGroup", id.as_str()], Some(req)).await
    }

    async fn delete_student_group(&self, id: &EntityId) -> Result<WriteAck, AppError> {
        self.delete(&["api", "StudentGroup", id.as_str()]).await
    }

    async fn create_assign_request(&self, req: &AssignRequestRequest) -> Result<WriteAck, AppError> {
        self.write(Method::POST, &["api", "AssignRequest"], Some(req)).await
    }

    async fn update_assign_request(&self, id: &EntityId, req: &AssignRequestRequest) -> Result<WriteAck, AppError> {
        self.write(Method::PUT, &["api", "AssignRequest", id.as_str()], Some(req)).await
    }

    async fn delete_assign_request(&self, id: &EntityId) -> Result<WriteAck, AppError> {
        self.delete(&["api", "AssignRequest", id.as_str()]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base_url: &str) -> HttpPlanApi {
        HttpPlanApi::new(ApiConfig {
            base_url: base_url.to_string(),
            access_token: None,
        })
        .expect("Failed to create client")
    }

    #[test]
    fn test_url_joins_base_and_path() {
        let url = api("https://plan.example.edu")
            .url(&["api", "Semester", "FALL2025", "plan-detail"])
            .unwrap();
        assert_eq!(url.as_str(), "https://plan.example.edu/api/Semester/FALL2025/plan-detail");

        let url = api("https://plan.example.edu/backend").url(&["api", "HoD", "list"]).unwrap();
        assert_eq!(url.as_str(), "https://plan.example.edu/backend/api/HoD/list");
    }

    #[test]
    fn test_url_encodes_path_segments() {
        let url = api("https://plan.example.edu")
            .url(&["api", "Semester", "FALL 2025/A?x", "plan-detail"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://plan.example.edu/api/Semester/FALL%202025%2FA%3Fx/plan-detail"
        );
    }

    #[test]
    fn test_query_value_is_encoded() {
        let request = api("https://plan.example.edu")
            .request(Method::GET, &["api", "StudentGroup", "list"])
            .unwrap()
            .query(&[("classId", "5&x=1")])
            .build()
            .unwrap();
        assert_eq!(request.url().path(), "/api/StudentGroup/list");
        assert_eq!(request.url().query(), Some("classId=5%26x%3D1"));
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let result = api("not a url").url(&["api", "HoD", "list"]);
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
