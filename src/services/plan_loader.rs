use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join_all;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::api::PlanApi;
use crate::api::dto::{PlanDetail, PlanSemesterCourse};
use crate::error::AppError;
use crate::models::{AssignRequest, Class, CourseElement, CourseItem, EntityId, HoD, StudentGroup};
use crate::services::notifier::{Notifier, Toast};
use crate::services::roles::resolve_current_hod;

/// A semester plan narrowed to one head of department and flattened into
/// per-section lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanView {
    pub plan: PlanDetail,
    pub hod: HoD,
    pub courses: Vec<CourseItem>,
    pub classes: Vec<Class>,
    pub assign_requests: Vec<AssignRequest>,
    pub course_elements: Vec<CourseElement>,
    pub student_groups: Vec<StudentGroup>,
}

impl PlanView {
    pub fn course_elements_for(&self, semester_course_id: &EntityId) -> Vec<&CourseElement> {
        self.course_elements
            .iter()
            .filter(|e| e.semester_course_id.as_ref() == Some(semester_course_id))
            .collect()
    }

    pub fn classes_for(&self, semester_course_id: &EntityId) -> Vec<&Class> {
        self.classes
            .iter()
            .filter(|c| c.semester_course_id.as_ref() == Some(semester_course_id))
            .collect()
    }

    pub fn assign_requests_for_element(&self, element_id: &EntityId) -> Vec<&AssignRequest> {
        self.assign_requests
            .iter()
            .filter(|r| &r.course_element_id == element_id)
            .collect()
    }

    pub fn approved_assign_requests(&self) -> Vec<&AssignRequest> {
        self.assign_requests
            .iter()
            .filter(|r| r.status.is_approved())
            .collect()
    }

    pub fn students_in_class(&self, class_id: &EntityId) -> Vec<&StudentGroup> {
        self.student_groups
            .iter()
            .filter(|g| &g.class_id == class_id)
            .collect()
    }

    pub fn student_groups_by_student(&self) -> BTreeMap<&EntityId, Vec<&StudentGroup>> {
        let mut grouped: BTreeMap<&EntityId, Vec<&StudentGroup>> = BTreeMap::new();
        for group in &self.student_groups {
            grouped.entry(&group.student_id).or_default().push(group);
        }
        grouped
    }
}

/// Loads and reshapes a semester plan for the HoD behind `account_id`.
///
/// Every call goes to the network; nothing is memoised.
pub async fn load_plan_view(
    api: &dyn PlanApi,
    semester_code: &str,
    account_id: &EntityId,
) -> Result<PlanView, AppError> {
    if semester_code.trim().is_empty() {
        return Err(AppError::MissingParameter("semester code"));
    }
    if account_id.is_empty() {
        return Err(AppError::MissingParameter("account id"));
    }

    let (plan, hod) = tokio::try_join!(
        api.fetch_plan_detail(semester_code.trim()),
        resolve_current_hod(api, account_id),
    )?;

    let hod = hod.ok_or_else(|| {
        AppError::NotAuthorized(format!(
            "Account {} is not a registered head of department",
            account_id
        ))
    })?;

    let owned: Vec<&PlanSemesterCourse> = plan
        .semester_courses
        .iter()
        .filter(|sc| owned_by(sc, &hod))
        .collect();

    info!(
        "Plan {}: {} of {} semester courses belong to {}",
        semester_code,
        owned.len(),
        plan.semester_courses.len(),
        hod.account_code
    );

    let mut courses = Vec::new();
    let mut classes = Vec::new();
    let mut assign_requests = Vec::new();
    let mut course_elements = Vec::new();

    for sc in owned {
        let elements: Vec<CourseElement> = sc
            .course_elements
            .iter()
            .cloned()
            .map(|mut e| {
                e.semester_course_id = Some(sc.id.clone());
                e
            })
            .collect();

        match &sc.course {
            Some(course) => courses.push(CourseItem {
                semester_course_id: Some(sc.id.clone()).filter(|id| !id.is_empty()),
                course: course.clone(),
                elements: elements.clone(),
            }),
            None => warn!("Semester course {} has no course attached", sc.id),
        }

        classes.extend(sc.classes.iter().cloned().map(|mut c| {
            c.semester_course_id = Some(sc.id.clone());
            c
        }));
        assign_requests.extend(sc.assign_requests.iter().cloned());
        course_elements.extend(elements);
    }

    let student_groups = fetch_rosters(api, &classes).await;

    Ok(PlanView {
        plan,
        hod,
        courses,
        classes,
        assign_requests,
        course_elements,
        student_groups,
    })
}

/// Exact match on the creating HoD's account code. A blank code owns nothing.
fn owned_by(semester_course: &PlanSemesterCourse, hod: &HoD) -> bool {
    !hod.account_code.is_empty() && semester_course.created_by_hod_account_code == hod.account_code
}

// One request per class, all in flight together. A failed roster counts as
// empty.
async fn fetch_rosters(api: &dyn PlanApi, classes: &[Class]) -> Vec<StudentGroup> {
    let fetches = classes.iter().map(|class| async move {
        match api.fetch_student_groups(&class.id).await {
            Ok(groups) => groups,
            Err(e) => {
                warn!("Failed to load students for class {}: {}", class.id, e);
                Vec::new()
            }
        }
    });

    join_all(fetches).await.into_iter().flatten().collect()
}

/// Something a section can ask to reload after a mutation.
#[async_trait]
pub trait Refresh: Send {
    async fn refresh(&mut self) -> Result<(), AppError>;
}

/// Screen-side holder of a plan view.
pub struct PlanDetailLoader {
    api: Arc<dyn PlanApi>,
    notifier: Arc<dyn Notifier>,
    semester_code: String,
    account_id: EntityId,
    loading: bool,
    view: Option<PlanView>,
}

impl PlanDetailLoader {
    pub fn new(
        api: Arc<dyn PlanApi>,
        notifier: Arc<dyn Notifier>,
        semester_code: impl Into<String>,
        account_id: impl Into<EntityId>,
    ) -> Self {
        Self {
            api,
            notifier,
            semester_code: semester_code.into(),
            account_id: account_id.into(),
            loading: false,
            view: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn view(&self) -> Option<&PlanView> {
        self.view.as_ref()
    }

    pub fn semester_code(&self) -> &str {
        &self.semester_code
    }

    pub fn account_id(&self) -> &EntityId {
        &self.account_id
    }
}

#[async_trait]
impl Refresh for PlanDetailLoader {
    /// Re-runs the whole load. On failure the previous view is kept and an
    /// error toast is raised.
    async fn refresh(&mut self) -> Result<(), AppError> {
        self.loading = true;
        let result = load_plan_view(self.api.as_ref(), &self.semester_code, &self.account_id).await;
        self.loading = false;

        match result {
            Ok(view) => {
                self.view = Some(view);
                Ok(())
            }
            Err(e) => {
                error!("Failed to load plan {}: {}", self.semester_code, e);
                self.notifier
                    .notify(Toast::error("Failed to load plan", e.toast_message()));
                Err(e)
            }
        }
    }
}
