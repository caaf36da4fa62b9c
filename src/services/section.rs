use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::api::PlanApi;
use crate::api::dto::WriteAck;
use crate::error::AppError;
use crate::models::{
    AssignRequest, AssignRequestForm, Class, ClassForm, CourseElement, CourseElementForm,
    CourseItem, CourseLinkForm, EntityId, StudentGroup, StudentGroupForm,
};
use crate::services::notifier::{Notifier, Toast};
use crate::services::plan_loader::Refresh;

/// An entity type that a plan section lists and edits.
#[async_trait]
pub trait SectionEntity: Clone + Send + Sync + 'static {
    type Form: Send + Sync;

    /// Singular label used in toasts, e.g. "Class".
    const LABEL: &'static str;

    /// Id the update and delete endpoints address.
    fn record_key(&self) -> Result<EntityId, AppError>;

    async fn create(api: &dyn PlanApi, form: &Self::Form) -> Result<WriteAck, AppError>;
    async fn update(api: &dyn PlanApi, current: &Self, form: &Self::Form) -> Result<WriteAck, AppError>;
    async fn delete(api: &dyn PlanApi, key: &EntityId) -> Result<WriteAck, AppError>;
}

fn require_key(id: &EntityId, label: &str) -> Result<EntityId, AppError> {
    if id.is_empty() {
        return Err(AppError::InvalidState(format!("{} has no id", label)));
    }
    Ok(id.clone())
}

#[async_trait]
impl SectionEntity for CourseItem {
    type Form = CourseLinkForm;
    const LABEL: &'static str = "Course";

    // The course cannot exist in a plan without its semester link, so the
    // link is what gets removed. The course record itself stays.
    fn record_key(&self) -> Result<EntityId, AppError> {
        self.semester_course_id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                AppError::InvalidState(format!(
                    "Course {} is not linked to this semester",
                    self.course.code
                ))
            })
    }

    async fn create(api: &dyn PlanApi, form: &CourseLinkForm) -> Result<WriteAck, AppError> {
        api.create_semester_course(&form.to_request()?).await
    }

    async fn update(api: &dyn PlanApi, current: &Self, form: &CourseLinkForm) -> Result<WriteAck, AppError> {
        let key = current.record_key()?;
        api.update_semester_course(&key, &form.to_request()?).await
    }

    async fn delete(api: &dyn PlanApi, key: &EntityId) -> Result<WriteAck, AppError> {
        api.delete_semester_course(key).await
    }
}

#[async_trait]
impl SectionEntity for CourseElement {
    type Form = CourseElementForm;
    const LABEL: &'static str = "Course element";

    fn record_key(&self) -> Result<EntityId, AppError> {
        require_key(&self.id, Self::LABEL)
    }

    async fn create(api: &dyn PlanApi, form: &CourseElementForm) -> Result<WriteAck, AppError> {
        api.create_course_element(&form.to_request()?).await
    }

    async fn update(api: &dyn PlanApi, current: &Self, form: &CourseElementForm) -> Result<WriteAck, AppError> {
        let id = current.record_key()?;
        api.update_course_element(&id, &form.to_request()?).await
    }

    async fn delete(api: &dyn PlanApi, key: &EntityId) -> Result<WriteAck, AppError> {
        api.delete_course_element(key).await
    }
}

#[async_trait]
impl SectionEntity for Class {
    type Form = ClassForm;
    const LABEL: &'static str = "Class";

    fn record_key(&self) -> Result<EntityId, AppError> {
        require_key(&self.id, Self::LABEL)
    }

    async fn create(api: &dyn PlanApi, form: &ClassForm) -> Result<WriteAck, AppError> {
        api.create_class(&form.to_request()?).await
    }

    async fn update(api: &dyn PlanApi, current: &Self, form: &ClassForm) -> Result<WriteAck, AppError> {
        let id = current.record_key()?;
        api.update_class(&id, &form.to_request()?).await
    }

    async fn delete(api: &dyn PlanApi, key: &EntityId) -> Result<WriteAck, AppError> {
        api.delete_class(key).await
    }
}

#[async_trait]
impl SectionEntity for StudentGroup {
    type Form = StudentGroupForm;
    const LABEL: &'static str = "Student";

    fn record_key(&self) -> Result<EntityId, AppError> {
        require_key(&self.id, Self::LABEL)
    }

    async fn create(api: &dyn PlanApi, form: &StudentGroupForm) -> Result<WriteAck, AppError> {
        api.create_student_group(&form.to_request()?).await
    }

    async fn update(api: &dyn PlanApi, current: &Self, form: &StudentGroupForm) -> Result<WriteAck, AppError> {
        let id = current.record_key()?;
        api.update_student_group(&id, &form.to_request()?).await
    }

    async fn delete(api: &dyn PlanApi, key: &EntityId) -> Result<WriteAck, AppError> {
        api.delete_student_group(key).await
    }
}

#[async_trait]
impl SectionEntity for AssignRequest {
    type Form = AssignRequestForm;
    const LABEL: &'static str = "Assign request";

    fn record_key(&self) -> Result<EntityId, AppError> {
        require_key(&self.id, Self::LABEL)
    }

    async fn create(api: &dyn PlanApi, form: &AssignRequestForm) -> Result<WriteAck, AppError> {
        api.create_assign_request(&form.to_request()?).await
    }

    async fn update(api: &dyn PlanApi, current: &Self, form: &AssignRequestForm) -> Result<WriteAck, AppError> {
        let id = current.record_key()?;
        api.update_assign_request(&id, &form.to_request()?).await
    }

    async fn delete(api: &dyn PlanApi, key: &EntityId) -> Result<WriteAck, AppError> {
        api.delete_assign_request(key).await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionState<E> {
    Idle,
    Editing { selected: Option<E> },
    ConfirmingDelete { selected: E },
    Deleting { selected: E },
}

impl<E> SectionState<E> {
    fn name(&self) -> &'static str {
        match self {
            SectionState::Idle => "idle",
            SectionState::Editing { .. } => "editing",
            SectionState::ConfirmingDelete { .. } => "confirming delete",
            SectionState::Deleting { .. } => "deleting",
        }
    }
}

fn ensure_success(ack: WriteAck) -> Result<WriteAck, AppError> {
    if ack.is_success() {
        Ok(ack)
    } else {
        Err(AppError::RemoteFailure(ack.message.unwrap_or_default()))
    }
}

/// Add/edit/delete state for one plan section.
pub struct SectionController<E: SectionEntity> {
    api: Arc<dyn PlanApi>,
    notifier: Arc<dyn Notifier>,
    state: SectionState<E>,
}

pub type CourseSection = SectionController<CourseItem>;
pub type CourseElementSection = SectionController<CourseElement>;
pub type ClassSection = SectionController<Class>;
pub type StudentSection = SectionController<StudentGroup>;
pub type AssignRequestSection = SectionController<AssignRequest>;

impl<E: SectionEntity> SectionController<E> {
    pub fn new(api: Arc<dyn PlanApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            state: SectionState::Idle,
        }
    }

    pub fn state(&self) -> &SectionState<E> {
        &self.state
    }

    pub fn selected(&self) -> Option<&E> {
        match &self.state {
            SectionState::Idle => None,
            SectionState::Editing { selected } => selected.as_ref(),
            SectionState::ConfirmingDelete { selected } | SectionState::Deleting { selected } => {
                Some(selected)
            }
        }
    }

    pub fn is_deleting(&self) -> bool {
        matches!(self.state, SectionState::Deleting { .. })
    }

    fn invalid_transition(&self, action: &str) -> AppError {
        AppError::InvalidState(format!(
            "Cannot {} {} while {}",
            action,
            E::LABEL.to_lowercase(),
            self.state.name()
        ))
    }

    pub fn open_add(&mut self) -> Result<(), AppError> {
        if !matches!(self.state, SectionState::Idle) {
            return Err(self.invalid_transition("add"));
        }
        self.state = SectionState::Editing { selected: None };
        Ok(())
    }

    pub fn open_edit(&mut self, item: E) -> Result<(), AppError> {
        if !matches!(self.state, SectionState::Idle) {
            return Err(self.invalid_transition("edit"));
        }
        self.state = SectionState::Editing { selected: Some(item) };
        Ok(())
    }

    pub fn open_delete(&mut self, item: E) -> Result<(), AppError> {
        if !matches!(self.state, SectionState::Idle) {
            return Err(self.invalid_transition("delete"));
        }
        self.state = SectionState::ConfirmingDelete { selected: item };
        Ok(())
    }

    /// Closes the edit modal or the delete confirmation. A delete already in
    /// flight cannot be cancelled.
    pub fn cancel(&mut self) -> Result<(), AppError> {
        match self.state {
            SectionState::Editing { .. } | SectionState::ConfirmingDelete { .. } => {
                self.state = SectionState::Idle;
                Ok(())
            }
            SectionState::Idle => Ok(()),
            SectionState::Deleting { .. } => Err(self.invalid_transition("cancel")),
        }
    }

    /// Creates when nothing is selected, otherwise updates the selection.
    /// On success the parent is reloaded and the section goes idle; on
    /// failure the modal stays open with the form's selection.
    pub async fn submit<R: Refresh + ?Sized>(&mut self, form: &E::Form, parent: &mut R) -> Result<(), AppError> {
        let selected = match &self.state {
            SectionState::Editing { selected } => selected.clone(),
            _ => return Err(self.invalid_transition("submit")),
        };

        let result = match &selected {
            None => E::create(self.api.as_ref(), form).await,
            Some(current) => E::update(self.api.as_ref(), current, form).await,
        }
        .and_then(ensure_success);

        let verb = if selected.is_some() { "updated" } else { "created" };
        match result {
            Ok(ack) => {
                info!("{} {}", E::LABEL, verb);
                self.notifier.notify(Toast::success(
                    "Success",
                    ack.message
                        .filter(|m| !m.trim().is_empty())
                        .unwrap_or_else(|| format!("{} {} successfully", E::LABEL, verb)),
                ));
                self.state = SectionState::Idle;
                self.refresh_parent(parent).await;
                Ok(())
            }
            Err(e) => {
                warn!("Failed to save {}: {}", E::LABEL, e);
                self.notifier.notify(Toast::error("Error", e.toast_message()));
                Err(e)
            }
        }
    }

    /// Confirms a pending delete and performs it.
    pub async fn confirm_delete<R: Refresh + ?Sized>(&mut self, parent: &mut R) -> Result<(), AppError> {
        let selected = match std::mem::replace(&mut self.state, SectionState::Idle) {
            SectionState::ConfirmingDelete { selected } => selected,
            other => {
                self.state = other;
                return Err(self.invalid_transition("confirm delete of"));
            }
        };

        let key = match selected.record_key() {
            Ok(key) => key,
            Err(e) => {
                warn!("Refusing to delete {}: {}", E::LABEL, e);
                self.notifier.notify(Toast::error("Error", e.toast_message()));
                self.state = SectionState::ConfirmingDelete { selected };
                return Err(e);
            }
        };

        self.state = SectionState::Deleting { selected };
        let result = E::delete(self.api.as_ref(), &key).await.and_then(ensure_success);

        match result {
            Ok(ack) => {
                info!("{} {} deleted", E::LABEL, key);
                self.notifier.notify(Toast::success(
                    "Success",
                    ack.message
                        .filter(|m| !m.trim().is_empty())
                        .unwrap_or_else(|| format!("{} deleted successfully", E::LABEL)),
                ));
                self.state = SectionState::Idle;
                self.refresh_parent(parent).await;
                Ok(())
            }
            Err(e) => {
                warn!("Failed to delete {} {}: {}", E::LABEL, key, e);
                self.notifier.notify(Toast::error("Error", e.toast_message()));
                if let SectionState::Deleting { selected } =
                    std::mem::replace(&mut self.state, SectionState::Idle)
                {
                    self.state = SectionState::ConfirmingDelete { selected };
                }
                Err(e)
            }
        }
    }

    // The mutation already went through; a failed reload has raised its own
    // toast, so it is only logged here.
    async fn refresh_parent<R: Refresh + ?Sized>(&self, parent: &mut R) {
        if let Err(e) = parent.refresh().await {
            warn!("Reload after {} change failed: {}", E::LABEL, e);
        }
    }
}
