pub mod notifier;
pub mod plan_loader;
pub mod roles;
pub mod section;

pub use notifier::{Notifier, Toast, ToastKind, TracingNotifier};
pub use plan_loader::{PlanDetailLoader, PlanView, Refresh, load_plan_view};
pub use roles::{find_hod_by_account_id, resolve_current_role_id};
pub use section::{
    AssignRequestSection, ClassSection, CourseElementSection, CourseSection, SectionController,
    SectionEntity, SectionState, StudentSection,
};
