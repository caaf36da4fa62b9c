pub mod account;
pub mod assign_request;
pub mod class;
pub mod course;
pub mod forms;
pub mod id;
pub mod lenient;
pub mod semester;

pub use account::{HoD, Lecturer, Role, RoleRecord, Student};
pub use assign_request::{AssignRequest, AssignRequestStatus};
pub use class::{Class, StudentGroup};
pub use course::{
    Course, CourseElement, CourseItem, SemesterCourse, percent_to_weight, weight_to_percent,
};
pub use forms::{
    AssignRequestForm, ClassForm, CourseElementForm, CourseLinkForm, SemesterForm,
    StudentGroupForm,
};
pub use id::EntityId;
pub use lenient::null_as_default;
pub use semester::Semester;
