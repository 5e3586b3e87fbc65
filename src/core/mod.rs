pub mod coordinator;
pub mod gpa;
pub mod notify;
pub mod render;
pub mod scale;
pub mod store;
pub mod transcript;

pub use crate::domain::model::{GradeEntry, GradeRecord, Semester, Subject, SubjectId};
pub use crate::domain::ports::{ConfigProvider, GradeApi, Storage};
pub use crate::utils::error::Result;
