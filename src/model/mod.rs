pub mod date;
pub mod milestone;
pub mod package;
pub mod project;
pub mod scale;

pub use milestone::Milestone;
pub use package::{ScheduleMode, SubPackage, WorkPackage};
pub use project::{Project, ProjectSettings};
pub use scale::{Resolution, ScaleConfig};
