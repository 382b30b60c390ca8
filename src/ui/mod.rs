pub mod dialogs;
pub mod theme;
pub mod timeline_view;
pub mod toolbar;

use uuid::Uuid;

/// What the user currently has selected on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    WorkPackage(Uuid),
    SubPackage { work_package: Uuid, sub_package: Uuid },
    Milestone(Uuid),
}
