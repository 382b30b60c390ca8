//! Ownership and mutation of the canonical project.
//!
//! Every edit the UI or a finished drag gesture wants to make goes through
//! [`ProjectStore`]. Adds mint fresh ids, updates merge field patches, and
//! deletes cascade to owned children. Rejected mutations leave the project
//! untouched.

use chrono::NaiveDate;
use egui::Color32;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::interact::{DragCommit, DragTarget};
use crate::model::{Milestone, Project, ScheduleMode, SubPackage, WorkPackage};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("unknown work package {0}")]
    UnknownWorkPackage(Uuid),
    #[error("unknown sub-package {sub_package} in work package {work_package}")]
    UnknownSubPackage {
        work_package: Uuid,
        sub_package: Uuid,
    },
    #[error("unknown milestone {0}")]
    UnknownMilestone(Uuid),
    #[error("invalid range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
}

/// Partial update for a work package. `None` fields stay untouched.
#[derive(Debug, Clone, Default)]
pub struct WorkPackagePatch {
    pub title: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub mode: Option<ScheduleMode>,
    pub collapsed: Option<bool>,
}

/// Partial update for a sub-package. `None` fields stay untouched; for the
/// optional metadata, `Some(None)` clears the field.
#[derive(Debug, Clone, Default)]
pub struct SubPackagePatch {
    pub title: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub category: Option<Option<String>>,
    pub color: Option<Option<Color32>>,
    pub assignees: Option<Option<Vec<String>>>,
}

/// Partial update for a milestone.
#[derive(Debug, Clone, Default)]
pub struct MilestonePatch {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Default)]
pub struct ProjectStore {
    project: Project,
}

impl ProjectStore {
    pub fn new(project: Project) -> Self {
        Self { project }
    }

    /// Read-only snapshot for layout and rendering.
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Swap in a freshly loaded or imported project.
    pub fn replace(&mut self, project: Project) {
        debug!(name = %project.name, "project replaced");
        self.project = project;
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.project.name = name.into();
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.project.description = description.filter(|d| !d.is_empty());
    }

    /// Set or clear the explicit timeline bounds.
    pub fn set_bounds(
        &mut self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<(), StoreError> {
        if let (Some(start), Some(end)) = (start, end) {
            check_range(start, end)?;
        }
        self.project.start = start;
        self.project.end = end;
        Ok(())
    }

    pub fn set_clamping(&mut self, enabled: bool) {
        self.project.settings.clamp_to_manual_parent = enabled;
    }

    pub fn add_work_package(
        &mut self,
        title: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Uuid, StoreError> {
        check_range(start, end)?;
        let wp = WorkPackage::new(title, start, end);
        let id = wp.id;
        self.project.work_packages.push(wp);
        Ok(id)
    }

    pub fn update_work_package(
        &mut self,
        id: Uuid,
        patch: WorkPackagePatch,
    ) -> Result<(), StoreError> {
        let wp = self.work_package_mut(id)?;
        let start = patch.start.unwrap_or(wp.start);
        let end = patch.end.unwrap_or(wp.end);
        check_range(start, end)?;
        wp.start = start;
        wp.end = end;
        if let Some(title) = patch.title {
            wp.title = title;
        }
        if let Some(mode) = patch.mode {
            wp.mode = mode;
        }
        if let Some(collapsed) = patch.collapsed {
            wp.collapsed = collapsed;
        }
        Ok(())
    }

    /// Delete a work package and every sub-package it owns.
    pub fn delete_work_package(&mut self, id: Uuid) -> Result<(), StoreError> {
        let before = self.project.work_packages.len();
        self.project.work_packages.retain(|wp| wp.id != id);
        if self.project.work_packages.len() == before {
            return Err(StoreError::UnknownWorkPackage(id));
        }
        debug!(%id, "work package deleted");
        Ok(())
    }

    pub fn toggle_collapsed(&mut self, id: Uuid) -> Result<(), StoreError> {
        let wp = self.work_package_mut(id)?;
        wp.collapsed = !wp.collapsed;
        Ok(())
    }

    pub fn add_sub_package(
        &mut self,
        work_package: Uuid,
        title: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Uuid, StoreError> {
        check_range(start, end)?;
        let wp = self.work_package_mut(work_package)?;
        let sp = SubPackage::new(title, start, end);
        let id = sp.id;
        wp.sub_packages.push(sp);
        Ok(id)
    }

    pub fn update_sub_package(
        &mut self,
        work_package: Uuid,
        sub_package: Uuid,
        patch: SubPackagePatch,
    ) -> Result<(), StoreError> {
        let sp = self.sub_package_mut(work_package, sub_package)?;
        let start = patch.start.unwrap_or(sp.start);
        let end = patch.end.unwrap_or(sp.end);
        check_range(start, end)?;
        sp.start = start;
        sp.end = end;
        if let Some(title) = patch.title {
            sp.title = title;
        }
        if let Some(category) = patch.category {
            sp.category = category.filter(|c| !c.is_empty());
        }
        if let Some(color) = patch.color {
            sp.color = color;
        }
        if let Some(assignees) = patch.assignees {
            sp.assignees = assignees.filter(|a| !a.is_empty());
        }
        Ok(())
    }

    pub fn delete_sub_package(
        &mut self,
        work_package: Uuid,
        sub_package: Uuid,
    ) -> Result<(), StoreError> {
        let wp = self.work_package_mut(work_package)?;
        let before = wp.sub_packages.len();
        wp.sub_packages.retain(|sp| sp.id != sub_package);
        if wp.sub_packages.len() == before {
            return Err(StoreError::UnknownSubPackage {
                work_package,
                sub_package,
            });
        }
        Ok(())
    }

    pub fn add_milestone(&mut self, title: impl Into<String>, date: NaiveDate) -> Uuid {
        let ms = Milestone::new(title, date);
        let id = ms.id;
        self.project.milestones.push(ms);
        id
    }

    pub fn update_milestone(&mut self, id: Uuid, patch: MilestonePatch) -> Result<(), StoreError> {
        let ms = self.milestone_mut(id)?;
        if let Some(title) = patch.title {
            ms.title = title;
        }
        if let Some(date) = patch.date {
            ms.date = date;
        }
        Ok(())
    }

    pub fn delete_milestone(&mut self, id: Uuid) -> Result<(), StoreError> {
        let before = self.project.milestones.len();
        self.project.milestones.retain(|ms| ms.id != id);
        if self.project.milestones.len() == before {
            return Err(StoreError::UnknownMilestone(id));
        }
        Ok(())
    }

    /// Apply the single update a finished drag produced. Fails when the
    /// target was deleted mid-gesture.
    pub fn apply(&mut self, commit: DragCommit) -> Result<(), StoreError> {
        match commit.target {
            DragTarget::SubPackage {
                work_package,
                sub_package,
            } => self.update_sub_package(
                work_package,
                sub_package,
                SubPackagePatch {
                    start: Some(commit.dates.start),
                    end: Some(commit.dates.end),
                    ..SubPackagePatch::default()
                },
            ),
            DragTarget::Milestone { milestone } => self.update_milestone(
                milestone,
                MilestonePatch {
                    date: Some(commit.dates.start),
                    ..MilestonePatch::default()
                },
            ),
        }
    }

    /// Whether a drag target still exists in the project.
    pub fn contains(&self, target: DragTarget) -> bool {
        match target {
            DragTarget::SubPackage {
                work_package,
                sub_package,
            } => self
                .project
                .work_package(work_package)
                .is_some_and(|wp| wp.sub_package(sub_package).is_some()),
            DragTarget::Milestone { milestone } => self.project.milestone(milestone).is_some(),
        }
    }

    fn work_package_mut(&mut self, id: Uuid) -> Result<&mut WorkPackage, StoreError> {
        self.project
            .work_packages
            .iter_mut()
            .find(|wp| wp.id == id)
            .ok_or(StoreError::UnknownWorkPackage(id))
    }

    fn sub_package_mut(
        &mut self,
        work_package: Uuid,
        sub_package: Uuid,
    ) -> Result<&mut SubPackage, StoreError> {
        self.work_package_mut(work_package)?
            .sub_packages
            .iter_mut()
            .find(|sp| sp.id == sub_package)
            .ok_or(StoreError::UnknownSubPackage {
                work_package,
                sub_package,
            })
    }

    fn milestone_mut(&mut self, id: Uuid) -> Result<&mut Milestone, StoreError> {
        self.project
            .milestones
            .iter_mut()
            .find(|ms| ms.id == id)
            .ok_or(StoreError::UnknownMilestone(id))
    }
}

fn check_range(start: NaiveDate, end: NaiveDate) -> Result<(), StoreError> {
    if start > end {
        return Err(StoreError::InvalidRange { start, end });
    }
    Ok(())
}
