use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::date;
use super::milestone::Milestone;
use super::package::WorkPackage;

/// Project-wide behavior switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSettings {
    /// Keep sub-packages inside their parent's range while dragging, for
    /// parents in manual mode.
    #[serde(default)]
    pub clamp_to_manual_parent: bool,
}

/// The whole editable document: work packages, milestones and settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    /// Optional description shown in the chart header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional explicit timeline bounds. They widen the visible window but
    /// never clip entities lying outside them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
    #[serde(default)]
    pub settings: ProjectSettings,
    #[serde(default)]
    pub work_packages: Vec<WorkPackage>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: "Untitled Project".to_string(),
            description: None,
            start: None,
            end: None,
            settings: ProjectSettings::default(),
            work_packages: Vec::new(),
            milestones: Vec::new(),
        }
    }
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Raw date extent of everything on the timeline: the explicit bounds
    /// (when set) plus every package range, sub-package range and milestone.
    /// `None` when the project is completely empty.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates: Vec<NaiveDate> = Vec::new();
        dates.extend(self.start);
        dates.extend(self.end);
        for wp in &self.work_packages {
            let (start, end) = wp.effective_range();
            dates.push(start);
            dates.push(end);
            for sp in &wp.sub_packages {
                dates.push(sp.start);
                dates.push(sp.end);
            }
        }
        dates.extend(self.milestones.iter().map(|ms| ms.date));

        let min = date::min_date(dates.iter().copied())?;
        let max = date::max_date(dates.iter().copied())?;
        Some((min, max))
    }

    pub fn work_package(&self, id: Uuid) -> Option<&WorkPackage> {
        self.work_packages.iter().find(|wp| wp.id == id)
    }

    pub fn milestone(&self, id: Uuid) -> Option<&Milestone> {
        self.milestones.iter().find(|ms| ms.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::package::SubPackage;

    fn date(s: &str) -> NaiveDate {
        date::parse_date(s).unwrap()
    }

    #[test]
    fn empty_project_has_no_bounds() {
        assert_eq!(Project::default().date_bounds(), None);
    }

    #[test]
    fn bounds_take_the_union_of_all_dates() {
        let mut project = Project::new("Demo");
        project.start = Some(date("2023-02-01"));
        project.end = Some(date("2023-02-28"));

        let mut wp = WorkPackage::new("Build", date("2023-03-01"), date("2023-03-20"));
        wp.sub_packages.push(SubPackage::new("Pour", date("2023-03-05"), date("2023-04-15")));
        project.work_packages.push(wp);
        project.milestones.push(Milestone::new("Kickoff", date("2023-01-10")));

        // Milestone widens the left edge, the sub-package the right one, the
        // explicit bounds neither clip nor shrink anything.
        assert_eq!(
            project.date_bounds(),
            Some((date("2023-01-10"), date("2023-04-15")))
        );
    }

    #[test]
    fn explicit_bounds_widen_an_otherwise_small_window() {
        let mut project = Project::new("Demo");
        project.start = Some(date("2023-01-01"));
        project.end = Some(date("2023-12-31"));
        project.milestones.push(Milestone::new("Review", date("2023-06-15")));

        assert_eq!(
            project.date_bounds(),
            Some((date("2023-01-01"), date("2023-12-31")))
        );
    }
}
