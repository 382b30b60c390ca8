//! Project JSON import/export with validation.

use thiserror::Error;

use crate::model::Project;

/// Import failures. An import is atomic: any error means no project is
/// produced and the caller keeps whatever it had.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("could not read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid project JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{entity} '{title}' has start {start} after end {end}")]
    InvalidRange {
        entity: &'static str,
        title: String,
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not write file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not serialize project: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialize a project to pretty-printed JSON. Unset optional fields are
/// omitted rather than written as null.
pub fn project_to_json(project: &Project) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(project)?)
}

/// Parse and validate a project from JSON text.
///
/// Dates must be ISO `YYYY-MM-DD`. Any entity whose start lies after its
/// end is rejected here, so the layout engine can rely on ordered ranges.
pub fn project_from_json(text: &str) -> Result<Project, ImportError> {
    let project: Project = serde_json::from_str(text)?;
    validate(&project)?;
    Ok(project)
}

fn validate(project: &Project) -> Result<(), ImportError> {
    if let (Some(start), Some(end)) = (project.start, project.end) {
        if start > end {
            return Err(ImportError::InvalidRange {
                entity: "project",
                title: project.name.clone(),
                start,
                end,
            });
        }
    }
    for wp in &project.work_packages {
        if wp.start > wp.end {
            return Err(ImportError::InvalidRange {
                entity: "work package",
                title: wp.title.clone(),
                start: wp.start,
                end: wp.end,
            });
        }
        for sp in &wp.sub_packages {
            if sp.start > sp.end {
                return Err(ImportError::InvalidRange {
                    entity: "sub-package",
                    title: sp.title.clone(),
                    start: sp.start,
                    end: sp.end,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::date::parse_date;
    use crate::model::{Milestone, Project, ScheduleMode, SubPackage, WorkPackage};
    use chrono::NaiveDate;
    use egui::Color32;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn rich_project() -> Project {
        let mut project = Project::new("Harbor Upgrade");
        project.description = Some("Quay and crane works".into());
        project.start = Some(d("2023-01-01"));
        project.end = Some(d("2023-12-31"));
        project.settings.clamp_to_manual_parent = true;

        let mut manual = WorkPackage::new("Quay wall", d("2023-02-01"), d("2023-05-31"));
        manual.mode = ScheduleMode::Manual;
        let mut piling = SubPackage::new("Piling", d("2023-02-10"), d("2023-03-15"));
        piling.category = Some("Marine".into());
        piling.color = Some(Color32::from_rgb(0x1F, 0x4E, 0x79));
        piling.assignees = Some(vec!["AB".into(), "CD".into()]);
        manual.sub_packages.push(piling);
        manual
            .sub_packages
            .push(SubPackage::new("Capping beam", d("2023-03-10"), d("2023-05-20")));
        project.work_packages.push(manual);

        let mut auto = WorkPackage::new("Crane install", d("2023-06-01"), d("2023-06-02"));
        auto.collapsed = true;
        auto.sub_packages
            .push(SubPackage::new("Foundations", d("2023-06-01"), d("2023-07-15")));
        project.work_packages.push(auto);

        project.milestones.push(Milestone::new("Handover", d("2023-11-30")));
        project
    }

    #[test]
    fn json_round_trip_preserves_the_project() {
        let project = rich_project();
        let json = project_to_json(&project).unwrap();
        let back = project_from_json(&json).unwrap();
        assert_eq!(back, project);
    }

    #[test]
    fn unset_optional_fields_are_omitted() {
        let mut project = Project::new("Bare");
        project
            .work_packages
            .push(WorkPackage::new("Plain", d("2023-03-01"), d("2023-03-10")));

        let value = serde_json::to_value(&project).unwrap();
        assert!(value.get("start").is_none());
        assert!(value.get("end").is_none());
        assert!(value.get("description").is_none());

        let sub_free = &value["work_packages"][0];
        assert!(sub_free.get("category").is_none());
        assert!(sub_free.get("color").is_none());
    }

    #[test]
    fn schedule_mode_serializes_lowercase() {
        let value = serde_json::to_value(ScheduleMode::Auto).unwrap();
        assert_eq!(value, serde_json::json!("auto"));
        let value = serde_json::to_value(ScheduleMode::Manual).unwrap();
        assert_eq!(value, serde_json::json!("manual"));
    }

    #[test]
    fn dates_serialize_as_iso_strings() {
        let project = rich_project();
        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["start"], serde_json::json!("2023-01-01"));
        assert_eq!(
            value["milestones"][0]["date"],
            serde_json::json!("2023-11-30")
        );
    }

    #[test]
    fn malformed_dates_are_rejected() {
        let json = r#"{
            "id": "7f2c1f84-9f0b-4a46-8f28-0f36a4c2a1de",
            "name": "Broken",
            "milestones": [
                { "id": "4cb67a4e-2a7f-4f1c-9a3e-d2b7f0a6c111", "title": "Bad", "date": "2023-13-40" }
            ]
        }"#;
        assert!(matches!(
            project_from_json(json).unwrap_err(),
            ImportError::Json(_)
        ));
    }

    #[test]
    fn inverted_ranges_are_rejected_with_the_entity_named() {
        let mut project = rich_project();
        project.work_packages[0].sub_packages[0].start = d("2023-04-01");
        project.work_packages[0].sub_packages[0].end = d("2023-03-01");
        let json = project_to_json(&project).unwrap();

        let err = project_from_json(&json).unwrap_err();
        match err {
            ImportError::InvalidRange { entity, title, .. } => {
                assert_eq!(entity, "sub-package");
                assert_eq!(title, "Piling");
            }
            other => panic!("expected InvalidRange, got {other:?}"),
        }
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let json = r#"{
            "id": "7f2c1f84-9f0b-4a46-8f28-0f36a4c2a1de",
            "name": "Minimal"
        }"#;
        let project = project_from_json(json).unwrap();
        assert!(project.work_packages.is_empty());
        assert!(project.milestones.is_empty());
        assert!(!project.settings.clamp_to_manual_parent);
    }
}
