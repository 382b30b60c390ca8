use std::path::Path;

use tracing::info;

use crate::model::Project;

use super::json::{project_from_json, project_to_json, ExportError, ImportError};

/// Save a project to a JSON file.
pub fn save_project(project: &Project, path: &Path) -> Result<(), ExportError> {
    let json = project_to_json(project)?;
    std::fs::write(path, json)?;
    info!(path = %path.display(), "project saved");
    Ok(())
}

/// Load and validate a project from a JSON file.
pub fn load_project(path: &Path) -> Result<Project, ImportError> {
    let text = std::fs::read_to_string(path)?;
    let project = project_from_json(&text)?;
    info!(path = %path.display(), name = %project.name, "project loaded");
    Ok(project)
}
