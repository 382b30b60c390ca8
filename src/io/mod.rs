pub mod file;
pub mod json;

pub use file::{load_project, save_project};
pub use json::{project_from_json, project_to_json, ExportError, ImportError};
