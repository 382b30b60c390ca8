//! Clarity Timeline: a native project-timeline (Gantt) editor.
//!
//! The engineering core is UI-independent: [`model`] holds the entities and
//! the date/zoom math, [`layout`] turns a project snapshot into pixel
//! geometry, [`interact`] runs drag/resize gestures, [`store`] owns the
//! canonical project and applies mutations, [`io`] handles the JSON
//! interchange. The [`ui`] layer and [`app`] shell wire that core into an
//! egui application.

pub mod app;
pub mod interact;
pub mod io;
pub mod layout;
pub mod logging;
pub mod model;
pub mod store;
pub mod ui;
