// StudyFlow shared type definitions
// Each submodule defines records exchanged with the background service and the UI.

pub mod bookmark;
pub mod errors;
pub mod goal;
pub mod note;
pub mod reminder;
pub mod settings;
pub mod stats;
