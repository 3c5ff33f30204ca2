// StudyFlow platform paths
// Selected per target OS at compile time.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
use linux as os;

#[cfg(target_os = "macos")]
use macos as os;

#[cfg(target_os = "windows")]
use windows as os;

/// Directory holding `settings.json`.
///
/// - **Linux**: `$XDG_CONFIG_HOME/studyflow` or `~/.config/studyflow`
/// - **macOS**: `~/Library/Application Support/StudyFlow`
/// - **Windows**: `%APPDATA%/StudyFlow`
pub fn get_config_dir() -> PathBuf {
    os::get_config_dir()
}

/// Directory holding `studyflow.db`.
///
/// - **Linux**: `$XDG_DATA_HOME/studyflow` or `~/.local/share/studyflow`
/// - **macOS**: `~/Library/Application Support/StudyFlow`
/// - **Windows**: `%APPDATA%/StudyFlow`
pub fn get_data_dir() -> PathBuf {
    os::get_data_dir()
}
