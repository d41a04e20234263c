//! JSON settings export and import
//!
//! Exports are written next to the images as
//! `exported-settings{Mon}{DD}_{HH}:{MM}{AM|PM}.json`. An import takes the
//! stored stack count as is; it is not recomputed from the arc.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use photorig_core::config::{RoutineSettings, SettingsSnapshot};
use thiserror::Error;

/// Settings file errors
#[derive(Debug, Error)]
pub enum SettingsFileError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// File name for an export made at `when`
pub fn export_file_name(when: &DateTime<Local>) -> String {
    format!("exported-settings{}.json", when.format("%b%d_%I:%M%p"))
}

/// Write the exportable settings into `dir`
pub fn export_settings(
    settings: &RoutineSettings,
    dir: &Path,
    when: &DateTime<Local>,
) -> Result<PathBuf, SettingsFileError> {
    let path = dir.join(export_file_name(when));
    let json = serde_json::to_string_pretty(&settings.snapshot()).map_err(|source| {
        SettingsFileError::Json {
            path: path.clone(),
            source,
        }
    })?;
    fs::write(&path, json).map_err(|source| SettingsFileError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Read a settings record written by [`export_settings`]
pub fn import_settings(path: &Path) -> Result<SettingsSnapshot, SettingsFileError> {
    let text = fs::read_to_string(path).map_err(|source| SettingsFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| SettingsFileError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use photorig_core::Direction;

    fn afternoon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 7, 14, 5, 0).unwrap()
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(
            export_file_name(&afternoon()),
            "exported-settingsMar07_02:05PM.json"
        );
    }

    #[test]
    fn test_export_uses_display_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_settings(&RoutineSettings::default(), dir.path(), &afternoon()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["Project Name"], "shot");
        assert_eq!(value["Number of Shots in Stack"], 20);
        assert_eq!(value["Number of Stacks"], 72);
        assert_eq!(value["AWB Mode"], "auto");
        assert_eq!(value["Shutter Speed"], "auto");
        assert_eq!(value["Direction"], "Clockwise");
        assert_eq!(value.as_object().unwrap().len(), 14);
    }

    #[test]
    fn test_import_restores_exported_settings() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = RoutineSettings::default();
        settings.set_project_name("beetle").unwrap();
        settings.set_dolly_movement(8).unwrap();
        settings.set_direction(Direction::CounterClockwise).unwrap();
        let path = export_settings(&settings, dir.path(), &afternoon()).unwrap();

        let snapshot = import_settings(&path).unwrap();
        let mut restored = RoutineSettings::default();
        restored.apply_snapshot(&snapshot).unwrap();
        assert_eq!(restored.project_name().as_str(), "beetle");
        assert_eq!(restored.number_stacks(), 45);
        assert_eq!(restored.direction(), Direction::CounterClockwise);
    }

    #[test]
    fn test_import_keeps_stack_count_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("defaults.json");
        fs::write(
            &path,
            r#"{
                "Brightness": 60, "Contrast": -10, "AWB Mode": "cloudy",
                "AWB Gains": 1.5, "ISO": 400, "Framerate": "1fps",
                "Shutter Speed": "1/125", "Project Name": "moth",
                "Camera Movement": 12, "Dolly Movement": 5, "Arc Length": 360,
                "Number of Shots in Stack": 15, "Number of Stacks": 10,
                "Direction": "Counter-Clockwise"
            }"#,
        )
        .unwrap();

        let snapshot = import_settings(&path).unwrap();
        assert_eq!(snapshot.number_stacks, 10);
        assert_eq!(snapshot.shutter_speed.as_str(), "1/125");

        let mut settings = RoutineSettings::default();
        settings.apply_snapshot(&snapshot).unwrap();
        assert_eq!(settings.number_stacks(), 10);
        assert_eq!(settings.camera().iso, 400);
    }

    #[test]
    fn test_import_missing_key_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(&path, r#"{ "Brightness": 60 }"#).unwrap();
        assert!(matches!(
            import_settings(&path),
            Err(SettingsFileError::Json { .. })
        ));
    }
}
