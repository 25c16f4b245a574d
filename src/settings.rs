//! Game settings file merge.
//!
//! The game keeps its settings as `key = value` lines. A HUD definition is
//! stored under `hud_definition` (while playing) and `hud_definition_spec`
//! (while spectating). Merging drops the old lines for the targeted keys and
//! appends fresh ones; every other line is kept.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{HudError, Result};

pub const PLAYING_KEY: &str = "hud_definition";
pub const SPECTATING_KEY: &str = "hud_definition_spec";

/// Which HUD definitions to overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HudTargets {
    pub playing: bool,
    pub spectating: bool,
}

impl HudTargets {
    fn keys(&self) -> impl Iterator<Item = &'static str> {
        [
            (self.playing, PLAYING_KEY),
            (self.spectating, SPECTATING_KEY),
        ]
        .into_iter()
        .filter_map(|(on, key)| on.then_some(key))
    }

    pub fn is_empty(&self) -> bool {
        !self.playing && !self.spectating
    }
}

/// Replace the targeted HUD definitions in a settings file's text.
pub fn merge_settings(existing: &str, hud_json: &str, targets: HudTargets) -> Result<String> {
    if targets.is_empty() {
        return Err(HudError::SettingsError(
            "Please choose at least one of playing HUD or spectating HUD".to_string(),
        ));
    }

    let mut out = String::with_capacity(existing.len() + hud_json.len() * 2);
    for line in existing.lines() {
        let line = line.trim();
        let key = line.split('=').next().unwrap_or("").trim();
        if targets.keys().any(|k| k == key) {
            continue;
        }
        out.push_str(line);
        out.push('\n');
    }

    for key in targets.keys() {
        out.push_str(key);
        out.push_str(" = ");
        out.push_str(hud_json);
        out.push('\n');
    }
    Ok(out)
}

/// Where to back up `settings` before overwriting it, named after the
/// current UTC time.
pub fn backup_path(dir: &Path) -> PathBuf {
    let stamp = chrono::Utc::now().format("%b-%a-%H-%M-%S");
    dir.join(format!("Settings_Backup_{}.txt", stamp))
}

/// Back up the settings file into `backup_dir`, then merge the HUD JSON into
/// it. Returns the backup path.
pub fn write_settings(
    settings: &Path,
    backup_dir: &Path,
    hud_json: &str,
    targets: HudTargets,
) -> Result<PathBuf> {
    if !settings.is_file() {
        return Err(HudError::SettingsError(format!(
            "Invalid settings file path: {}",
            settings.display()
        )));
    }

    let existing = fs::read_to_string(settings)?;
    let merged = merge_settings(&existing, hud_json, targets)?;

    let backup = backup_path(backup_dir);
    fs::copy(settings, &backup)?;
    log::info!("Backup written to {}", backup.display());

    fs::write(settings, merged)?;
    Ok(backup)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXISTING: &str = "fov = 100\nhud_definition = {\"old\":1}\n  sensitivity=2.5  \nhud_definition_spec = {\"old\":2}\n";

    #[test]
    fn test_replaces_playing_only() {
        let merged = merge_settings(
            EXISTING,
            "{}",
            HudTargets {
                playing: true,
                spectating: false,
            },
        )
        .unwrap();
        assert_eq!(
            merged,
            "fov = 100\nsensitivity=2.5\nhud_definition_spec = {\"old\":2}\nhud_definition = {}\n"
        );
    }

    #[test]
    fn test_replaces_both() {
        let merged = merge_settings(
            EXISTING,
            "{}",
            HudTargets {
                playing: true,
                spectating: true,
            },
        )
        .unwrap();
        assert_eq!(
            merged,
            "fov = 100\nsensitivity=2.5\nhud_definition = {}\nhud_definition_spec = {}\n"
        );
    }

    #[test]
    fn test_blank_lines_kept() {
        let merged = merge_settings(
            "a = 1\n\nb = 2\n",
            "{}",
            HudTargets {
                playing: false,
                spectating: true,
            },
        )
        .unwrap();
        assert_eq!(merged, "a = 1\n\nb = 2\nhud_definition_spec = {}\n");
    }

    #[test]
    fn test_requires_a_target() {
        assert!(merge_settings(EXISTING, "{}", HudTargets::default()).is_err());
    }

    #[test]
    fn test_backup_name() {
        let path = backup_path(Path::new("/tmp"));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("Settings_Backup_"));
        assert!(name.ends_with(".txt"));
    }

    #[test]
    fn test_write_settings_backs_up_first() {
        let dir = std::env::temp_dir().join(format!("texthud-settings-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let settings = dir.join("Settings.txt");
        fs::write(&settings, EXISTING).unwrap();

        let backup = write_settings(
            &settings,
            &dir,
            "{\"new\":true}",
            HudTargets {
                playing: true,
                spectating: false,
            },
        )
        .unwrap();

        assert_eq!(fs::read_to_string(&backup).unwrap(), EXISTING);
        let written = fs::read_to_string(&settings).unwrap();
        assert!(written.ends_with("hud_definition = {\"new\":true}\n"));
        fs::remove_dir_all(&dir).unwrap();
    }
}
