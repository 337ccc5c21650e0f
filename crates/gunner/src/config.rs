//! Gunner configuration. Loaded from config.ron at startup.

use grid_renderer::DisplayOptions;
use serde::{Deserialize, Serialize};
use space_core::Catalog;
use std::path::{Path, PathBuf};

/// One scripted input, applied at the start of a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Left click at a device position.
    Click { x: f32, y: f32 },
    ZoomIn,
    ZoomOut,
    TogglePolar,
    /// Remove the ship with this scenario index from the world.
    Destroy(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub frame: u32,
    pub action: Action,
}

/// Persistent gunner settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GunnerConfig {
    /// Surface width in pixels.
    #[serde(default = "default_surface_width")]
    pub surface_width: f32,
    /// Surface height in pixels.
    #[serde(default = "default_surface_height")]
    pub surface_height: f32,
    #[serde(default = "default_dpi")]
    pub dpi: f32,
    /// Initial km per inch. Falls back to the catalog's default scale.
    #[serde(default)]
    pub initial_scale: Option<f64>,
    #[serde(default)]
    pub polar: bool,
    #[serde(default = "default_true")]
    pub static_grid: bool,
    /// Display option names, e.g. `"HOSTILE_VULNERABLE_SECTORS"`.
    #[serde(default = "default_options")]
    pub options: Vec<String>,
    #[serde(default)]
    pub friendly_fire: bool,
    /// Frames to run before exiting.
    #[serde(default = "default_frames")]
    pub frames: u32,
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Ships besides the own ship.
    #[serde(default = "default_ships")]
    pub ships: usize,
    #[serde(default = "default_missiles")]
    pub missiles: usize,
    #[serde(default = "default_stars")]
    pub stars: usize,
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,
    #[serde(default = "default_script")]
    pub script: Vec<ScriptStep>,
}

fn default_surface_width() -> f32 {
    800.0
}
fn default_surface_height() -> f32 {
    600.0
}
fn default_dpi() -> f32 {
    96.0
}
fn default_true() -> bool {
    true
}
fn default_options() -> Vec<String> {
    [
        "FRIENDLY_VULNERABLE_SECTORS",
        "HOSTILE_VULNERABLE_SECTORS",
        "MY_MISSILE_CIRCLES",
        "FRIENDLY_SECTORS_BY_MY_MISSILE_RANGE",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
fn default_frames() -> u32 {
    6
}
fn default_seed() -> u64 {
    7
}
fn default_ships() -> usize {
    6
}
fn default_missiles() -> usize {
    4
}
fn default_stars() -> usize {
    2
}
fn default_catalog_path() -> PathBuf {
    PathBuf::from("catalog.ron")
}
fn default_script() -> Vec<ScriptStep> {
    vec![
        ScriptStep {
            frame: 1,
            action: Action::Click { x: 400.0, y: 300.0 },
        },
        ScriptStep {
            frame: 2,
            action: Action::ZoomOut,
        },
        ScriptStep {
            frame: 3,
            action: Action::Click { x: 400.0, y: 300.0 },
        },
        ScriptStep {
            frame: 4,
            action: Action::TogglePolar,
        },
        ScriptStep {
            frame: 5,
            action: Action::Destroy(0),
        },
    ]
}

impl Default for GunnerConfig {
    fn default() -> Self {
        Self {
            surface_width: default_surface_width(),
            surface_height: default_surface_height(),
            dpi: default_dpi(),
            initial_scale: None,
            polar: false,
            static_grid: default_true(),
            options: default_options(),
            friendly_fire: false,
            frames: default_frames(),
            seed: default_seed(),
            ships: default_ships(),
            missiles: default_missiles(),
            stars: default_stars(),
            catalog_path: default_catalog_path(),
            script: default_script(),
        }
    }
}

impl GunnerConfig {
    /// Load config from `path`. If the file is missing or invalid, returns default config.
    pub fn load(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Save current config to `path`. Logs on error.
    pub fn save(&self, path: &Path) {
        if let Ok(s) = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            if let Err(e) = std::fs::write(path, s) {
                log::warn!("Could not write config to {:?}: {}", path, e);
            }
        }
    }

    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions::from_names(&self.options)
    }

    /// Actions scheduled for `frame`, in script order.
    pub fn actions_at(&self, frame: u32) -> impl Iterator<Item = &Action> + '_ {
        self.script
            .iter()
            .filter(move |step| step.frame == frame)
            .map(|step| &step.action)
    }
}

/// Load the catalog at `path`. Missing or invalid files fall back to the default catalog.
pub fn load_catalog(path: &Path) -> Catalog {
    match std::fs::read_to_string(path) {
        Ok(data) => match Catalog::from_ron(&data) {
            Ok(catalog) => catalog,
            Err(e) => {
                log::warn!("Invalid catalog at {:?}: {}, using defaults", path, e);
                Catalog::default()
            }
        },
        Err(_) => {
            log::info!("No catalog at {:?}, using defaults", path);
            Catalog::default()
        }
    }
}

pub fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("config.ron")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let config: GunnerConfig = ron::from_str(
            r#"(
                surface_width: 1024.0,
                options: ["NO_GRID"],
                script: [(frame: 0, action: Click(x: 1.0, y: 2.0))],
            )"#,
        )
        .unwrap();
        assert_eq!(config.surface_width, 1024.0);
        assert_eq!(config.surface_height, 600.0);
        assert!(config.static_grid);
        assert_eq!(config.display_options(), DisplayOptions::NO_GRID);
        assert_eq!(
            config.actions_at(0).collect::<Vec<_>>(),
            vec![&Action::Click { x: 1.0, y: 2.0 }]
        );
        assert_eq!(config.actions_at(1).count(), 0);
    }

    #[test]
    fn default_options_parse_cleanly() {
        let options = GunnerConfig::default().display_options();
        assert!(options.contains(DisplayOptions::MY_MISSILE_CIRCLES));
        assert!(options.contains(DisplayOptions::FRIENDLY_SECTORS_BY_MY_MISSILE_RANGE));
        assert!(!options.contains(DisplayOptions::MY_VULNERABLE_SECTORS));
    }

    #[test]
    fn save_then_load_round_trips() {
        let path = std::env::temp_dir().join(format!("gunner-config-{}.ron", std::process::id()));
        let mut config = GunnerConfig::default();
        config.frames = 42;
        config.save(&path);
        let loaded = GunnerConfig::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_files_fall_back_to_defaults() {
        let missing = Path::new("/nonexistent/gunner/config.ron");
        assert_eq!(GunnerConfig::load(missing), GunnerConfig::default());
        assert_eq!(load_catalog(missing), Catalog::default());
    }
}
