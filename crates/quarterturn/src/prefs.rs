//! User preferences for the puzzle engine.
//!
//! Preferences are layered: the embedded defaults are loaded first, and then
//! an optional user YAML file overrides any subset of them.

use std::f64::consts::PI;
use std::path::{Path, PathBuf};

use quartermath::Float;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;
use web_time::Duration;

use crate::{LatticeError, MAX_LATTICE_SIZE};

const PREFS_FILE_NAME: &str = "quarterturn";
const PREFS_FILE_EXTENSION: &str = "yaml";
const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");

lazy_static! {
    /// Preferences from the embedded default preferences file.
    pub static ref DEFAULT_PREFS: Preferences =
        serde_norway::from_str(DEFAULT_PREFS_STR).unwrap_or_default();
}

/// Error produced when loading, validating, or saving preferences.
#[derive(Error, Debug)]
pub enum PrefsError {
    /// Error reading or merging preference sources
    #[error("error loading preferences: {0}")]
    Config(#[from] config::ConfigError),
    /// Error writing the preferences file
    #[error("error saving preferences: {0}")]
    Io(#[from] std::io::Error),
    /// Error serializing preferences
    #[error("error serializing preferences: {0}")]
    Yaml(#[from] serde_norway::Error),
    /// Lattice size out of range
    #[error(transparent)]
    Lattice(#[from] LatticeError),
    /// Negative, infinite, or NaN turn duration
    #[error("quarter turn duration must be a nonnegative number of seconds; got {0}")]
    InvalidDuration(f32),
    /// No configuration directory for this platform
    #[error("unable to get preferences file path")]
    NoPreferencesPath,
}

/// Engine preferences.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Preferences {
    /// Number of layers along each axis.
    pub lattice_size: u32,
    /// Time for one quarter turn, in seconds.
    pub quarter_turn_duration: f32,
    /// Number of random layer turns in a scramble.
    pub scramble_length: usize,
    /// Interpolation curve within each quarter turn.
    pub twist_interpolation: InterpolateFn,
}
impl Default for Preferences {
    fn default() -> Self {
        Self {
            lattice_size: 3,
            quarter_turn_duration: 0.256,
            scramble_length: 42,
            twist_interpolation: InterpolateFn::default(),
        }
    }
}
impl Preferences {
    /// Loads the embedded default preferences, overridden by the contents of
    /// `user_file` if one is given.
    pub fn load(user_file: Option<&Path>) -> Result<Self, PrefsError> {
        let mut config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT));
        if let Some(path) = user_file {
            log::info!("loading preferences from {}", path.display());
            config = config.add_source(config::File::from(path).format(PREFS_FILE_FORMAT));
        }
        let prefs: Self = config.build()?.try_deserialize()?;
        prefs.validate()?;
        Ok(prefs)
    }
    /// Same as [`Preferences::load()`], but falls back to the defaults on
    /// error.
    pub fn load_or_default(user_file: Option<&Path>) -> Self {
        Self::load(user_file).unwrap_or_else(|e| {
            log::warn!("{e}; using default preferences");
            DEFAULT_PREFS.clone()
        })
    }

    /// Writes the preferences to a YAML file, creating parent directories as
    /// needed.
    pub fn save(&self, path: &Path) -> Result<(), PrefsError> {
        if let Some(p) = path.parent() {
            std::fs::create_dir_all(p)?;
        }
        serde_norway::to_writer(std::fs::File::create(path)?, self)?;
        Ok(())
    }

    /// Returns the path of the user preferences file in the platform
    /// configuration directory. The file may not exist.
    pub fn user_prefs_path() -> Result<PathBuf, PrefsError> {
        let proj_dirs = directories::ProjectDirs::from("", "", "Quarterturn")
            .ok_or(PrefsError::NoPreferencesPath)?;
        Ok(proj_dirs
            .config_dir()
            .join(format!("{PREFS_FILE_NAME}.{PREFS_FILE_EXTENSION}")))
    }

    /// Returns an error if any preference is out of range.
    pub fn validate(&self) -> Result<(), PrefsError> {
        if !(1..=MAX_LATTICE_SIZE).contains(&self.lattice_size) {
            return Err(LatticeError::InvalidSize(self.lattice_size).into());
        }
        let d = self.quarter_turn_duration;
        if !d.is_finite() || d < 0.0 {
            return Err(PrefsError::InvalidDuration(d));
        }
        Ok(())
    }

    /// Returns the time for one quarter turn.
    pub fn quarter_turn_duration(&self) -> Duration {
        Duration::try_from_secs_f32(self.quarter_turn_duration).unwrap_or_default()
    }
}

/// Interpolation curve for the animation within a single quarter turn.
#[derive(
    Serialize, Deserialize, Display, EnumIter, EnumString, Debug, Default, Copy, Clone, PartialEq, Eq, Hash,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InterpolateFn {
    /// Constant angular speed.
    #[default]
    Linear,
    /// Cosine from 0 to π; starts and ends slowly.
    Cosine,
}
impl InterpolateFn {
    /// Maps progress through a quarter turn, from 0.0 to 1.0, to the fraction
    /// of the quarter turn that should be displayed.
    ///
    /// Always returns exactly 0.0 at 0.0 and exactly 1.0 at 1.0, and is
    /// nondecreasing in between.
    pub fn interpolate(self, t: Float) -> Float {
        match self {
            InterpolateFn::Linear => t,
            InterpolateFn::Cosine => (1.0 - (t * PI).cos()) / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_default_prefs_file_matches_default() {
        let parsed: Preferences =
            serde_norway::from_str(DEFAULT_PREFS_STR).expect("error parsing default preferences");
        assert_eq!(parsed, Preferences::default());
        assert_eq!(*DEFAULT_PREFS, Preferences::default());
    }

    #[test]
    fn test_load_without_user_file() {
        assert_eq!(Preferences::load(None).unwrap(), Preferences::default());
    }

    #[test]
    fn test_user_file_overrides_subset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.yaml");
        std::fs::write(&path, "lattice_size: 5\ntwist_interpolation: cosine\n").unwrap();

        let prefs = Preferences::load(Some(&path)).unwrap();
        assert_eq!(prefs.lattice_size, 5);
        assert_eq!(prefs.twist_interpolation, InterpolateFn::Cosine);
        assert_eq!(prefs.scramble_length, 42);
    }

    #[test]
    fn test_invalid_user_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.yaml");
        std::fs::write(&path, "lattice_size: 0\n").unwrap();
        assert!(matches!(
            Preferences::load(Some(&path)),
            Err(PrefsError::Lattice(LatticeError::InvalidSize(0))),
        ));
        assert_eq!(Preferences::load_or_default(Some(&path)), Preferences::default());

        assert!(matches!(
            Preferences::load(Some(&dir.path().join("missing.yaml"))),
            Err(PrefsError::Config(_)),
        ));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.yaml");
        let prefs = Preferences {
            lattice_size: 4,
            quarter_turn_duration: 0.5,
            ..Default::default()
        };
        prefs.save(&path).unwrap();
        assert_eq!(Preferences::load(Some(&path)).unwrap(), prefs);
    }

    #[test]
    fn test_invalid_duration() {
        let prefs = Preferences {
            quarter_turn_duration: -1.0,
            ..Default::default()
        };
        assert!(matches!(prefs.validate(), Err(PrefsError::InvalidDuration(_))));
    }

    #[test]
    fn test_interpolation_endpoints() {
        for f in InterpolateFn::iter() {
            assert_eq!(f.interpolate(0.0), 0.0, "{f}");
            assert_eq!(f.interpolate(1.0), 1.0, "{f}");
            let samples: Vec<Float> = (0..=100).map(|i| f.interpolate(i as Float / 100.0)).collect();
            assert!(samples.windows(2).all(|w| w[0] <= w[1]), "{f} is not monotonic");
        }
        assert_eq!("cosine".parse::<InterpolateFn>(), Ok(InterpolateFn::Cosine));
    }
}
