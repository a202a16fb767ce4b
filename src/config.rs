use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

/// How photos are framed by the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BorderType {
    None,
    #[default]
    Border,
}

/// Rotation speed of the collage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Speed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl Speed {
    /// Seconds between two ticks.
    pub const fn seconds(self) -> u64 {
        match self {
            Self::Slow => 20,
            Self::Medium => 10,
            Self::Fast => 5,
        }
    }

    pub const fn interval(self) -> Duration {
        Duration::from_secs(self.seconds())
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Medium => "medium",
            Self::Fast => "fast",
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upper bound for `number-of-photos`.
pub const MAX_NUMBER_OF_PHOTOS: usize = 1000;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Configuration {
    /// Root directory to scan recursively for photos.
    pub directory: PathBuf,
    /// Render photos in grayscale.
    pub is_grayscale: bool,
    /// Pick photos in random order instead of sequentially.
    pub is_random: bool,
    /// Largest edge of a displayed photo, in pixels.
    pub maximum_size: u32,
    /// How many photos are fully visible at once.
    pub number_of_photos: usize,
    /// Photo opacity, 0.0 (transparent) to 1.0 (opaque).
    pub opacity: f64,
    pub border_type: BorderType,
    pub speed: Speed,
    /// Raise crate log level to debug.
    pub verbose_logging: bool,
}

impl Configuration {
    const fn default_maximum_size() -> u32 {
        500
    }

    const fn default_number_of_photos() -> usize {
        10
    }

    /// Platform pictures folder, or `~/Pictures` when the platform has none.
    pub fn default_directory() -> PathBuf {
        dirs::picture_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let cfg: Self = serde_yaml::from_str(&s).map_err(crate::Error::from)?;
        Ok(cfg)
    }

    /// Validate runtime invariants that cannot be expressed via serde defaults alone.
    pub fn validated(self) -> Result<Self> {
        ensure!(
            self.number_of_photos >= 1,
            "number-of-photos must be at least one"
        );
        ensure!(
            self.number_of_photos <= MAX_NUMBER_OF_PHOTOS,
            "number-of-photos must be at most {MAX_NUMBER_OF_PHOTOS}"
        );
        ensure!(
            (0.0..=1.0).contains(&self.opacity),
            "opacity must be between 0.0 and 1.0"
        );
        ensure!(self.maximum_size > 0, "maximum-size must be positive");
        ensure!(
            !self.speed.interval().is_zero(),
            "speed must map to a positive interval"
        );
        Ok(self)
    }

    /// Tick interval derived from [`Configuration::speed`].
    pub const fn interval(&self) -> Duration {
        self.speed.interval()
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            directory: Self::default_directory(),
            is_grayscale: false,
            is_random: false,
            maximum_size: Self::default_maximum_size(),
            number_of_photos: Self::default_number_of_photos(),
            opacity: 1.0,
            border_type: BorderType::default(),
            speed: Speed::default(),
            verbose_logging: false,
        }
    }
}
