use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default cosine-similarity threshold for simplification.
pub const DEFAULT_SIMPLIFY_TOLERANCE: f64 = 0.999;

/// Default number of parameter steps per section.
pub const DEFAULT_SECTION_SAMPLES: usize = 100;

/// Settings that shape how a path is cached.
///
/// Deserializing runs [`PathConfig::validate`]; missing fields take their
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPathConfig")]
pub struct PathConfig {
    /// Whether a closing section joins the last control point to the first.
    pub looped: bool,
    /// Segments whose unit directions have a dot product above this merge.
    /// Must lie in `[0, 1)`.
    pub simplify_tolerance: f64,
    /// Equal parameter steps per section (points per section = samples + 1).
    pub section_samples: usize,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            looped: true,
            simplify_tolerance: DEFAULT_SIMPLIFY_TOLERANCE,
            section_samples: DEFAULT_SECTION_SAMPLES,
        }
    }
}

impl PathConfig {
    /// Sets the loop flag.
    #[must_use]
    pub fn with_looped(mut self, looped: bool) -> Self {
        self.looped = looped;
        self
    }

    /// Sets the simplify tolerance.
    #[must_use]
    pub fn with_simplify_tolerance(mut self, tolerance: f64) -> Self {
        self.simplify_tolerance = tolerance;
        self
    }

    /// Sets the per-section sample count.
    #[must_use]
    pub fn with_section_samples(mut self, samples: usize) -> Self {
        self.section_samples = samples;
        self
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is outside `[0, 1)` (or NaN) or the
    /// sample count is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_tolerance(self.simplify_tolerance)?;
        if self.section_samples == 0 {
            return Err(ConfigError::InvalidSampleCount(self.section_samples));
        }
        Ok(())
    }
}

/// Unchecked persisted form of [`PathConfig`].
#[derive(Deserialize)]
#[serde(default)]
struct RawPathConfig {
    looped: bool,
    simplify_tolerance: f64,
    section_samples: usize,
}

impl Default for RawPathConfig {
    fn default() -> Self {
        let config = PathConfig::default();
        Self {
            looped: config.looped,
            simplify_tolerance: config.simplify_tolerance,
            section_samples: config.section_samples,
        }
    }
}

impl TryFrom<RawPathConfig> for PathConfig {
    type Error = ConfigError;

    fn try_from(raw: RawPathConfig) -> Result<Self, Self::Error> {
        let config = Self {
            looped: raw.looped,
            simplify_tolerance: raw.simplify_tolerance,
            section_samples: raw.section_samples,
        };
        config.validate()?;
        Ok(config)
    }
}

pub(crate) fn validate_tolerance(tolerance: f64) -> Result<(), ConfigError> {
    if (0.0..1.0).contains(&tolerance) {
        Ok(())
    } else {
        Err(ConfigError::InvalidTolerance(tolerance))
    }
}
