use crate::error::RleError;
use crate::grid::Sample;
use std::str::FromStr;

/// Fill pattern used when generating synthetic images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Every sample drawn uniformly from `0..=max_value`.
    Random,
    /// One color for the whole image.
    Flat,
    /// Vertical bands of solid color, a few pixels wide.
    Stripes,
    /// Horizontal ramp from black to `max_value`.
    Gradient,
}

#[derive(Debug, Clone)]
pub struct RleConfig {
    pub threads: usize,
    /// Decode every freshly encoded image and compare before writing it out.
    pub verify: bool,
    /// Maximum intensity written to (and enforced on) decompressed pixmaps.
    pub max_value: Sample,
}

impl Default for RleConfig {
    fn default() -> Self {
        Self {
            threads: num_cpus::get(),
            verify: true,
            max_value: 255,
        }
    }
}

impl RleConfig {
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    pub fn with_max_value(mut self, max_value: Sample) -> Self {
        self.max_value = max_value;
        self
    }

    pub fn validate(&self) -> Result<(), RleError> {
        if self.threads == 0 {
            return Err(RleError::ConfigError("thread count must be at least 1".to_string()));
        }
        if self.max_value == 0 {
            return Err(RleError::ConfigError("maximum intensity must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl FromStr for Pattern {
    type Err = RleError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "random" => Ok(Pattern::Random),
            "flat" => Ok(Pattern::Flat),
            "stripes" => Ok(Pattern::Stripes),
            "gradient" => Ok(Pattern::Gradient),
            _ => Err(RleError::ConfigError(format!("Invalid pattern: {}", s))),
        }
    }
}
