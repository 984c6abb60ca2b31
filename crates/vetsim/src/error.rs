//! Error types for VetSim components.

use std::path::PathBuf;

/// Result type alias for component operations.
pub type Result<T> = std::result::Result<T, CarouselError>;

/// Errors raised by carousel construction and checked navigation.
///
/// Redundant navigation, unmatched pause/resume and short swipes are not
/// errors; they are ignored.
#[derive(Debug, thiserror::Error)]
pub enum CarouselError {
    /// A carousel needs at least one slide.
    #[error("Carousel has no slides")]
    NoSlides,

    /// The requested slide does not exist.
    #[error("Slide index {index} is out of range for {slide_count} slides")]
    InvalidIndex { index: usize, slide_count: usize },

    /// The carousel configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parsing error.
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// File I/O error.
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid setting value.
    #[error("Invalid value for '{setting}': {message}")]
    InvalidValue {
        setting: &'static str,
        message: String,
    },
}

impl CarouselError {
    /// Create an index error.
    pub fn invalid_index(index: usize, slide_count: usize) -> Self {
        Self::InvalidIndex { index, slide_count }
    }
}

impl ConfigError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a value error.
    pub fn invalid_value(setting: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            setting,
            message: message.into(),
        }
    }
}
