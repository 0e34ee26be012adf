//! Book configuration.

/// Page count used when none is configured.
pub const DEFAULT_TOTAL_PAGES: u32 = 4;
/// How long the flip lock is held after a navigation.
pub const DEFAULT_FLIP_DURATION_MS: u32 = 400;
/// Minimum horizontal travel for a touch drag to count as a swipe.
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 50.0;

/// Error returned when a configuration is unusable.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A book needs at least one page
    ZeroPages,
    /// Swipe threshold must be finite and non-negative
    InvalidSwipeThreshold(f64),
    /// The TOML document could not be parsed
    Toml(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ZeroPages => write!(f, "Book must have at least one page"),
            ConfigError::InvalidSwipeThreshold(value) => {
                write!(f, "Invalid swipe threshold: {}", value)
            }
            ConfigError::Toml(message) => write!(f, "Invalid book config: {}", message),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings for a flip book.
///
/// Every field has a default, so a partial `book.toml` only needs the
/// values it changes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BookConfig {
    /// Number of pages in the book
    pub total_pages: u32,
    /// Flip lock duration in milliseconds
    pub flip_duration_ms: u32,
    /// Minimum horizontal swipe distance in pixels
    pub swipe_threshold: f64,
    /// Scale applied to the book while the controls refresh
    pub pulse_scale: f64,
    /// How long the refresh pulse lasts
    pub pulse_duration_ms: u32,
    /// Depth added to a hovered page
    pub hover_lift_px: f64,
    /// Background scroll speed relative to the page
    pub parallax_speed: f64,
    /// Delay before the entrance animation starts
    pub loading_delay_ms: u32,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            total_pages: DEFAULT_TOTAL_PAGES,
            flip_duration_ms: DEFAULT_FLIP_DURATION_MS,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            pulse_scale: 1.02,
            pulse_duration_ms: 200,
            hover_lift_px: 10.0,
            parallax_speed: 0.5,
            loading_delay_ms: 100,
        }
    }
}

impl BookConfig {
    /// Default settings for a book with `total_pages` pages.
    pub fn with_pages(total_pages: u32) -> Self {
        Self {
            total_pages,
            ..Self::default()
        }
    }

    /// Parse a `book.toml` string and validate it.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Toml(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the settings describe a usable book.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_pages == 0 {
            return Err(ConfigError::ZeroPages);
        }
        if !self.swipe_threshold.is_finite() || self.swipe_threshold < 0.0 {
            return Err(ConfigError::InvalidSwipeThreshold(self.swipe_threshold));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = BookConfig::default();
        assert_eq!(config.total_pages, 4);
        assert_eq!(config.flip_duration_ms, 400);
        assert_eq!(config.swipe_threshold, 50.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn with_pages_keeps_defaults() {
        let config = BookConfig::with_pages(12);
        assert_eq!(config.total_pages, 12);
        assert_eq!(config.flip_duration_ms, 400);
    }

    #[test]
    fn zero_pages_rejected() {
        let config = BookConfig::with_pages(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroPages));
    }

    #[test]
    fn bad_threshold_rejected() {
        let config = BookConfig {
            swipe_threshold: -1.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidSwipeThreshold(-1.0))
        );

        let config = BookConfig {
            swipe_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ConfigError::ZeroPages.to_string(),
            "Book must have at least one page"
        );
        assert_eq!(
            ConfigError::InvalidSwipeThreshold(-2.0).to_string(),
            "Invalid swipe threshold: -2"
        );
    }

    #[cfg(feature = "toml")]
    #[test]
    fn partial_toml() {
        let config = BookConfig::from_toml_str("total_pages = 8\nflip_duration_ms = 600\n").unwrap();
        assert_eq!(config.total_pages, 8);
        assert_eq!(config.flip_duration_ms, 600);
        assert_eq!(config.swipe_threshold, 50.0);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn invalid_toml() {
        assert!(matches!(
            BookConfig::from_toml_str("total_pages = \"many\""),
            Err(ConfigError::Toml(_))
        ));
        assert_eq!(
            BookConfig::from_toml_str("total_pages = 0"),
            Err(ConfigError::ZeroPages)
        );
    }
}
