//! Configuration for carousels and stat counters.
//!
//! Every carousel on the page runs the same controller; what differs is the
//! [`CarouselConfig`] it is built with. The two sliders on the clinic page
//! have presets ([`CarouselConfig::hero`] and [`CarouselConfig::gallery`]),
//! and a [`SiteConfig`] can override any of their settings from TOML:
//!
//! ```toml
//! [hero]
//! autoplay_period_ms = 8000
//! transition_duration_ms = 1000
//! autoplay = true
//!
//! [gallery]
//! autoplay_period_ms = 6000
//! keyboard_scope = "when_in_viewport"
//!
//! [counters]
//! duration_ms = 2000
//! stagger_ms = 100
//!
//! [navigation]
//! scrolled_threshold = 100.0
//! scroll_button_section = "about"
//! ```
//!
//! Settings missing from a section keep the section's preset value.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Default minimum horizontal travel, in logical pixels, for a swipe.
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 50.0;

/// Upper bound for every configured duration.
pub const MAX_CONFIG_DURATION: Duration = Duration::from_secs(60 * 60);

fn check_duration(
    setting: &'static str,
    value: Duration,
    allow_zero: bool,
) -> Result<(), ConfigError> {
    if !allow_zero && value.is_zero() {
        return Err(ConfigError::invalid_value(setting, "must be greater than zero"));
    }
    if value > MAX_CONFIG_DURATION {
        return Err(ConfigError::invalid_value(
            setting,
            format!("must be at most {} ms, got {:?}", MAX_CONFIG_DURATION.as_millis(), value),
        ));
    }
    Ok(())
}

/// When arrow keys navigate a carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyboardScope {
    /// Arrow keys always navigate.
    #[default]
    Global,
    /// Arrow keys navigate only while the carousel is reported on screen.
    WhenInViewport,
}

/// Timing and input settings for one carousel.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselConfig {
    /// How often autoplay advances.
    pub autoplay_period: Duration,
    /// How long navigation stays locked after an accepted request.
    pub transition_duration: Duration,
    /// Horizontal travel a swipe must exceed to navigate.
    pub swipe_threshold: f32,
    /// Delay between the end of a touch and the touch pause being lifted.
    pub touch_resume_delay: Duration,
    /// Whether autoplay starts when the carousel is built.
    pub autoplay: bool,
    /// When arrow keys navigate.
    pub keyboard_scope: KeyboardScope,
}

impl CarouselConfig {
    /// The full-width hero slider at the top of the page.
    pub fn hero() -> Self {
        Self {
            autoplay_period: Duration::from_millis(8000),
            transition_duration: Duration::from_millis(1000),
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            touch_resume_delay: Duration::from_millis(1000),
            autoplay: true,
            keyboard_scope: KeyboardScope::Global,
        }
    }

    /// The clinic gallery slider.
    pub fn gallery() -> Self {
        Self {
            autoplay_period: Duration::from_millis(6000),
            transition_duration: Duration::from_millis(1200),
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            touch_resume_delay: Duration::from_millis(2000),
            autoplay: true,
            keyboard_scope: KeyboardScope::WhenInViewport,
        }
    }

    /// Set the autoplay period using builder pattern.
    pub fn with_autoplay_period(mut self, period: Duration) -> Self {
        self.autoplay_period = period;
        self
    }

    /// Set the transition duration using builder pattern.
    pub fn with_transition_duration(mut self, duration: Duration) -> Self {
        self.transition_duration = duration;
        self
    }

    /// Set the swipe threshold using builder pattern.
    pub fn with_swipe_threshold(mut self, threshold: f32) -> Self {
        self.swipe_threshold = threshold;
        self
    }

    /// Set the touch resume delay using builder pattern.
    pub fn with_touch_resume_delay(mut self, delay: Duration) -> Self {
        self.touch_resume_delay = delay;
        self
    }

    /// Enable or disable autoplay at construction using builder pattern.
    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    /// Set the keyboard scope using builder pattern.
    pub fn with_keyboard_scope(mut self, scope: KeyboardScope) -> Self {
        self.keyboard_scope = scope;
        self
    }

    /// Check that the settings describe a usable carousel.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_duration("autoplay_period_ms", self.autoplay_period, false)?;
        check_duration("transition_duration_ms", self.transition_duration, false)?;
        check_duration("touch_resume_delay_ms", self.touch_resume_delay, true)?;
        if !self.swipe_threshold.is_finite() || self.swipe_threshold < 0.0 {
            return Err(ConfigError::invalid_value(
                "swipe_threshold",
                format!("must be a non-negative number, got {}", self.swipe_threshold),
            ));
        }
        Ok(())
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self::hero()
    }
}

/// Timing for the animated statistics counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterConfig {
    /// How long each counter takes to reach its target.
    pub duration: Duration,
    /// Delay added per counter, so they start one after another.
    pub stagger: Duration,
}

impl CounterConfig {
    /// Check that both durations are in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_duration("duration_ms", self.duration, true)?;
        check_duration("stagger_ms", self.stagger, true)
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(2000),
            stagger: Duration::from_millis(100),
        }
    }
}

/// Settings for the navigation bar and the hero scroll button.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationConfig {
    /// Scroll offset past which the navigation bar is styled as scrolled.
    pub scrolled_threshold: f32,
    /// Fraction of the viewport height a section's top must pass before it
    /// becomes the active section.
    pub anchor_fraction: f32,
    /// Section whose top flips the scroll button from down to up.
    pub scroll_button_section: String,
}

impl NavigationConfig {
    /// Check that the thresholds are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.scrolled_threshold.is_finite() || self.scrolled_threshold < 0.0 {
            return Err(ConfigError::invalid_value(
                "scrolled_threshold",
                format!("must be a non-negative number, got {}", self.scrolled_threshold),
            ));
        }
        if !(0.0..=1.0).contains(&self.anchor_fraction) {
            return Err(ConfigError::invalid_value(
                "anchor_fraction",
                format!("must be between 0 and 1, got {}", self.anchor_fraction),
            ));
        }
        Ok(())
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            scrolled_threshold: 100.0,
            anchor_fraction: 1.0 / 3.0,
            scroll_button_section: String::from("about"),
        }
    }
}

/// Settings for every component on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    /// Hero slider settings.
    pub hero: CarouselConfig,
    /// Gallery slider settings.
    pub gallery: CarouselConfig,
    /// Stat counter settings.
    pub counters: CounterConfig,
    /// Navigation bar settings.
    pub navigation: NavigationConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::presets()
    }
}

impl SiteConfig {
    /// The built-in presets.
    pub fn presets() -> Self {
        Self {
            hero: CarouselConfig::hero(),
            gallery: CarouselConfig::gallery(),
            counters: CounterConfig::default(),
            navigation: NavigationConfig::default(),
        }
    }

    /// Parse settings from TOML text, layering them over the presets.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let raw: RawSiteConfig = toml::from_str(text)?;
        let mut config = Self::presets();
        if let Some(hero) = raw.hero {
            hero.apply(&mut config.hero);
        }
        if let Some(gallery) = raw.gallery {
            gallery.apply(&mut config.gallery);
        }
        if let Some(counters) = raw.counters {
            counters.apply(&mut config.counters);
        }
        if let Some(navigation) = raw.navigation {
            navigation.apply(&mut config.navigation);
        }
        config.validate()?;
        tracing::debug!(target: "vetsim::config", ?config, "site config loaded");
        Ok(config)
    }

    /// Read settings from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.hero.validate()?;
        self.gallery.validate()?;
        self.counters.validate()?;
        self.navigation.validate()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSiteConfig {
    hero: Option<CarouselSection>,
    gallery: Option<CarouselSection>,
    counters: Option<CounterSection>,
    navigation: Option<NavigationSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CarouselSection {
    autoplay_period_ms: Option<u64>,
    transition_duration_ms: Option<u64>,
    swipe_threshold: Option<f32>,
    touch_resume_delay_ms: Option<u64>,
    autoplay: Option<bool>,
    keyboard_scope: Option<KeyboardScope>,
}

impl CarouselSection {
    fn apply(self, config: &mut CarouselConfig) {
        if let Some(ms) = self.autoplay_period_ms {
            config.autoplay_period = Duration::from_millis(ms);
        }
        if let Some(ms) = self.transition_duration_ms {
            config.transition_duration = Duration::from_millis(ms);
        }
        if let Some(threshold) = self.swipe_threshold {
            config.swipe_threshold = threshold;
        }
        if let Some(ms) = self.touch_resume_delay_ms {
            config.touch_resume_delay = Duration::from_millis(ms);
        }
        if let Some(autoplay) = self.autoplay {
            config.autoplay = autoplay;
        }
        if let Some(scope) = self.keyboard_scope {
            config.keyboard_scope = scope;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CounterSection {
    duration_ms: Option<u64>,
    stagger_ms: Option<u64>,
}

impl CounterSection {
    fn apply(self, config: &mut CounterConfig) {
        if let Some(ms) = self.duration_ms {
            config.duration = Duration::from_millis(ms);
        }
        if let Some(ms) = self.stagger_ms {
            config.stagger = Duration::from_millis(ms);
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct NavigationSection {
    scrolled_threshold: Option<f32>,
    anchor_fraction: Option<f32>,
    scroll_button_section: Option<String>,
}

impl NavigationSection {
    fn apply(self, config: &mut NavigationConfig) {
        if let Some(threshold) = self.scrolled_threshold {
            config.scrolled_threshold = threshold;
        }
        if let Some(fraction) = self.anchor_fraction {
            config.anchor_fraction = fraction;
        }
        if let Some(section) = self.scroll_button_section {
            config.scroll_button_section = section;
        }
    }
}
