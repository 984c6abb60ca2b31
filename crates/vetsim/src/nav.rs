//! Navigation bar and scroll button state.
//!
//! The page header restyles itself once the visitor scrolls away from the
//! top, highlights the link of the section currently being read, and the
//! hero's scroll button points down until the visitor reaches the section it
//! leads to, then points back up.
//!
//! [`Navigation`] derives all three from plain numbers: the scroll offset,
//! the viewport height and the section rectangles in document coordinates.
//! Each piece of state has its own signal, emitted only when it changes.

use vetsim_core::{Property, Signal};

use crate::config::NavigationConfig;

/// A page section in document coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRect {
    /// The section's element id, which nav links point at.
    pub id: String,
    /// Distance from the top of the document.
    pub top: f32,
    /// Rendered height.
    pub height: f32,
}

impl SectionRect {
    /// Create a section rectangle.
    pub fn new(id: impl Into<String>, top: f32, height: f32) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }
}

/// Where the hero's scroll button points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollButtonDirection {
    /// Towards the target section.
    #[default]
    Down,
    /// Back to the top of the page.
    Up,
}

impl ScrollButtonDirection {
    /// The CSS class the rendering layer applies, if any.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            Self::Down => None,
            Self::Up => Some("scroll-up"),
        }
    }
}

/// Scroll-driven state of the navigation bar and the scroll button.
///
/// # Signals
///
/// - `scrolled_changed(bool)`: the bar switched to or from its scrolled style
/// - `active_section_changed(String)`: a different link is highlighted
/// - `scroll_button_changed(ScrollButtonDirection)`: the button flipped
#[derive(Debug)]
pub struct Navigation {
    config: NavigationConfig,
    sections: Vec<SectionRect>,
    scrolled: bool,
    active_section: Property<String>,
    scroll_button: ScrollButtonDirection,

    /// Signal emitted when the scrolled style toggles.
    pub scrolled_changed: Signal<bool>,

    /// Signal emitted with the id of the newly highlighted section.
    pub active_section_changed: Signal<String>,

    /// Signal emitted when the scroll button changes direction.
    pub scroll_button_changed: Signal<ScrollButtonDirection>,
}

impl Navigation {
    /// Create navigation state for `sections`, given in document order.
    ///
    /// The first section starts highlighted.
    pub fn new(sections: Vec<SectionRect>, config: NavigationConfig) -> Self {
        let first = sections.first().map(|s| s.id.clone()).unwrap_or_default();
        Self {
            config,
            sections,
            scrolled: false,
            active_section: Property::new(first),
            scroll_button: ScrollButtonDirection::Down,
            scrolled_changed: Signal::new(),
            active_section_changed: Signal::new(),
            scroll_button_changed: Signal::new(),
        }
    }

    /// The sections, in document order.
    pub fn sections(&self) -> &[SectionRect] {
        &self.sections
    }

    /// Replace the section rectangles after a layout change.
    ///
    /// State is not recomputed until the next scroll update.
    pub fn set_sections(&mut self, sections: Vec<SectionRect>) {
        self.sections = sections;
    }

    /// Whether the bar is in its scrolled style.
    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Id of the highlighted section.
    pub fn active_section(&self) -> String {
        self.active_section.get()
    }

    /// Whether the link to `id` is highlighted.
    pub fn is_active(&self, id: &str) -> bool {
        self.active_section.with(|current| current == id)
    }

    /// Where the scroll button points.
    pub fn scroll_button(&self) -> ScrollButtonDirection {
        self.scroll_button
    }

    fn section(&self, id: &str) -> Option<&SectionRect> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// The page scrolled to `scroll_top` with a viewport `viewport_height` tall.
    ///
    /// Returns whether any state changed. Non-finite input is ignored.
    pub fn update_scroll(&mut self, scroll_top: f32, viewport_height: f32) -> bool {
        if !scroll_top.is_finite() || !viewport_height.is_finite() {
            return false;
        }
        let anchor = viewport_height * self.config.anchor_fraction;
        let mut changed = false;

        let scrolled = scroll_top > self.config.scrolled_threshold;
        if scrolled != self.scrolled {
            self.scrolled = scrolled;
            tracing::trace!(target: "vetsim::nav", scrolled, "navigation style changed");
            self.scrolled_changed.emit(scrolled);
            changed = true;
        }

        // Later sections win when ranges overlap.
        let reading = self
            .sections
            .iter()
            .rev()
            .find(|s| scroll_top >= s.top - anchor && scroll_top < s.top + s.height - anchor)
            .map(|s| s.id.clone());
        if let Some(id) = reading {
            changed |= self.activate(id);
        }

        let button = self
            .section(&self.config.scroll_button_section)
            .map(|target| {
                if scroll_top >= target.top - anchor {
                    ScrollButtonDirection::Up
                } else {
                    ScrollButtonDirection::Down
                }
            });
        if let Some(direction) = button.filter(|d| *d != self.scroll_button) {
            self.scroll_button = direction;
            tracing::trace!(target: "vetsim::nav", ?direction, "scroll button flipped");
            self.scroll_button_changed.emit(direction);
            changed = true;
        }

        changed
    }

    /// A nav link to `id` was clicked.
    ///
    /// Highlights the section and returns the scroll offset that brings it
    /// just below a bar `nav_height` tall, or `None` for an unknown section.
    pub fn link_clicked(&mut self, id: &str, nav_height: f32) -> Option<f32> {
        let top = self.section(id)?.top;
        self.activate(id.to_owned());
        Some((top - nav_height).max(0.0))
    }

    /// Scroll offset the scroll button leads to when clicked.
    ///
    /// Up leads to the top of the page; down leads to the target section,
    /// just below a bar `nav_height` tall. `None` if the page has no target
    /// section.
    pub fn scroll_button_target(&self, nav_height: f32) -> Option<f32> {
        let target = self.section(&self.config.scroll_button_section)?;
        match self.scroll_button {
            ScrollButtonDirection::Up => Some(0.0),
            ScrollButtonDirection::Down => Some((target.top - nav_height).max(0.0)),
        }
    }

    fn activate(&mut self, id: String) -> bool {
        if !self.active_section.set(id.clone()) {
            return false;
        }
        tracing::debug!(target: "vetsim::nav", section = %id, "active section changed");
        self.active_section_changed.emit(id);
        true
    }

    /// Disconnect every slot.
    pub fn disconnect_all(&self) {
        self.scrolled_changed.disconnect_all();
        self.active_section_changed.disconnect_all();
        self.scroll_button_changed.disconnect_all();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;

    // Viewport 900 tall, so sections activate 300 before their top.
    const VH: f32 = 900.0;

    fn navigation() -> Navigation {
        Navigation::new(
            vec![
                SectionRect::new("hero", 0.0, 1000.0),
                SectionRect::new("about", 1000.0, 800.0),
                SectionRect::new("services", 1800.0, 1200.0),
                SectionRect::new("contact", 3000.0, 600.0),
            ],
            NavigationConfig::default(),
        )
    }

    #[test]
    fn test_initial_state() {
        let nav = navigation();
        assert!(!nav.is_scrolled());
        assert_eq!(nav.active_section(), "hero");
        assert!(nav.is_active("hero"));
        assert_eq!(nav.scroll_button(), ScrollButtonDirection::Down);
    }

    #[test]
    fn test_scrolled_threshold_is_exclusive() {
        let mut nav = navigation();
        nav.update_scroll(100.0, VH);
        assert!(!nav.is_scrolled());
        nav.update_scroll(100.5, VH);
        assert!(nav.is_scrolled());
        nav.update_scroll(0.0, VH);
        assert!(!nav.is_scrolled());
    }

    #[test]
    fn test_active_section_boundaries() {
        let mut nav = navigation();

        nav.update_scroll(699.0, VH);
        assert_eq!(nav.active_section(), "hero");
        // about starts at 1000 - 300.
        nav.update_scroll(700.0, VH);
        assert_eq!(nav.active_section(), "about");
        // about ends at 1000 + 800 - 300, exclusive.
        nav.update_scroll(1499.0, VH);
        assert_eq!(nav.active_section(), "about");
        nav.update_scroll(1500.0, VH);
        assert_eq!(nav.active_section(), "services");
    }

    #[test]
    fn test_gap_keeps_previous_section() {
        let mut nav = Navigation::new(
            vec![
                SectionRect::new("hero", 0.0, 500.0),
                SectionRect::new("about", 2000.0, 500.0),
            ],
            NavigationConfig::default(),
        );
        nav.update_scroll(1000.0, VH);
        assert_eq!(nav.active_section(), "hero");
    }

    #[test]
    fn test_scroll_button_flips_at_target() {
        let mut nav = navigation();
        assert_eq!(nav.scroll_button_target(80.0), Some(920.0));

        nav.update_scroll(699.0, VH);
        assert_eq!(nav.scroll_button(), ScrollButtonDirection::Down);
        nav.update_scroll(700.0, VH);
        assert_eq!(nav.scroll_button(), ScrollButtonDirection::Up);
        assert_eq!(nav.scroll_button().css_class(), Some("scroll-up"));
        assert_eq!(nav.scroll_button_target(80.0), Some(0.0));

        // Stays up further down the page.
        nav.update_scroll(3200.0, VH);
        assert_eq!(nav.scroll_button(), ScrollButtonDirection::Up);
    }

    #[test]
    fn test_without_target_section_button_stays_down() {
        let mut nav = Navigation::new(
            vec![SectionRect::new("hero", 0.0, 1000.0)],
            NavigationConfig::default(),
        );
        nav.update_scroll(5000.0, VH);
        assert_eq!(nav.scroll_button(), ScrollButtonDirection::Down);
        assert_eq!(nav.scroll_button_target(80.0), None);
    }

    #[test]
    fn test_signals_fire_only_on_change() {
        let mut nav = navigation();
        let events = Arc::new(Mutex::new(Vec::new()));

        let e = events.clone();
        nav.scrolled_changed
            .connect(move |&scrolled| e.lock().push(format!("scrolled:{scrolled}")));
        let e = events.clone();
        nav.active_section_changed
            .connect(move |id| e.lock().push(format!("active:{id}")));
        let e = events.clone();
        nav.scroll_button_changed
            .connect(move |dir| e.lock().push(format!("button:{dir:?}")));

        assert!(!nav.update_scroll(50.0, VH));
        assert!(nav.update_scroll(800.0, VH));
        assert!(!nav.update_scroll(850.0, VH));

        assert_eq!(
            *events.lock(),
            vec!["scrolled:true", "active:about", "button:Up"]
        );
    }

    #[test]
    fn test_link_click_sets_active_section() {
        let mut nav = navigation();
        assert_eq!(nav.link_clicked("services", 80.0), Some(1720.0));
        assert_eq!(nav.active_section(), "services");
        assert_eq!(nav.link_clicked("hero", 80.0), Some(0.0));
        assert_eq!(nav.link_clicked("pricing", 80.0), None);
        assert_eq!(nav.active_section(), "hero");
    }

    #[test]
    fn test_non_finite_input_ignored() {
        let mut nav = navigation();
        assert!(!nav.update_scroll(f32::NAN, VH));
        assert!(!nav.update_scroll(800.0, f32::INFINITY));
        assert_eq!(nav.active_section(), "hero");
    }
}
