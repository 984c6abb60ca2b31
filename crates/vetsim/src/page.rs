//! Page composition.
//!
//! [`Page`] is the one place that owns the interactive components of the
//! clinic page: the hero slider, the gallery slider, the stat counters and
//! the navigation bar, together with the clock and timer manager they share.
//! Nothing is global; building a `Page` builds everything and dropping it
//! tears everything down.
//!
//! The host (a browser binding, a test, the async driver) feeds the page
//! input and calls [`Page::pump`] whenever a timer may be due.

use std::sync::Arc;
use std::time::Instant;

use vetsim_core::logging::PerfSpan;
use vetsim_core::{Clock, SharedTimerManager, SystemClock};

use crate::carousel::Carousel;
use crate::config::SiteConfig;
use crate::counter::StatCounters;
use crate::error::Result;
use crate::input::Key;
use crate::nav::{Navigation, SectionRect};

/// What the host found in the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    /// Number of hero slides; zero leaves the hero inactive.
    pub hero_slides: usize,
    /// Number of gallery slides; zero leaves the gallery inactive.
    pub gallery_slides: usize,
    /// Target values of the stat counters, in display order.
    pub stat_targets: Vec<u64>,
    /// Sections the navigation bar links to, in document order.
    pub sections: Vec<SectionRect>,
}

/// The interactive sections of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// The full-width hero slider.
    Hero,
    /// The clinic gallery slider.
    Gallery,
    /// The statistics row.
    Stats,
}

/// Page-wide input the host forwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageInput {
    /// A key was pressed anywhere on the page.
    Key(Key),
    /// The document was hidden or shown.
    DocumentVisibility {
        /// Whether the document is now hidden.
        hidden: bool,
    },
    /// A section scrolled into or out of view.
    SectionVisibility {
        /// Which section.
        section: Section,
        /// Whether it is now visible.
        visible: bool,
    },
    /// The document scrolled.
    Scroll {
        /// Vertical scroll offset.
        scroll_top: f32,
        /// Height of the viewport.
        viewport_height: f32,
    },
}

/// Owns every interactive component on the page.
#[derive(Debug)]
pub struct Page {
    timers: SharedTimerManager,
    hero: Option<Carousel>,
    gallery: Option<Carousel>,
    counters: StatCounters,
    navigation: Navigation,
    destroyed: bool,
}

impl Page {
    /// Build the page against `clock`.
    pub fn new(layout: PageLayout, config: SiteConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let _span = PerfSpan::new("page_setup");
        let timers = SharedTimerManager::new(clock);

        let hero = match layout.hero_slides {
            0 => None,
            count => Some(Carousel::new("hero", count, config.hero, timers.clone())?),
        };
        let gallery = match layout.gallery_slides {
            0 => None,
            count => Some(Carousel::new("gallery", count, config.gallery, timers.clone())?),
        };
        let counters = StatCounters::new(layout.stat_targets, config.counters);
        let navigation = Navigation::new(layout.sections, config.navigation);

        tracing::info!(
            target: "vetsim::page",
            hero_slides = layout.hero_slides,
            gallery_slides = layout.gallery_slides,
            stat_counters = counters.len(),
            sections = navigation.sections().len(),
            "page initialized"
        );

        Ok(Self {
            timers,
            hero,
            gallery,
            counters,
            navigation,
            destroyed: false,
        })
    }

    /// Build the page against the system clock.
    pub fn with_system_clock(layout: PageLayout, config: SiteConfig) -> Result<Self> {
        Self::new(layout, config, Arc::new(SystemClock))
    }

    // =========================================================================
    // Components
    // =========================================================================

    /// The hero slider, if the page has one.
    pub fn hero(&self) -> Option<&Carousel> {
        self.hero.as_ref()
    }

    /// Mutable access to the hero slider.
    pub fn hero_mut(&mut self) -> Option<&mut Carousel> {
        self.hero.as_mut()
    }

    /// The gallery slider, if the page has one.
    pub fn gallery(&self) -> Option<&Carousel> {
        self.gallery.as_ref()
    }

    /// Mutable access to the gallery slider.
    pub fn gallery_mut(&mut self) -> Option<&mut Carousel> {
        self.gallery.as_mut()
    }

    /// Mutable access to the carousel in `section`, if there is one.
    pub fn carousel_mut(&mut self, section: Section) -> Option<&mut Carousel> {
        match section {
            Section::Hero => self.hero.as_mut(),
            Section::Gallery => self.gallery.as_mut(),
            Section::Stats => None,
        }
    }

    /// The stat counters.
    pub fn counters(&self) -> &StatCounters {
        &self.counters
    }

    /// The navigation bar state.
    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    /// Mutable access to the navigation bar state, for link clicks.
    pub fn navigation_mut(&mut self) -> &mut Navigation {
        &mut self.navigation
    }

    /// Displayed counter values right now.
    pub fn counter_values(&self) -> Vec<u64> {
        self.counters.values_at(self.timers.now())
    }

    /// The timer manager shared by all components.
    pub fn timers(&self) -> &SharedTimerManager {
        &self.timers
    }

    /// When the next timer is due, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    fn carousels_mut(&mut self) -> impl Iterator<Item = &mut Carousel> {
        self.hero.iter_mut().chain(self.gallery.iter_mut())
    }

    // =========================================================================
    // Driving
    // =========================================================================

    /// Deliver every due timer to its owner.
    ///
    /// Returns the number of timers that were delivered to a component.
    pub fn pump(&mut self) -> usize {
        if self.destroyed {
            return 0;
        }
        let mut delivered = 0;
        for id in self.timers.process_expired() {
            let owned = self.carousels_mut().any(|carousel| carousel.handle_timer(id));
            if owned {
                delivered += 1;
            } else {
                tracing::trace!(target: "vetsim::page", ?id, "timer has no owner");
            }
        }
        delivered
    }

    /// Route page-wide input.
    ///
    /// Returns `true` if any component consumed it; for key presses the host
    /// should then suppress the browser's default action.
    pub fn handle_input(&mut self, input: PageInput) -> bool {
        if self.destroyed {
            return false;
        }
        match input {
            PageInput::Key(key) => {
                let mut consumed = false;
                for carousel in self.carousels_mut() {
                    consumed |= carousel.key_pressed(key);
                }
                consumed
            }
            PageInput::DocumentVisibility { hidden } => {
                for carousel in self.carousels_mut() {
                    carousel.set_document_hidden(hidden);
                }
                true
            }
            PageInput::SectionVisibility { section, visible } => match section {
                Section::Stats => {
                    let now = self.timers.now();
                    self.counters.set_visible(visible, now)
                }
                Section::Hero | Section::Gallery => match self.carousel_mut(section) {
                    Some(carousel) => {
                        carousel.set_in_viewport(visible);
                        true
                    }
                    None => false,
                },
            },
            PageInput::Scroll {
                scroll_top,
                viewport_height,
            } => self.navigation.update_scroll(scroll_top, viewport_height),
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Whether [`destroy`](Self::destroy) has been called.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Tear down every component. Calling it again does nothing.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        for carousel in self.carousels_mut() {
            carousel.destroy();
        }
        self.counters.started.disconnect_all();
        self.navigation.disconnect_all();
        self.destroyed = true;
        tracing::info!(target: "vetsim::page", "page destroyed");
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        self.destroy();
    }
}
