//! Interaction core for the VetSim clinic site.
//!
//! The clinic landing page has four interactive parts, all modelled here
//! without any DOM access:
//!
//! - **Hero slider**: full-width slides that advance on their own
//! - **Gallery slider**: layered clinic photos with previous/next peeking
//! - **Stat counters**: figures that count up when scrolled into view
//! - **Navigation bar**: scrolled style, active link and the scroll button
//!
//! Both sliders are [`Carousel`]s with different [`CarouselConfig`]
//! presets. A [`Page`] owns all of them together with the clock and timer
//! manager they share; the rendering layer translates DOM events into calls
//! on the page and reads state back out.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use vetsim::{Key, Page, PageInput, PageLayout, SectionRect, SiteConfig};
//! use vetsim_core::ManualClock;
//!
//! let clock = Arc::new(ManualClock::new());
//! let layout = PageLayout {
//!     hero_slides: 3,
//!     gallery_slides: 6,
//!     stat_targets: vec![2500, 12],
//!     sections: vec![
//!         SectionRect::new("hero", 0.0, 900.0),
//!         SectionRect::new("about", 900.0, 800.0),
//!     ],
//! };
//! let mut page = Page::new(layout, SiteConfig::presets(), clock.clone()).unwrap();
//!
//! page.handle_input(PageInput::Key(Key::ArrowRight));
//! assert_eq!(page.hero().unwrap().current_index(), 1);
//!
//! clock.advance(Duration::from_secs(6));
//! page.pump();
//! assert_eq!(page.gallery().unwrap().current_index(), 2);
//!
//! page.handle_input(PageInput::Scroll { scroll_top: 800.0, viewport_height: 900.0 });
//! assert_eq!(page.navigation().active_section(), "about");
//! ```
//!
//! # Features
//!
//! - `tokio`: an async driver that pumps a page in real time

pub mod carousel;
pub mod config;
pub mod counter;
mod error;
pub mod input;
pub mod nav;
pub mod page;
pub mod pause;
#[cfg(feature = "tokio")]
pub mod runtime;
pub mod slide;

pub use carousel::{Carousel, IndexChange};
pub use config::{CarouselConfig, CounterConfig, KeyboardScope, NavigationConfig, SiteConfig};
pub use counter::StatCounters;
pub use error::{CarouselError, ConfigError, Result};
pub use input::Key;
pub use nav::{Navigation, ScrollButtonDirection, SectionRect};
pub use page::{Page, PageInput, PageLayout, Section};
pub use pause::{PauseReason, PauseReasons};
pub use slide::SlideRole;
