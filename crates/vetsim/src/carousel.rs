//! Carousel controller.
//!
//! [`Carousel`] cycles a fixed set of slides. It is driven by autoplay,
//! explicit controls (previous/next buttons, indicator dots), the keyboard
//! and touch swipes, and it keeps one invariant above all others: exactly
//! one slide is active at any time.
//!
//! # Transition lock
//!
//! An accepted navigation request locks the carousel for the configured
//! transition duration. Requests arriving while locked are dropped, not
//! queued. Every accepted request also restarts the autoplay timer, so the
//! next automatic advance is always a full period away.
//!
//! # Timers
//!
//! The carousel starts its timers on a [`SharedTimerManager`] and expects
//! whoever drives the page to hand fired ids back through
//! [`Carousel::handle_timer`]. Ids it no longer owns are ignored.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use vetsim::{Carousel, CarouselConfig};
//! use vetsim_core::{ManualClock, SharedTimerManager};
//!
//! let clock = Arc::new(ManualClock::new());
//! let timers = SharedTimerManager::new(clock.clone());
//! let config = CarouselConfig::hero().with_autoplay_period(Duration::from_secs(5));
//! let mut hero = Carousel::new("hero", 4, config, timers.clone()).unwrap();
//!
//! hero.current_index_changed.connect(|change| {
//!     println!("slide {} -> {}", change.previous, change.current);
//! });
//!
//! clock.advance(Duration::from_secs(5));
//! for id in timers.process_expired() {
//!     hero.handle_timer(id);
//! }
//! assert_eq!(hero.current_index(), 1);
//! ```

use vetsim_core::{Property, SharedTimerManager, Signal, TimerId};

use crate::config::{CarouselConfig, KeyboardScope};
use crate::error::{CarouselError, Result};
use crate::input::{swipe_direction, Key, SwipeDirection, TouchTracker};
use crate::pause::{PauseReason, PauseReasons};
use crate::slide::{role_of, SlideRole};

/// Payload of [`Carousel::current_index_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexChange {
    /// The slide that was active.
    pub previous: usize,
    /// The slide that is now active.
    pub current: usize,
}

/// A slideshow controller for one group of slides.
///
/// # Signals
///
/// - `current_index_changed(IndexChange)`: a navigation request was accepted
/// - `transition_started(usize)`: the transition lock engaged for a slide
/// - `transition_finished(usize)`: the transition lock released
/// - `paused_changed(bool)`: autoplay became held or free
#[derive(Debug)]
pub struct Carousel {
    /// Name used in logs.
    label: String,

    /// Number of slides; never zero.
    slide_count: usize,

    /// Timing and input settings.
    config: CarouselConfig,

    /// Where timers are registered.
    timers: SharedTimerManager,

    /// The active slide.
    current_index: Property<usize>,

    /// Whether the transition lock is engaged.
    transitioning: bool,

    /// Active pause reasons; autoplay holds while non-empty.
    pause_reasons: PauseReasons,

    /// Repeating autoplay timer, while autoplay runs.
    autoplay_timer: Option<TimerId>,

    /// One-shot timer releasing the transition lock.
    transition_timer: Option<TimerId>,

    /// One-shot timer lifting the touch pause after a gesture.
    touch_resume_timer: Option<TimerId>,

    /// Current touch gesture.
    touch: TouchTracker,

    /// Last reported viewport visibility.
    in_viewport: bool,

    /// Set by `destroy()`; terminal.
    destroyed: bool,

    /// Signal emitted when the active slide changes.
    pub current_index_changed: Signal<IndexChange>,

    /// Signal emitted when a transition begins, with the new slide index.
    pub transition_started: Signal<usize>,

    /// Signal emitted when the transition lock is released.
    pub transition_finished: Signal<usize>,

    /// Signal emitted when the derived paused flag flips.
    pub paused_changed: Signal<bool>,
}

impl Carousel {
    /// Create a carousel over `slide_count` slides.
    ///
    /// Slide 0 starts active. Autoplay starts immediately when
    /// `config.autoplay` is set.
    pub fn new(
        label: impl Into<String>,
        slide_count: usize,
        config: CarouselConfig,
        timers: SharedTimerManager,
    ) -> Result<Self> {
        if slide_count == 0 {
            return Err(CarouselError::NoSlides);
        }
        config.validate()?;

        let mut carousel = Self {
            label: label.into(),
            slide_count,
            touch: TouchTracker::new(config.swipe_threshold),
            config,
            timers,
            current_index: Property::new(0),
            transitioning: false,
            pause_reasons: PauseReasons::new(),
            autoplay_timer: None,
            transition_timer: None,
            touch_resume_timer: None,
            in_viewport: true,
            destroyed: false,
            current_index_changed: Signal::new(),
            transition_started: Signal::new(),
            transition_finished: Signal::new(),
            paused_changed: Signal::new(),
        };

        tracing::debug!(
            target: "vetsim::carousel",
            label = %carousel.label,
            slide_count,
            autoplay = carousel.config.autoplay,
            "carousel created"
        );

        if carousel.config.autoplay {
            carousel.start_autoplay();
        }
        Ok(carousel)
    }

    // =========================================================================
    // State
    // =========================================================================

    /// The name used in logs.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The configuration this carousel was built with.
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Number of slides.
    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// Index of the active slide.
    pub fn current_index(&self) -> usize {
        self.current_index.get()
    }

    /// Whether the transition lock is engaged.
    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// Whether autoplay is held by at least one pause reason.
    pub fn is_paused(&self) -> bool {
        !self.pause_reasons.is_empty()
    }

    /// Whether a specific reason is holding autoplay.
    pub fn is_paused_for(&self, reason: PauseReason) -> bool {
        self.pause_reasons.contains(reason)
    }

    /// Every reason currently holding autoplay.
    pub fn pause_reasons(&self) -> PauseReasons {
        self.pause_reasons
    }

    /// Whether the autoplay timer is running.
    ///
    /// A running timer still skips its ticks while paused or transitioning.
    pub fn is_autoplay_running(&self) -> bool {
        self.autoplay_timer.is_some()
    }

    /// Whether the carousel was last reported inside the viewport.
    pub fn is_in_viewport(&self) -> bool {
        self.in_viewport
    }

    /// Whether [`destroy`](Self::destroy) has been called.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Presentation role of slide `index`.
    pub fn slide_role(&self, index: usize) -> SlideRole {
        role_of(index, self.current_index(), self.slide_count)
    }

    /// Presentation roles of every slide, in order.
    pub fn slide_roles(&self) -> Vec<SlideRole> {
        let current = self.current_index();
        (0..self.slide_count)
            .map(|index| role_of(index, current, self.slide_count))
            .collect()
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Make slide `index` active.
    ///
    /// Ignored while transitioning, when `index` is already active, and after
    /// destroy. Returns whether the request was accepted.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `index` is out of range. Release builds log
    /// a warning and ignore the request. Use [`try_go_to`](Self::try_go_to)
    /// for indices that come from outside the program.
    pub fn go_to(&mut self, index: usize) -> bool {
        debug_assert!(
            index < self.slide_count,
            "slide index {index} out of range for {} slides",
            self.slide_count
        );
        if index >= self.slide_count {
            tracing::warn!(
                target: "vetsim::carousel",
                label = %self.label,
                index,
                slide_count = self.slide_count,
                "ignoring out-of-range slide index"
            );
            return false;
        }
        self.request(index)
    }

    /// Checked variant of [`go_to`](Self::go_to).
    ///
    /// Returns an error for an out-of-range index, otherwise whether the
    /// request was accepted.
    pub fn try_go_to(&mut self, index: usize) -> Result<bool> {
        if index >= self.slide_count {
            return Err(CarouselError::invalid_index(index, self.slide_count));
        }
        Ok(self.request(index))
    }

    /// Advance to the following slide, wrapping to the first.
    pub fn next(&mut self) -> bool {
        let index = (self.current_index() + 1) % self.slide_count;
        self.request(index)
    }

    /// Go back to the preceding slide, wrapping to the last.
    pub fn previous(&mut self) -> bool {
        let index = (self.current_index() + self.slide_count - 1) % self.slide_count;
        self.request(index)
    }

    fn request(&mut self, index: usize) -> bool {
        if self.destroyed {
            return false;
        }
        if self.transitioning {
            tracing::trace!(target: "vetsim::carousel", label = %self.label, index, "navigation ignored, transition in progress");
            return false;
        }
        let Some(previous) = self.current_index.replace(index) else {
            return false;
        };

        self.transitioning = true;
        if let Some(stale) = self.transition_timer.take() {
            let _ = self.timers.stop(stale);
        }
        self.transition_timer = Some(self.timers.start_one_shot(self.config.transition_duration));

        if self.autoplay_timer.is_some() {
            self.restart_autoplay();
        }

        tracing::debug!(target: "vetsim::carousel", label = %self.label, previous, current = index, "slide changed");
        self.transition_started.emit(index);
        self.current_index_changed.emit(IndexChange {
            previous,
            current: index,
        });
        true
    }

    // =========================================================================
    // Autoplay
    // =========================================================================

    /// Start the autoplay timer if it is not already running.
    pub fn start_autoplay(&mut self) {
        if self.destroyed || self.autoplay_timer.is_some() {
            return;
        }
        self.autoplay_timer = Some(self.timers.start_repeating(self.config.autoplay_period));
        tracing::trace!(target: "vetsim::carousel", label = %self.label, "autoplay started");
    }

    /// Cancel the autoplay timer.
    pub fn stop_autoplay(&mut self) {
        if let Some(id) = self.autoplay_timer.take() {
            let _ = self.timers.stop(id);
            tracing::trace!(target: "vetsim::carousel", label = %self.label, "autoplay stopped");
        }
    }

    /// Stop and start autoplay, so the next tick is a full period away.
    pub fn restart_autoplay(&mut self) {
        self.stop_autoplay();
        self.start_autoplay();
    }

    /// Lift the manual pause and make sure autoplay is running.
    pub fn play(&mut self) {
        self.resume();
        self.start_autoplay();
    }

    fn autoplay_tick(&mut self) {
        if self.is_paused() || self.transitioning {
            tracing::trace!(
                target: "vetsim::carousel",
                label = %self.label,
                reasons = ?self.pause_reasons,
                transitioning = self.transitioning,
                "autoplay tick skipped"
            );
            return;
        }
        self.next();
    }

    // =========================================================================
    // Pausing
    // =========================================================================

    /// Hold autoplay through the public API.
    pub fn pause(&mut self) {
        self.pause_for(PauseReason::Manual);
    }

    /// Release a hold placed with [`pause`](Self::pause).
    ///
    /// Holds placed by other reasons (hover, touch, visibility) stay.
    pub fn resume(&mut self) {
        self.resume_for(PauseReason::Manual);
    }

    /// Hold autoplay for `reason`.
    pub fn pause_for(&mut self, reason: PauseReason) {
        if self.destroyed {
            return;
        }
        let was_paused = self.is_paused();
        if self.pause_reasons.insert(reason) {
            tracing::debug!(target: "vetsim::carousel", label = %self.label, ?reason, "pause reason added");
        }
        if !was_paused {
            self.paused_changed.emit(true);
        }
    }

    /// Release the hold for `reason`.
    pub fn resume_for(&mut self, reason: PauseReason) {
        if self.destroyed {
            return;
        }
        if !self.pause_reasons.remove(reason) {
            return;
        }
        tracing::debug!(target: "vetsim::carousel", label = %self.label, ?reason, "pause reason removed");
        if !self.is_paused() {
            self.paused_changed.emit(false);
        }
    }

    // =========================================================================
    // Input bindings
    // =========================================================================

    /// The pointer entered the carousel.
    pub fn pointer_entered(&mut self) {
        self.pause_for(PauseReason::Hover);
    }

    /// The pointer left the carousel.
    pub fn pointer_left(&mut self) {
        self.resume_for(PauseReason::Hover);
    }

    /// A key was pressed while the page had focus.
    ///
    /// Returns `true` when the key was consumed; the caller should then
    /// suppress the browser's default action.
    pub fn key_pressed(&mut self, key: Key) -> bool {
        if self.destroyed {
            return false;
        }
        if self.config.keyboard_scope == KeyboardScope::WhenInViewport && !self.in_viewport {
            return false;
        }
        match key {
            Key::ArrowLeft => {
                self.previous();
                true
            }
            Key::ArrowRight => {
                self.next();
                true
            }
            Key::Other => false,
        }
    }

    /// An indicator dot was clicked.
    pub fn indicator_clicked(&mut self, index: usize) -> Result<bool> {
        self.try_go_to(index)
    }

    /// The document's visibility changed.
    pub fn set_document_hidden(&mut self, hidden: bool) {
        if hidden {
            self.pause_for(PauseReason::DocumentHidden);
        } else {
            self.resume_for(PauseReason::DocumentHidden);
        }
    }

    /// The carousel scrolled into or out of the viewport.
    pub fn set_in_viewport(&mut self, visible: bool) {
        if self.destroyed {
            return;
        }
        self.in_viewport = visible;
        if visible {
            self.resume_for(PauseReason::Offscreen);
        } else {
            self.pause_for(PauseReason::Offscreen);
        }
    }

    /// Navigate according to a horizontal swipe displacement.
    ///
    /// `delta_x` is the end position minus the start position. A leftward
    /// swipe beyond the threshold shows the next slide, a rightward one the
    /// previous slide. Returns whether a navigation request was accepted.
    pub fn handle_swipe(&mut self, delta_x: f32) -> bool {
        if self.destroyed {
            return false;
        }
        match swipe_direction(delta_x, self.config.swipe_threshold) {
            Some(SwipeDirection::Left) => self.next(),
            Some(SwipeDirection::Right) => self.previous(),
            None => {
                tracing::trace!(target: "vetsim::carousel", label = %self.label, delta_x, "swipe below threshold");
                false
            }
        }
    }

    /// A finger touched down at `x`.
    pub fn touch_started(&mut self, x: f32) {
        if self.destroyed {
            return;
        }
        if let Some(id) = self.touch_resume_timer.take() {
            let _ = self.timers.stop(id);
        }
        self.touch.start(x);
        self.pause_for(PauseReason::Touch);
    }

    /// The finger moved to `x`; returns the drag preview offset.
    pub fn touch_moved(&self, x: f32) -> f32 {
        if self.destroyed {
            return 0.0;
        }
        self.touch.preview_offset(x)
    }

    /// The finger lifted at `x`.
    ///
    /// Applies the swipe, then lifts the touch pause after the configured
    /// delay. Returns whether the swipe navigated.
    pub fn touch_ended(&mut self, x: f32) -> bool {
        if self.destroyed {
            return false;
        }
        let navigated = match self.touch.end(x) {
            Some(delta_x) => self.handle_swipe(delta_x),
            None => false,
        };
        self.schedule_touch_resume();
        navigated
    }

    /// The touch was interrupted by the browser.
    pub fn touch_cancelled(&mut self) {
        if self.destroyed {
            return;
        }
        self.touch.cancel();
        self.schedule_touch_resume();
    }

    fn schedule_touch_resume(&mut self) {
        if !self.is_paused_for(PauseReason::Touch) {
            return;
        }
        if let Some(id) = self.touch_resume_timer.take() {
            let _ = self.timers.stop(id);
        }
        self.touch_resume_timer = Some(self.timers.start_one_shot(self.config.touch_resume_delay));
    }

    // =========================================================================
    // Timers and lifecycle
    // =========================================================================

    /// Deliver a fired timer.
    ///
    /// Returns `true` if the timer belonged to this carousel. Fires for
    /// timers it has since cancelled, and every fire after destroy, are
    /// ignored.
    pub fn handle_timer(&mut self, id: TimerId) -> bool {
        if self.destroyed {
            return false;
        }
        if self.autoplay_timer == Some(id) {
            self.autoplay_tick();
            true
        } else if self.transition_timer == Some(id) {
            self.transition_timer = None;
            self.transitioning = false;
            self.transition_finished.emit(self.current_index());
            true
        } else if self.touch_resume_timer == Some(id) {
            self.touch_resume_timer = None;
            self.resume_for(PauseReason::Touch);
            true
        } else {
            false
        }
    }

    /// Whether `id` is one of the timers this carousel currently owns.
    pub fn owns_timer(&self, id: TimerId) -> bool {
        !self.destroyed
            && [self.autoplay_timer, self.transition_timer, self.touch_resume_timer]
                .contains(&Some(id))
    }

    /// Tear the carousel down.
    ///
    /// Cancels every timer and disconnects every slot. Afterwards no
    /// operation has any effect. Calling it again does nothing.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.stop_autoplay();
        for id in [self.transition_timer.take(), self.touch_resume_timer.take()]
            .into_iter()
            .flatten()
        {
            let _ = self.timers.stop(id);
        }
        self.touch.cancel();
        self.destroyed = true;

        self.current_index_changed.disconnect_all();
        self.transition_started.disconnect_all();
        self.transition_finished.disconnect_all();
        self.paused_changed.disconnect_all();

        tracing::debug!(target: "vetsim::carousel", label = %self.label, "carousel destroyed");
    }
}

impl Drop for Carousel {
    fn drop(&mut self) {
        self.destroy();
    }
}

static_assertions::assert_impl_all!(Carousel: Send);
