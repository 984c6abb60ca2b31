//! Animated statistics counters.
//!
//! The clinic page shows a row of figures (patients treated, years open,
//! ...) that count up from zero the first time the row scrolls into view.
//! Counters start one after another, each delayed by the configured
//! stagger, and decelerate towards their target.
//!
//! Values are sampled, not pushed: the rendering layer asks for
//! [`StatCounters::values_at`] on each frame.

use std::time::{Duration, Instant};

use vetsim_core::Signal;

use crate::config::CounterConfig;

/// Quartic ease-out: fast start, slow finish.
///
/// `t` is clamped to `[0, 1]`.
#[inline]
pub fn ease_out_quart(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(4)
}

/// One animated figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatCounter {
    target: u64,
    delay: Duration,
}

impl StatCounter {
    /// The value this counter settles on.
    pub fn target(&self) -> u64 {
        self.target
    }

    /// Delay between the trigger and this counter starting.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Displayed value `elapsed` after the trigger.
    pub fn value_after(&self, elapsed: Duration, duration: Duration) -> u64 {
        let Some(running) = elapsed.checked_sub(self.delay) else {
            return 0;
        };
        if duration.is_zero() || running >= duration {
            return self.target;
        }
        let progress = running.as_secs_f32() / duration.as_secs_f32();
        let value = (self.target as f64 * ease_out_quart(progress) as f64).floor() as u64;
        value.min(self.target)
    }
}

/// A row of counters that animates once.
#[derive(Debug)]
pub struct StatCounters {
    counters: Vec<StatCounter>,
    config: CounterConfig,
    started_at: Option<Instant>,

    /// Signal emitted once, when the animation is triggered.
    pub started: Signal<()>,
}

impl StatCounters {
    /// Create counters for the given targets, in display order.
    pub fn new(targets: impl IntoIterator<Item = u64>, config: CounterConfig) -> Self {
        let counters = targets
            .into_iter()
            .enumerate()
            .map(|(index, target)| StatCounter {
                target,
                delay: config
                    .stagger
                    .checked_mul(index as u32)
                    .unwrap_or(Duration::MAX),
            })
            .collect();
        Self {
            counters,
            config,
            started_at: None,
            started: Signal::new(),
        }
    }

    /// Parse targets from `data-count` attribute values.
    ///
    /// Values that do not parse as a non-negative integer count to zero.
    pub fn from_attributes<'a>(
        values: impl IntoIterator<Item = &'a str>,
        config: CounterConfig,
    ) -> Self {
        Self::new(
            values
                .into_iter()
                .map(|value| value.trim().parse::<u64>().unwrap_or(0)),
            config,
        )
    }

    /// The counters, in display order.
    pub fn counters(&self) -> &[StatCounter] {
        &self.counters
    }

    /// Number of counters.
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    /// Whether there are no counters.
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Whether the animation has been triggered.
    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// The row's visibility was reported.
    ///
    /// The first report of `visible == true` starts the animation at `now`;
    /// everything after that is ignored. Returns whether this call started
    /// it.
    pub fn set_visible(&mut self, visible: bool, now: Instant) -> bool {
        if !visible || self.started_at.is_some() || self.counters.is_empty() {
            return false;
        }
        self.started_at = Some(now);
        tracing::debug!(target: "vetsim::counter", count = self.counters.len(), "stat counters started");
        self.started.emit(());
        true
    }

    /// Displayed values at `now`; all zero before the trigger.
    pub fn values_at(&self, now: Instant) -> Vec<u64> {
        let elapsed = self
            .started_at
            .map(|start| now.saturating_duration_since(start))
            .unwrap_or_default();
        self.counters
            .iter()
            .map(|counter| match self.started_at {
                Some(_) => counter.value_after(elapsed, self.config.duration),
                None => 0,
            })
            .collect()
    }

    /// Whether every counter has reached its target at `now`.
    pub fn is_finished_at(&self, now: Instant) -> bool {
        let Some(start) = self.started_at else {
            return false;
        };
        let last_delay = self.counters.last().map(|c| c.delay).unwrap_or_default();
        now.saturating_duration_since(start) >= last_delay.saturating_add(self.config.duration)
    }
}
