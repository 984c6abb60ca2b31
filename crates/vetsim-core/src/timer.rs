//! Timer system for VetSim.
//!
//! Provides one-shot and repeating timers. The manager does not run
//! callbacks: [`TimerManager::process_expired`] hands back the ids that
//! fired and the caller routes them to whichever component owns them.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::clock::Clock;
use crate::error::{Result, TimerError};

new_key_type! {
    /// A unique identifier for a timer.
    ///
    /// Ids are never reused, so a stopped timer's id will not match a timer
    /// started later.
    pub struct TimerId;
}

/// Repeating timers never fire more often than this.
const MIN_REPEAT_INTERVAL: Duration = Duration::from_millis(1);

/// Longer intervals are clamped to this, so deadlines never overflow `Instant`.
pub const MAX_TIMER_INTERVAL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// The type of timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    /// Fires once after the specified duration.
    OneShot,
    /// Fires repeatedly at the specified interval.
    Repeating,
}

/// Internal timer data.
#[derive(Debug)]
struct TimerData {
    /// When this timer should next fire.
    next_fire: Instant,
    /// The interval for repeating timers.
    interval: Duration,
    /// The kind of timer.
    kind: TimerKind,
}

/// An entry in the timer queue (min-heap by fire time, then start order).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    fire_time: Instant,
    sequence: u64,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_time == other.fire_time && self.sequence == other.sequence
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        match other.fire_time.cmp(&self.fire_time) {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            ord => ord,
        }
    }
}

/// Manages a set of timers against a [`Clock`].
pub struct TimerManager {
    /// The time source.
    clock: Arc<dyn Clock>,
    /// All registered timers.
    timers: SlotMap<TimerId, TimerData>,
    /// Priority queue of pending timer fires.
    queue: BinaryHeap<TimerQueueEntry>,
    /// Monotonic counter for stable ordering of equal fire times.
    sequence: u64,
}

impl TimerManager {
    /// Create a new timer manager reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            timers: SlotMap::with_key(),
            queue: BinaryHeap::new(),
            sequence: 0,
        }
    }

    /// The clock this manager schedules against.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    fn schedule(&mut self, id: TimerId, fire_time: Instant) {
        self.sequence += 1;
        self.queue.push(TimerQueueEntry {
            id,
            fire_time,
            sequence: self.sequence,
        });
    }

    fn start(&mut self, interval: Duration, kind: TimerKind) -> TimerId {
        let interval = interval.min(MAX_TIMER_INTERVAL);
        let next_fire = self.clock.now() + interval;
        let id = self.timers.insert(TimerData {
            next_fire,
            interval,
            kind,
        });
        self.schedule(id, next_fire);
        id
    }

    /// Start a one-shot timer that fires after the specified duration.
    ///
    /// Returns the timer ID that can be used to cancel the timer.
    pub fn start_one_shot(&mut self, duration: Duration) -> TimerId {
        self.start(duration, TimerKind::OneShot)
    }

    /// Start a repeating timer that fires at the specified interval.
    ///
    /// The first fire occurs after `interval`.
    pub fn start_repeating(&mut self, interval: Duration) -> TimerId {
        self.start(interval.max(MIN_REPEAT_INTERVAL), TimerKind::Repeating)
    }

    /// Stop and remove a timer.
    ///
    /// Returns an error if the timer has already fired (one-shot) or been
    /// stopped.
    pub fn stop(&mut self, id: TimerId) -> Result<()> {
        match self.timers.remove(id) {
            Some(_) => Ok(()),
            None => Err(TimerError::InvalidTimerId.into()),
        }
    }

    /// Check if a timer is still pending.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    fn discard_stale_head(&mut self) {
        while let Some(entry) = self.queue.peek() {
            let live = self
                .timers
                .get(entry.id)
                .is_some_and(|t| t.next_fire == entry.fire_time);
            if live {
                break;
            }
            self.queue.pop();
        }
    }

    /// The instant at which the next timer fires, if any.
    pub fn next_deadline(&mut self) -> Option<Instant> {
        self.discard_stale_head();
        self.queue.peek().map(|entry| entry.fire_time)
    }

    /// Get the duration until the next timer fires, if any.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        let now = self.clock.now();
        self.next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Collect every timer that is due now, in fire order.
    ///
    /// One-shot timers are removed once they fire. Repeating timers are
    /// rescheduled one interval from now, so each call yields a repeating
    /// timer at most once.
    #[tracing::instrument(skip(self), target = "vetsim_core::timer", level = "trace")]
    pub fn process_expired(&mut self) -> Vec<TimerId> {
        let now = self.clock.now();
        let mut fired = Vec::new();
        let mut rescheduled = Vec::new();

        while let Some(entry) = self.queue.peek().copied() {
            if entry.fire_time > now {
                break;
            }
            self.queue.pop();

            let Some(timer) = self.timers.get_mut(entry.id) else {
                continue;
            };
            if timer.next_fire != entry.fire_time {
                continue;
            }

            tracing::trace!(target: "vetsim_core::timer", id = ?entry.id, "timer fired");
            fired.push(entry.id);

            match timer.kind {
                TimerKind::OneShot => {
                    self.timers.remove(entry.id);
                }
                TimerKind::Repeating => {
                    timer.next_fire = now + timer.interval;
                    rescheduled.push((entry.id, timer.next_fire));
                }
            }
        }

        for (id, fire_time) in rescheduled {
            self.schedule(id, fire_time);
        }

        fired
    }

    /// Get the number of active timers.
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }
}

impl fmt::Debug for TimerManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerManager")
            .field("active", &self.timers.len())
            .field("queued", &self.queue.len())
            .finish()
    }
}

/// A thread-safe, cloneable handle to a [`TimerManager`].
///
/// Every component on a page holds a clone of the same handle; whoever
/// drives the page calls [`process_expired`](Self::process_expired) and
/// routes the ids.
#[derive(Clone)]
pub struct SharedTimerManager {
    inner: Arc<Mutex<TimerManager>>,
    clock: Arc<dyn Clock>,
}

impl SharedTimerManager {
    /// Create a new shared manager reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(TimerManager::new(clock.clone()))),
            clock,
        }
    }

    /// The current time according to the manager's clock.
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// The manager's clock.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn start_one_shot(&self, duration: Duration) -> TimerId {
        self.inner.lock().start_one_shot(duration)
    }

    pub fn start_repeating(&self, interval: Duration) -> TimerId {
        self.inner.lock().start_repeating(interval)
    }

    pub fn stop(&self, id: TimerId) -> Result<()> {
        self.inner.lock().stop(id)
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.inner.lock().is_active(id)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.inner.lock().next_deadline()
    }

    pub fn time_until_next(&self) -> Option<Duration> {
        self.inner.lock().time_until_next()
    }

    pub fn process_expired(&self) -> Vec<TimerId> {
        self.inner.lock().process_expired()
    }

    pub fn active_count(&self) -> usize {
        self.inner.lock().active_count()
    }
}

impl fmt::Debug for SharedTimerManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedTimerManager")
            .field(&*self.inner.lock())
            .finish()
    }
}

static_assertions::assert_impl_all!(SharedTimerManager: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn manager() -> (Arc<ManualClock>, TimerManager) {
        let clock = Arc::new(ManualClock::new());
        let manager = TimerManager::new(clock.clone());
        (clock, manager)
    }

    #[test]
    fn test_one_shot_fires_once() {
        let (clock, mut timers) = manager();
        let id = timers.start_one_shot(Duration::from_millis(100));

        clock.advance_ms(99);
        assert!(timers.process_expired().is_empty());

        clock.advance_ms(1);
        assert_eq!(timers.process_expired(), vec![id]);
        assert!(!timers.is_active(id));

        clock.advance_ms(100);
        assert!(timers.process_expired().is_empty());
    }

    #[test]
    fn test_repeating_fires_each_interval() {
        let (clock, mut timers) = manager();
        let id = timers.start_repeating(Duration::from_millis(50));

        for _ in 0..3 {
            clock.advance_ms(50);
            assert_eq!(timers.process_expired(), vec![id]);
        }
        assert!(timers.is_active(id));
    }

    #[test]
    fn test_huge_interval_is_clamped() {
        let (clock, mut timers) = manager();
        let id = timers.start_one_shot(Duration::MAX);
        assert!(timers.is_active(id));
        assert_eq!(timers.time_until_next(), Some(MAX_TIMER_INTERVAL));

        clock.advance(MAX_TIMER_INTERVAL);
        assert_eq!(timers.process_expired(), vec![id]);
    }

    #[test]
    fn test_stop_prevents_fire() {
        let (clock, mut timers) = manager();
        let id = timers.start_one_shot(Duration::from_millis(10));
        timers.stop(id).unwrap();

        clock.advance_ms(10);
        assert!(timers.process_expired().is_empty());
        assert!(matches!(
            timers.stop(id),
            Err(crate::CoreError::Timer(TimerError::InvalidTimerId))
        ));
    }

    #[test]
    fn test_fire_order_is_by_deadline_then_start_order() {
        let (clock, mut timers) = manager();
        let late = timers.start_one_shot(Duration::from_millis(30));
        let first = timers.start_one_shot(Duration::from_millis(10));
        let second = timers.start_one_shot(Duration::from_millis(10));

        clock.advance_ms(30);
        assert_eq!(timers.process_expired(), vec![first, second, late]);
    }

    #[test]
    fn test_time_until_next_skips_stopped_timers() {
        let (clock, mut timers) = manager();
        let soon = timers.start_one_shot(Duration::from_millis(10));
        timers.start_one_shot(Duration::from_millis(40));
        timers.stop(soon).unwrap();

        assert_eq!(timers.time_until_next(), Some(Duration::from_millis(40)));
        clock.advance_ms(50);
        assert_eq!(timers.time_until_next(), Some(Duration::ZERO));
    }

    #[test]
    fn test_zero_interval_repeating_does_not_spin() {
        let (clock, mut timers) = manager();
        let id = timers.start_repeating(Duration::ZERO);
        clock.advance_ms(1);
        assert_eq!(timers.process_expired(), vec![id]);
        assert!(timers.process_expired().is_empty());
    }

    #[test]
    fn test_active_count() {
        let (_clock, mut timers) = manager();
        assert_eq!(timers.active_count(), 0);
        let a = timers.start_repeating(Duration::from_secs(1));
        timers.start_one_shot(Duration::from_secs(1));
        assert_eq!(timers.active_count(), 2);
        timers.stop(a).unwrap();
        assert_eq!(timers.active_count(), 1);
    }
}
