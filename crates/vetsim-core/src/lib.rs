//! Core systems for VetSim.
//!
//! This crate provides the building blocks the page-level components are
//! written against:
//!
//! - **Clock**: A source of monotonic time that can be real or manually driven
//! - **Timers**: One-shot and repeating timers with explicit cancellation
//! - **Signal/Slot System**: Type-safe notification of state changes
//! - **Property System**: Values with change detection
//!
//! Nothing in here knows about carousels. Components own the timers they
//! start and receive fired timer ids from whoever pumps the
//! [`SharedTimerManager`].
//!
//! # Timer Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use vetsim_core::{ManualClock, SharedTimerManager};
//!
//! let clock = Arc::new(ManualClock::new());
//! let timers = SharedTimerManager::new(clock.clone());
//!
//! let id = timers.start_repeating(Duration::from_millis(500));
//!
//! clock.advance(Duration::from_millis(500));
//! assert_eq!(timers.process_expired(), vec![id]);
//!
//! timers.stop(id).unwrap();
//! clock.advance(Duration::from_millis(500));
//! assert!(timers.process_expired().is_empty());
//! ```
//!
//! # Signal Example
//!
//! ```
//! use vetsim_core::Signal;
//!
//! let index_changed = Signal::<usize>::new();
//! let conn_id = index_changed.connect(|index| {
//!     println!("now showing slide {}", index);
//! });
//!
//! index_changed.emit(2);
//! index_changed.disconnect(conn_id);
//! ```

pub mod clock;
mod error;
pub mod logging;
pub mod property;
pub mod signal;
mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CoreError, Result, TimerError};
pub use property::Property;
pub use signal::{ConnectionId, Signal};
pub use timer::{SharedTimerManager, TimerId, TimerManager, MAX_TIMER_INTERVAL};
