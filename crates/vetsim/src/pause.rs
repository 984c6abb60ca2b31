//! Pause bookkeeping for autoplay.
//!
//! Several independent inputs can stop a carousel from auto-advancing: the
//! pointer hovering it, a finger on it, the browser tab being hidden, the
//! carousel scrolling out of view, or an explicit pause call. Each one is a
//! [`PauseReason`]. Autoplay is paused while at least one reason is active,
//! so lifting one reason never cancels another.

use std::fmt;

/// Something that holds autoplay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PauseReason {
    /// The pointer is over the carousel.
    Hover = 1 << 0,
    /// A touch gesture is in progress or has just ended.
    Touch = 1 << 1,
    /// The document is hidden (background tab, minimized window).
    DocumentHidden = 1 << 2,
    /// The carousel is scrolled out of the viewport.
    Offscreen = 1 << 3,
    /// Paused through the public API.
    Manual = 1 << 4,
}

impl PauseReason {
    /// Every reason, in declaration order.
    pub const ALL: [PauseReason; 5] = [
        PauseReason::Hover,
        PauseReason::Touch,
        PauseReason::DocumentHidden,
        PauseReason::Offscreen,
        PauseReason::Manual,
    ];

    fn bit(self) -> u8 {
        self as u8
    }
}

/// The set of currently active pause reasons.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct PauseReasons {
    bits: u8,
}

impl PauseReasons {
    /// An empty set.
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Add a reason. Returns `true` if it was not already present.
    pub fn insert(&mut self, reason: PauseReason) -> bool {
        let added = !self.contains(reason);
        self.bits |= reason.bit();
        added
    }

    /// Remove a reason. Returns `true` if it was present.
    pub fn remove(&mut self, reason: PauseReason) -> bool {
        let removed = self.contains(reason);
        self.bits &= !reason.bit();
        removed
    }

    /// Whether a reason is active.
    pub fn contains(&self, reason: PauseReason) -> bool {
        self.bits & reason.bit() != 0
    }

    /// Whether no reason is active.
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Iterate over the active reasons.
    pub fn iter(&self) -> impl Iterator<Item = PauseReason> + '_ {
        PauseReason::ALL.into_iter().filter(|r| self.contains(*r))
    }
}

impl fmt::Debug for PauseReasons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reasons_are_independent() {
        let mut reasons = PauseReasons::new();
        assert!(reasons.insert(PauseReason::Hover));
        assert!(reasons.insert(PauseReason::DocumentHidden));
        assert!(!reasons.insert(PauseReason::Hover));

        assert!(reasons.remove(PauseReason::Hover));
        assert!(!reasons.is_empty());
        assert!(reasons.contains(PauseReason::DocumentHidden));

        assert!(reasons.remove(PauseReason::DocumentHidden));
        assert!(reasons.is_empty());
        assert!(!reasons.remove(PauseReason::DocumentHidden));
    }

    #[test]
    fn test_iter_and_debug() {
        let mut reasons = PauseReasons::new();
        reasons.insert(PauseReason::Manual);
        reasons.insert(PauseReason::Touch);
        assert_eq!(
            reasons.iter().collect::<Vec<_>>(),
            vec![PauseReason::Touch, PauseReason::Manual]
        );
        assert_eq!(format!("{reasons:?}"), "{Touch, Manual}");
    }
}
