use gridrange::ScrollPhase;

/// Default delay after the last scroll event before scrolling is considered finished.
pub const DEFAULT_SCROLL_RESET_DELAY_MS: u64 = 150;

/// Turns raw scroll events into the [`ScrollPhase`] of the next render pass.
///
/// A scroll event starts (or extends) a gesture; [`ScrollTracker::tick`] ends it once no event
/// was seen for the reset delay. With `always_cache` set, the phase is
/// [`ScrollPhase::OptOutAlwaysCache`] no matter what.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollTracker {
    is_scrolling: bool,
    last_scroll_event_ms: Option<u64>,
    reset_delay_ms: u64,
    always_cache: bool,
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_RESET_DELAY_MS)
    }
}

impl ScrollTracker {
    pub fn new(reset_delay_ms: u64) -> Self {
        Self {
            is_scrolling: false,
            last_scroll_event_ms: None,
            reset_delay_ms,
            always_cache: false,
        }
    }

    pub fn with_always_cache(mut self, always_cache: bool) -> Self {
        self.always_cache = always_cache;
        self
    }

    pub fn always_cache(&self) -> bool {
        self.always_cache
    }

    pub fn set_always_cache(&mut self, always_cache: bool) {
        self.always_cache = always_cache;
    }

    pub fn reset_delay_ms(&self) -> u64 {
        self.reset_delay_ms
    }

    pub fn set_reset_delay_ms(&mut self, delay_ms: u64) {
        self.reset_delay_ms = delay_ms;
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    pub fn last_scroll_event_ms(&self) -> Option<u64> {
        self.last_scroll_event_ms
    }

    /// The phase the next render pass should declare.
    pub fn phase(&self) -> ScrollPhase {
        if self.always_cache {
            ScrollPhase::OptOutAlwaysCache
        } else if self.is_scrolling {
            ScrollPhase::Active
        } else {
            ScrollPhase::Idle
        }
    }

    /// Records a scroll event at `now_ms`.
    pub fn on_scroll_event(&mut self, now_ms: u64) {
        self.last_scroll_event_ms = Some(now_ms);
        self.set_is_scrolling(true);
    }

    /// Forces the scrolling state (e.g. from a native "scroll end" event).
    pub fn set_is_scrolling(&mut self, is_scrolling: bool) {
        if self.is_scrolling == is_scrolling {
            return;
        }
        self.is_scrolling = is_scrolling;
        if !is_scrolling {
            self.last_scroll_event_ms = None;
        }
        gtrace!(is_scrolling, "ScrollTracker::set_is_scrolling");
    }

    /// Debounces the end of a gesture.
    ///
    /// Returns `true` exactly when this call ended the gesture.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.is_scrolling {
            return false;
        }
        let Some(last) = self.last_scroll_event_ms else {
            return false;
        };
        if now_ms.saturating_sub(last) < self.reset_delay_ms {
            return false;
        }
        self.set_is_scrolling(false);
        true
    }
}
