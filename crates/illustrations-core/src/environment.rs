use crate::constants::SCROLL_SETTLE_MS;
use crate::governor::PerformanceGovernor;

/// Page-wide motion state handed to every scheduler tick.
///
/// The browser front end updates the inputs from media-query polling and
/// scroll events; the scheduler owns the update of the governor.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    reduced_motion: bool,
    last_scroll_at: Option<f64>,
    pub governor: PerformanceGovernor,
    rerender_requested: bool,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current reduce-motion preference; a change forces one
    /// re-render of every scene.
    pub fn set_reduced_motion(&mut self, reduced: bool) -> bool {
        if self.reduced_motion == reduced {
            return false;
        }
        log::info!("[environment] reduced motion {}", if reduced { "on" } else { "off" });
        self.reduced_motion = reduced;
        self.rerender_requested = true;
        true
    }

    pub fn note_scroll(&mut self, now_ms: f64) {
        self.last_scroll_at = Some(now_ms);
    }

    /// Settle scrolling once the quiet period has passed.
    pub fn advance(&mut self, now_ms: f64) {
        if let Some(at) = self.last_scroll_at {
            if now_ms - at >= SCROLL_SETTLE_MS {
                self.last_scroll_at = None;
                self.rerender_requested = true;
            }
        }
    }

    #[inline]
    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    #[inline]
    pub fn scrolling(&self) -> bool {
        self.last_scroll_at.is_some()
    }

    #[inline]
    pub fn low_power(&self) -> bool {
        self.governor.low_power()
    }

    /// Motion suppressed by the user or by an in-progress scroll; frame
    /// timings taken now say nothing about rendering cost.
    #[inline]
    pub fn motion_suppressed(&self) -> bool {
        self.reduced_motion || self.scrolling()
    }

    #[inline]
    pub fn paused(&self) -> bool {
        self.motion_suppressed() || self.low_power()
    }

    pub fn request_rerender(&mut self) {
        self.rerender_requested = true;
    }

    pub fn take_rerender_request(&mut self) -> bool {
        std::mem::take(&mut self.rerender_requested)
    }
}
