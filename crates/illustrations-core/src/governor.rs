use crate::constants::{GOVERNOR_WINDOW, LOW_POWER_THRESHOLD_MS};
use std::collections::VecDeque;

/// Rolling frame-time monitor that latches a session-wide low-power flag.
///
/// Once the mean of a full window exceeds the threshold the flag stays set
/// for the rest of the session.
#[derive(Clone, Debug)]
pub struct PerformanceGovernor {
    samples: VecDeque<f64>,
    sum: f64,
    window: usize,
    threshold_ms: f64,
    low_power: bool,
}

impl Default for PerformanceGovernor {
    fn default() -> Self {
        Self::new(GOVERNOR_WINDOW, LOW_POWER_THRESHOLD_MS)
    }
}

impl PerformanceGovernor {
    pub fn new(window: usize, threshold_ms: f64) -> Self {
        let window = window.max(1);
        Self {
            samples: VecDeque::with_capacity(window),
            sum: 0.0,
            window,
            threshold_ms,
            low_power: false,
        }
    }

    pub fn sample(&mut self, dt_ms: f64) {
        if !dt_ms.is_finite() {
            return;
        }
        self.samples.push_back(dt_ms);
        self.sum += dt_ms;
        while self.samples.len() > self.window {
            if let Some(old) = self.samples.pop_front() {
                self.sum -= old;
            }
        }
        if !self.low_power && self.samples.len() == self.window {
            let mean = self.sum / self.window as f64;
            if mean > self.threshold_ms {
                self.low_power = true;
                log::warn!(
                    "[governor] mean frame time {:.1}ms over {} frames; switching to low-power",
                    mean,
                    self.window
                );
            }
        }
    }

    #[inline]
    pub fn low_power(&self) -> bool {
        self.low_power
    }

    pub fn mean(&self) -> Option<f64> {
        (!self.samples.is_empty()).then(|| self.sum / self.samples.len() as f64)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
