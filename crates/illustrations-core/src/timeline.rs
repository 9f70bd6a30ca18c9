use crate::error::TimelineError;
use smallvec::SmallVec;

/// Largest `f32` below one; progress never rounds up to a full phase.
const BELOW_ONE: f32 = 1.0 - f32::EPSILON / 2.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Phase<T> {
    pub label: T,
    pub duration: f64,
}

impl<T> Phase<T> {
    pub fn new(label: T, duration: f64) -> Self {
        Self { label, duration }
    }
}

/// Where a point in time falls on a cyclic timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseState<'a, T> {
    pub index: usize,
    /// Intra-phase progress in `[0, 1)`.
    pub progress: f32,
    pub label: &'a T,
}

/// Ordered phases repeating with period [`Timeline::total`].
#[derive(Clone, Debug)]
pub struct Timeline<T> {
    phases: SmallVec<[Phase<T>; 4]>,
    total: f64,
}

impl<T> Timeline<T> {
    pub fn new(phases: impl IntoIterator<Item = Phase<T>>) -> Result<Self, TimelineError> {
        let phases: SmallVec<[Phase<T>; 4]> = phases.into_iter().collect();
        if phases.is_empty() {
            return Err(TimelineError::Empty);
        }
        for (index, p) in phases.iter().enumerate() {
            if !p.duration.is_finite() || p.duration < 0.0 {
                return Err(TimelineError::InvalidDuration {
                    index,
                    duration: p.duration,
                });
            }
        }
        let total: f64 = phases.iter().map(|p| p.duration).sum();
        if total <= 0.0 {
            return Err(TimelineError::ZeroLength);
        }
        Ok(Self { phases, total })
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn phases(&self) -> &[Phase<T>] {
        &self.phases
    }

    pub fn at(&self, elapsed: f64) -> PhaseState<'_, T> {
        let mut t = if elapsed.is_finite() {
            elapsed.rem_euclid(self.total)
        } else {
            0.0
        };
        for (index, p) in self.phases.iter().enumerate() {
            if t < p.duration {
                return PhaseState {
                    index,
                    progress: ((t / p.duration) as f32).clamp(0.0, BELOW_ONE),
                    label: &p.label,
                };
            }
            t -= p.duration;
        }
        // Float residue at the very end of the cycle belongs to the start.
        let index = self.phases.iter().position(|p| p.duration > 0.0).unwrap_or(0);
        PhaseState {
            index,
            progress: 0.0,
            label: &self.phases[index].label,
        }
    }

    /// Offset into the cycle at which phase `index` begins.
    pub fn phase_start(&self, index: usize) -> f64 {
        self.phases.iter().take(index).map(|p| p.duration).sum()
    }

    /// Inverse of [`Timeline::at`] modulo the cycle length.
    pub fn offset_of(&self, index: usize, progress: f32) -> f64 {
        let duration = self.phases.get(index).map(|p| p.duration).unwrap_or(0.0);
        self.phase_start(index) + duration * progress as f64
    }
}
