use rand::prelude::*;

/// Seeded generator for reproducible scene layouts.
///
/// Scenes that lay out fields or lattices from a fixed seed look the same on
/// every reload; scenes that reshuffle per cycle use [`SceneRng::from_entropy`].
#[derive(Clone, Debug)]
pub struct SceneRng {
    inner: StdRng,
}

impl SceneRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_entropy(),
        }
    }

    /// Uniform in `[0, 1)`.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        self.inner.gen::<f32>()
    }

    #[inline]
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.next_f32()
    }

    /// Uniform in `[-1, 1)`.
    #[inline]
    pub fn signed(&mut self) -> f32 {
        self.next_f32() * 2.0 - 1.0
    }

    /// Uniform index in `0..len`; 0 for an empty range.
    #[inline]
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            0
        } else {
            self.inner.gen_range(0..len)
        }
    }

    pub fn angle(&mut self) -> f32 {
        self.next_f32() * std::f32::consts::TAU
    }
}
