use serde::{Deserialize, Serialize};

/// An eight-dimensional perceptual profile for a name or syllable.
///
/// The acoustic half (hardness, sharpness, complexity, rhythmicity)
/// describes how a name sounds; the cultural half (antiquity, formality,
/// exoticism, mysticism) describes what it evokes. All dimensions are
/// nominally in `0.0..=1.0` but that range is not enforced at
/// construction — call [`clamped`](Self::clamped) when it matters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImpressionVector {
    /// 0.0 soft (m, n, l) .. 1.0 hard (k, t, g).
    #[serde(default)]
    pub hardness: f32,
    /// 0.0 blunt (o, u) .. 1.0 sharp (i, e).
    #[serde(default)]
    pub sharpness: f32,
    #[serde(default)]
    pub complexity: f32,
    /// Rhythmic regularity: 0.0 irregular .. 1.0 regular.
    #[serde(default)]
    pub rhythmicity: f32,
    /// 0.0 modern .. 1.0 archaic.
    #[serde(default)]
    pub antiquity: f32,
    #[serde(default)]
    pub formality: f32,
    #[serde(default)]
    pub exoticism: f32,
    #[serde(default)]
    pub mysticism: f32,
}

impl ImpressionVector {
    /// The all-zero vector.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Apply `f` to each dimension pair of `self` and `other`.
    fn zip_with(self, other: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        Self {
            hardness: f(self.hardness, other.hardness),
            sharpness: f(self.sharpness, other.sharpness),
            complexity: f(self.complexity, other.complexity),
            rhythmicity: f(self.rhythmicity, other.rhythmicity),
            antiquity: f(self.antiquity, other.antiquity),
            formality: f(self.formality, other.formality),
            exoticism: f(self.exoticism, other.exoticism),
            mysticism: f(self.mysticism, other.mysticism),
        }
    }

    /// Apply `f` to each dimension.
    fn map(self, f: impl Fn(f32) -> f32) -> Self {
        self.zip_with(Self::zero(), |a, _| f(a))
    }

    /// Linear interpolation between `a` and `b`; `weight` is the share
    /// of `b`, clamped to `0.0..=1.0`.
    pub fn blend(a: Self, b: Self, weight: f32) -> Self {
        let w = weight.clamp(0.0, 1.0);
        a.zip_with(b, |x, y| x * (1.0 - w) + y * w)
    }

    /// Euclidean distance to `other` across all eight dimensions.
    pub fn distance(&self, other: &Self) -> f32 {
        let d = self.zip_with(*other, |a, b| (a - b) * (a - b));
        (d.hardness
            + d.sharpness
            + d.complexity
            + d.rhythmicity
            + d.antiquity
            + d.formality
            + d.exoticism
            + d.mysticism)
            .sqrt()
    }

    /// Each dimension clamped to `0.0..=1.0`.
    pub fn clamped(self) -> Self {
        self.map(|v| v.clamp(0.0, 1.0))
    }

    /// Add `shift` per dimension, saturating into `0.0..=1.0`.
    /// Overflow clamps rather than wraps, so `0.9 + 0.5 == 1.0`.
    pub fn shifted(self, shift: Self) -> Self {
        self.zip_with(shift, |a, b| a + b).clamped()
    }

    /// Per-dimension arithmetic mean. An empty input yields the zero
    /// vector.
    pub fn mean<'a>(vectors: impl IntoIterator<Item = &'a Self>) -> Self {
        let mut sum = Self::zero();
        let mut count = 0usize;
        for v in vectors {
            sum = sum.zip_with(*v, |a, b| a + b);
            count += 1;
        }
        if count == 0 {
            return Self::zero();
        }
        sum.map(|v| v / count as f32)
    }
}
