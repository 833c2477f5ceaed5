use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geometry::Segment;

pub const DEFAULT_OBSTACLE_COUNT: usize = 12;
pub const DEFAULT_SEED: u64 = 100;

/// Static segments that block rays. Built once, then only read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObstacleSet {
    segments: Vec<Segment>,
}

impl ObstacleSet {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// `count` random segments with integer endpoints in `[0, width) x [0, height)`.
    ///
    /// Panics if `width` or `height` is zero and `count` is not.
    pub fn generate<R: Rng>(count: usize, width: u32, height: u32, rng: &mut R) -> Self {
        let segments = (0..count)
            .map(|_| {
                let x1 = rng.gen_range(0..width);
                let x2 = rng.gen_range(0..width);
                let y1 = rng.gen_range(0..height);
                let y2 = rng.gen_range(0..height);
                Segment::from_coords(x1 as f32, y1 as f32, x2 as f32, y2 as f32)
            })
            .collect();
        Self { segments }
    }

    pub fn from_seed(count: usize, width: u32, height: u32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::generate(count, width, height, &mut rng)
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl<'a> IntoIterator for &'a ObstacleSet {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_count_and_bounds() {
        let set = ObstacleSet::from_seed(DEFAULT_OBSTACLE_COUNT, 1260, 540, DEFAULT_SEED);
        assert_eq!(set.len(), DEFAULT_OBSTACLE_COUNT);
        for seg in &set {
            for p in [seg.a, seg.b] {
                assert!((0.0..1260.0).contains(&p.x), "x out of canvas: {}", p.x);
                assert!((0.0..540.0).contains(&p.y), "y out of canvas: {}", p.y);
                assert_eq!(p.x.fract(), 0.0);
                assert_eq!(p.y.fract(), 0.0);
            }
        }
    }

    #[test]
    fn test_same_seed_same_set() {
        let a = ObstacleSet::from_seed(12, 800, 600, 7);
        let b = ObstacleSet::from_seed(12, 800, 600, 7);
        assert_eq!(a, b);

        let c = ObstacleSet::from_seed(12, 800, 600, 8);
        assert_ne!(a, c);
    }

    #[test]
    fn test_zero_count() {
        let set = ObstacleSet::from_seed(0, 800, 600, 1);
        assert!(set.is_empty());
    }
}
