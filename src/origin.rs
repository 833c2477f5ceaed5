use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::geometry::Point;

/// Cast origin shared between input handling and the frame loop.
///
/// Both coordinates live in one `AtomicU64`, so every `store` and `load` moves the
/// whole pair at once and a reader never sees `x` from one update with `y` from another.
#[derive(Debug, Clone)]
pub struct SharedOrigin {
    bits: Arc<AtomicU64>,
}

#[inline]
fn pack(p: Point) -> u64 {
    ((p.x.to_bits() as u64) << 32) | p.y.to_bits() as u64
}

#[inline]
fn unpack(bits: u64) -> Point {
    Point::new(f32::from_bits((bits >> 32) as u32), f32::from_bits(bits as u32))
}

impl SharedOrigin {
    pub fn new(initial: Point) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(pack(initial))),
        }
    }

    /// Written by pointer-motion handling only.
    #[inline]
    pub fn store(&self, p: Point) {
        self.bits.store(pack(p), Ordering::Release);
    }

    /// Snapshot taken once at the start of a frame.
    #[inline]
    pub fn load(&self) -> Point {
        unpack(self.bits.load(Ordering::Acquire))
    }
}
