use std::f64::consts::TAU;

use crate::error::{CastError, Result};
use crate::geometry::{Point, Segment, intersect};
use crate::world::ObstacleSet;

pub const DEFAULT_RESOLUTION: usize = 1000;
pub const DEFAULT_MAX_DISTANCE: f32 = 3000.0;

/// Rays for one frame, ordered by increasing angle starting at 0.
pub type RayBundle = Vec<Segment>;

/// Unit direction of sample `i` out of `resolution` over a full turn.
///
/// The angle is `TAU * (i / resolution)` computed in f64, so a sample keeps the
/// exact same direction when the resolution is scaled by an integer factor.
#[inline]
pub fn sample_direction(i: usize, resolution: usize) -> (f32, f32) {
    let dir = TAU * (i as f64 / resolution as f64);
    (dir.cos() as f32, dir.sin() as f32)
}

/// Casts `resolution` rays from `origin` and trims each one at its nearest obstacle.
///
/// Every ray starts as a probe of length `max_distance`. A hit shortens it only if
/// its distance is strictly positive and strictly below the current minimum, so
/// hits exactly at the origin are ignored and the first obstacle wins exact ties.
pub fn cast_rays(
    origin: Point,
    obstacles: &ObstacleSet,
    resolution: usize,
    max_distance: f32,
) -> Result<RayBundle> {
    if resolution == 0 {
        return Err(CastError::ZeroResolution);
    }
    if !(max_distance.is_finite() && max_distance > 0.0) {
        return Err(CastError::InvalidMaxDistance(max_distance));
    }
    if !origin.is_finite() {
        return Err(CastError::NonFiniteOrigin {
            x: origin.x,
            y: origin.y,
        });
    }

    let mut rays = Vec::with_capacity(resolution);
    for i in 0..resolution {
        let (c, s) = sample_direction(i, resolution);
        let probe = Segment::new(
            origin,
            Point::new(origin.x + c * max_distance, origin.y + s * max_distance),
        );

        let mut min_dist = max_distance;
        for obstacle in obstacles.iter() {
            if let Some(dist) = intersect(&probe, obstacle) {
                if dist < min_dist && dist > 0.0 {
                    min_dist = dist;
                }
            }
        }

        rays.push(Segment::new(
            origin,
            Point::new(origin.x + c * min_dist, origin.y + s * min_dist),
        ));
    }

    Ok(rays)
}
