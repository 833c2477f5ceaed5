//! 2D ray casting against line-segment obstacles.
//!
//! [`cast_rays`] fans rays out from an origin and trims each one at the nearest
//! obstacle. The rest of the crate is what the interactive viewer needs around it:
//! seeded obstacle generation, a shared cursor origin, configuration and a
//! software line renderer.

pub mod caster;
pub mod config;
pub mod error;
pub mod geometry;
pub mod origin;
pub mod renderer;
pub mod world;

pub use caster::{RayBundle, cast_rays, sample_direction};
pub use config::Config;
pub use error::{CastError, ConfigError};
pub use geometry::{Point, Segment, intersect};
pub use origin::SharedOrigin;
pub use world::ObstacleSet;
