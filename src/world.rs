use macroquad::prelude::*;
use thiserror::Error;

use crate::config;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("world bounds must be positive, got {width}x{height}")]
    InvalidBounds { width: u32, height: u32 },
}

/// Fixed, non-wrapping plane. Dimensions do not change for the lifetime of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct World {
    width: u32,
    height: u32,
}

impl World {
    pub fn new(width: u32, height: u32) -> Result<Self, SimError> {
        if width == 0 || height == 0 {
            return Err(SimError::InvalidBounds { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f32 {
        self.width as f32
    }

    pub fn height(&self) -> f32 {
        self.height as f32
    }

    pub fn center(&self) -> Vec2 {
        vec2(self.width() * 0.5, self.height() * 0.5)
    }

    /// Clamp a body of the given radius so it stays fully inside the plane.
    /// A body wider than the plane is pinned to the low edge.
    pub fn clamp(&self, pos: Vec2, radius: f32) -> Vec2 {
        vec2(
            clamp_axis(pos.x, radius, self.width()),
            clamp_axis(pos.y, radius, self.height()),
        )
    }

    pub fn contains(&self, pos: Vec2, radius: f32) -> bool {
        self.clamp(pos, radius) == pos
    }
}

impl Default for World {
    fn default() -> Self {
        Self {
            width: config::DEFAULT_WORLD_WIDTH,
            height: config::DEFAULT_WORLD_HEIGHT,
        }
    }
}

fn clamp_axis(value: f32, radius: f32, extent: f32) -> f32 {
    value.min(extent - radius).max(radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_world_is_rejected() {
        assert_eq!(
            World::new(0, 10),
            Err(SimError::InvalidBounds { width: 0, height: 10 })
        );
        assert!(World::new(10, 10).is_ok());
    }

    #[test]
    fn clamp_keeps_body_inside_edges() {
        let world = World::new(200, 100).unwrap();
        assert_eq!(world.clamp(vec2(-5.0, 50.0), 4.0), vec2(4.0, 50.0));
        assert_eq!(world.clamp(vec2(250.0, 99.0), 4.0), vec2(196.0, 96.0));
        assert!(world.contains(vec2(100.0, 50.0), 4.0));
        assert!(!world.contains(vec2(1.0, 50.0), 4.0));
    }

    #[test]
    fn clamped_position_is_always_contained() {
        let world = World::new(20, 20).unwrap();
        for pos in [vec2(-50.0, 5.0), vec2(10.0, 10.0), vec2(400.0, -1.0)] {
            assert!(world.contains(world.clamp(pos, 3.0), 3.0));
            // Wider than the plane: pinned, but still stable under a second clamp.
            assert!(world.contains(world.clamp(pos, 15.0), 15.0));
        }
    }
}
