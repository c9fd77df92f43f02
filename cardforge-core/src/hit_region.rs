use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Answers whether a world-space point falls inside a board's interactive area.
pub trait HitRegion: Send + Sync {
    fn contains(&self, point: Vec3) -> bool;
}

impl<F> HitRegion for F
where
    F: Fn(Vec3) -> bool + Send + Sync,
{
    fn contains(&self, point: Vec3) -> bool {
        self(point)
    }
}

/// Axis-aligned rectangle on the XY plane, positioned relative to the board origin.
/// The z coordinate of tested points is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounds {
    pub center: Vec2,
    pub size: Vec2,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            size: Vec2::new(10.0, 3.0),
        }
    }
}

impl Bounds {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    pub fn placed_at(self, origin: Vec3) -> PlacedBounds {
        PlacedBounds {
            min: origin.truncate() + self.center - self.size.abs() * 0.5,
            max: origin.truncate() + self.center + self.size.abs() * 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl HitRegion for PlacedBounds {
    fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}
