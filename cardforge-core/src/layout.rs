use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutMode {
    #[default]
    Horizontal,
    Radial,
}

/// Geometry shared by both layouts. In radial mode `focus_offset` is read as degrees for
/// the neighbours of the focused slot and as world units for the focused slot itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    pub width: f32,
    pub padding: f32,
    pub radius: f32,
    pub focus_offset: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            width: 1.0,
            padding: 0.1,
            radius: 10.0,
            focus_offset: 0.5,
        }
    }
}

impl LayoutParams {
    pub fn total_span(&self, count: usize) -> f32 {
        if count == 0 {
            return 0.0;
        }
        count as f32 * self.width + (count - 1) as f32 * self.padding
    }
}

pub fn compute_slots(
    mode: LayoutMode,
    origin: Vec3,
    count: usize,
    params: &LayoutParams,
    focus: Option<usize>,
) -> Vec<Vec3> {
    match mode {
        LayoutMode::Horizontal => horizontal_slots(origin, count, params, focus),
        LayoutMode::Radial => radial_slots(origin, count, params, focus),
    }
}

/// Lays `count` slots left to right, centred on `origin`. The focused slot rises by
/// `focus_offset` and its direct neighbours are pushed sideways by the same amount.
pub fn horizontal_slots(
    origin: Vec3,
    count: usize,
    params: &LayoutParams,
    focus: Option<usize>,
) -> Vec<Vec3> {
    let total = params.total_span(count);
    let start = origin + Vec3::NEG_X * (total / 2.0);

    (0..count)
        .map(|index| {
            let along = (index as f32 + 0.5) * params.width + index as f32 * params.padding;
            let mut position = start + Vec3::X * along;

            if let Some(focus) = focus {
                if index + 1 == focus {
                    position += Vec3::NEG_X * params.focus_offset;
                } else if index == focus + 1 {
                    position += Vec3::X * params.focus_offset;
                } else if index == focus {
                    position += Vec3::Y * params.focus_offset;
                }
            }

            position
        })
        .collect()
}

pub fn radial_slots(
    origin: Vec3,
    count: usize,
    params: &LayoutParams,
    focus: Option<usize>,
) -> Vec<Vec3> {
    let arc = RadialArc::new(origin, count, params);

    (0..count)
        .map(|index| {
            let mut angle_offset = 0.0;
            let mut radius_offset = 0.0;

            if let Some(focus) = focus {
                if index + 1 == focus {
                    angle_offset = -params.focus_offset;
                } else if index == focus + 1 {
                    angle_offset = params.focus_offset;
                } else if index == focus {
                    radius_offset = params.focus_offset;
                }
            }

            arc.slot_position(index, angle_offset, radius_offset)
        })
        .collect()
}

/// The arc a radial layout places its slots on. The circle's centre sits `radius` below the
/// board origin, so the middle of the arc passes through the origin itself. Angles are in
/// degrees, counter-clockwise about +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialArc {
    pub center: Vec3,
    pub radius: f32,
    pub total_angle: f32,
    pub slot_angle: f32,
    pub start_angle: f32,
}

impl RadialArc {
    pub fn new(origin: Vec3, count: usize, params: &LayoutParams) -> Self {
        let radius = params.radius;
        let center = origin + Vec3::NEG_Y * radius;
        let circumference = 2.0 * PI * radius;

        let total_angle = if count == 0 || circumference <= f32::EPSILON {
            0.0
        } else {
            params.total_span(count) / circumference * 360.0
        };
        let slot_angle = if count == 0 {
            0.0
        } else {
            total_angle / count as f32
        };

        Self {
            center,
            radius,
            total_angle,
            slot_angle,
            start_angle: -total_angle / 2.0,
        }
    }

    pub fn slot_direction(&self, index: usize, angle_offset: f32) -> Vec3 {
        let start = Quat::from_rotation_z(self.start_angle.to_radians()) * Vec3::Y;
        let sweep = (index as f32 + 0.5) * self.slot_angle + angle_offset;
        Quat::from_rotation_z(sweep.to_radians()) * start
    }

    pub fn slot_position(&self, index: usize, angle_offset: f32, radius_offset: f32) -> Vec3 {
        self.center + self.slot_direction(index, angle_offset) * (self.radius + radius_offset)
    }

    /// Rotation about +Z that turns local up toward `position`, away from the arc centre.
    pub fn facing(&self, position: Vec3) -> Quat {
        outward_rotation(position - self.center)
    }
}

pub fn outward_rotation(direction: Vec3) -> Quat {
    if direction.truncate().length_squared() <= f32::EPSILON {
        return Quat::IDENTITY;
    }
    Quat::from_rotation_z((-direction.x).atan2(direction.y))
}
