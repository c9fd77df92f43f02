use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MOVE_SPEED: f32 = 15.0;

/// Identifies a piece within the board that spawned it. Ids are never reused by a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u32);

#[derive(Debug, Clone)]
pub struct Piece<T> {
    pub id: PieceId,
    pub position: Vec3,
    pub rotation: Quat,
    pub target: Vec3,
    pub offset: Vec3,
    pub move_speed: f32,
    pub item: T,
}

impl<T> Piece<T> {
    pub fn new(id: PieceId, position: Vec3, move_speed: f32, item: T) -> Self {
        Self {
            id,
            position,
            rotation: Quat::IDENTITY,
            target: position,
            offset: Vec3::ZERO,
            move_speed,
            item,
        }
    }

    pub fn destination(&self) -> Vec3 {
        self.target + self.offset
    }

    pub fn distance_to_destination(&self) -> f32 {
        self.position.distance(self.destination())
    }

    /// Moves toward `target + offset` at a speed proportional to the remaining distance,
    /// so the approach decays exponentially instead of moving at a constant velocity.
    pub fn advance(&mut self, delta_seconds: f32) {
        let destination = self.destination();
        let distance = self.position.distance(destination);
        let step = self.move_speed * distance * delta_seconds;
        self.position = move_towards(self.position, destination, step);
    }
}

/// Steps `current` toward `target` by at most `max_step`, landing exactly on `target`
/// when the step would reach or pass it.
pub fn move_towards(current: Vec3, target: Vec3, max_step: f32) -> Vec3 {
    let delta = target - current;
    let distance = delta.length();
    if distance <= f32::EPSILON || max_step >= distance {
        return target;
    }
    if max_step <= 0.0 {
        return current;
    }
    current + delta / distance * max_step
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece_at(position: Vec3) -> Piece<()> {
        Piece::new(PieceId(0), position, DEFAULT_MOVE_SPEED, ())
    }

    #[test]
    fn move_towards_clamps_at_target() {
        let current = Vec3::ZERO;
        let target = Vec3::new(3.0, 4.0, 0.0);

        assert_eq!(move_towards(current, target, 10.0), target);
        assert_eq!(move_towards(current, target, 5.0), target);

        let partial = move_towards(current, target, 2.5);
        assert!((partial - Vec3::new(1.5, 2.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn move_towards_ignores_non_positive_steps() {
        let current = Vec3::new(1.0, 1.0, 0.0);
        assert_eq!(move_towards(current, Vec3::ZERO, 0.0), current);
        assert_eq!(move_towards(current, Vec3::ZERO, -1.0), current);
    }

    #[test]
    fn step_is_proportional_to_remaining_distance() {
        let mut piece = piece_at(Vec3::ZERO);
        piece.move_speed = 2.0;
        piece.target = Vec3::new(10.0, 0.0, 0.0);

        piece.advance(0.1);
        // 2.0 * 10.0 * 0.1 = 2.0 units on the first tick.
        assert!((piece.position.x - 2.0).abs() < 1e-5);

        piece.advance(0.1);
        // 2.0 * 8.0 * 0.1 = 1.6 units on the second tick.
        assert!((piece.position.x - 3.6).abs() < 1e-5);
    }

    #[test]
    fn converges_monotonically_without_overshoot() {
        let mut piece = piece_at(Vec3::new(-4.0, 2.0, 0.0));
        piece.target = Vec3::new(6.0, -1.0, 0.0);
        let dt = 1.0 / 60.0;

        let mut previous = piece.distance_to_destination();
        let mut ticks = 0;
        while previous > 1e-4 {
            piece.advance(dt);
            let remaining = piece.distance_to_destination();
            assert!(remaining <= previous);
            // Never passes the destination along the x axis.
            assert!(piece.position.x <= 6.0 + 1e-6);
            previous = remaining;
            ticks += 1;
            assert!(ticks < 1_000, "piece failed to converge");
        }
    }

    #[test]
    fn offset_shifts_destination() {
        let mut piece = piece_at(Vec3::ZERO);
        piece.move_speed = 100.0;
        piece.target = Vec3::new(1.0, 0.0, 0.0);
        piece.offset = Vec3::NEG_Y;

        piece.advance(1.0);
        assert_eq!(piece.position, Vec3::new(1.0, -1.0, 0.0));
    }
}
