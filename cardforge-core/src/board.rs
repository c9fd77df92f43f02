use crate::hit_region::{Bounds, HitRegion};
use crate::layout::{LayoutMode, LayoutParams, RadialArc, compute_slots};
use crate::piece::{DEFAULT_MOVE_SPEED, Piece, PieceId};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub layout: LayoutMode,
    #[serde(flatten)]
    pub params: LayoutParams,
    pub origin: Vec3,         // world-space layout anchor
    pub spawn_position: Vec3, // where new pieces appear before easing into their slot
    pub bounds: Bounds,
    pub move_speed: f32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            layout: LayoutMode::Horizontal,
            params: LayoutParams::default(),
            origin: Vec3::ZERO,
            spawn_position: Vec3::ZERO,
            bounds: Bounds::default(),
            move_speed: DEFAULT_MOVE_SPEED,
        }
    }
}

/// An ordered collection of pieces arranged by one layout mode. Focus and drag are
/// requests for the next layout pass only and are cleared once it has run.
pub struct Board<T> {
    config: BoardConfig,
    pieces: Vec<Piece<T>>,
    hit_region: Box<dyn HitRegion>,
    focus: Option<PieceId>,
    drag: Option<(PieceId, Vec3)>,
    next_id: u32,
}

impl<T> Board<T> {
    pub fn new(config: BoardConfig) -> Self {
        let region = config.bounds.placed_at(config.origin);
        Self::with_hit_region(config, Box::new(region))
    }

    pub fn with_hit_region(config: BoardConfig, hit_region: Box<dyn HitRegion>) -> Self {
        Self {
            config,
            pieces: Vec::new(),
            hit_region,
            focus: None,
            drag: None,
            next_id: 0,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn set_layout(&mut self, layout: LayoutMode) {
        self.config.layout = layout;
    }

    pub fn pieces(&self) -> &[Piece<T>] {
        &self.pieces
    }

    pub fn iter(&self) -> impl Iterator<Item = &Piece<T>> {
        self.pieces.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Piece<T>> {
        self.pieces.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn ids(&self) -> Vec<PieceId> {
        self.pieces.iter().map(|piece| piece.id).collect()
    }

    pub fn index_of(&self, id: PieceId) -> Option<usize> {
        self.pieces.iter().position(|piece| piece.id == id)
    }

    pub fn contains(&self, id: PieceId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn get(&self, id: PieceId) -> Option<&Piece<T>> {
        self.pieces.iter().find(|piece| piece.id == id)
    }

    pub fn get_mut(&mut self, id: PieceId) -> Option<&mut Piece<T>> {
        self.pieces.iter_mut().find(|piece| piece.id == id)
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        self.hit_region.contains(point)
    }

    pub fn focus(&self) -> Option<PieceId> {
        self.focus
    }

    pub fn drag(&self) -> Option<(PieceId, Vec3)> {
        self.drag
    }

    /// Requests focus for the next layout pass. `None` clears the request; an id that is
    /// not on this board is rejected and leaves the current request untouched.
    pub fn set_focus(&mut self, piece: Option<PieceId>) -> bool {
        match piece {
            Some(id) if !self.contains(id) => false,
            other => {
                self.focus = other;
                true
            }
        }
    }

    pub fn set_drag(&mut self, id: PieceId, position: Vec3) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.drag = Some((id, position));
        true
    }

    /// Returns the piece closest to `position`, or `None` when the point is outside the
    /// board area. On equal distances the earlier piece in board order wins.
    pub fn nearest_piece_to(&self, position: Vec3) -> Option<PieceId> {
        if !self.contains_point(position) {
            return None;
        }

        let mut closest: Option<(PieceId, f32)> = None;
        for piece in &self.pieces {
            let distance = piece.position.distance(position);
            let replace = closest.map_or(true, |(_, best)| distance < best);
            if replace {
                closest = Some((piece.id, distance));
            }
        }

        closest.map(|(id, _)| id)
    }

    pub fn add_piece(&mut self, item: T) -> PieceId {
        let id = PieceId(self.next_id);
        self.next_id += 1;
        self.pieces.push(Piece::new(
            id,
            self.config.spawn_position,
            self.config.move_speed,
            item,
        ));
        id
    }

    pub fn remove_piece(&mut self, id: PieceId) -> Option<T> {
        let index = self.index_of(id)?;
        self.forget(id);
        Some(self.pieces.remove(index).item)
    }

    /// Removes every piece whose item matches `predicate`, preserving the order of the rest.
    pub fn remove_where<F>(&mut self, mut predicate: F) -> Vec<(PieceId, T)>
    where
        F: FnMut(&T) -> bool,
    {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.pieces.len());
        for piece in self.pieces.drain(..) {
            if predicate(&piece.item) {
                removed.push((piece.id, piece.item));
            } else {
                kept.push(piece);
            }
        }
        self.pieces = kept;

        for (id, _) in &removed {
            self.forget(*id);
        }
        removed
    }

    /// Recomputes every piece's target from the layout, applies the drag override, and
    /// clears the focus and drag requests.
    pub fn update_layout(&mut self) {
        let focus_index = self.focus.and_then(|id| self.index_of(id));
        let slots = compute_slots(
            self.config.layout,
            self.config.origin,
            self.pieces.len(),
            &self.config.params,
            focus_index,
        );

        let arc = match self.config.layout {
            LayoutMode::Radial => Some(RadialArc::new(
                self.config.origin,
                self.pieces.len(),
                &self.config.params,
            )),
            LayoutMode::Horizontal => None,
        };

        for (piece, slot) in self.pieces.iter_mut().zip(slots) {
            piece.target = slot;
            piece.rotation = arc.map_or(Quat::IDENTITY, |arc| arc.facing(piece.position));
        }

        if let Some((id, position)) = self.drag {
            if let Some(piece) = self.get_mut(id) {
                piece.target = position;
            }
        }

        self.focus = None;
        self.drag = None;
    }

    pub fn advance_pieces(&mut self, delta_seconds: f32) {
        for piece in &mut self.pieces {
            piece.advance(delta_seconds);
        }
    }

    pub fn tick(&mut self, delta_seconds: f32) {
        self.update_layout();
        self.advance_pieces(delta_seconds);
    }

    fn forget(&mut self, id: PieceId) {
        if self.focus == Some(id) {
            self.focus = None;
        }
        if self.drag.is_some_and(|(dragged, _)| dragged == id) {
            self.drag = None;
        }
    }
}
