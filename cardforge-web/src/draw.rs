use cardforge_core::{CardDef, Creature, Piece};
use macroquad::prelude::*;

/// Maps the core's world plane (y up) onto the screen (y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub center: Vec2,
    pub pixels_per_unit: f32,
}

impl View {
    pub fn fit(screen_width: f32, screen_height: f32, visible_height_units: f32) -> Self {
        Self {
            center: vec2(screen_width * 0.5, screen_height * 0.5),
            pixels_per_unit: (screen_height / visible_height_units).max(1.0),
        }
    }

    pub fn world_to_screen(&self, x: f32, y: f32) -> Vec2 {
        vec2(
            self.center.x + x * self.pixels_per_unit,
            self.center.y - y * self.pixels_per_unit,
        )
    }

    pub fn screen_to_world(&self, screen: Vec2) -> cardforge_core::Vec3 {
        cardforge_core::Vec3::new(
            (screen.x - self.center.x) / self.pixels_per_unit,
            (self.center.y - screen.y) / self.pixels_per_unit,
            0.0,
        )
    }
}

#[derive(Debug, Clone)]
pub struct CardDrawConfig {
    pub width_units: f32,
    pub height_units: f32,
    pub stroke_px: f32,
    pub title_size: f32, // font size as a fraction of card width
    pub fill_color: Color,
    pub stroke_color: Color,
    pub text_color: Color,
    pub cost_color: Color,
}

impl Default for CardDrawConfig {
    fn default() -> Self {
        Self {
            width_units: 1.3,
            height_units: 1.9,
            stroke_px: 3.0,
            title_size: 0.22,
            fill_color: Color::from_rgba(236, 226, 198, 255),
            stroke_color: Color::from_rgba(60, 44, 30, 255),
            text_color: BLACK,
            cost_color: Color::from_rgba(0, 53, 146, 255),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreatureDrawConfig {
    pub radius_units: f32,
    pub stroke_ratio: f32, // stroke width as a fraction of radius
    pub fill_color: Color,
    pub stroke_color: Color,
    pub target_color: Color,
    pub text_color: Color,
}

impl Default for CreatureDrawConfig {
    fn default() -> Self {
        Self {
            radius_units: 0.7,
            stroke_ratio: 0.15,
            fill_color: Color::from_rgba(120, 30, 30, 255),
            stroke_color: BLACK,
            target_color: GOLD,
            text_color: WHITE,
        }
    }
}

/// Screen-space rotation for a piece. Counter-clockwise in the world is clockwise on
/// screen once y is flipped.
fn screen_rotation<T>(piece: &Piece<T>) -> f32 {
    let up = piece.rotation * cardforge_core::Vec3::Y;
    -(-up.x).atan2(up.y)
}

pub fn draw_card(piece: &Piece<std::sync::Arc<CardDef>>, view: &View, config: &CardDrawConfig) {
    let center = view.world_to_screen(piece.position.x, piece.position.y);
    let width = config.width_units * view.pixels_per_unit;
    let height = config.height_units * view.pixels_per_unit;
    let rotation = screen_rotation(piece);

    let stroke = config.stroke_px;
    draw_rectangle_ex(
        center.x,
        center.y,
        width + stroke * 2.0,
        height + stroke * 2.0,
        DrawRectangleParams {
            offset: vec2(0.5, 0.5),
            rotation,
            color: config.stroke_color,
        },
    );
    draw_rectangle_ex(
        center.x,
        center.y,
        width,
        height,
        DrawRectangleParams {
            offset: vec2(0.5, 0.5),
            rotation,
            color: config.fill_color,
        },
    );

    // Text stays upright; only the frame follows the fan.
    let card = &piece.item;
    let font_size = (width * config.title_size).max(8.0);
    let left = center.x - width * 0.42;
    draw_text(&card.name, left, center.y - height * 0.3, font_size, config.text_color);
    draw_text(
        &format!("{}", card.mana_cost),
        left,
        center.y - height * 0.05,
        font_size * 1.4,
        config.cost_color,
    );
    if !card.description.is_empty() {
        draw_text(
            &card.description,
            left,
            center.y + height * 0.3,
            font_size * 0.7,
            config.text_color,
        );
    }
}

pub fn draw_creature(
    piece: &Piece<Creature>,
    view: &View,
    config: &CreatureDrawConfig,
    targeted: bool,
) {
    let center = view.world_to_screen(piece.position.x, piece.position.y);
    let radius = config.radius_units * view.pixels_per_unit;
    let stroke = (radius * config.stroke_ratio).max(1.0);
    let stroke_color = if targeted {
        config.target_color
    } else {
        config.stroke_color
    };

    draw_circle(center.x, center.y, radius + stroke * 0.5, stroke_color);
    draw_circle(
        center.x,
        center.y,
        (radius - stroke * 0.5).max(0.0),
        config.fill_color,
    );

    let creature = &piece.item;
    let font_size = (radius * 0.45).max(8.0);
    let name = measure_text(creature.name(), None, font_size as u16, 1.0);
    draw_text(
        creature.name(),
        center.x - name.width * 0.5,
        center.y - radius * 0.1,
        font_size,
        config.text_color,
    );
    let stats = format!("{} / {}", creature.strength, creature.health);
    let measured = measure_text(&stats, None, font_size as u16, 1.0);
    draw_text(
        &stats,
        center.x - measured.width * 0.5,
        center.y + radius * 0.45,
        font_size,
        config.text_color,
    );
}
