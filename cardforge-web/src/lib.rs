pub mod draw;

use cardforge_core::{
    ContentLibrary, Game, GameConfig, InputFrame, LayoutMode, Outcome, TurnPhase,
};
#[cfg(target_arch = "wasm32")]
use macroquad::miniquad;
use macroquad::prelude::*;
use std::error::Error;
use tracing::{error, info};

use crate::draw::{CardDrawConfig, CreatureDrawConfig, View, draw_card, draw_creature};

const FIXED_STEP_SECONDS: f32 = 1.0 / 60.0;
const VISIBLE_HEIGHT_UNITS: f32 = 12.0;
const ENCOUNTER: &str = "goblin-ambush";
const CONTENT_JSON: &str = include_str!("../assets/content.json");
const CONFIG_JSON: &str = include_str!("../assets/config.json");

/// Device input gathered between fixed steps. Press and release edges are held until a
/// step consumes them, so a frame without a step does not drop a click.
#[derive(Debug, Default)]
struct PendingInput {
    pointer: Vec2,
    pointer_down: bool,
    pointer_up: bool,
    end_turn: bool,
}

impl PendingInput {
    fn poll(&mut self) {
        let (x, y) = mouse_position();
        self.pointer = vec2(x, y);
        self.pointer_down |= is_mouse_button_pressed(MouseButton::Left);
        self.pointer_up |= is_mouse_button_released(MouseButton::Left);
        self.end_turn |= is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter);
    }

    fn take_frame(&mut self, view: &View) -> InputFrame {
        let frame = InputFrame {
            pointer: view.screen_to_world(self.pointer),
            pointer_down: self.pointer_down,
            pointer_up: self.pointer_up,
            end_turn: self.end_turn,
        };
        self.pointer_down = false;
        self.pointer_up = false;
        self.end_turn = false;
        frame
    }
}

pub struct GameState {
    game: Game,
    view: View,
    input: PendingInput,
    card_draw: CardDrawConfig,
    creature_draw: CreatureDrawConfig,
    fps: f32,
    fps_frame_count: u32,
    fps_last_update_time: f64,
}

impl GameState {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            view: View::fit(screen_width(), screen_height(), VISIBLE_HEIGHT_UNITS),
            input: PendingInput::default(),
            card_draw: CardDrawConfig::default(),
            creature_draw: CreatureDrawConfig::default(),
            fps: 0.0,
            fps_frame_count: 0,
            fps_last_update_time: get_time(),
        }
    }

    fn toggle_hand_layout(&mut self) {
        let next = match self.game.player().hand.config().layout {
            LayoutMode::Radial => LayoutMode::Horizontal,
            LayoutMode::Horizontal => LayoutMode::Radial,
        };
        self.game.set_hand_layout(next);
    }

    fn fixed_update(&mut self) {
        let frame = self.input.take_frame(&self.view);
        self.game.tick(FIXED_STEP_SECONDS, &frame);
    }

    fn update_fps_if_due(&mut self) {
        let now = get_time();
        self.fps_frame_count += 1;
        let elapsed = now - self.fps_last_update_time;
        if elapsed >= 1.0 {
            self.fps = self.fps_frame_count as f32 / elapsed as f32;
            self.fps_frame_count = 0;
            self.fps_last_update_time = now;
        }
    }

    fn render(&mut self) {
        clear_background(Color::from_rgba(24, 40, 32, 255));
        self.view = View::fit(screen_width(), screen_height(), VISIBLE_HEIGHT_UNITS);

        let target = self.game.controller().target_creature();
        for piece in self.game.opponent().creatures() {
            draw_creature(piece, &self.view, &self.creature_draw, target == Some(piece.id));
        }
        for piece in self.game.player().hand.iter() {
            draw_card(piece, &self.view, &self.card_draw);
        }

        self.render_hud();
    }

    fn render_hud(&self) {
        let player = self.game.player();
        let phase = match self.game.phase() {
            TurnPhase::PlayerTurnStart => "drawing",
            TurnPhase::PlayerActive => "your turn (Enter ends it, Tab switches hand layout)",
            TurnPhase::ResolvingCard => "resolving",
            TurnPhase::OpponentTurn => "opponent turn",
        };

        let lines = [
            format!("health: {}   mana: {}", player.health, player.mana),
            format!(
                "turn: {}   deck: {}   discard: {}",
                player.turn_index(),
                player.deck().len(),
                player.discard().len()
            ),
            phase.to_owned(),
            format!("fps: {:.0}", self.fps),
        ];
        for (row, line) in lines.iter().enumerate() {
            draw_text(line, 20.0, 40.0 + row as f32 * 24.0, 24.0, WHITE);
        }

        if let Some(outcome) = self.game.outcome() {
            let banner = match outcome {
                Outcome::Victory => "Victory",
                Outcome::Defeat => "Defeat",
            };
            let size = measure_text(banner, None, 64, 1.0);
            draw_text(
                banner,
                (screen_width() - size.width) * 0.5,
                screen_height() * 0.5,
                64.0,
                GOLD,
            );
        }
    }
}

pub fn build_game(seed: u64) -> Result<Game, Box<dyn Error>> {
    let config = GameConfig::from_json_str(CONFIG_JSON)?;
    let library = ContentLibrary::from_json_str(CONTENT_JSON)?;
    let encounter = library.resolve_encounter(library.encounter(ENCOUNTER)?)?;
    Ok(Game::new(&config, encounter, seed))
}

pub async fn run() {
    install_panic_hook();
    install_logging();

    let seed = (macroquad::miniquad::date::now() * 1000.0) as u64;
    let mut game = match build_game(seed) {
        Ok(game) => game,
        Err(err) => {
            error!("failed to build encounter: {err}");
            return;
        }
    };
    game.start();
    info!(seed, "encounter ready");

    let mut state = GameState::new(game);
    let mut accumulator = 0.0_f32;

    loop {
        state.input.poll();
        if is_key_pressed(KeyCode::Tab) {
            state.toggle_hand_layout();
        }

        // Consume real elapsed time in fixed-size simulation steps.
        accumulator += get_frame_time();
        while accumulator >= FIXED_STEP_SECONDS {
            state.fixed_update();
            accumulator -= FIXED_STEP_SECONDS;
        }

        state.update_fps_if_due();
        state.render();

        next_frame().await;
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn install_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(target_arch = "wasm32")]
fn install_logging() {}

#[cfg(target_arch = "wasm32")]
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let msg = info.to_string();
        if let Some(location) = info.location() {
            miniquad::error!("panic at {}:{}: {}", location.file(), location.line(), msg);
        } else {
            miniquad::error!("panic: {}", msg);
        }
    }));
}

#[cfg(not(target_arch = "wasm32"))]
fn install_panic_hook() {}
