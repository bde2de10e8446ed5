//! Game session: the state controller plus the per-frame loop body.

use rand::Rng;
use tracing::info;

use crate::assets::Assets;
use crate::compute::{init_scene, tick};
use crate::config::Tuning;
use crate::entities::{Bounds, GameStatus};
use crate::frame::Frame;
use crate::input::InputState;
use crate::render::{draw_floor, draw_hud, draw_scene};
use crate::scene::Scene;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// In the menu; nothing was simulated or drawn.
    Idle,
    /// A frame was simulated and drawn.
    Drawn,
    /// The game ended during this frame.
    GameOver { score: u32 },
}

#[derive(Debug)]
pub struct GameSession {
    status: GameStatus,
    scene: Scene,
    tuning: Tuning,
    bounds: Bounds,
    last_score: Option<u32>,
}

impl GameSession {
    pub fn new(tuning: Tuning, bounds: Bounds) -> Self {
        Self {
            status: GameStatus::Menu,
            scene: Scene::new(),
            tuning,
            bounds,
            last_score: None,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Active
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Score of the most recently finished game.
    pub fn last_score(&self) -> Option<u32> {
        self.last_score
    }

    /// Leave the menu and seed a fresh scene.
    pub fn start_game(&mut self, rng: &mut impl Rng) {
        self.scene = init_scene(&self.bounds, &self.tuning, rng);
        self.status = GameStatus::Active;
        info!(
            targets = self.scene.target_count(),
            width = self.bounds.width,
            height = self.bounds.height,
            "game started"
        );
    }

    /// Back to the menu.  Returns the final score and clears the scene.
    pub fn end_game(&mut self) -> u32 {
        let score = self.scene.player().map_or(0, |p| p.score);
        self.status = GameStatus::Menu;
        self.last_score = Some(score);
        self.scene.clear();
        info!(score, "game over");
        score
    }

    /// One display refresh: simulate, draw, then prune dead entities.
    pub fn run_frame(
        &mut self,
        dt: f32,
        input: &impl InputState,
        rng: &mut impl Rng,
        frame: &mut Frame,
        assets: &Assets,
    ) -> FrameOutcome {
        if !self.is_active() {
            return FrameOutcome::Idle;
        }

        frame.clear();
        draw_floor(frame, &self.bounds);

        let outcome = tick(&mut self.scene, input, &self.bounds, &self.tuning, dt, rng);

        draw_scene(frame, &self.scene, assets);
        if let Some(player) = self.scene.player() {
            draw_hud(frame, player);
        }

        self.scene.prune();

        if outcome.game_over {
            let score = self.end_game();
            return FrameOutcome::GameOver { score };
        }
        FrameOutcome::Drawn
    }
}
