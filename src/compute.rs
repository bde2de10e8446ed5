//! Game-logic functions.
//!
//! Every function works on plain entity data plus the injected input state
//! and RNG handle.  Nothing here touches the terminal, so a seeded RNG makes
//! every frame reproducible in tests.

use std::f32::consts::{PI, TAU};

use rand::Rng;
use tracing::debug;

use crate::config::Tuning;
use crate::entities::{Bounds, Entity, Player, Projectile, Target};
use crate::input::{Action, InputState};
use crate::scene::Scene;

/// What a single pass over the scene asks of the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// The player is out of bolts and none are left flying.
    pub game_over: bool,
    /// Targets hit during this pass.
    pub hits: u32,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// The player starts mid-air in the middle of the screen and drops to the floor.
pub fn new_player(bounds: &Bounds, tuning: &Tuning) -> Player {
    Player {
        x: bounds.width / 2.0,
        y: bounds.height / 2.0,
        w: tuning.player_size,
        h: tuning.player_size,
        speed: tuning.player_speed,
        vy: 0.0,
        score: 0,
        ammunition: tuning.starting_ammunition,
        shoot_cooldown: 0.0,
        aim: 0.0,
        exist: true,
    }
}

/// A new target at a random spot, kept 50 units away from the left, right
/// and top edges and clear of the floor band.
pub fn spawn_target(bounds: &Bounds, tuning: &Tuning, rng: &mut impl Rng) -> Target {
    let span_x = (bounds.width - 100.0).max(0.0);
    let span_y = (bounds.height - 200.0).max(0.0);
    let x = (rng.gen::<f32>() * span_x).floor() + 50.0;
    let y = (rng.gen::<f32>() * span_y).floor() + 50.0;
    let rotation = rng.gen::<f32>() * TAU;
    Target::new(x, y, tuning.target_size, tuning.target_size, rotation)
}

/// Seed a fresh game: one player followed by the starting targets.
pub fn init_scene(bounds: &Bounds, tuning: &Tuning, rng: &mut impl Rng) -> Scene {
    let mut scene = Scene::new();
    scene.push(new_player(bounds, tuning));
    for _ in 0..tuning.target_count {
        scene.push(spawn_target(bounds, tuning, rng));
    }
    scene
}

// ── Player ───────────────────────────────────────────────────────────────────

pub fn can_fire(player: &Player) -> bool {
    player.shoot_cooldown == 0.0 && player.ammunition > 0
}

/// Advance the player by `dt` seconds.  Returns the bolts fired this frame.
pub fn update_player(
    player: &mut Player,
    input: &impl InputState,
    bounds: &Bounds,
    tuning: &Tuning,
    dt: f32,
) -> Vec<Projectile> {
    // Horizontal movement
    if input.is_down(Action::MoveLeft) {
        player.x -= player.speed * dt;
    }
    if input.is_down(Action::MoveRight) {
        player.x += player.speed * dt;
    }
    player.x = player.x.clamp(0.0, bounds.width);

    // Gravity, landing and jumping
    let rest_y = player.rest_y(bounds.floor_y);
    if player.y < rest_y {
        player.vy += tuning.gravity * dt;
    } else {
        if player.y > rest_y {
            player.vy = 0.0;
            player.y = rest_y;
        }
        if player.y == rest_y && input.is_down(Action::Jump) {
            player.vy = -tuning.jump_speed;
        }
    }
    player.y += player.vy * dt;

    if player.shoot_cooldown > 0.0 {
        player.shoot_cooldown = (player.shoot_cooldown - dt).max(0.0);
    }

    // Left cannon first; the cooldown it sets blocks the right one this frame.
    let mut fired = Vec::new();
    for (action, angle) in [
        (Action::FireLeft, PI - player.aim),
        (Action::FireRight, player.aim),
    ] {
        if input.is_down(action) && can_fire(player) {
            let (mx, my) = player.muzzle();
            fired.push(Projectile::launch(
                mx,
                my,
                player.w / 4.0,
                player.h / 16.0,
                angle,
                tuning.projectile_speed,
            ));
            player.shoot_cooldown = tuning.shoot_cooldown.max(0.0);
            player.ammunition -= 1;
            debug!(?action, angle, ammunition = player.ammunition, "bolt fired");
        }
    }

    // Aim; holding both keys applies both, down last.
    if input.is_down(Action::AimUp) {
        player.aim = (player.aim - tuning.aim_rate * dt).max(tuning.aim_min);
    }
    if input.is_down(Action::AimDown) {
        player.aim = (player.aim + tuning.aim_rate * dt).min(tuning.aim_max);
    }

    fired
}

// ── Projectiles ──────────────────────────────────────────────────────────────

pub fn step_projectile(bolt: &mut Projectile, dt: f32) {
    bolt.x += bolt.vx * dt;
    bolt.y += bolt.vy * dt;
}

/// Bolts leave through the sides or the top (plus a margin) or sink into
/// the floor.
pub fn is_offscreen(bolt: &Projectile, bounds: &Bounds, tuning: &Tuning) -> bool {
    let m = tuning.offscreen_margin;
    bolt.x < -m || bolt.x > bounds.width + m || bolt.y < -m || bolt.y > bounds.floor_y
}

/// Index of the first un-hit target the bolt overlaps, in scene order.
pub fn find_hit(bolt: &Projectile, entities: &[Entity]) -> Option<usize> {
    entities.iter().position(|e| match e {
        Entity::Target(t) if !t.hit => {
            let dist = (bolt.x - t.x).hypot(bolt.y - t.y);
            dist < bolt.hit_radius + t.radius()
        }
        _ => false,
    })
}

/// Bolts refunded for a hit: usually one, sometimes two, rarely three.
pub fn roll_ammo_reward(tuning: &Tuning, rng: &mut impl Rng) -> u32 {
    let roll: f64 = rng.gen();
    if roll < tuning.reward_one {
        1
    } else if roll < tuning.reward_one + tuning.reward_two {
        2
    } else {
        3
    }
}

fn register_hit(
    scene: &mut Scene,
    bolt_idx: usize,
    target_idx: usize,
    tuning: &Tuning,
    rng: &mut impl Rng,
) {
    let entities = scene.entities_mut();
    if let Entity::Projectile(bolt) = &mut entities[bolt_idx] {
        bolt.exist = false;
    }
    if let Entity::Target(target) = &mut entities[target_idx] {
        target.hit = true;
    }
    let reward = roll_ammo_reward(tuning, rng);
    if let Some(player) = scene.player_mut() {
        player.score += 1;
        player.ammunition = player.ammunition.saturating_add(reward);
        debug!(score = player.score, reward, "target hit");
    }
}

// ── Targets ──────────────────────────────────────────────────────────────────

/// Grow, shrink and spin a target.  When a hit target has shrunk away it is
/// marked gone and its replacement is returned.
pub fn update_target(
    target: &mut Target,
    bounds: &Bounds,
    tuning: &Tuning,
    dt: f32,
    rng: &mut impl Rng,
) -> Option<Target> {
    let mut replacement = None;

    if !target.hit {
        if target.w < target.full_w {
            target.w += target.full_w * dt;
        }
        target.w = target.w.min(target.full_w);
        if target.h < target.full_h {
            target.h += target.full_h * dt;
        }
        target.h = target.h.min(target.full_h);
    } else {
        let rate = dt * tuning.shrink_factor;
        target.w = (target.w - target.full_w * rate).max(0.0);
        target.h = (target.h - target.full_h * rate).max(0.0);
        if target.exist && target.w <= 0.0 && target.h <= 0.0 {
            target.exist = false;
            let fresh = spawn_target(bounds, tuning, rng);
            debug!(x = fresh.x, y = fresh.y, "target respawned");
            replacement = Some(fresh);
        }
    }

    target.rotation = (target.rotation + tuning.target_spin * dt).rem_euclid(TAU);
    replacement
}

// ── Per-frame pass ───────────────────────────────────────────────────────────

/// Update every entity present at the start of the pass, in scene order.
/// Entities spawned during the pass are appended and first move next frame.
pub fn tick(
    scene: &mut Scene,
    input: &impl InputState,
    bounds: &Bounds,
    tuning: &Tuning,
    dt: f32,
    rng: &mut impl Rng,
) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    let count = scene.len();

    for i in 0..count {
        match &mut scene.entities_mut()[i] {
            Entity::Player(player) => {
                let fired = update_player(player, input, bounds, tuning, dt);
                let ammunition = player.ammunition;
                for bolt in fired {
                    scene.push(bolt);
                }
                if ammunition == 0 && scene.projectiles_in_flight() == 0 {
                    outcome.game_over = true;
                }
            }
            Entity::Projectile(bolt) => {
                step_projectile(bolt, dt);
                let moved = bolt.clone();
                if let Some(target_idx) = find_hit(&moved, scene.entities()) {
                    register_hit(scene, i, target_idx, tuning, rng);
                    outcome.hits += 1;
                }
                if is_offscreen(&moved, bounds, tuning) {
                    if let Entity::Projectile(bolt) = &mut scene.entities_mut()[i] {
                        bolt.exist = false;
                    }
                }
            }
            Entity::Target(target) => {
                if let Some(fresh) = update_target(target, bounds, tuning, dt, rng) {
                    scene.push(fresh);
                }
            }
        }
    }

    outcome
}
