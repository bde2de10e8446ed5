//! Drawing entities into a [`Frame`].
//!
//! No game logic lives here; every function reads entity data and writes
//! cells.  A sprite whose handle is not ready yet draws nothing.

use std::f32::consts::{FRAC_PI_8, PI, TAU};

use crossterm::style::Color;

use crate::assets::{Assets, Sprite};
use crate::entities::{Bounds, Entity, Player, Projectile, Target};
use crate::frame::Frame;
use crate::scene::Scene;

const C_FLOOR: Color = Color::Green;
const C_HUD: Color = Color::Yellow;
const FLOOR_GLYPH: char = '▒';

pub fn draw_floor(frame: &mut Frame, bounds: &Bounds) {
    let (_, row) = frame.viewport().to_cell(0.0, bounds.floor_y);
    frame.fill_from_row(row, FLOOR_GLYPH, C_FLOOR);
}

/// Score and remaining bolts, top-left.
pub fn draw_hud(frame: &mut Frame, player: &Player) {
    frame.print(1, 0, &format!("Score: {}", player.score), C_HUD);
    frame.print(1, 1, &format!("Bolts: {}", player.ammunition), C_HUD);
}

pub fn draw_scene(frame: &mut Frame, scene: &Scene, assets: &Assets) {
    for entity in scene.iter() {
        draw_entity(frame, entity, assets);
    }
}

pub fn draw_entity(frame: &mut Frame, entity: &Entity, assets: &Assets) {
    match entity {
        Entity::Player(p) => draw_player(frame, p, assets),
        Entity::Projectile(b) => draw_projectile(frame, b, assets),
        Entity::Target(t) => draw_target(frame, t, assets),
    }
}

// ── Sprites ──────────────────────────────────────────────────────────────────

/// Nearest-neighbour blit of `sprite` scaled to a `w × h` world box centred
/// on `(cx, cy)`.  Blank glyphs are transparent.
fn blit_scaled(
    frame: &mut Frame,
    sprite: &Sprite,
    (cx, cy): (f32, f32),
    (w, h): (f32, f32),
    mirror: bool,
) {
    let (cols, rows) = frame.viewport().span(w, h);
    if cols <= 0 || rows <= 0 || sprite.width() == 0 {
        return;
    }
    let (left, top) = frame.viewport().to_cell(cx - w / 2.0, cy - h / 2.0);
    for r in 0..rows {
        let src_r = r as usize * sprite.height() / rows as usize;
        for c in 0..cols {
            let mut src_c = c as usize * sprite.width() / cols as usize;
            if mirror {
                src_c = sprite.width() - 1 - src_c;
            }
            let ch = sprite.glyph(src_c, src_r);
            if ch != ' ' {
                frame.put(left + c, top + r, ch, sprite.color);
            }
        }
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

/// One barrel: glyphs laid out from just inside the body outwards along
/// `angle`.
fn draw_cannon(frame: &mut Frame, p: &Player, angle: f32, sprite: &Sprite) {
    let barrel = sprite.width().max(1);
    let (dx, dy) = (angle.cos(), angle.sin());
    let (mx, my) = p.muzzle();
    let inner = 0.4 * p.w;
    let outer = 0.75 * p.w;
    for i in 0..barrel {
        let along = inner + (outer - inner) * (i as f32 + 0.5) / barrel as f32;
        let (col, row) = frame.viewport().to_cell(mx + dx * along, my + dy * along);
        frame.put(col, row, sprite.glyph(i, 0), sprite.color);
    }
}

fn draw_player(frame: &mut Frame, p: &Player, assets: &Assets) {
    if let Some(cannon) = assets.cannon.get() {
        draw_cannon(frame, p, p.aim, cannon);
        draw_cannon(frame, p, PI - p.aim, cannon);
    }
    if let Some(body) = assets.player.get() {
        blit_scaled(frame, body, (p.x, p.y), (p.w, p.h), false);
    }
}

// ── Projectiles ──────────────────────────────────────────────────────────────

/// Which of the four orientation glyphs matches `angle`.
fn orientation_index(angle: f32) -> usize {
    // Lines look the same both ways round, so fold onto [0, π).
    let folded = angle.rem_euclid(PI);
    (((folded + FRAC_PI_8) / (PI / 4.0)) as usize) % 4
}

fn draw_projectile(frame: &mut Frame, b: &Projectile, assets: &Assets) {
    let Some(sprite) = assets.bolt.get() else {
        return;
    };
    let (col, row) = frame.viewport().to_cell(b.x, b.y);
    let ch = sprite.glyph(orientation_index(b.rotation) % sprite.width().max(1), 0);
    frame.put(col, row, ch, sprite.color);
}

// ── Targets ──────────────────────────────────────────────────────────────────

fn draw_target(frame: &mut Frame, t: &Target, assets: &Assets) {
    let Some(sprite) = assets.target.get() else {
        return;
    };
    // Half a turn shows the art mirrored, which reads as spinning.
    let mirror = t.rotation.rem_euclid(TAU) >= PI;
    blit_scaled(frame, sprite, (t.x, t.y), (t.w, t.h), mirror);
}
