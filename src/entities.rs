//! All game entity types — pure data, no logic.
//!
//! Positions and sizes are in world units (pixel-like), with `x` growing to
//! the right and `y` growing downwards.  Every entity is centred on its
//! position.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Projectile,
    Target,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// Waiting in the menu; the loop keeps ticking but nothing is simulated.
    Menu,
    Active,
}

/// Play-area dimensions in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
    /// The floor line: the player's feet never go below it.
    pub floor_y: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32, floor_height: f32) -> Self {
        Self {
            width,
            height,
            floor_y: height - floor_height,
        }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Horizontal speed in world units per second.
    pub speed: f32,
    /// Vertical velocity (positive = falling).
    pub vy: f32,
    pub score: u32,
    pub ammunition: u32,
    /// Seconds until the cannons may fire again; never negative.
    pub shoot_cooldown: f32,
    /// Cannon angle in radians; negative aims upwards.
    pub aim: f32,
    pub exist: bool,
}

impl Player {
    /// Vertical coordinate of the player's centre when resting on the floor.
    pub fn rest_y(&self, floor_y: f32) -> f32 {
        floor_y - self.h / 2.0
    }

    /// Muzzle point shared by both cannons.
    pub fn muzzle(&self) -> (f32, f32) {
        (self.x, self.y + 0.0625 * self.h)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// A bolt fired by one of the player's cannons.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub vx: f32,
    pub vy: f32,
    /// Fixed at spawn to the firing angle.
    pub rotation: f32,
    /// Radius used for the circular hit test.
    pub hit_radius: f32,
    pub exist: bool,
}

impl Projectile {
    /// Launch a bolt from `(x, y)` at `angle` radians.  The bolt starts
    /// slightly ahead of the muzzle so it doesn't appear inside the cannon.
    pub fn launch(x: f32, y: f32, w: f32, h: f32, angle: f32, speed: f32) -> Self {
        let vx = speed * angle.cos();
        let vy = speed * angle.sin();
        Self {
            x: x + 0.05 * vx,
            y: y + 0.05 * vy,
            w,
            h,
            vx,
            vy,
            rotation: angle,
            hit_radius: h,
            exist: true,
        }
    }
}

// ── Targets ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    pub x: f32,
    pub y: f32,
    /// Current (animated) size.
    pub w: f32,
    pub h: f32,
    /// Size the target grows to.
    pub full_w: f32,
    pub full_h: f32,
    /// Spin in radians, kept within `[0, 2π)`.
    pub rotation: f32,
    /// Set once by a projectile; a hit target only shrinks.
    pub hit: bool,
    pub exist: bool,
}

impl Target {
    /// A fresh target starts at zero size and grows into `full_w × full_h`.
    pub fn new(x: f32, y: f32, full_w: f32, full_h: f32, rotation: f32) -> Self {
        Self {
            x,
            y,
            w: 0.0,
            h: 0.0,
            full_w,
            full_h,
            rotation,
            hit: false,
            exist: true,
        }
    }

    /// Average half-extent, used as the target's collision radius.
    pub fn radius(&self) -> f32 {
        (self.w + self.h) / 4.0
    }
}

// ── Polymorphic entity ────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum Entity {
    Player(Player),
    Projectile(Projectile),
    Target(Target),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Player(_) => EntityKind::Player,
            Entity::Projectile(_) => EntityKind::Projectile,
            Entity::Target(_) => EntityKind::Target,
        }
    }

    pub fn exists(&self) -> bool {
        match self {
            Entity::Player(p) => p.exist,
            Entity::Projectile(b) => b.exist,
            Entity::Target(t) => t.exist,
        }
    }
}

impl From<Player> for Entity {
    fn from(p: Player) -> Self {
        Entity::Player(p)
    }
}

impl From<Projectile> for Entity {
    fn from(b: Projectile) -> Self {
        Entity::Projectile(b)
    }
}

impl From<Target> for Entity {
    fn from(t: Target) -> Self {
        Entity::Target(t)
    }
}
