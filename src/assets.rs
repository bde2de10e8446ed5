//! Glyph sprites.
//!
//! Each sprite is published through a [`SpriteHandle`] that starts out empty
//! and is filled by a background loader thread.  Drawing code checks
//! [`SpriteHandle::get`] every frame and simply skips sprites that are not
//! ready yet.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::thread;

use crossterm::style::Color;
use tracing::{info, warn};

use crate::error::ShooterError;

/// Environment variable pointing at a directory of sprite overrides.
pub const ASSETS_ENV: &str = "BOLT_SHOOTER_ASSETS";

#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub rows: Vec<Vec<char>>,
    pub color: Color,
}

impl Sprite {
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>, color: Color) -> Self {
        Self {
            rows: lines.into_iter().map(|l| l.chars().collect()).collect(),
            color,
        }
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Glyph at `(col, row)`, blank where a row is shorter than the widest.
    pub fn glyph(&self, col: usize, row: usize) -> char {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(' ')
    }
}

/// Shared, write-once slot for a sprite.
#[derive(Clone, Debug, Default)]
pub struct SpriteHandle(Arc<OnceLock<Sprite>>);

impl SpriteHandle {
    pub fn get(&self) -> Option<&Sprite> {
        self.0.get()
    }

    pub fn is_ready(&self) -> bool {
        self.0.get().is_some()
    }

    /// Publish the sprite.  Later calls are ignored.
    pub fn fulfil(&self, sprite: Sprite) {
        let _ = self.0.set(sprite);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteName {
    Player,
    Cannon,
    Bolt,
    Target,
}

impl SpriteName {
    pub const ALL: [SpriteName; 4] = [
        SpriteName::Player,
        SpriteName::Cannon,
        SpriteName::Bolt,
        SpriteName::Target,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            SpriteName::Player => "player.txt",
            SpriteName::Cannon => "cannon.txt",
            SpriteName::Bolt => "bolt.txt",
            SpriteName::Target => "target.txt",
        }
    }

    pub fn color(self) -> Color {
        match self {
            SpriteName::Player => Color::White,
            SpriteName::Cannon => Color::DarkGrey,
            SpriteName::Bolt => Color::Cyan,
            SpriteName::Target => Color::Red,
        }
    }

    /// Art used when no override file exists.
    ///
    /// The bolt sprite is one row of four orientation glyphs (horizontal,
    /// falling diagonal, vertical, rising diagonal); the cannon sprite is one
    /// row whose length is the barrel length in glyphs.
    pub fn builtin(self) -> Sprite {
        let lines: &[&str] = match self {
            SpriteName::Player => &["  ▄██▄  ", " █▀██▀█ ", " ██████ ", "  ▀  ▀  "],
            SpriteName::Cannon => &["■■■"],
            SpriteName::Bolt => &["─╲│╱"],
            SpriteName::Target => &["◢██◣", "◥██◤"],
        };
        Sprite::from_lines(lines.iter().copied(), self.color())
    }
}

/// Read `<dir>/<name>.txt`.  `Ok(None)` when the file simply isn't there.
pub fn read_sprite(dir: &Path, name: SpriteName) -> Result<Option<Sprite>, ShooterError> {
    let path = dir.join(name.file_name());
    if !path.exists() {
        return Ok(None);
    }
    let src = std::fs::read_to_string(&path)
        .map_err(|source| ShooterError::SpriteRead { path, source })?;
    let sprite = Sprite::from_lines(src.lines(), name.color());
    Ok((sprite.height() > 0).then_some(sprite))
}

#[derive(Clone, Debug, Default)]
pub struct Assets {
    pub player: SpriteHandle,
    pub cannon: SpriteHandle,
    pub bolt: SpriteHandle,
    pub target: SpriteHandle,
}

impl Assets {
    /// Handles that never become ready.  Everything draws as a no-op.
    pub fn placeholder() -> Self {
        Self::default()
    }

    /// Built-in art, ready immediately.
    pub fn builtin() -> Self {
        let assets = Self::default();
        for name in SpriteName::ALL {
            assets.handle(name).fulfil(name.builtin());
        }
        assets
    }

    /// Return immediately and fill the handles from a loader thread.
    pub fn load(dir: Option<PathBuf>) -> Self {
        let assets = Self::default();
        let slots = assets.clone();
        let spawned = thread::Builder::new()
            .name("sprite-loader".into())
            .spawn(move || slots.load_all(dir.as_deref()));
        if let Err(e) = spawned {
            warn!(error = %e, "sprite loader thread failed to start; using built-in art");
            assets.load_all(None);
        }
        assets
    }

    fn load_all(&self, dir: Option<&Path>) {
        for name in SpriteName::ALL {
            let sprite = match dir.map(|d| read_sprite(d, name)) {
                Some(Ok(Some(sprite))) => sprite,
                Some(Err(e)) => {
                    warn!(error = %e, "falling back to built-in sprite");
                    name.builtin()
                }
                Some(Ok(None)) | None => name.builtin(),
            };
            self.handle(name).fulfil(sprite);
        }
        info!("sprites ready");
    }

    pub fn handle(&self, name: SpriteName) -> &SpriteHandle {
        match name {
            SpriteName::Player => &self.player,
            SpriteName::Cannon => &self.cannon,
            SpriteName::Bolt => &self.bolt,
            SpriteName::Target => &self.target,
        }
    }

    pub fn all_ready(&self) -> bool {
        SpriteName::ALL.iter().all(|&n| self.handle(n).is_ready())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_sprites_are_rectangular() {
        for name in SpriteName::ALL {
            let s = name.builtin();
            assert!(s.height() > 0);
            assert!(s.rows.iter().all(|r| r.len() == s.width()), "{name:?}");
        }
    }

    #[test]
    fn glyph_outside_sprite_is_blank() {
        let s = Sprite::from_lines(["ab", "c"], Color::White);
        assert_eq!(s.glyph(1, 0), 'b');
        assert_eq!(s.glyph(1, 1), ' ');
        assert_eq!(s.glyph(0, 5), ' ');
    }

    #[test]
    fn handle_is_write_once() {
        let h = SpriteHandle::default();
        assert!(!h.is_ready());
        h.fulfil(Sprite::from_lines(["x"], Color::Red));
        h.fulfil(Sprite::from_lines(["y"], Color::Red));
        assert_eq!(h.get().map(|s| s.glyph(0, 0)), Some('x'));
    }

    #[test]
    fn missing_sprite_file_is_not_an_error() {
        let dir = std::env::temp_dir().join("bolt_shooter_no_such_dir");
        assert!(matches!(read_sprite(&dir, SpriteName::Bolt), Ok(None)));
    }

    fn scratch_dir(label: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "bolt_shooter_{label}_{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn wait_until_ready(assets: &Assets) {
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        while !assets.all_ready() {
            assert!(std::time::Instant::now() < deadline, "loader never finished");
            thread::sleep(std::time::Duration::from_millis(5));
        }
    }

    #[test]
    fn loader_publishes_file_override() {
        let dir = scratch_dir("override");
        std::fs::write(dir.join("bolt.txt"), "=+|+\n").unwrap();

        let assets = Assets::load(Some(dir.clone()));
        wait_until_ready(&assets);

        let bolt = assets.bolt.get().unwrap();
        assert_eq!(bolt.glyph(0, 0), '=');
        assert_eq!(bolt.glyph(1, 0), '+');
        assert_eq!(bolt.color, Color::Cyan);
        // sprites without a file keep the built-in art
        assert_eq!(assets.cannon.get(), Some(&SpriteName::Cannon.builtin()));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn loader_without_dir_publishes_builtin_art() {
        let assets = Assets::load(None);
        wait_until_ready(&assets);
        for name in SpriteName::ALL {
            assert_eq!(assets.handle(name).get(), Some(&name.builtin()), "{name:?}");
        }
    }

    #[test]
    fn unreadable_sprite_falls_back_to_builtin() {
        let dir = scratch_dir("unreadable");
        // a directory where the file should be cannot be read as text
        std::fs::create_dir_all(dir.join("bolt.txt")).unwrap();

        let err = read_sprite(&dir, SpriteName::Bolt).unwrap_err();
        assert!(matches!(err, ShooterError::SpriteRead { .. }));
        assert!(err.to_string().contains("bolt.txt"));

        let assets = Assets::load(Some(dir.clone()));
        wait_until_ready(&assets);
        assert_eq!(assets.bolt.get(), Some(&SpriteName::Bolt.builtin()));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn empty_sprite_file_keeps_builtin_art() {
        let dir = scratch_dir("empty");
        std::fs::write(dir.join("target.txt"), "").unwrap();
        assert!(matches!(read_sprite(&dir, SpriteName::Target), Ok(None)));

        let assets = Assets::load(Some(dir.clone()));
        wait_until_ready(&assets);
        assert_eq!(assets.target.get(), Some(&SpriteName::Target.builtin()));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
