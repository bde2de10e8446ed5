//! Terminal output — the only place the binary writes to the screen.
//!
//! The game itself draws into a `Frame`; this module flushes that buffer
//! and renders the menu that sits between games.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use bolt_shooter::frame::Frame;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TITLE: Color = Color::Cyan;
const C_SCORE: Color = Color::Yellow;
const C_TEXT: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

// ── Game frame ────────────────────────────────────────────────────────────────

/// Flush one complete frame.  Runs of same-coloured cells go out as a
/// single `Print` to keep the escape-sequence count down.
pub fn present<W: Write>(out: &mut W, frame: &Frame) -> std::io::Result<()> {
    for row in 0..frame.rows() {
        out.queue(cursor::MoveTo(0, row))?;
        let mut run = String::new();
        let mut run_color = None;
        for cell in frame.row(row) {
            if run_color != Some(cell.color) {
                if let Some(color) = run_color {
                    out.queue(style::SetForegroundColor(color))?;
                    out.queue(Print(&run))?;
                    run.clear();
                }
                run_color = Some(cell.color);
            }
            run.push(cell.ch);
        }
        if let Some(color) = run_color {
            out.queue(style::SetForegroundColor(color))?;
            out.queue(Print(&run))?;
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, frame.rows().saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Menu ──────────────────────────────────────────────────────────────────────

pub fn show_menu<W: Write>(out: &mut W, last_score: Option<u32>) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let centred = |text: &str| cx.saturating_sub(text.chars().count() as u16 / 2);

    let title = "⚡  BOLT  SHOOTER  ⚡";
    out.queue(cursor::MoveTo(centred(title), cy.saturating_sub(6)))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    out.queue(Print(title))?;

    if let Some(score) = last_score {
        let line = format!("Final Score: {}", score);
        out.queue(cursor::MoveTo(centred(&line), cy.saturating_sub(4)))?;
        out.queue(style::SetForegroundColor(C_SCORE))?;
        out.queue(Print(&line))?;
    }

    let start = "Press ENTER to start";
    out.queue(cursor::MoveTo(centred(start), cy.saturating_sub(2)))?;
    out.queue(style::SetForegroundColor(C_TEXT))?;
    out.queue(Print(start))?;

    let controls: &[&str] = &[
        "A D / ← → : Move      SPACE : Jump",
        "W S / ↑ ↓ : Aim       Q E   : Fire left / right",
        "Every hit refunds bolts. Run dry and it's over.",
        "ESC / X : Quit",
    ];
    for (i, line) in controls.iter().enumerate() {
        out.queue(cursor::MoveTo(centred(line), cy + i as u16))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(*line))?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}
