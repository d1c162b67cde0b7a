// src/renderer.rs
//! Rendering collaborator for the wheel.
//!
//! Drawing is mechanical and has no feedback into the engine: the engine
//! pushes `(rotation, roster, winners)` at it every frame and nothing comes
//! back. The terminal renderer shows the name currently under the pointer;
//! the null renderer keeps tests quiet.

use crate::core::wheel;
use crate::state::Winner;
use std::io::{self, Write};

pub trait WheelRenderer {
    /// Draws the wheel at `rotation`. `roster` is the full slice set, won
    /// names included; `winners` marks which slices are grayed out.
    fn draw_wheel(&mut self, rotation: f64, roster: &[String], winners: &[Winner]);

    /// Draws the wheel with no names loaded.
    fn draw_empty(&mut self);
}

/// Prints the slice under the pointer whenever it changes, so a spin reads
/// as names flicking past the arrow and slowing down.
pub struct TerminalRenderer {
    last_index: Option<usize>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self { last_index: None }
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl WheelRenderer for TerminalRenderer {
    fn draw_wheel(&mut self, rotation: f64, roster: &[String], winners: &[Winner]) {
        if roster.is_empty() {
            self.draw_empty();
            return;
        }
        let Ok(index) = wheel::slice_at(rotation, roster.len()) else {
            return;
        };
        if self.last_index == Some(index) {
            return;
        }
        self.last_index = Some(index);

        let name = &roster[index];
        let won = winners.iter().any(|w| &w.name == name);
        let marker = if won { " (won)" } else { "" };
        print!("\r  ▸ {:<32}{}", name, marker);
        let _ = io::stdout().flush();
    }

    fn draw_empty(&mut self) {
        println!("The wheel is empty. Enter names and start the raffle.");
    }
}

/// Discards every frame. Used by the test suites.
pub struct NullRenderer;

impl WheelRenderer for NullRenderer {
    fn draw_wheel(&mut self, _rotation: f64, _roster: &[String], _winners: &[Winner]) {}
    fn draw_empty(&mut self) {}
}
