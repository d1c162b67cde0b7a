// src/state.rs
use std::fmt;

// --- Raffle run phases ---
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RafflePhase {
    Idle,
    Spinning,
    Resolving,
    Done,
}

/// One recorded extraction. `draw_index` is 1-based, in draw order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Winner {
    pub draw_index: usize,
    pub name: String,
}

/// Explicit per-run state, passed into and returned from engine operations.
///
/// `roster` is the full initial name set and never shrinks: won slices stay
/// on the wheel (shown grayed out by the renderer), so the slice count is
/// constant for the whole run. `available` is the shrinking pool the engine
/// draws from. The two are deliberately separate quantities.
#[derive(Debug, Clone)]
pub struct RaffleSession {
    pub roster: Vec<String>,
    pub available: Vec<String>,
    pub winners: Vec<Winner>,
    /// Cumulative rotation in radians. Unbounded and never normalized
    /// between spins; normalization happens only when resolving a landed
    /// slice.
    pub rotation: f64,
    pub phase: RafflePhase,
}

impl RaffleSession {
    pub fn new(roster: Vec<String>) -> Self {
        let available = roster.clone();
        Self {
            roster,
            available,
            winners: Vec::new(),
            rotation: 0.0,
            phase: RafflePhase::Idle,
        }
    }

    /// Slice count for angle resolution: always the full initial roster.
    pub fn slice_count(&self) -> usize {
        self.roster.len()
    }
}

/// One spin, planned up front and consumed once by the animation.
#[derive(Debug, Clone, Copy)]
pub struct SpinPlan {
    pub start: f64,
    pub target: f64,
    pub duration_ms: u64,
}

// --- Errors ---
#[derive(Debug)]
pub enum RaffleError {
    /// Bad extraction count or empty name pool. The run never starts.
    InvalidInput(String),
    /// Internal invariant violation (e.g. resolving against zero slices).
    /// Fatal to the current run; unreachable given input validation.
    InvalidState(String),
}

impl fmt::Display for RaffleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RaffleError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            RaffleError::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
        }
    }
}

impl std::error::Error for RaffleError {}
