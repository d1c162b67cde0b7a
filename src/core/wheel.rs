// src/core/wheel.rs
//! Pointer-to-slice resolution.
//!
//! The wheel is divided into `slice_count` equal arcs; slice `i` occupies
//! `[i*width + rotation, (i+1)*width + rotation)` mod 2π. The pointer sits at
//! angle 0 in the unrotated frame, so the slice under it after a spin is
//! `floor(normalize(-rotation) / width) mod slice_count`. Closed-form only;
//! no rendering or sampling involved.

use crate::state::RaffleError;
use std::f64::consts::TAU;

/// Wraps an angle of arbitrary magnitude (or sign) into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle % TAU;
    if wrapped < 0.0 { wrapped + TAU } else { wrapped }
}

/// Returns the index of the slice currently aligned with the pointer.
///
/// Pure and deterministic. `slice_count == 0` is an internal invariant
/// violation: callers must never resolve against an empty wheel.
pub fn slice_at(rotation: f64, slice_count: usize) -> Result<usize, RaffleError> {
    if slice_count == 0 {
        return Err(RaffleError::InvalidState(
            "cannot resolve a slice on an empty wheel".to_string(),
        ));
    }
    let width = TAU / slice_count as f64;
    let pointer = normalize_angle(-rotation);
    Ok((pointer / width).floor() as usize % slice_count)
}
