//! Sector layout and the rotation → winner mapping.
//!
//! Angles are radians in screen orientation: 0 points at 3 o'clock and
//! positive angles turn clockwise (y grows downward). Sector `i` of `n`
//! covers `[i·arc, (i+1)·arc)` with `arc = 2π/n` in the wheel's own frame;
//! the displayed wheel is that layout rotated by the current rotation.

use std::f64::consts::{PI, TAU};

/// Direction of the fixed pointer: straight up.
pub const POINTER_ANGLE: f64 = 1.5 * PI;

/// One angular slice of the wheel, in the unrotated frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sector {
    pub index: usize,
    pub start: f64,
    pub end: f64,
}

impl Sector {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    /// Angle of the line splitting the sector in half; labels sit on it.
    #[must_use]
    pub fn bisector(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    /// Whether `angle` (any real, reduced mod 2π) falls in `[start, end)`.
    #[must_use]
    pub fn contains(&self, angle: f64) -> bool {
        let a = normalize_angle(angle);
        a >= self.start && a < self.end
    }
}

/// Angular width of each of `n` sectors. `n` must be non-zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn sector_arc(n: usize) -> f64 {
    TAU / n as f64
}

/// Lays out `n` equal sectors covering `[0, 2π)`.
///
/// The last sector ends at exactly `2π` so the sectors partition the circle
/// without a rounding gap.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn sectors(n: usize) -> Vec<Sector> {
    if n == 0 {
        return Vec::new();
    }
    let arc = sector_arc(n);
    (0..n)
        .map(|i| Sector {
            index: i,
            start: i as f64 * arc,
            end: if i + 1 == n { TAU } else { (i + 1) as f64 * arc },
        })
        .collect()
}

/// Reduces any finite angle into `[0, 2π)`.
///
/// `rem_euclid` can return exactly `2π` for tiny negative inputs after
/// rounding; that case folds back to 0.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let r = angle.rem_euclid(TAU);
    if r >= TAU {
        0.0
    } else {
        r
    }
}

/// Index of the sector containing `angle` in the unrotated frame.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn sector_at(angle: f64, n: usize) -> Option<usize> {
    if n == 0 || !angle.is_finite() {
        return None;
    }
    let index = (normalize_angle(angle) / sector_arc(n)).floor() as usize;
    Some(index.min(n - 1))
}

/// Index of the sector under the pointer once the wheel has turned by
/// `rotation` radians.
///
/// Rotating the wheel clockwise by `R` brings the wheel-frame angle
/// `POINTER_ANGLE - R` under the pointer, so the winner is the sector
/// containing that angle. Holds for negative and very large rotations; full
/// turns are equivalent to no turn at all.
///
/// Returns `None` for an empty wheel or a non-finite rotation.
#[must_use]
pub fn resolve_winner(rotation: f64, n: usize) -> Option<usize> {
    if !rotation.is_finite() {
        return None;
    }
    let normalized = normalize_angle(rotation);
    sector_at(POINTER_ANGLE - normalized, n)
}
