//! Spin animation state machine.
//!
//! A spin moves the rotation from its current value to a precomputed target
//! along an ease-out-quart curve. The animator does not own a clock: callers
//! pass a monotonic timestamp (time since any fixed origin) to [`SpinAnimator::start`]
//! and every [`SpinAnimator::tick`].

use std::f64::consts::TAU;
use std::time::Duration;

use lunchwheel_core::{AppConfig, Place};
use rand::Rng;

use crate::error::WheelError;
use crate::geometry::resolve_winner;
use crate::sampler::CandidateSet;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinConfig {
    pub duration: Duration,
    /// Lower bound (inclusive) of the random whole-turn count.
    pub min_turns: f64,
    /// Upper bound (exclusive) of the random whole-turn count.
    pub max_turns: f64,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(5000),
            min_turns: 5.0,
            max_turns: 10.0,
        }
    }
}

impl SpinConfig {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            duration: Duration::from_millis(config.spin_duration_ms),
            min_turns: f64::from(config.spin_min_turns),
            max_turns: f64::from(config.spin_max_turns),
        }
    }
}

/// The random part of a spin, drawn once at start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinDraw {
    /// Whole turns, uniform in `[min_turns, max_turns)`.
    pub full_rotations: f64,
    /// Extra angle, uniform in `[0, 2π)`.
    pub extra_angle: f64,
}

impl SpinDraw {
    pub fn random<R: Rng + ?Sized>(config: &SpinConfig, rng: &mut R) -> Self {
        let full_rotations = if config.max_turns > config.min_turns {
            rng.random_range(config.min_turns..config.max_turns)
        } else {
            config.min_turns
        };
        Self {
            full_rotations,
            extra_angle: rng.random_range(0.0..TAU),
        }
    }

    /// Total angle added to the current rotation.
    #[must_use]
    pub fn delta(&self) -> f64 {
        self.full_rotations * TAU + self.extra_angle
    }
}

/// `1 - (1 - t)^4`, with `t` clamped to `[0, 1]`.
#[must_use]
pub fn ease_out_quart(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(4)
}

/// How a finished spin landed.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinOutcome {
    pub rotation: f64,
    pub index: usize,
    pub winner: Place,
}

/// What one animation frame produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SpinTick {
    /// No spin in progress.
    Idle,
    Rotating { rotation: f64 },
    /// Final frame; the rotation equals the target exactly.
    Finished(SpinOutcome),
}

#[derive(Debug, Clone)]
struct ActiveSpin {
    start_rotation: f64,
    target: f64,
    started_at: Duration,
    /// Highest elapsed time seen so far; keeps the rotation monotonic if the
    /// caller's clock steps backwards.
    elapsed: Duration,
    candidates: CandidateSet,
}

#[derive(Debug, Clone)]
enum SpinState {
    Idle,
    Spinning(ActiveSpin),
}

/// Rotation state of one wheel.
#[derive(Debug, Clone)]
pub struct SpinAnimator {
    rotation: f64,
    state: SpinState,
    config: SpinConfig,
}

impl SpinAnimator {
    #[must_use]
    pub fn new(config: SpinConfig) -> Self {
        Self {
            rotation: 0.0,
            state: SpinState::Idle,
            config,
        }
    }

    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    #[must_use]
    pub fn config(&self) -> &SpinConfig {
        &self.config
    }

    #[must_use]
    pub fn is_spinning(&self) -> bool {
        matches!(self.state, SpinState::Spinning(_))
    }

    /// Target rotation of the spin in progress.
    #[must_use]
    pub fn target(&self) -> Option<f64> {
        match &self.state {
            SpinState::Spinning(spin) => Some(spin.target),
            SpinState::Idle => None,
        }
    }

    /// Begins a spin over `candidates` and returns its target rotation.
    ///
    /// The candidate set is snapshotted so the winner is resolved against the
    /// wheel that was actually spun.
    ///
    /// # Errors
    ///
    /// - [`WheelError::AlreadySpinning`] if a spin is in progress.
    /// - [`WheelError::NoCandidates`] if `candidates` is empty.
    pub fn start(
        &mut self,
        candidates: &CandidateSet,
        draw: SpinDraw,
        now: Duration,
    ) -> Result<f64, WheelError> {
        if self.is_spinning() {
            return Err(WheelError::AlreadySpinning);
        }
        if candidates.is_empty() {
            return Err(WheelError::NoCandidates);
        }

        let target = self.rotation + draw.delta();
        tracing::debug!(
            from = self.rotation,
            target,
            sectors = candidates.len(),
            "spin started"
        );
        self.state = SpinState::Spinning(ActiveSpin {
            start_rotation: self.rotation,
            target,
            started_at: now,
            elapsed: Duration::ZERO,
            candidates: candidates.clone(),
        });
        Ok(target)
    }

    /// Advances the animation to `now`.
    pub fn tick(&mut self, now: Duration) -> SpinTick {
        let SpinState::Spinning(spin) = &mut self.state else {
            return SpinTick::Idle;
        };

        let elapsed = now.saturating_sub(spin.started_at).max(spin.elapsed);
        spin.elapsed = elapsed;

        if elapsed < self.config.duration {
            let t = elapsed.as_secs_f64() / self.config.duration.as_secs_f64();
            self.rotation =
                spin.start_rotation + (spin.target - spin.start_rotation) * ease_out_quart(t);
            return SpinTick::Rotating {
                rotation: self.rotation,
            };
        }

        self.rotation = spin.target;
        let SpinState::Spinning(spin) = std::mem::replace(&mut self.state, SpinState::Idle) else {
            return SpinTick::Idle;
        };
        let n = spin.candidates.len();
        let Some((index, winner)) = resolve_winner(self.rotation, n)
            .and_then(|index| spin.candidates.get(index).map(|place| (index, place.clone())))
        else {
            tracing::warn!(rotation = self.rotation, n, "spin finished without a winner");
            return SpinTick::Idle;
        };

        tracing::info!(index, winner = %winner.name, "spin finished");
        SpinTick::Finished(SpinOutcome {
            rotation: self.rotation,
            index,
            winner,
        })
    }

    /// Abandons a spin in progress, leaving the wheel where it is.
    pub fn cancel(&mut self) -> bool {
        if self.is_spinning() {
            self.state = SpinState::Idle;
            tracing::debug!(rotation = self.rotation, "spin cancelled");
            true
        } else {
            false
        }
    }
}

impl Default for SpinAnimator {
    fn default() -> Self {
        Self::new(SpinConfig::default())
    }
}
