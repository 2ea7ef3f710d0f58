//! One wheel and everything it is currently showing.

use std::time::Duration;

use lunchwheel_core::AppConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::animator::{SpinAnimator, SpinConfig, SpinDraw, SpinOutcome, SpinTick};
use crate::error::WheelError;
use crate::frames::FrameSource;
use crate::pool::{PoolLimits, RestaurantUniverse};
use crate::render::{render, RenderOptions, WheelDrawing};
use crate::sampler::{sample, CandidateSet};

/// Explicit state for a single roulette: the universe for the selected
/// location, the candidates on the wheel, and the wheel's rotation.
///
/// The random source is injected so a seeded generator can reproduce a run.
#[derive(Debug)]
pub struct RouletteSession<R: Rng = StdRng> {
    universe: Option<RestaurantUniverse>,
    candidates: CandidateSet,
    animator: SpinAnimator,
    limits: PoolLimits,
    rng: R,
}

impl RouletteSession<StdRng> {
    /// A session seeded from the operating system.
    #[must_use]
    pub fn from_os_rng(limits: PoolLimits, spin: SpinConfig) -> Self {
        Self::new(limits, spin, StdRng::from_os_rng())
    }

    /// A reproducible session.
    #[must_use]
    pub fn seeded(limits: PoolLimits, spin: SpinConfig, seed: u64) -> Self {
        Self::new(limits, spin, StdRng::seed_from_u64(seed))
    }

    #[must_use]
    pub fn from_config(config: &AppConfig, seed: Option<u64>) -> Self {
        let limits = PoolLimits::from_config(config);
        let spin = SpinConfig::from_config(config);
        match seed {
            Some(seed) => Self::seeded(limits, spin, seed),
            None => Self::from_os_rng(limits, spin),
        }
    }
}

impl<R: Rng> RouletteSession<R> {
    pub fn new(limits: PoolLimits, spin: SpinConfig, rng: R) -> Self {
        Self {
            universe: None,
            candidates: CandidateSet::from(Vec::new()),
            animator: SpinAnimator::new(spin),
            limits,
            rng,
        }
    }

    /// Replaces the universe wholesale and draws a fresh candidate set.
    ///
    /// # Errors
    ///
    /// - [`WheelError::AlreadySpinning`] if a spin is running; nothing changes.
    /// - [`WheelError::EmptyUniverse`] if `universe` is empty. The universe is
    ///   still installed and the wheel is cleared.
    pub fn load_universe(
        &mut self,
        universe: RestaurantUniverse,
    ) -> Result<&CandidateSet, WheelError> {
        if self.animator.is_spinning() {
            return Err(WheelError::AlreadySpinning);
        }
        tracing::info!(
            places = universe.len(),
            synthetic = universe.synthetic_count(),
            "universe loaded"
        );
        self.universe = Some(universe);
        self.candidates = CandidateSet::from(Vec::new());
        self.refresh_candidates()
    }

    /// Draws a new candidate set from the current universe.
    ///
    /// # Errors
    ///
    /// - [`WheelError::AlreadySpinning`] if a spin is running.
    /// - [`WheelError::EmptyUniverse`] if no universe is loaded or it is empty.
    pub fn refresh_candidates(&mut self) -> Result<&CandidateSet, WheelError> {
        if self.animator.is_spinning() {
            return Err(WheelError::AlreadySpinning);
        }
        let universe = self.universe.as_ref().ok_or(WheelError::EmptyUniverse)?;
        self.candidates = sample(universe, self.limits.max_candidates, &mut self.rng)?;
        Ok(&self.candidates)
    }

    #[must_use]
    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    #[must_use]
    pub fn universe(&self) -> Option<&RestaurantUniverse> {
        self.universe.as_ref()
    }

    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.animator.rotation()
    }

    #[must_use]
    pub fn is_spinning(&self) -> bool {
        self.animator.is_spinning()
    }

    /// Starts a spin with a freshly drawn rotation; returns the target.
    ///
    /// # Errors
    ///
    /// See [`SpinAnimator::start`].
    pub fn start_spin(&mut self, now: Duration) -> Result<f64, WheelError> {
        let draw = SpinDraw::random(self.animator.config(), &mut self.rng);
        self.start_spin_with(draw, now)
    }

    /// Starts a spin with a caller-chosen draw.
    ///
    /// # Errors
    ///
    /// See [`SpinAnimator::start`].
    pub fn start_spin_with(&mut self, draw: SpinDraw, now: Duration) -> Result<f64, WheelError> {
        self.animator.start(&self.candidates, draw, now)
    }

    pub fn tick(&mut self, now: Duration) -> SpinTick {
        self.animator.tick(now)
    }

    pub fn cancel_spin(&mut self) -> bool {
        self.animator.cancel()
    }

    #[must_use]
    pub fn render(&self, options: &RenderOptions) -> WheelDrawing {
        render(&self.candidates, self.animator.rotation(), options)
    }
}

/// Cancels an unfinished spin when the driver exits early or is dropped.
struct SpinGuard<'a, R: Rng> {
    session: &'a mut RouletteSession<R>,
}

impl<R: Rng> Drop for SpinGuard<'_, R> {
    fn drop(&mut self) {
        if self.session.cancel_spin() {
            tracing::warn!(
                rotation = self.session.rotation(),
                "spin abandoned before completion"
            );
        }
    }
}

/// Runs one spin to completion against `frames`.
///
/// The first frame starts the spin; every later frame advances it and reports
/// the new rotation through `on_tick`, including the final, exact target.
///
/// # Errors
///
/// - Anything [`RouletteSession::start_spin`] rejects.
/// - [`WheelError::Cancelled`] if `frames` runs out before the spin ends; the
///   spin is abandoned and the wheel stays where it stopped.
pub async fn drive_spin<R, F, C>(
    session: &mut RouletteSession<R>,
    frames: &mut F,
    mut on_tick: C,
) -> Result<SpinOutcome, WheelError>
where
    R: Rng,
    F: FrameSource,
    C: FnMut(f64),
{
    let Some(started) = frames.next_frame().await else {
        return Err(WheelError::Cancelled);
    };
    session.start_spin(started)?;
    let guard = SpinGuard { session };

    while let Some(now) = frames.next_frame().await {
        match guard.session.tick(now) {
            SpinTick::Rotating { rotation } => on_tick(rotation),
            SpinTick::Finished(outcome) => {
                on_tick(outcome.rotation);
                return Ok(outcome);
            }
            SpinTick::Idle => return Err(WheelError::Cancelled),
        }
    }
    Err(WheelError::Cancelled)
}
