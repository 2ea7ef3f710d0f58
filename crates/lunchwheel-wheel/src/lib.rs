//! Candidate pool construction and the roulette selection engine.
//!
//! Data flows one way: raw place batches are merged into a
//! [`RestaurantUniverse`], a [`CandidateSet`] is sampled from it for each
//! round, the [`geometry`] module maps the set onto wheel sectors, and the
//! [`SpinAnimator`] turns the wheel and resolves the winner under the
//! pointer. [`RouletteSession`] ties the pieces together for a front end.

pub mod animator;
pub mod error;
pub mod frames;
pub mod geometry;
pub mod pool;
pub mod render;
pub mod sampler;
pub mod session;

pub use animator::{ease_out_quart, SpinAnimator, SpinConfig, SpinDraw, SpinOutcome, SpinTick};
pub use error::WheelError;
pub use frames::{FrameSource, IntervalFrames, ScriptedFrames};
pub use geometry::{resolve_winner, sectors, Sector, POINTER_ANGLE};
pub use pool::{build_universe, build_universe_with, PoolLimits, RestaurantUniverse};
pub use render::{render, Point, RenderOptions, SectorDrawing, WheelDrawing, PALETTE};
pub use sampler::{sample, CandidateSet};
pub use session::{drive_spin, RouletteSession};
