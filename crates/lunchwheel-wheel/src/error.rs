use thiserror::Error;

/// Errors surfaced by the roulette engine. None of them are fatal; each
/// leaves the engine in the state it was in before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WheelError {
    /// Sampling was attempted on a universe with no places.
    #[error("the restaurant universe is empty")]
    EmptyUniverse,

    /// A spin was requested before any candidates were drawn.
    #[error("no candidates have been drawn")]
    NoCandidates,

    /// A spin, or a candidate refresh, was requested while a spin is running.
    #[error("a spin is already in progress")]
    AlreadySpinning,

    /// The frame source ended before the spin completed.
    #[error("spin cancelled before completion")]
    Cancelled,
}
