//! Frame clocks for driving a spin.

use std::collections::VecDeque;
use std::future::Future;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::time::{interval, Instant, Interval, MissedTickBehavior};

/// A source of animation frame timestamps.
///
/// Each call yields the time of the next frame, measured from a fixed origin,
/// or `None` once the source is exhausted or shut down.
pub trait FrameSource {
    fn next_frame(&mut self) -> impl Future<Output = Option<Duration>> + Send;
}

/// Real-time frames on a fixed tokio interval.
///
/// Late frames are skipped rather than burst, so a stalled consumer catches
/// up to the current time on its next tick.
#[derive(Debug)]
pub struct IntervalFrames {
    interval: Interval,
    origin: Instant,
    shutdown: Option<oneshot::Receiver<()>>,
    closed: bool,
}

impl IntervalFrames {
    #[must_use]
    pub fn new(period: Duration) -> Self {
        let mut interval = interval(period.max(Duration::from_millis(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            interval,
            origin: Instant::now(),
            shutdown: None,
            closed: false,
        }
    }

    /// Stops yielding frames once `shutdown` fires or its sender is dropped.
    #[must_use]
    pub fn with_shutdown(mut self, shutdown: oneshot::Receiver<()>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }
}

impl FrameSource for IntervalFrames {
    async fn next_frame(&mut self) -> Option<Duration> {
        if self.closed {
            return None;
        }
        let origin = self.origin;
        let Some(shutdown) = self.shutdown.as_mut() else {
            let at = self.interval.tick().await;
            return Some(at.duration_since(origin));
        };
        tokio::select! {
            at = self.interval.tick() => Some(at.duration_since(origin)),
            _ = shutdown => {
                self.closed = true;
                None
            }
        }
    }
}

/// Replays a fixed list of timestamps; used in tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct ScriptedFrames {
    frames: VecDeque<Duration>,
}

impl ScriptedFrames {
    pub fn new(frames: impl IntoIterator<Item = Duration>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn from_millis(millis: impl IntoIterator<Item = u64>) -> Self {
        Self::new(millis.into_iter().map(Duration::from_millis))
    }

    /// Frames every `step` from zero up to and including `until`.
    #[must_use]
    pub fn every(step: Duration, until: Duration) -> Self {
        let step = step.max(Duration::from_millis(1));
        let mut frames = VecDeque::new();
        let mut at = Duration::ZERO;
        while at <= until {
            frames.push_back(at);
            at += step;
        }
        Self { frames }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for ScriptedFrames {
    async fn next_frame(&mut self) -> Option<Duration> {
        self.frames.pop_front()
    }
}
