use std::cell::Cell;
use std::time::Duration;

use web_time::Instant;

use crate::error::{Result, WidgetError};

// Clock

/// Source of "now" for everything that advances with wall-clock time.
///
/// All widgets of one program normally share a single clock so animations and
/// caret blinking agree on the current frame time.
pub trait Clock {
    fn now(&self) -> Instant;
}

pub struct SystemClock;
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A test clock you can drive deterministically.
#[derive(Clone, Debug)]
pub struct ManualClock {
    t: Cell<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            t: Cell::new(Instant::now()),
        }
    }
    pub fn starting_at(t: Instant) -> Self {
        Self { t: Cell::new(t) }
    }
    pub fn set(&self, t: Instant) {
        self.t.set(t);
    }
    pub fn advance(&self, by: Duration) {
        self.t.set(self.t.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.t.get()
    }
}

// Frame timing

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayState {
    Stopped,
    Playing,
    Paused,
}

/// Picks the frame of a flip-book animation from elapsed playback time.
///
/// Frame `i` is shown while `end_times[i - 1] < elapsed <= end_times[i]`,
/// where `end_times` is the running sum of the frame durations.
#[derive(Clone, Debug)]
pub struct FrameClock {
    end_times: Vec<Duration>,
    state: PlayState,
    index: usize,
    started_at: Option<Instant>,
    elapsed: Duration,
    elapsed_at_pause: Duration,
    looping: bool,
    iterations: u32,
    iterations_left: u32,
}

impl FrameClock {
    pub fn new(durations: impl IntoIterator<Item = Duration>) -> Result<Self> {
        let mut end = Duration::ZERO;
        let end_times: Vec<Duration> = durations
            .into_iter()
            .map(|d| {
                end += d;
                end
            })
            .collect();
        if end_times.is_empty() {
            return Err(WidgetError::EmptyAnimation);
        }
        Ok(Self {
            end_times,
            state: PlayState::Stopped,
            index: 0,
            started_at: None,
            elapsed: Duration::ZERO,
            elapsed_at_pause: Duration::ZERO,
            looping: false,
            iterations: 1,
            iterations_left: 0,
        })
    }

    pub fn start(&mut self, now: Instant) {
        match self.state {
            PlayState::Playing => return,
            PlayState::Stopped => {
                self.index = 0;
                self.elapsed = Duration::ZERO;
                self.started_at = Some(now);
                self.iterations_left = self.iterations;
            }
            PlayState::Paused => {
                self.started_at = Some(now - self.elapsed_at_pause);
                self.elapsed = self.elapsed_at_pause;
            }
        }
        log::debug!("frame clock: {:?} -> Playing", self.state);
        self.state = PlayState::Playing;
    }

    pub fn stop(&mut self) {
        self.index = 0;
        self.elapsed = Duration::ZERO;
        self.elapsed_at_pause = Duration::ZERO;
        self.iterations_left = 0;
        self.started_at = None;
        self.state = PlayState::Stopped;
    }

    /// Freezes playback; only meaningful while playing.
    pub fn pause(&mut self, now: Instant) {
        if self.state != PlayState::Playing {
            return;
        }
        if let Some(start) = self.started_at {
            self.elapsed = now.saturating_duration_since(start);
        }
        self.elapsed_at_pause = self.elapsed;
        self.state = PlayState::Paused;
        log::debug!("frame clock paused at {:?}", self.elapsed);
    }

    /// Advances to the frame for `now`. Returns `true` exactly once, on the
    /// call that finishes the last iteration.
    pub fn update(&mut self, now: Instant) -> bool {
        if self.state != PlayState::Playing {
            return false;
        }
        let Some(start) = self.started_at else {
            return false;
        };
        self.elapsed = now.saturating_duration_since(start);

        if self.elapsed > self.total() {
            self.index = 0;
            if self.looping {
                self.restart(now);
                return false;
            }
            self.iterations_left = self.iterations_left.saturating_sub(1);
            if self.iterations_left == 0 {
                self.state = PlayState::Stopped;
                self.started_at = None;
                self.elapsed = Duration::ZERO;
                log::debug!("frame clock finished");
                return true;
            }
            self.restart(now);
            return false;
        }

        while self.index + 1 < self.end_times.len() && self.elapsed > self.end_times[self.index] {
            self.index += 1;
        }
        false
    }

    fn restart(&mut self, now: Instant) {
        self.started_at = Some(now);
        self.elapsed = Duration::ZERO;
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn frame_count(&self) -> usize {
        self.end_times.len()
    }

    pub fn end_times(&self) -> &[Duration] {
        &self.end_times
    }

    /// Cumulative end time of the last frame.
    pub fn total(&self) -> Duration {
        self.end_times.last().copied().unwrap_or_default()
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Number of plays before a non-looping animation stops. Zero counts as one.
    ///
    /// Takes effect on the current run too: plays already completed count
    /// against the new total, and at least the current play is finished.
    pub fn set_iterations(&mut self, n: u32) {
        let n = n.max(1);
        if self.state != PlayState::Stopped {
            let done = self.iterations.saturating_sub(self.iterations_left);
            self.iterations_left = n.saturating_sub(done).max(1);
        }
        self.iterations = n;
    }

    pub fn iterations_left(&self) -> u32 {
        self.iterations_left
    }
}
