//! Vote threshold control for the standard Hough pass.
//!
//! A frame starts from a [`VoteSeed`]: the vote used by the previous
//! detection and how many lines it returned. If that vote was exhausted
//! (`< 1`) or returned more than two lines, detection restarts strict at 100;
//! otherwise the vote is relaxed by 25. From there the retry loop lowers the
//! vote in steps of 5 until at least 5 lines come back or the vote reaches 0.
//!
//! [`SeedPersistence`] decides what the next frame starts from. `PerFrame`
//! ignores the carried seed and starts every frame from `{ vote: 20,
//! line_count: 0 }` (effective start 45); `CrossFrame` threads the loop's
//! final state into the next frame.
use serde::{Deserialize, Serialize};

/// Detection state carried between attempts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteSeed {
    pub vote: i32,
    pub line_count: usize,
}

impl Default for VoteSeed {
    fn default() -> Self {
        Self {
            vote: 20,
            line_count: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedPersistence {
    /// Every frame starts from [`ThresholdParams::initial`].
    #[default]
    PerFrame,
    /// Each frame starts from the previous frame's final seed.
    CrossFrame,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdParams {
    pub initial: VoteSeed,
    /// Vote used after losing all lines or getting too many.
    pub reset_vote: i32,
    /// Relaxation applied when the previous attempt was in band.
    pub relax_step: i32,
    /// Decrement per retry.
    pub retry_step: i32,
    /// Retry until at least this many lines are found.
    pub min_lines: usize,
    /// More lines than this counts as "too many" for the seed rule.
    pub max_band_lines: usize,
    pub persistence: SeedPersistence,
}

impl Default for ThresholdParams {
    fn default() -> Self {
        Self {
            initial: VoteSeed::default(),
            reset_vote: 100,
            relax_step: 25,
            retry_step: 5,
            min_lines: 5,
            max_band_lines: 2,
            persistence: SeedPersistence::PerFrame,
        }
    }
}

/// Outcome of one adaptive detection.
#[derive(Clone, Debug)]
pub struct ThresholdRun<T> {
    pub lines: Vec<T>,
    /// Vote of the last detector call, `None` if it was never called.
    pub vote_used: Option<u32>,
    pub attempts: usize,
    /// Seed to hand to the next frame.
    pub next_seed: VoteSeed,
}

#[derive(Clone, Debug, Default)]
pub struct AdaptiveThreshold {
    params: ThresholdParams,
}

impl AdaptiveThreshold {
    pub fn new(params: ThresholdParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ThresholdParams {
        &self.params
    }

    /// Seed a frame actually starts from, given what the caller carried over.
    pub fn incoming(&self, carried: VoteSeed) -> VoteSeed {
        match self.params.persistence {
            SeedPersistence::PerFrame => self.params.initial,
            SeedPersistence::CrossFrame => carried,
        }
    }

    /// First vote tried for `seed`.
    pub fn starting_vote(&self, seed: VoteSeed) -> i32 {
        if seed.vote < 1 || seed.line_count > self.params.max_band_lines {
            self.params.reset_vote
        } else {
            seed.vote + self.params.relax_step
        }
    }

    /// Runs `detect` with decreasing votes until enough lines come back.
    pub fn run<T, F>(&self, carried: VoteSeed, mut detect: F) -> ThresholdRun<T>
    where
        F: FnMut(u32) -> Vec<T>,
    {
        let seed = self.incoming(carried);
        let mut vote = self.starting_vote(seed);
        let mut lines = Vec::new();
        let mut vote_used = None;
        let mut attempts = 0;
        while lines.len() < self.params.min_lines && vote > 0 {
            lines = detect(vote as u32);
            vote_used = Some(vote as u32);
            attempts += 1;
            vote -= self.params.retry_step.max(1);
        }
        let next_seed = VoteSeed {
            vote,
            line_count: lines.len(),
        };
        ThresholdRun {
            lines,
            vote_used,
            attempts,
            next_seed,
        }
    }
}
