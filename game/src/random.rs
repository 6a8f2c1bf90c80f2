use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::note::{NoteRange, Pitch};

/// Where target notes and spawned notes come from.
pub trait PitchSource {
    /// Uniform pick within `range`, inclusive on both ends. Repeats are allowed.
    fn pick(&mut self, range: NoteRange) -> Pitch;
}

#[derive(Debug, Clone)]
pub struct RngPitchSource {
    rng: StdRng,
}

impl RngPitchSource {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl PitchSource for RngPitchSource {
    fn pick(&mut self, range: NoteRange) -> Pitch {
        self.rng.gen_range(range.low()..=range.high())
    }
}

/// Replays a fixed cycle of pitches. Values outside the requested range are clamped into it.
#[derive(Debug, Clone)]
pub struct ScriptedPitchSource {
    script: Vec<Pitch>,
    next: usize,
}

impl ScriptedPitchSource {
    pub fn new(script: impl IntoIterator<Item = Pitch>) -> Self {
        Self {
            script: script.into_iter().collect(),
            next: 0,
        }
    }

    /// How many picks have been served so far.
    pub fn picks(&self) -> usize {
        self.next
    }
}

impl PitchSource for ScriptedPitchSource {
    fn pick(&mut self, range: NoteRange) -> Pitch {
        let pitch = if self.script.is_empty() {
            range.low()
        } else {
            self.script[self.next % self.script.len()]
        };
        self.next += 1;
        pitch.clamp(range.low(), range.high())
    }
}
