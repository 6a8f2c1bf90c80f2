use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// MIDI note number; 60 is middle C.
pub type Pitch = u8;

pub const MAX_PITCH: Pitch = 127;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Sharps and flats: pitch classes 1, 3, 6, 8, 10.
pub const fn is_black_key(pitch: Pitch) -> bool {
    matches!(pitch % 12, 1 | 3 | 6 | 8 | 10)
}

/// Chromatic name with octave, e.g. `60 -> "C4"`, `61 -> "C#4"`.
pub fn note_name(pitch: Pitch) -> String {
    let octave = (pitch / 12) as i32 - 1;
    format!("{}{}", NOTE_NAMES[(pitch % 12) as usize], octave)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NoteRangeError {
    #[error("low note {low} is above high note {high}")]
    Inverted { low: Pitch, high: Pitch },
    #[error("note {0} is outside the 0..=127 pitch space")]
    OutOfPitchSpace(Pitch),
    #[error("range {low}..={high} contains no white keys")]
    NoWhiteKeys { low: Pitch, high: Pitch },
}

/// A contiguous, inclusive span of pitches containing at least one white key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(Pitch, Pitch)", into = "(Pitch, Pitch)")]
pub struct NoteRange {
    low: Pitch,
    high: Pitch,
}

/// Used whenever a trainer starts without a stored keyboard choice.
pub const DEFAULT_RANGE: NoteRange = NoteRange { low: 36, high: 96 };

impl NoteRange {
    pub fn new(low: Pitch, high: Pitch) -> Result<Self, NoteRangeError> {
        if high > MAX_PITCH {
            return Err(NoteRangeError::OutOfPitchSpace(high));
        }
        if low > high {
            return Err(NoteRangeError::Inverted { low, high });
        }
        if (low..=high).all(is_black_key) {
            return Err(NoteRangeError::NoWhiteKeys { low, high });
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> Pitch {
        self.low
    }

    pub fn high(&self) -> Pitch {
        self.high
    }

    pub fn len(&self) -> usize {
        (self.high - self.low) as usize + 1
    }

    pub fn contains(&self, pitch: Pitch) -> bool {
        (self.low..=self.high).contains(&pitch)
    }

    pub fn white_key_count(&self) -> usize {
        self.iter().filter(|p| !is_black_key(*p)).count()
    }

    pub fn iter(&self) -> RangeInclusive<Pitch> {
        self.low..=self.high
    }
}

impl TryFrom<(Pitch, Pitch)> for NoteRange {
    type Error = NoteRangeError;

    fn try_from((low, high): (Pitch, Pitch)) -> Result<Self, Self::Error> {
        Self::new(low, high)
    }
}

impl From<NoteRange> for (Pitch, Pitch) {
    fn from(range: NoteRange) -> Self {
        (range.low, range.high)
    }
}

impl fmt::Display for NoteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", note_name(self.low), note_name(self.high))
    }
}

/// Keyboard sizes offered on the selection screen, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyboardPreset {
    Keys61,
    Keys88,
    Keys49,
}

impl KeyboardPreset {
    pub const ALL: [KeyboardPreset; 3] = [
        KeyboardPreset::Keys61,
        KeyboardPreset::Keys88,
        KeyboardPreset::Keys49,
    ];

    /// Zero-based menu position.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            KeyboardPreset::Keys61 => "61 Keys (Standard Portable)",
            KeyboardPreset::Keys88 => "88 Keys (Full Piano)",
            KeyboardPreset::Keys49 => "49 Keys (Compact)",
        }
    }

    pub fn key_count(self) -> usize {
        match self {
            KeyboardPreset::Keys61 => 61,
            KeyboardPreset::Keys88 => 88,
            KeyboardPreset::Keys49 => 49,
        }
    }

    pub fn range(self) -> NoteRange {
        match self {
            KeyboardPreset::Keys61 => NoteRange { low: 36, high: 96 },
            KeyboardPreset::Keys88 => NoteRange { low: 21, high: 108 },
            KeyboardPreset::Keys49 => NoteRange { low: 36, high: 84 },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardConfig {
    pub key_count: usize,
    pub range: NoteRange,
}

impl From<KeyboardPreset> for KeyboardConfig {
    fn from(preset: KeyboardPreset) -> Self {
        Self {
            key_count: preset.key_count(),
            range: preset.range(),
        }
    }
}
