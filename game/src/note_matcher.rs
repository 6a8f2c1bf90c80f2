use engine::graphics::Color;

use crate::input::{HeldNotes, MidiMessage};
use crate::note::{NoteRange, Pitch, note_name};
use crate::random::PitchSource;
use crate::theme;

/// What the player is told after their last press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Prompt,
    Success,
    Failure { played: Pitch },
}

impl Feedback {
    pub fn message(self) -> String {
        match self {
            Feedback::Prompt => "Find the note!".to_string(),
            Feedback::Success => "Correct!".to_string(),
            Feedback::Failure { played } => format!("Wrong! That was {}", note_name(played)),
        }
    }

    pub fn color(self) -> Color {
        match self {
            Feedback::Prompt => theme::TEXT,
            Feedback::Success => theme::SUCCESS,
            Feedback::Failure { .. } => theme::FAIL,
        }
    }
}

/// Single-target game: press the shown note, get a point, get a new note.
#[derive(Debug, Clone)]
pub struct NoteMatcher {
    range: NoteRange,
    target: Pitch,
    feedback: Feedback,
    score: u32,
    held: HeldNotes,
}

impl NoteMatcher {
    pub fn new(range: NoteRange, source: &mut dyn PitchSource) -> Self {
        Self::with_target(range, source.pick(range))
    }

    pub fn with_target(range: NoteRange, target: Pitch) -> Self {
        Self {
            range,
            target,
            feedback: Feedback::Prompt,
            score: 0,
            held: HeldNotes::new(),
        }
    }

    pub fn range(&self) -> NoteRange {
        self.range
    }

    pub fn target(&self) -> Pitch {
        self.target
    }

    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn held(&self) -> &HeldNotes {
        &self.held
    }

    pub fn on_note_on(&mut self, pitch: Pitch, source: &mut dyn PitchSource) -> Feedback {
        self.held.press(pitch);
        if pitch == self.target {
            self.score += 1;
            self.feedback = Feedback::Success;
            self.target = source.pick(self.range);
        } else {
            self.feedback = Feedback::Failure { played: pitch };
        }
        self.feedback
    }

    pub fn on_note_off(&mut self, pitch: Pitch) {
        self.held.release(pitch);
    }

    pub fn on_message(&mut self, message: MidiMessage, source: &mut dyn PitchSource) {
        match message {
            MidiMessage::NoteOn { pitch, .. } => {
                self.on_note_on(pitch, source);
            }
            MidiMessage::NoteOff { pitch } => self.on_note_off(pitch),
        }
    }
}
