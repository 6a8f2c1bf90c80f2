use crate::note::{MAX_PITCH, Pitch};

/// Discrete menu/navigation events, already decoded from the windowing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// Number key 1..=9.
    Digit(u8),
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiMessage {
    NoteOn { pitch: Pitch, velocity: u8 },
    NoteOff { pitch: Pitch },
}

impl MidiMessage {
    /// Decodes a raw channel-voice message. Anything that isn't a note on/off is `None`.
    ///
    /// A note-on with velocity 0 is reported as `NoteOff`.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let (&status, rest) = bytes.split_first()?;
        let pitch = rest.first()? & 0x7F;
        let velocity = rest.get(1).copied().unwrap_or(0) & 0x7F;
        match status & 0xF0 {
            0x90 if velocity > 0 => Some(MidiMessage::NoteOn { pitch, velocity }),
            0x90 | 0x80 => Some(MidiMessage::NoteOff { pitch }),
            _ => None,
        }
    }

    pub fn pitch(self) -> Pitch {
        match self {
            MidiMessage::NoteOn { pitch, .. } | MidiMessage::NoteOff { pitch } => pitch,
        }
    }
}

/// The set of currently held pitches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldNotes {
    bits: u128,
}

impl HeldNotes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, pitch: Pitch) {
        self.bits |= Self::mask(pitch);
    }

    pub fn release(&mut self, pitch: Pitch) {
        self.bits &= !Self::mask(pitch);
    }

    pub fn contains(&self, pitch: Pitch) -> bool {
        self.bits & Self::mask(pitch) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn clear(&mut self) {
        self.bits = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = Pitch> + '_ {
        (0..=MAX_PITCH).filter(|p| self.contains(*p))
    }

    /// Applies a note message to the held set.
    pub fn apply(&mut self, message: MidiMessage) {
        match message {
            MidiMessage::NoteOn { pitch, .. } => self.press(pitch),
            MidiMessage::NoteOff { pitch } => self.release(pitch),
        }
    }

    fn mask(pitch: Pitch) -> u128 {
        1u128 << (pitch & MAX_PITCH)
    }
}

/// Everything the outside world hands the core for one tick, in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub ui: Vec<UiEvent>,
    pub midi: Vec<MidiMessage>,
}

impl TickInput {
    pub fn ui(events: impl IntoIterator<Item = UiEvent>) -> Self {
        Self {
            ui: events.into_iter().collect(),
            midi: Vec::new(),
        }
    }

    pub fn midi(messages: impl IntoIterator<Item = MidiMessage>) -> Self {
        Self {
            ui: Vec::new(),
            midi: messages.into_iter().collect(),
        }
    }

    pub fn note_on(pitch: Pitch) -> Self {
        Self::midi([MidiMessage::NoteOn {
            pitch,
            velocity: 100,
        }])
    }

    pub fn is_empty(&self) -> bool {
        self.ui.is_empty() && self.midi.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_decodes_note_messages_on_any_channel() {
        assert_eq!(
            MidiMessage::parse(&[0x90, 60, 100]),
            Some(MidiMessage::NoteOn {
                pitch: 60,
                velocity: 100
            })
        );
        assert_eq!(
            MidiMessage::parse(&[0x9F, 61, 1]),
            Some(MidiMessage::NoteOn {
                pitch: 61,
                velocity: 1
            })
        );
        assert_eq!(
            MidiMessage::parse(&[0x83, 60, 64]),
            Some(MidiMessage::NoteOff { pitch: 60 })
        );
    }

    #[test]
    fn zero_velocity_note_on_is_note_off() {
        assert_eq!(
            MidiMessage::parse(&[0x90, 60, 0]),
            Some(MidiMessage::NoteOff { pitch: 60 })
        );
    }

    #[test]
    fn parse_ignores_other_messages() {
        assert_eq!(MidiMessage::parse(&[]), None);
        assert_eq!(MidiMessage::parse(&[0x90]), None);
        assert_eq!(MidiMessage::parse(&[0xB0, 64, 127]), None);
        assert_eq!(MidiMessage::parse(&[0xE0, 0, 64]), None);
        assert_eq!(MidiMessage::parse(&[0xF8]), None);
    }

    #[test]
    fn parse_masks_data_bytes() {
        assert_eq!(
            MidiMessage::parse(&[0x90, 0xBC, 0xFF]),
            Some(MidiMessage::NoteOn {
                pitch: 60,
                velocity: 127
            })
        );
    }

    #[test]
    fn held_notes_track_press_and_release() {
        let mut held = HeldNotes::new();
        held.press(60);
        held.press(127);
        held.press(0);
        assert_eq!(held.iter().collect::<Vec<_>>(), vec![0, 60, 127]);
        assert_eq!(held.len(), 3);

        held.apply(MidiMessage::NoteOff { pitch: 60 });
        assert!(!held.contains(60));
        held.release(61);
        assert_eq!(held.len(), 2);

        held.clear();
        assert!(held.is_empty());
    }
}
