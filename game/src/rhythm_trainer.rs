use engine::draw_list::{DrawList, Outline};
use engine::ui::{Anchor, Insets, Rect, Size};

use crate::falling_notes::{FallingNoteStream, StreamConfig, TickReport};
use crate::input::{HeldNotes, MidiMessage};
use crate::keyboard::{KeyboardLayout, LayoutError};
use crate::keyboard_ui::draw_keyboard;
use crate::note::{NoteRange, note_name};
use crate::random::PitchSource;
use crate::theme;

const PIANO_HEIGHT: u32 = 150;
const PIANO_SIDE_MARGIN: u32 = 50;
const PIANO_BOTTOM_MARGIN: u32 = 20;
const NOTE_BORDER_THICKNESS: u32 = 2;

pub fn piano_box(viewport: Size) -> Rect {
    Rect::from_size(viewport.w, viewport.h)
        .inset(Insets::horizontal(PIANO_SIDE_MARGIN).with_bottom(PIANO_BOTTOM_MARGIN))
        .place(Size::new(viewport.w, PIANO_HEIGHT), Anchor::BottomCenter)
}

pub struct RhythmTrainer {
    layout: KeyboardLayout,
    stream: FallingNoteStream,
    held: HeldNotes,
}

impl RhythmTrainer {
    /// Objects are missed once their top edge passes the bottom of the viewport.
    pub fn new(range: NoteRange, viewport: Size, config: StreamConfig) -> Result<Self, LayoutError> {
        let layout = KeyboardLayout::generate_or_default(range, piano_box(viewport))?;
        let stream = FallingNoteStream::new(config, layout.hit_line(), viewport.h as f32);
        Ok(Self {
            layout,
            stream,
            held: HeldNotes::new(),
        })
    }

    pub fn layout(&self) -> &KeyboardLayout {
        &self.layout
    }

    pub fn stream(&self) -> &FallingNoteStream {
        &self.stream
    }

    pub fn held(&self) -> &HeldNotes {
        &self.held
    }

    pub fn process_midi(&mut self, messages: &[MidiMessage]) {
        for message in messages {
            self.held.apply(*message);
            if let MidiMessage::NoteOn { pitch, .. } = *message {
                if let Some(hit) = self.stream.on_note_on(pitch) {
                    log::debug!("hit {} at y={:.0}", note_name(hit.pitch), hit.y);
                }
            }
        }
    }

    pub fn update(&mut self, source: &mut dyn PitchSource) -> TickReport {
        let report = self.stream.tick(&self.layout, source);
        for missed in &report.missed {
            log::debug!("missed {}", note_name(missed.pitch));
        }
        report
    }

    pub fn draw(&self, list: &mut DrawList) {
        list.clear(theme::BACKGROUND);

        let height = self.stream.config().object_height;
        for note in self.stream.active_notes() {
            if let Some(rect) = note.screen_rect(height) {
                list.rect(
                    rect,
                    theme::lane_color(note.pitch),
                    Some(Outline {
                        color: theme::NOTE_BORDER,
                        thickness: NOTE_BORDER_THICKNESS,
                    }),
                );
            }
        }

        draw_keyboard(list, &self.layout, &self.held, None);

        list.text(20, 20, format!("Score: {}", self.stream.score()), theme::SUCCESS);
        list.text(20, 60, format!("Misses: {}", self.stream.misses()), theme::FAIL);
    }
}
