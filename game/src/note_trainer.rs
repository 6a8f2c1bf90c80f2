use engine::draw_list::{DrawList, TextAnchor};
use engine::ui::{Anchor, Insets, Rect, Size};

use crate::input::MidiMessage;
use crate::keyboard::{KeyboardLayout, LayoutError};
use crate::keyboard_ui::draw_keyboard;
use crate::menus::{BODY_SCALE, TITLE_SCALE};
use crate::note::{NoteRange, note_name};
use crate::note_matcher::NoteMatcher;
use crate::random::PitchSource;
use crate::theme;

const PIANO_HEIGHT: u32 = 200;
const PIANO_MARGIN: u32 = 50;

/// Keyboard box at the bottom of the screen, 50 px in from the sides and the bottom.
pub fn piano_box(viewport: Size) -> Rect {
    Rect::from_size(viewport.w, viewport.h)
        .inset(Insets::horizontal(PIANO_MARGIN).with_bottom(PIANO_MARGIN))
        .place(Size::new(viewport.w, PIANO_HEIGHT), Anchor::BottomCenter)
}

pub struct NoteTrainer {
    layout: KeyboardLayout,
    matcher: NoteMatcher,
    viewport: Size,
}

impl NoteTrainer {
    pub fn new(
        range: NoteRange,
        viewport: Size,
        source: &mut dyn PitchSource,
    ) -> Result<Self, LayoutError> {
        let layout = KeyboardLayout::generate_or_default(range, piano_box(viewport))?;
        let matcher = NoteMatcher::new(layout.range(), source);
        Ok(Self {
            layout,
            matcher,
            viewport,
        })
    }

    pub fn layout(&self) -> &KeyboardLayout {
        &self.layout
    }

    pub fn matcher(&self) -> &NoteMatcher {
        &self.matcher
    }

    pub fn process_midi(&mut self, messages: &[MidiMessage], source: &mut dyn PitchSource) {
        for message in messages {
            self.matcher.on_message(*message, source);
        }
    }

    pub fn draw(&self, list: &mut DrawList) {
        let cx = self.viewport.w / 2;
        let feedback = self.matcher.feedback();

        list.clear(theme::BACKGROUND);
        list.text_anchored(
            cx,
            150,
            format!("Find: {}", note_name(self.matcher.target())),
            theme::ACCENT,
            TextAnchor::Center,
            TITLE_SCALE,
        );
        list.text_anchored(
            cx,
            220,
            feedback.message(),
            feedback.color(),
            TextAnchor::Center,
            BODY_SCALE,
        );
        list.text(20, 20, format!("Score: {}", self.matcher.score()), theme::TEXT);

        draw_keyboard(
            list,
            &self.layout,
            self.matcher.held(),
            Some(self.matcher.target()),
        );
    }
}
