use std::time::Duration;

use engine::app::{AppContext, GameApp, InputFrame};
use engine::draw_list::DrawList;
use engine::graphics::Renderer2d;
use engine::ui::Size;

use crate::controller::SceneController;
use crate::headful::input_adapter::ui_events_from_frame;
use crate::input::TickInput;
use crate::midi_device::MidiDevice;
use crate::random::{PitchSource, RngPitchSource};
use crate::session::Session;

pub struct OpenKeysApp {
    session: Session,
    seed: Option<u64>,
    viewport: Size,
    midi: Option<MidiDevice>,
}

impl OpenKeysApp {
    /// Without a device the app still runs; it just never sees any notes.
    pub fn new(session: Session, seed: Option<u64>, viewport: Size, midi: Option<MidiDevice>) -> Self {
        Self {
            session,
            seed,
            viewport,
            midi,
        }
    }
}

impl GameApp for OpenKeysApp {
    type State = SceneController;

    fn init_state(&mut self, _ctx: &mut AppContext) -> Self::State {
        let source: Box<dyn PitchSource> = match self.seed {
            Some(seed) => Box::new(RngPitchSource::seeded(seed)),
            None => Box::new(RngPitchSource::from_entropy()),
        };
        SceneController::new(self.session.clone(), source, self.viewport)
    }

    fn update_state(&mut self, state: &mut Self::State, input: &InputFrame, _dt: Duration) -> bool {
        let tick = TickInput {
            ui: ui_events_from_frame(input),
            midi: self.midi.as_ref().map(MidiDevice::poll).unwrap_or_default(),
        };
        state.tick(&tick);
        true
    }

    fn render(&mut self, state: &Self::State, renderer: &mut dyn Renderer2d) {
        let mut list = DrawList::new();
        state.draw(&mut list);
        list.replay(renderer);
    }
}
