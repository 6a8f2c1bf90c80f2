//! Owns the active scene and routes each tick's input to it.

use engine::Simulation;
use engine::draw_list::DrawList;
use engine::ui::Size;

use crate::input::{MidiMessage, TickInput, UiEvent};
use crate::keyboard::LayoutError;
use crate::menus::{KeyboardSelectView, MainMenuView};
use crate::note::KeyboardConfig;
use crate::note_trainer::NoteTrainer;
use crate::random::PitchSource;
use crate::rhythm_trainer::RhythmTrainer;
use crate::scene::{SceneEffect, SceneState};
use crate::session::Session;

pub enum ActiveMode {
    KeyboardSelect,
    MainMenu,
    NoteTrainer(Box<NoteTrainer>),
    RhythmTrainer(Box<RhythmTrainer>),
}

impl ActiveMode {
    fn process_midi(&mut self, messages: &[MidiMessage], source: &mut dyn PitchSource) {
        match self {
            ActiveMode::NoteTrainer(trainer) => trainer.process_midi(messages, source),
            ActiveMode::RhythmTrainer(trainer) => trainer.process_midi(messages),
            ActiveMode::KeyboardSelect | ActiveMode::MainMenu => {}
        }
    }

    fn update(&mut self, source: &mut dyn PitchSource) {
        if let ActiveMode::RhythmTrainer(trainer) = self {
            trainer.update(source);
        }
    }
}

pub struct SceneController {
    state: SceneState,
    mode: ActiveMode,
    session: Session,
    source: Box<dyn PitchSource>,
    viewport: Size,
}

impl SceneController {
    pub fn new(session: Session, source: Box<dyn PitchSource>, viewport: Size) -> Self {
        Self {
            state: SceneState::default(),
            mode: ActiveMode::KeyboardSelect,
            session,
            source,
            viewport,
        }
    }

    pub fn state(&self) -> SceneState {
        self.state
    }

    pub fn mode(&self) -> &ActiveMode {
        &self.mode
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn keyboard(&self) -> Option<&KeyboardConfig> {
        self.session.keyboard()
    }

    pub fn note_trainer(&self) -> Option<&NoteTrainer> {
        match &self.mode {
            ActiveMode::NoteTrainer(trainer) => Some(&**trainer),
            _ => None,
        }
    }

    pub fn rhythm_trainer(&self) -> Option<&RhythmTrainer> {
        match &self.mode {
            ActiveMode::RhythmTrainer(trainer) => Some(&**trainer),
            _ => None,
        }
    }

    pub fn handle_ui(&mut self, event: UiEvent) {
        let (next, effect) = self.state.handle(event);
        if let SceneEffect::StoreKeyboard(preset) = effect {
            self.session.set_keyboard(preset.into());
        }
        if next != self.state {
            self.enter(next);
        }
    }

    /// UI events in order, then device messages in order, then the per-tick update.
    pub fn tick(&mut self, input: &TickInput) {
        for event in &input.ui {
            self.handle_ui(*event);
        }
        self.mode.process_midi(&input.midi, self.source.as_mut());
        self.mode.update(self.source.as_mut());
    }

    pub fn draw(&self, list: &mut DrawList) {
        match &self.mode {
            ActiveMode::KeyboardSelect => KeyboardSelectView::render(list, self.viewport),
            ActiveMode::MainMenu => MainMenuView::render(list, self.viewport, self.keyboard()),
            ActiveMode::NoteTrainer(trainer) => trainer.draw(list),
            ActiveMode::RhythmTrainer(trainer) => trainer.draw(list),
        }
    }

    /// Replaces the active mode wholesale; nothing from the outgoing mode survives.
    fn enter(&mut self, next: SceneState) {
        match self.build_mode(next) {
            Ok(mode) => {
                log::info!("scene {:?} -> {:?}", self.state, next);
                self.state = next;
                self.mode = mode;
            }
            Err(err) => {
                log::error!("cannot enter {next:?}: {err}");
            }
        }
    }

    fn build_mode(&mut self, state: SceneState) -> Result<ActiveMode, LayoutError> {
        let range = self.session.range();
        Ok(match state {
            SceneState::KeyboardSelect => ActiveMode::KeyboardSelect,
            SceneState::MainMenu => ActiveMode::MainMenu,
            SceneState::NoteTrainer => ActiveMode::NoteTrainer(Box::new(NoteTrainer::new(
                range,
                self.viewport,
                self.source.as_mut(),
            )?)),
            SceneState::RhythmTrainer => ActiveMode::RhythmTrainer(Box::new(RhythmTrainer::new(
                range,
                self.viewport,
                *self.session.rhythm(),
            )?)),
        })
    }
}

impl Simulation for SceneController {
    type Input = TickInput;

    fn tick(&mut self, input: Self::Input) {
        SceneController::tick(self, &input);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::{DEFAULT_RANGE, KeyboardPreset};
    use crate::random::ScriptedPitchSource;

    fn controller() -> SceneController {
        SceneController::new(
            Session::default(),
            Box::new(ScriptedPitchSource::new([60])),
            Size::new(1024, 768),
        )
    }

    #[test]
    fn starts_in_keyboard_select() {
        let c = controller();
        assert_eq!(c.state(), SceneState::KeyboardSelect);
        assert!(matches!(c.mode(), ActiveMode::KeyboardSelect));
        assert!(c.keyboard().is_none());
    }

    #[test]
    fn trainer_without_config_uses_default_range() {
        let mut c = controller();
        // Jump straight to the trainer without ever picking a keyboard.
        c.enter(SceneState::NoteTrainer);
        let trainer = c.note_trainer().expect("note trainer");
        assert_eq!(trainer.layout().range(), DEFAULT_RANGE);
    }

    #[test]
    fn preset_choice_drives_trainer_layout() {
        let mut c = controller();
        c.handle_ui(UiEvent::Digit(2));
        c.handle_ui(UiEvent::Digit(2));
        assert_eq!(c.state(), SceneState::RhythmTrainer);
        let trainer = c.rhythm_trainer().expect("rhythm trainer");
        assert_eq!(trainer.layout().range(), KeyboardPreset::Keys88.range());
    }
}
