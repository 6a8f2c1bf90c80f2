use serde::{Deserialize, Serialize};

use crate::input::UiEvent;
use crate::note::KeyboardPreset;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneState {
    #[default]
    KeyboardSelect,
    MainMenu,
    NoteTrainer,
    RhythmTrainer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneEffect {
    None,
    StoreKeyboard(KeyboardPreset),
}

impl SceneState {
    /// Pure transition function for the scene state machine.
    ///
    /// Writing the keyboard choice is reported via `SceneEffect` so the caller owns the
    /// session and this stays trivially testable.
    pub fn handle(self, event: UiEvent) -> (SceneState, SceneEffect) {
        match (self, event) {
            (SceneState::KeyboardSelect, UiEvent::Digit(n)) => {
                match usize::from(n).checked_sub(1).and_then(KeyboardPreset::from_index) {
                    Some(preset) => (SceneState::MainMenu, SceneEffect::StoreKeyboard(preset)),
                    None => (self, SceneEffect::None),
                }
            }

            (SceneState::MainMenu, UiEvent::Digit(1)) => {
                (SceneState::NoteTrainer, SceneEffect::None)
            }
            (SceneState::MainMenu, UiEvent::Digit(2)) => {
                (SceneState::RhythmTrainer, SceneEffect::None)
            }
            (SceneState::MainMenu, UiEvent::Back) => {
                (SceneState::KeyboardSelect, SceneEffect::None)
            }

            (SceneState::NoteTrainer | SceneState::RhythmTrainer, UiEvent::Back) => {
                (SceneState::MainMenu, SceneEffect::None)
            }

            // Ignore irrelevant events in the current state.
            (state, _) => (state, SceneEffect::None),
        }
    }

    pub fn is_trainer(self) -> bool {
        matches!(self, SceneState::NoteTrainer | SceneState::RhythmTrainer)
    }
}
