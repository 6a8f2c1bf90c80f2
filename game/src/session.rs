use crate::falling_notes::StreamConfig;
use crate::note::{DEFAULT_RANGE, KeyboardConfig, NoteRange};

/// Process-lifetime context handed to every mode when it is built.
///
/// The keyboard choice is written when the player leaves keyboard selection and is read-only
/// until they pick again.
#[derive(Debug, Clone, Default)]
pub struct Session {
    keyboard: Option<KeyboardConfig>,
    rhythm: StreamConfig,
}

impl Session {
    pub fn new(rhythm: StreamConfig) -> Self {
        Self {
            keyboard: None,
            rhythm,
        }
    }

    pub fn keyboard(&self) -> Option<&KeyboardConfig> {
        self.keyboard.as_ref()
    }

    pub fn set_keyboard(&mut self, config: KeyboardConfig) {
        log::info!(
            "keyboard config saved: {} keys ({})",
            config.key_count,
            config.range
        );
        self.keyboard = Some(config);
    }

    /// Range for the trainers; falls back to the default when nothing was chosen.
    pub fn range(&self) -> NoteRange {
        match &self.keyboard {
            Some(config) => config.range,
            None => {
                log::debug!("no keyboard config stored, using default range {DEFAULT_RANGE}");
                DEFAULT_RANGE
            }
        }
    }

    pub fn rhythm(&self) -> &StreamConfig {
        &self.rhythm
    }
}
