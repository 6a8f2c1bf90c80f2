pub mod controller;
pub mod falling_notes;
pub mod headful;
pub mod input;
pub mod keyboard;
pub mod keyboard_ui;
pub mod menus;
pub mod midi_device;
pub mod note;
pub mod note_matcher;
pub mod note_trainer;
pub mod random;
pub mod rhythm_trainer;
pub mod scene;
pub mod session;
pub mod settings;
pub mod theme;
