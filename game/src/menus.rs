use engine::draw_list::{DrawList, TextAnchor};
use engine::ui::Size;

use crate::note::{KeyboardConfig, KeyboardPreset};
use crate::theme;

pub const TITLE_SCALE: u32 = 6;
pub const HEADING_SCALE: u32 = 4;
pub const BODY_SCALE: u32 = 3;
pub const SMALL_SCALE: u32 = 2;

pub const MAIN_MENU_OPTIONS: [&str; 2] = ["1. Note Trainer", "2. Rhythm Trainer"];

pub struct KeyboardSelectView;

impl KeyboardSelectView {
    pub fn render(list: &mut DrawList, viewport: Size) {
        let cx = viewport.w / 2;
        list.clear(theme::BACKGROUND);
        list.text_anchored(
            cx,
            100,
            "Welcome to OpenKeys",
            theme::ACCENT,
            TextAnchor::Center,
            TITLE_SCALE,
        );
        list.text_anchored(
            cx,
            180,
            "Select your keyboard size:",
            theme::TEXT,
            TextAnchor::Center,
            BODY_SCALE,
        );

        let mut y = 300;
        for (i, preset) in KeyboardPreset::ALL.iter().enumerate() {
            list.text_anchored(
                cx,
                y,
                format!("[{}] {}", i + 1, preset.label()),
                theme::TEXT,
                TextAnchor::Center,
                BODY_SCALE,
            );
            y += 70;
        }
    }
}

pub struct MainMenuView;

impl MainMenuView {
    pub fn render(list: &mut DrawList, viewport: Size, keyboard: Option<&KeyboardConfig>) {
        list.clear(theme::BACKGROUND);

        let status = match keyboard {
            Some(config) => format!("Config: {} Keys", config.key_count),
            None => "Config: Default".to_string(),
        };
        list.text_anchored(
            viewport.w.saturating_sub(20),
            20,
            status,
            theme::MUTED,
            TextAnchor::TopRight,
            SMALL_SCALE,
        );

        list.text_anchored(50, 50, "Main Menu", theme::ACCENT, TextAnchor::TopLeft, HEADING_SCALE);

        let mut y = 150;
        for option in MAIN_MENU_OPTIONS {
            list.text_anchored(50, y, option, theme::TEXT, TextAnchor::TopLeft, BODY_SCALE);
            y += 60;
        }

        list.text_anchored(
            50,
            viewport.h.saturating_sub(50),
            "Press number keys to select | ESC to go back",
            theme::HINT,
            TextAnchor::TopLeft,
            SMALL_SCALE,
        );
    }
}
