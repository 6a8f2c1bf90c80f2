use engine::app::InputFrame;
use winit::event::VirtualKeyCode;

use crate::input::UiEvent;

pub fn map_key_to_event(key: VirtualKeyCode) -> Option<UiEvent> {
    let digit = match key {
        VirtualKeyCode::Key1 | VirtualKeyCode::Numpad1 => 1,
        VirtualKeyCode::Key2 | VirtualKeyCode::Numpad2 => 2,
        VirtualKeyCode::Key3 | VirtualKeyCode::Numpad3 => 3,
        VirtualKeyCode::Key4 | VirtualKeyCode::Numpad4 => 4,
        VirtualKeyCode::Key5 | VirtualKeyCode::Numpad5 => 5,
        VirtualKeyCode::Key6 | VirtualKeyCode::Numpad6 => 6,
        VirtualKeyCode::Key7 | VirtualKeyCode::Numpad7 => 7,
        VirtualKeyCode::Key8 | VirtualKeyCode::Numpad8 => 8,
        VirtualKeyCode::Key9 | VirtualKeyCode::Numpad9 => 9,
        VirtualKeyCode::Escape | VirtualKeyCode::Back => return Some(UiEvent::Back),
        _ => return None,
    };
    Some(UiEvent::Digit(digit))
}

/// Selector events for this frame, in the order the keys were pressed.
pub fn ui_events_from_frame(input: &InputFrame) -> Vec<UiEvent> {
    input
        .keys_pressed
        .iter()
        .filter_map(|key| map_key_to_event(*key))
        .collect()
}
