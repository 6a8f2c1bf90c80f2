use engine::graphics::Color;

use crate::note::Pitch;

pub const BACKGROUND: Color = [30, 30, 30, 255];
pub const TEXT: Color = [255, 255, 255, 255];
pub const ACCENT: Color = [100, 200, 255, 255];
pub const SUCCESS: Color = [50, 200, 50, 255];
pub const FAIL: Color = [200, 50, 50, 255];
pub const MUTED: Color = [100, 100, 100, 255];
pub const HINT: Color = [150, 150, 150, 255];

pub const WHITE_KEY: Color = [240, 240, 240, 255];
pub const BLACK_KEY: Color = [20, 20, 20, 255];
/// Held key with nothing to match against.
pub const ACTIVE: Color = [100, 200, 255, 255];
pub const TARGET: Color = [50, 200, 50, 255];
pub const WRONG: Color = [200, 50, 50, 255];

pub const NOTE_BORDER: Color = [255, 255, 255, 255];

const LANE_COLORS: [Color; 12] = [
    [235, 90, 90, 255],
    [235, 140, 70, 255],
    [240, 200, 70, 255],
    [190, 225, 80, 255],
    [110, 210, 100, 255],
    [80, 200, 160, 255],
    [70, 190, 220, 255],
    [80, 140, 235, 255],
    [120, 110, 235, 255],
    [170, 100, 230, 255],
    [215, 95, 200, 255],
    [235, 95, 150, 255],
];

/// Fill for a falling note, one hue per pitch class.
pub fn lane_color(pitch: Pitch) -> Color {
    LANE_COLORS[(pitch % 12) as usize]
}
