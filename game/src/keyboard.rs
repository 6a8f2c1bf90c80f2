//! On-screen keyboard geometry.
//!
//! White keys split the box width evenly and are laid out left to right with a 1 px gap.
//! Black keys never advance the cursor; each one is centered on the boundary between the
//! white keys around it and hangs from the top of the box.

use engine::ui::Rect;
use thiserror::Error;

use crate::note::{DEFAULT_RANGE, NoteRange, Pitch, is_black_key};

const BLACK_KEY_WIDTH_RATIO: f64 = 0.6;
const BLACK_KEY_HEIGHT_RATIO: f64 = 0.65;
const WHITE_KEY_GAP: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("note range {low}..={high} has no white keys to lay out")]
    InvalidRange { low: Pitch, high: Pitch },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyGeometry {
    pub pitch: Pitch,
    pub bounds: Rect,
    pub is_black: bool,
}

/// Key rectangles for one range inside one box. Immutable once generated.
#[derive(Debug, Clone)]
pub struct KeyboardLayout {
    range: NoteRange,
    bounds: Rect,
    white_key_width: f64,
    /// Ordered by pitch.
    keys: Vec<KeyGeometry>,
    index: [Option<usize>; 128],
}

impl KeyboardLayout {
    pub fn generate(range: NoteRange, bounds: Rect) -> Result<Self, LayoutError> {
        let white_count = range.white_key_count();
        if white_count == 0 {
            return Err(LayoutError::InvalidRange {
                low: range.low(),
                high: range.high(),
            });
        }

        let white_key_width = f64::from(bounds.w) / white_count as f64;
        let black_w = (white_key_width * BLACK_KEY_WIDTH_RATIO).round() as u32;
        let black_h = (f64::from(bounds.h) * BLACK_KEY_HEIGHT_RATIO).round() as u32;
        let edge = |i: usize| (f64::from(bounds.x) + i as f64 * white_key_width).round() as u32;

        let mut keys = Vec::with_capacity(range.len());
        let mut index = [None; 128];
        let mut whites_placed = 0usize;

        for pitch in range.iter() {
            let key = if is_black_key(pitch) {
                let cursor = f64::from(bounds.x) + whites_placed as f64 * white_key_width;
                let x = (cursor - f64::from(black_w) / 2.0).round().max(0.0) as u32;
                KeyGeometry {
                    pitch,
                    bounds: Rect::new(x, bounds.y, black_w, black_h),
                    is_black: true,
                }
            } else {
                let x = edge(whites_placed);
                let w = edge(whites_placed + 1)
                    .saturating_sub(x)
                    .saturating_sub(WHITE_KEY_GAP);
                whites_placed += 1;
                KeyGeometry {
                    pitch,
                    bounds: Rect::new(x, bounds.y, w, bounds.h),
                    is_black: false,
                }
            };
            index[pitch as usize] = Some(keys.len());
            keys.push(key);
        }

        Ok(Self {
            range,
            bounds,
            white_key_width,
            keys,
            index,
        })
    }

    /// Lays out `range`, retrying with the default range if that fails.
    pub fn generate_or_default(range: NoteRange, bounds: Rect) -> Result<Self, LayoutError> {
        Self::generate(range, bounds).or_else(|err| {
            log::error!("{err}; falling back to {DEFAULT_RANGE}");
            Self::generate(DEFAULT_RANGE, bounds)
        })
    }

    pub fn range(&self) -> NoteRange {
        self.range
    }

    /// The box the keyboard was laid out in.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Top edge of the keyboard; falling notes are judged against it.
    pub fn hit_line(&self) -> f32 {
        self.bounds.y as f32
    }

    pub fn white_key_width(&self) -> f64 {
        self.white_key_width
    }

    pub fn key(&self, pitch: Pitch) -> Option<&KeyGeometry> {
        let slot = self.index.get(pitch as usize).copied().flatten()?;
        self.keys.get(slot)
    }

    pub fn keys(&self) -> &[KeyGeometry] {
        &self.keys
    }

    pub fn white_keys(&self) -> impl Iterator<Item = &KeyGeometry> {
        self.keys.iter().filter(|k| !k.is_black)
    }

    pub fn black_keys(&self) -> impl Iterator<Item = &KeyGeometry> {
        self.keys.iter().filter(|k| k.is_black)
    }

    /// Topmost key under a point: black keys win over the white keys beneath them.
    pub fn key_at(&self, x: u32, y: u32) -> Option<&KeyGeometry> {
        self.black_keys()
            .find(|k| k.bounds.contains(x, y))
            .or_else(|| self.white_keys().find(|k| k.bounds.contains(x, y)))
    }
}
