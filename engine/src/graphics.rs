use crate::{surface::SurfaceSize, ui::Rect};

pub type Color = [u8; 4];

// A tiny block font (no external deps). Kept deliberately simple.
pub const DEFAULT_TEXT_SCALE: u32 = 2;
const GLYPH_W: u32 = 3;
const GLYPH_H: u32 = 5;

fn glyph_advance_x(scale: u32) -> u32 {
    (GLYPH_W + 1) * scale.max(1)
}

fn line_advance_y(scale: u32) -> u32 {
    (GLYPH_H + 1) * scale.max(1)
}

/// Pixel width of the longest line of `text` at `scale`, without trailing spacing.
pub fn text_width(text: &str, scale: u32) -> u32 {
    let scale = scale.max(1);
    text.lines()
        .map(|line| {
            let chars = line.chars().count() as u32;
            chars
                .saturating_mul(glyph_advance_x(scale))
                .saturating_sub(scale)
        })
        .max()
        .unwrap_or(0)
}

/// Pixel height of `text` at `scale`, without trailing line spacing.
pub fn text_height(text: &str, scale: u32) -> u32 {
    let scale = scale.max(1);
    let lines = text.lines().count().max(1) as u32;
    lines
        .saturating_mul(line_advance_y(scale))
        .saturating_sub(scale)
}

/// Unified 2D rendering interface.
///
/// Game code should only talk to this trait (or record into a `DrawList`) and must not care
/// where the pixels end up.
pub trait Renderer2d {
    fn begin_frame(&mut self, size: SurfaceSize);
    fn size(&self) -> SurfaceSize;

    /// Opaque fill.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Outline drawn *inside* `rect`, `thickness` pixels wide.
    fn rect_outline(&mut self, rect: Rect, color: Color, thickness: u32);

    fn draw_text_scaled(&mut self, x: u32, y: u32, text: &str, color: Color, scale: u32);

    fn draw_text(&mut self, x: u32, y: u32, text: &str, color: Color) {
        self.draw_text_scaled(x, y, text, color, DEFAULT_TEXT_SCALE);
    }

    fn clear(&mut self, color: Color) {
        let s = self.size();
        self.fill_rect(Rect::from_size(s.width, s.height), color);
    }
}

/// CPU renderer that draws into an RGBA frame buffer.
pub struct CpuRenderer<'a> {
    frame: &'a mut [u8],
    size: SurfaceSize,
}

impl<'a> CpuRenderer<'a> {
    pub fn new(frame: &'a mut [u8], size: SurfaceSize) -> Self {
        Self { frame, size }
    }
}

impl Renderer2d for CpuRenderer<'_> {
    fn begin_frame(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let width = self.size.width;
        let height = self.size.height;

        let max_x = rect.x.saturating_add(rect.w).min(width);
        let max_y = rect.y.saturating_add(rect.h).min(height);
        if rect.x >= max_x || rect.y >= max_y {
            return;
        }

        let width_usize = width as usize;
        let expected_len = self.size.rgba_len();
        if expected_len == 0 || self.frame.len() < expected_len {
            return;
        }

        let row_bytes = ((max_x - rect.x) as usize).saturating_mul(4);
        if row_bytes == 0 {
            return;
        }

        let stride = width_usize.saturating_mul(4);
        let mut row_start = (rect.y as usize)
            .checked_mul(stride)
            .and_then(|v| v.checked_add((rect.x as usize).checked_mul(4)?))
            .unwrap_or(0);

        let [r, g, b, a] = color;
        for _ in rect.y..max_y {
            let row_end = row_start + row_bytes;
            let row = &mut self.frame[row_start..row_end];
            for px in row.chunks_exact_mut(4) {
                px[0] = r;
                px[1] = g;
                px[2] = b;
                px[3] = a;
            }
            row_start += stride;
        }
    }

    fn rect_outline(&mut self, rect: Rect, color: Color, thickness: u32) {
        if rect.w == 0 || rect.h == 0 || thickness == 0 {
            return;
        }

        let width = self.size.width;
        let height = self.size.height;

        let x1 = rect.x.saturating_add(rect.w).min(width);
        let y1 = rect.y.saturating_add(rect.h).min(height);
        if rect.x >= x1 || rect.y >= y1 {
            return;
        }

        let w = x1 - rect.x;
        let h = y1 - rect.y;
        let t_x = thickness.min(w);
        let t_y = thickness.min(h);

        // Top / bottom.
        self.fill_rect(Rect::new(rect.x, rect.y, w, t_y), color);
        self.fill_rect(Rect::new(rect.x, y1 - t_y, w, t_y), color);

        // Left / right.
        self.fill_rect(Rect::new(rect.x, rect.y, t_x, h), color);
        self.fill_rect(Rect::new(x1 - t_x, rect.y, t_x, h), color);
    }

    fn draw_text_scaled(&mut self, x: u32, y: u32, text: &str, color: Color, scale: u32) {
        let width = self.size.width;
        let height = self.size.height;
        let scale = scale.max(1);
        let adv_x = glyph_advance_x(scale);
        let adv_y = line_advance_y(scale);

        let mut cursor_x = x;
        let mut cursor_y = y;

        for ch in text.chars() {
            match ch {
                '\n' => {
                    cursor_x = x;
                    cursor_y = cursor_y.saturating_add(adv_y);
                    if cursor_y >= height {
                        break;
                    }
                    continue;
                }
                ' ' => {
                    cursor_x = cursor_x.saturating_add(adv_x);
                    continue;
                }
                _ => {}
            }

            if cursor_x < width {
                draw_char_cpu(self.frame, width, height, cursor_x, cursor_y, ch, color, scale);
            }
            cursor_x = cursor_x.saturating_add(adv_x);
        }
    }
}

fn draw_char_cpu(
    frame: &mut [u8],
    width: u32,
    height: u32,
    x: u32,
    y: u32,
    ch: char,
    color: Color,
    scale: u32,
) {
    let rows = glyph_rows(ch);
    for (row, bits) in rows.into_iter().enumerate() {
        let py0 = y.saturating_add((row as u32).saturating_mul(scale));
        for col in 0..GLYPH_W {
            let mask = 1u8 << (GLYPH_W - 1 - col);
            if (bits & mask) == 0 {
                continue;
            }
            let px0 = x.saturating_add(col.saturating_mul(scale));
            for dy in 0..scale {
                for dx in 0..scale {
                    set_pixel_cpu(frame, width, height, px0 + dx, py0 + dy, color);
                }
            }
        }
    }
}

fn set_pixel_cpu(frame: &mut [u8], width: u32, height: u32, x: u32, y: u32, color: Color) {
    if x >= width || y >= height {
        return;
    }
    let idx = ((y as usize) * (width as usize) + x as usize) * 4;
    if idx + 4 <= frame.len() {
        frame[idx..idx + 4].copy_from_slice(&color);
    }
}

fn glyph_rows(ch: char) -> [u8; GLYPH_H as usize] {
    let c = ch.to_ascii_uppercase();
    match c {
        // Digits
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],

        // Letters
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b111, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b110, 0b100, 0b110, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b101, 0b111, 0b111, 0b111, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'R' => [0b111, 0b101, 0b111, 0b110, 0b101],
        'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],

        // Punctuation
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        ')' => [0b010, 0b001, 0b001, 0b001, 0b010],
        '[' => [0b110, 0b100, 0b100, 0b100, 0b110],
        ']' => [0b011, 0b001, 0b001, 0b001, 0b011],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '?' => [0b111, 0b001, 0b010, 0b000, 0b010],

        // Note names and menu separators.
        '#' => [0b101, 0b111, 0b101, 0b111, 0b101],
        '|' => [0b010, 0b010, 0b010, 0b010, 0b010],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '\'' => [0b010, 0b010, 0b000, 0b000, 0b000],

        _ => [0b111, 0b001, 0b010, 0b000, 0b010], // '?'
    }
}
