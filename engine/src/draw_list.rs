//! Recorded draw commands.
//!
//! Game logic emits a `DrawList` per tick; the presentation layer replays it onto whatever
//! `Renderer2d` is current. Tests inspect the commands directly without touching pixels.

use crate::graphics::{Color, DEFAULT_TEXT_SCALE, Renderer2d, text_height, text_width};
use crate::ui::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outline {
    pub color: Color,
    pub thickness: u32,
}

/// Which point of the text's bounding box sits on the anchor position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAnchor {
    #[default]
    TopLeft,
    TopRight,
    Center,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    Clear(Color),
    Rect {
        rect: Rect,
        fill: Option<Color>,
        outline: Option<Outline>,
    },
    Text {
        text: String,
        color: Color,
        x: u32,
        y: u32,
        anchor: TextAnchor,
        scale: u32,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect {
            rect,
            fill: Some(color),
            outline: None,
        });
    }

    pub fn outline_rect(&mut self, rect: Rect, color: Color, thickness: u32) {
        self.commands.push(DrawCommand::Rect {
            rect,
            fill: None,
            outline: Some(Outline { color, thickness }),
        });
    }

    pub fn rect(&mut self, rect: Rect, fill: Color, outline: Option<Outline>) {
        self.commands.push(DrawCommand::Rect {
            rect,
            fill: Some(fill),
            outline,
        });
    }

    pub fn text(&mut self, x: u32, y: u32, text: impl Into<String>, color: Color) {
        self.text_anchored(x, y, text, color, TextAnchor::TopLeft, DEFAULT_TEXT_SCALE);
    }

    pub fn text_anchored(
        &mut self,
        x: u32,
        y: u32,
        text: impl Into<String>,
        color: Color,
        anchor: TextAnchor,
        scale: u32,
    ) {
        self.commands.push(DrawCommand::Text {
            text: text.into(),
            color,
            x,
            y,
            anchor,
            scale,
        });
    }

    /// All text strings in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn replay(&self, renderer: &mut dyn Renderer2d) {
        for cmd in &self.commands {
            match cmd {
                DrawCommand::Clear(color) => renderer.clear(*color),
                DrawCommand::Rect {
                    rect,
                    fill,
                    outline,
                } => {
                    if let Some(fill) = fill {
                        renderer.fill_rect(*rect, *fill);
                    }
                    if let Some(outline) = outline {
                        renderer.rect_outline(*rect, outline.color, outline.thickness);
                    }
                }
                DrawCommand::Text {
                    text,
                    color,
                    x,
                    y,
                    anchor,
                    scale,
                } => {
                    let (tx, ty) = anchored_origin(text, *x, *y, *anchor, *scale);
                    renderer.draw_text_scaled(tx, ty, text, *color, *scale);
                }
            }
        }
    }
}

fn anchored_origin(text: &str, x: u32, y: u32, anchor: TextAnchor, scale: u32) -> (u32, u32) {
    match anchor {
        TextAnchor::TopLeft => (x, y),
        TextAnchor::TopRight => (x.saturating_sub(text_width(text, scale)), y),
        TextAnchor::Center => (
            x.saturating_sub(text_width(text, scale) / 2),
            y.saturating_sub(text_height(text, scale) / 2),
        ),
    }
}
