use engine::draw_list::DrawList;
use engine::graphics::Color;

use crate::input::HeldNotes;
use crate::keyboard::{KeyGeometry, KeyboardLayout};
use crate::note::Pitch;
use crate::theme;

const WHITE_TARGET_OUTLINE: u32 = 3;
const BLACK_TARGET_OUTLINE: u32 = 2;

/// Fill colour for one key given what is held and what the player should press.
pub fn key_fill(key: &KeyGeometry, held: &HeldNotes, target: Option<Pitch>) -> Color {
    if held.contains(key.pitch) {
        match target {
            Some(t) if t == key.pitch => theme::TARGET,
            Some(_) => theme::WRONG,
            None => theme::ACTIVE,
        }
    } else if key.is_black {
        theme::BLACK_KEY
    } else {
        theme::WHITE_KEY
    }
}

/// White keys first, black keys on top. An unheld target key also gets an outline.
pub fn draw_keyboard(
    list: &mut DrawList,
    layout: &KeyboardLayout,
    held: &HeldNotes,
    target: Option<Pitch>,
) {
    for key in layout.white_keys() {
        draw_key(list, key, held, target, WHITE_TARGET_OUTLINE);
    }
    for key in layout.black_keys() {
        draw_key(list, key, held, target, BLACK_TARGET_OUTLINE);
    }
}

fn draw_key(
    list: &mut DrawList,
    key: &KeyGeometry,
    held: &HeldNotes,
    target: Option<Pitch>,
    outline: u32,
) {
    list.fill_rect(key.bounds, key_fill(key, held, target));
    if target == Some(key.pitch) && !held.contains(key.pitch) {
        list.outline_rect(key.bounds, theme::TARGET, outline);
    }
}

#[cfg(test)]
mod tests {
    use engine::draw_list::{DrawCommand, Outline};
    use engine::ui::Rect;

    use super::*;
    use crate::note::NoteRange;

    fn octave() -> KeyboardLayout {
        let range = NoteRange::new(60, 71).expect("valid range");
        KeyboardLayout::generate(range, Rect::new(0, 0, 700, 200)).expect("layout")
    }

    fn fill_of(list: &DrawList, rect: Rect) -> Option<engine::graphics::Color> {
        list.commands().iter().rev().find_map(|cmd| match cmd {
            DrawCommand::Rect {
                rect: r,
                fill: Some(fill),
                ..
            } if *r == rect => Some(*fill),
            _ => None,
        })
    }

    fn outlines(list: &DrawList) -> Vec<(Rect, Outline)> {
        list.commands()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Rect {
                    rect,
                    fill: None,
                    outline: Some(outline),
                } => Some((*rect, *outline)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn fill_depends_on_held_and_target() {
        let kb = octave();
        let c = kb.key(60).copied().expect("C");
        let cs = kb.key(61).copied().expect("C#");
        let mut held = HeldNotes::new();

        assert_eq!(key_fill(&c, &held, Some(60)), theme::WHITE_KEY);
        assert_eq!(key_fill(&cs, &held, None), theme::BLACK_KEY);

        held.press(60);
        held.press(61);
        assert_eq!(key_fill(&c, &held, Some(60)), theme::TARGET);
        assert_eq!(key_fill(&cs, &held, Some(60)), theme::WRONG);
        assert_eq!(key_fill(&cs, &held, None), theme::ACTIVE);
    }

    #[test]
    fn black_keys_are_drawn_after_white_keys() {
        let kb = octave();
        let mut list = DrawList::new();
        draw_keyboard(&mut list, &kb, &HeldNotes::new(), None);

        assert_eq!(list.len(), 12);
        let first_black = list
            .commands()
            .iter()
            .position(|cmd| matches!(cmd, DrawCommand::Rect { fill: Some(f), .. } if *f == theme::BLACK_KEY))
            .expect("black key drawn");
        assert_eq!(first_black, 7);
    }

    #[test]
    fn unheld_target_gets_an_outline() {
        let kb = octave();
        let mut list = DrawList::new();
        draw_keyboard(&mut list, &kb, &HeldNotes::new(), Some(61));

        let cs = kb.key(61).expect("C#").bounds;
        assert_eq!(
            outlines(&list),
            vec![(
                cs,
                Outline {
                    color: theme::TARGET,
                    thickness: 2
                }
            )]
        );
        assert_eq!(fill_of(&list, cs), Some(theme::BLACK_KEY));
    }

    #[test]
    fn held_target_has_no_outline() {
        let kb = octave();
        let mut held = HeldNotes::new();
        held.press(64);
        let mut list = DrawList::new();
        draw_keyboard(&mut list, &kb, &held, Some(64));

        assert!(outlines(&list).is_empty());
        assert_eq!(fill_of(&list, kb.key(64).expect("E").bounds), Some(theme::TARGET));
    }

    #[test]
    fn white_target_outline_is_thicker() {
        let kb = octave();
        let mut list = DrawList::new();
        draw_keyboard(&mut list, &kb, &HeldNotes::new(), Some(60));
        let found = outlines(&list);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].1.thickness, 3);
    }
}
