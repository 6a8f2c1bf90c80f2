//! Rhythm-game note stream.
//!
//! Objects spawn on a fixed cadence above the playfield, fall at a constant speed and are
//! judged against the hit line (the top of the keyboard). A press resolves the first active
//! object in spawn order that matches its pitch and is inside the tolerance window; nearer
//! objects later in the list are not preferred.

use engine::ui::Rect;

use crate::keyboard::KeyboardLayout;
use crate::note::Pitch;
use crate::random::PitchSource;

pub const HIT_POINTS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamConfig {
    pub spawn_interval_ticks: u32,
    /// Pixels per tick.
    pub scroll_speed: f32,
    /// A press counts when `|y - hit_line|` is strictly below this.
    pub hit_tolerance: f32,
    pub spawn_y: f32,
    pub object_height: u32,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            spawn_interval_ticks: 120,
            scroll_speed: 3.0,
            hit_tolerance: 50.0,
            spawn_y: -50.0,
            object_height: 40,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteState {
    Active,
    Hit,
    Missed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallingObject {
    pub pitch: Pitch,
    /// The key rectangle this object falls towards; only `x` and `w` matter for the lane.
    pub lane: Rect,
    /// Top edge, in playfield pixels. Negative while above the screen.
    pub y: f32,
    pub speed: f32,
    pub state: NoteState,
}

impl FallingObject {
    pub fn is_active(&self) -> bool {
        self.state == NoteState::Active
    }

    /// Visible rectangle, clipped at the top of the screen. `None` while fully above it.
    pub fn screen_rect(&self, height: u32) -> Option<Rect> {
        let bottom = self.y + height as f32;
        if bottom <= 0.0 {
            return None;
        }
        let top = self.y.max(0.0);
        Some(Rect::new(
            self.lane.x,
            top.round() as u32,
            self.lane.w,
            (bottom - top).round() as u32,
        ))
    }
}

/// What happened during one `tick`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub spawned: Option<Pitch>,
    /// Objects that went past the miss line this tick, already removed from the live set.
    pub missed: Vec<FallingObject>,
}

#[derive(Debug, Clone)]
pub struct FallingNoteStream {
    config: StreamConfig,
    hit_line: f32,
    miss_line: f32,
    notes: Vec<FallingObject>,
    spawn_timer: u32,
    score: u32,
    misses: u32,
}

impl FallingNoteStream {
    pub fn new(config: StreamConfig, hit_line: f32, miss_line: f32) -> Self {
        Self {
            config,
            hit_line,
            miss_line,
            notes: Vec::new(),
            spawn_timer: 0,
            score: 0,
            misses: 0,
        }
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    pub fn hit_line(&self) -> f32 {
        self.hit_line
    }

    pub fn miss_line(&self) -> f32 {
        self.miss_line
    }

    /// Live objects in spawn order.
    pub fn notes(&self) -> &[FallingObject] {
        &self.notes
    }

    pub fn active_notes(&self) -> impl Iterator<Item = &FallingObject> {
        self.notes.iter().filter(|n| n.is_active())
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn misses(&self) -> u32 {
        self.misses
    }

    pub fn spawn_timer(&self) -> u32 {
        self.spawn_timer
    }

    /// Spawn, advance, mark misses, then drop everything that is no longer active.
    pub fn tick(&mut self, layout: &KeyboardLayout, source: &mut dyn PitchSource) -> TickReport {
        let mut report = TickReport::default();

        self.spawn_timer += 1;
        if self.spawn_timer >= self.config.spawn_interval_ticks {
            self.spawn_timer = 0;
            report.spawned = self.spawn(layout, source);
        }

        for note in self.notes.iter_mut().filter(|n| n.is_active()) {
            note.y += note.speed;
            if note.y > self.miss_line {
                note.state = NoteState::Missed;
                self.misses += 1;
                report.missed.push(*note);
            }
        }

        self.notes.retain(FallingObject::is_active);
        report
    }

    /// Resolves at most one object. Returns it (now `Hit`) when the press scored.
    pub fn on_note_on(&mut self, pitch: Pitch) -> Option<FallingObject> {
        let tolerance = self.config.hit_tolerance;
        let hit_line = self.hit_line;
        let note = self.notes.iter_mut().find(|n| {
            n.is_active() && n.pitch == pitch && (n.y - hit_line).abs() < tolerance
        })?;
        note.state = NoteState::Hit;
        self.score += HIT_POINTS;
        Some(*note)
    }

    fn spawn(&mut self, layout: &KeyboardLayout, source: &mut dyn PitchSource) -> Option<Pitch> {
        let pitch = source.pick(layout.range());
        let Some(key) = layout.key(pitch) else {
            log::debug!("no key geometry for pitch {pitch}; skipping spawn");
            return None;
        };
        self.notes.push(FallingObject {
            pitch,
            lane: key.bounds,
            y: self.config.spawn_y,
            speed: self.config.scroll_speed,
            state: NoteState::Active,
        });
        Some(pitch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::NoteRange;
    use crate::random::ScriptedPitchSource;

    fn layout() -> KeyboardLayout {
        let range = NoteRange::new(36, 96).expect("valid range");
        KeyboardLayout::generate(range, Rect::new(50, 598, 924, 150)).expect("layout")
    }

    fn stream(kb: &KeyboardLayout) -> FallingNoteStream {
        FallingNoteStream::new(StreamConfig::default(), kb.hit_line(), 768.0)
    }

    #[test]
    fn spawns_once_per_interval() {
        let kb = layout();
        let mut s = stream(&kb);
        let mut source = ScriptedPitchSource::new([60]);

        for _ in 0..119 {
            assert_eq!(s.tick(&kb, &mut source).spawned, None);
        }
        let report = s.tick(&kb, &mut source);
        assert_eq!(report.spawned, Some(60));
        assert_eq!(s.notes().len(), 1);
        assert_eq!(s.spawn_timer(), 0);
    }

    #[test]
    fn spawned_object_follows_its_key_lane() {
        let kb = layout();
        let mut s = stream(&kb);
        let mut source = ScriptedPitchSource::new([61]);
        for _ in 0..120 {
            s.tick(&kb, &mut source);
        }
        let note = s.notes()[0];
        let key = kb.key(61).expect("C#4");
        assert_eq!((note.lane.x, note.lane.w), (key.bounds.x, key.bounds.w));
        // Spawned then advanced once in the same tick.
        assert_eq!(note.y, -47.0);
        assert_eq!(note.state, NoteState::Active);
    }

    #[test]
    fn press_far_from_hit_line_does_nothing() {
        let kb = layout();
        let mut s = stream(&kb);
        let mut source = ScriptedPitchSource::new([60]);
        for _ in 0..120 {
            s.tick(&kb, &mut source);
        }
        assert_eq!(s.on_note_on(60), None);
        assert_eq!(s.score(), 0);
        assert!(s.notes()[0].is_active());
    }

    #[test]
    fn tolerance_is_strict() {
        let kb = layout();
        let mut s = stream(&kb);
        s.notes.push(FallingObject {
            pitch: 60,
            lane: Rect::new(0, 0, 10, 10),
            y: kb.hit_line() - 50.0,
            speed: 3.0,
            state: NoteState::Active,
        });
        assert_eq!(s.on_note_on(60), None);
        s.notes[0].y += 1.0;
        assert!(s.on_note_on(60).is_some());
    }

    #[test]
    fn first_match_in_spawn_order_wins() {
        let kb = layout();
        let mut s = stream(&kb);
        let hit = kb.hit_line();
        for y in [hit - 40.0, hit - 5.0] {
            s.notes.push(FallingObject {
                pitch: 60,
                lane: Rect::new(0, 0, 10, 10),
                y,
                speed: 3.0,
                state: NoteState::Active,
            });
        }
        let resolved = s.on_note_on(60).expect("hit");
        assert_eq!(resolved.y, hit - 40.0);
        assert_eq!(s.notes()[0].state, NoteState::Hit);
        assert_eq!(s.notes()[1].state, NoteState::Active);
        assert_eq!(s.score(), HIT_POINTS);
    }

    #[test]
    fn screen_rect_clips_above_the_top() {
        let note = FallingObject {
            pitch: 60,
            lane: Rect::new(100, 0, 20, 150),
            y: -25.0,
            speed: 3.0,
            state: NoteState::Active,
        };
        assert_eq!(note.screen_rect(40), Some(Rect::new(100, 0, 20, 15)));
        let hidden = FallingObject { y: -40.0, ..note };
        assert_eq!(hidden.screen_rect(40), None);
        let visible = FallingObject { y: 300.0, ..note };
        assert_eq!(visible.screen_rect(40), Some(Rect::new(100, 300, 20, 40)));
    }
}
