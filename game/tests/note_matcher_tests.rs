use openkeys::note::{NoteRange, Pitch};
use openkeys::note_matcher::{Feedback, NoteMatcher};
use openkeys::random::{PitchSource, RngPitchSource, ScriptedPitchSource};
use proptest::prelude::*;

fn classic_range() -> NoteRange {
    NoteRange::new(36, 96).expect("valid range")
}

#[test]
fn correct_then_wrong_press() {
    let range = classic_range();
    let mut source = ScriptedPitchSource::new([60, 67]);
    let mut matcher = NoteMatcher::new(range, &mut source);
    assert_eq!(matcher.target(), 60);

    matcher.on_note_on(60, &mut source);
    assert_eq!(matcher.score(), 1);
    assert_eq!(matcher.feedback(), Feedback::Success);
    assert!(range.contains(matcher.target()));
    let target = matcher.target();

    matcher.on_note_on(61, &mut source);
    assert_eq!(matcher.score(), 1);
    assert_eq!(matcher.target(), target);
    assert_eq!(matcher.feedback(), Feedback::Failure { played: 61 });
    assert_eq!(matcher.feedback().message(), "Wrong! That was C#4");
}

#[test]
fn resampling_may_repeat_the_same_target() {
    let mut source = ScriptedPitchSource::new([60]);
    let mut matcher = NoteMatcher::new(classic_range(), &mut source);
    matcher.on_note_on(60, &mut source);
    matcher.on_note_on(60, &mut source);
    assert_eq!(matcher.score(), 2);
    assert_eq!(matcher.target(), 60);
}

#[test]
fn presses_outside_the_range_are_just_wrong() {
    let mut source = ScriptedPitchSource::new([48]);
    let mut matcher = NoteMatcher::new(classic_range(), &mut source);
    matcher.on_note_on(0, &mut source);
    matcher.on_note_on(127, &mut source);
    assert_eq!(matcher.score(), 0);
    assert_eq!(matcher.feedback(), Feedback::Failure { played: 127 });
    assert!(matcher.held().contains(0));
}

proptest! {
    #[test]
    fn only_the_target_scores(seed in any::<u64>(), presses in prop::collection::vec(0u8..=127, 1..60)) {
        let range = classic_range();
        let mut source = RngPitchSource::seeded(seed);
        let mut matcher = NoteMatcher::new(range, &mut source);

        for pitch in presses {
            let (score, target) = (matcher.score(), matcher.target());
            matcher.on_note_on(pitch, &mut source);
            if pitch == target {
                prop_assert_eq!(matcher.score(), score + 1);
                prop_assert_eq!(matcher.feedback(), Feedback::Success);
            } else {
                prop_assert_eq!(matcher.score(), score);
                prop_assert_eq!(matcher.target(), target);
                prop_assert_eq!(matcher.feedback(), Feedback::Failure { played: pitch });
            }
            prop_assert!(range.contains(matcher.target()));
        }
    }

    #[test]
    fn note_off_never_scores(seed in any::<u64>(), pitch in 0u8..=127) {
        let mut source = RngPitchSource::seeded(seed);
        let mut matcher = NoteMatcher::new(classic_range(), &mut source);
        let before = (matcher.score(), matcher.target(), matcher.feedback());
        matcher.on_note_off(pitch);
        prop_assert_eq!(before, (matcher.score(), matcher.target(), matcher.feedback()));
    }
}

struct Counting {
    calls: usize,
}

impl PitchSource for Counting {
    fn pick(&mut self, range: NoteRange) -> Pitch {
        self.calls += 1;
        range.high()
    }
}

#[test]
fn target_is_only_drawn_from_the_source_on_success() {
    let mut source = Counting { calls: 0 };
    let mut matcher = NoteMatcher::new(classic_range(), &mut source);
    assert_eq!(source.calls, 1);
    matcher.on_note_on(50, &mut source);
    assert_eq!(source.calls, 1);
    matcher.on_note_on(96, &mut source);
    assert_eq!(source.calls, 2);
}
