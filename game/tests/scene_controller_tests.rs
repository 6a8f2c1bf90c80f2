use engine::HeadlessRunner;
use engine::draw_list::DrawList;
use engine::surface::{RgbaBufferSurface, SurfaceSize};
use engine::ui::Size;
use openkeys::controller::{ActiveMode, SceneController};
use openkeys::falling_notes::StreamConfig;
use openkeys::input::{MidiMessage, TickInput, UiEvent};
use openkeys::note::KeyboardPreset;
use openkeys::random::ScriptedPitchSource;
use openkeys::scene::SceneState;
use openkeys::session::Session;
use openkeys::theme;

fn runner(script: &[u8]) -> HeadlessRunner<SceneController> {
    let controller = SceneController::new(
        Session::new(StreamConfig::default()),
        Box::new(ScriptedPitchSource::new(script.iter().copied())),
        Size::new(1024, 768),
    );
    HeadlessRunner::new(controller)
}

fn press(events: &[UiEvent]) -> TickInput {
    TickInput::ui(events.iter().copied())
}

fn texts(controller: &SceneController) -> Vec<String> {
    let mut list = DrawList::new();
    controller.draw(&mut list);
    list.texts().map(str::to_string).collect()
}

#[test]
fn full_navigation_round_trip() {
    let mut r = runner(&[60]);
    assert_eq!(r.sim().state(), SceneState::KeyboardSelect);

    r.step(press(&[UiEvent::Digit(3)]));
    assert_eq!(r.sim().state(), SceneState::MainMenu);
    assert_eq!(
        r.sim().keyboard().map(|c| c.range),
        Some(KeyboardPreset::Keys49.range())
    );
    assert!(texts(r.sim()).contains(&"Config: 49 Keys".to_string()));

    r.step(press(&[UiEvent::Digit(1)]));
    assert_eq!(r.sim().state(), SceneState::NoteTrainer);
    let trainer = r.sim().note_trainer().expect("note trainer");
    assert_eq!(trainer.layout().range(), KeyboardPreset::Keys49.range());

    r.step(press(&[UiEvent::Back]));
    assert_eq!(r.sim().state(), SceneState::MainMenu);

    r.step(press(&[UiEvent::Digit(2)]));
    assert_eq!(r.sim().state(), SceneState::RhythmTrainer);

    r.step(press(&[UiEvent::Back, UiEvent::Back]));
    assert_eq!(r.sim().state(), SceneState::KeyboardSelect);
    assert_eq!(r.frame(), 5);
}

#[test]
fn reselecting_a_keyboard_overwrites_the_config() {
    let mut r = runner(&[60]);
    r.step(press(&[UiEvent::Digit(1), UiEvent::Back, UiEvent::Digit(2)]));
    assert_eq!(r.sim().state(), SceneState::MainMenu);
    assert_eq!(r.sim().keyboard().map(|c| c.key_count), Some(88));
}

#[test]
fn escape_on_keyboard_select_is_ignored() {
    let mut r = runner(&[60]);
    r.step(press(&[UiEvent::Back, UiEvent::Digit(7)]));
    assert_eq!(r.sim().state(), SceneState::KeyboardSelect);
    assert!(r.sim().keyboard().is_none());
    assert_eq!(texts(r.sim())[0], "Welcome to OpenKeys");
}

#[test]
fn leaving_a_trainer_discards_its_state() {
    let mut r = runner(&[60, 64]);
    r.step(press(&[UiEvent::Digit(1), UiEvent::Digit(1)]));
    r.step(TickInput::note_on(60));
    r.step(TickInput::note_on(50));
    let trainer = r.sim().note_trainer().expect("note trainer");
    assert_eq!(trainer.matcher().score(), 1);
    assert!(trainer.matcher().held().contains(50));

    r.step(press(&[UiEvent::Back, UiEvent::Digit(1)]));
    let fresh = r.sim().note_trainer().expect("note trainer");
    assert_eq!(fresh.matcher().score(), 0);
    assert!(fresh.matcher().held().is_empty());
}

#[test]
fn rhythm_trainer_ticks_once_per_frame() {
    let mut r = runner(&[60]);
    r.step(press(&[UiEvent::Digit(1), UiEvent::Digit(2)]));
    // The entering frame already counts as the first tick.
    r.idle(119);
    let trainer = r.sim().rhythm_trainer().expect("rhythm trainer");
    assert_eq!(trainer.stream().notes().len(), 1);
    assert_eq!(trainer.stream().notes()[0].pitch, 60);
}

#[test]
fn rhythm_hit_through_the_controller() {
    let mut r = runner(&[60, 72]);
    r.step(press(&[UiEvent::Digit(1), UiEvent::Digit(2)]));
    // 120 ticks to spawn at y=-50 then 199 more to reach y=550, 48 px above the hit line.
    r.idle(119 + 199);
    r.step(TickInput::note_on(60));

    let trainer = r.sim().rhythm_trainer().expect("rhythm trainer");
    assert_eq!(trainer.stream().score(), 10);
    assert!(texts(r.sim()).contains(&"Score: 10".to_string()));
}

#[test]
fn going_back_to_keyboard_select_keeps_the_previous_choice_until_overwritten() {
    let mut controller = SceneController::new(
        Session::default(),
        Box::new(ScriptedPitchSource::new([60])),
        Size::new(1024, 768),
    );
    controller.handle_ui(UiEvent::Digit(1));
    controller.handle_ui(UiEvent::Back);
    assert_eq!(controller.state(), SceneState::KeyboardSelect);
    assert_eq!(
        controller.keyboard().map(|c| c.range),
        Some(KeyboardPreset::Keys61.range())
    );
    assert_eq!(controller.session().range(), KeyboardPreset::Keys61.range());
}

#[test]
fn note_trainer_frame_renders_headlessly() {
    let mut r = runner(&[60]);
    r.step(press(&[UiEvent::Digit(1), UiEvent::Digit(1)]));
    r.step(TickInput::midi([MidiMessage::NoteOn {
        pitch: 62,
        velocity: 90,
    }]));

    let mut list = DrawList::new();
    r.sim().draw(&mut list);
    let mut surface = RgbaBufferSurface::new(SurfaceSize::new(1024, 768));
    list.replay(&mut surface.renderer());

    let ActiveMode::NoteTrainer(trainer) = r.sim().mode() else {
        panic!("expected the note trainer");
    };
    let c4 = trainer.layout().key(60).expect("C4").bounds;
    let d4 = trainer.layout().key(62).expect("D4").bounds;

    // Target outline on the unheld C4, plain key colour inside it.
    assert_eq!(surface.pixel(c4.x, c4.bottom() - 1), Some(theme::TARGET));
    assert_eq!(
        surface.pixel(c4.x + c4.w / 2, c4.bottom() - 10),
        Some(theme::WHITE_KEY)
    );
    // Held wrong note is red.
    assert_eq!(
        surface.pixel(d4.x + d4.w / 2, d4.bottom() - 10),
        Some(theme::WRONG)
    );
    // Background outside the piano.
    assert_eq!(surface.pixel(5, 400), Some(theme::BACKGROUND));

    assert!(
        texts(r.sim())
            .iter()
            .any(|t| t == "Wrong! That was D4")
    );
}
