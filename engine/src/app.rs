use std::error::Error;
use std::time::{Duration, Instant};

use pixels::{PixelsBuilder, SurfaceTexture};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::graphics::Renderer2d;
use crate::pixels_renderer::PixelsRenderer2d;
use crate::surface::SurfaceSize;

pub struct AppConfig {
    pub title: String,
    /// Size of the pixel buffer the game draws into.
    pub logical_size: SurfaceSize,
    pub resizable: bool,
    pub vsync: Option<bool>,
    /// Upper bound on update+render passes per second. `None` runs unthrottled.
    pub target_fps: Option<u32>,
}

pub struct AppContext {
    pub window: Window,
    pub renderer: PixelsRenderer2d,
}

/// Keyboard input gathered since the previous frame, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct InputFrame {
    pub keys_pressed: Vec<VirtualKeyCode>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.keys_pressed.clear();
    }
}

pub trait GameApp {
    type State;

    fn init_state(&mut self, ctx: &mut AppContext) -> Self::State;

    /// Advances one frame. Returning `false` exits the loop.
    fn update_state(&mut self, state: &mut Self::State, input: &InputFrame, dt: Duration) -> bool;

    fn render(&mut self, state: &Self::State, renderer: &mut dyn Renderer2d);
}

/// Fixed-rate frame scheduling for the event loop.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    interval: Option<Duration>,
    next_frame: Option<Instant>,
}

impl FramePacer {
    pub fn new(target_fps: Option<u32>) -> Self {
        let interval = target_fps
            .filter(|fps| *fps > 0)
            .map(|fps| Duration::from_secs(1) / fps);
        Self {
            interval,
            next_frame: None,
        }
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    pub fn is_due(&self, now: Instant) -> bool {
        match self.next_frame {
            Some(next) => now >= next,
            None => true,
        }
    }

    /// Records that a frame started at `now` and schedules the next one.
    pub fn mark_frame(&mut self, now: Instant) {
        self.next_frame = self.interval.map(|interval| {
            // Don't try to catch up after a stall; schedule from the later of the two.
            let scheduled = self.next_frame.map_or(now + interval, |next| next + interval);
            if scheduled < now { now + interval } else { scheduled }
        });
    }

    pub fn next_frame(&self) -> Option<Instant> {
        self.next_frame
    }
}

pub fn run_game<G: GameApp + 'static>(config: AppConfig, mut game: G) -> Result<(), Box<dyn Error>> {
    let event_loop = EventLoop::new();
    let logical = config.logical_size;
    let window = WindowBuilder::new()
        .with_title(config.title)
        .with_inner_size(PhysicalSize::new(logical.width, logical.height))
        .with_resizable(config.resizable)
        .build(&event_loop)?;

    let window_size = window.inner_size();
    let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
    let mut pixels_builder = PixelsBuilder::new(logical.width, logical.height, surface_texture);
    if let Some(vsync) = config.vsync {
        pixels_builder = pixels_builder.enable_vsync(vsync);
    }
    let pixels = pixels_builder.build()?;
    let renderer = PixelsRenderer2d::new(pixels, logical)?;

    let mut ctx = AppContext { window, renderer };
    let mut state = game.init_state(&mut ctx);
    let mut input = InputFrame::default();
    let mut pacer = FramePacer::new(config.target_fps);
    let mut last_frame = Instant::now();

    event_loop.run(move |event, _, control_flow| {
        match &event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    let window = SurfaceSize::new(size.width, size.height);
                    if let Err(err) = ctx.renderer.resize_surface(window) {
                        log::warn!("resize failed: {err}");
                    }
                }
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state: ElementState::Pressed,
                            virtual_keycode: Some(key),
                            ..
                        },
                    ..
                } => {
                    input.keys_pressed.push(*key);
                }
                _ => {}
            },
            Event::RedrawRequested(_) => {
                let now = Instant::now();
                let dt = now.saturating_duration_since(last_frame);
                last_frame = now;
                pacer.mark_frame(now);

                if !game.update_state(&mut state, &input, dt) {
                    *control_flow = ControlFlow::Exit;
                    return;
                }
                input.clear();

                ctx.renderer.draw_frame(|gfx| game.render(&state, gfx));
                if let Err(err) = ctx.renderer.present() {
                    log::error!("present failed: {err}");
                    *control_flow = ControlFlow::Exit;
                }
            }
            Event::MainEventsCleared => {
                if matches!(*control_flow, ControlFlow::ExitWithCode(_)) {
                    return;
                }
                let now = Instant::now();
                if pacer.is_due(now) {
                    ctx.window.request_redraw();
                    *control_flow = ControlFlow::Poll;
                } else if let Some(next) = pacer.next_frame() {
                    *control_flow = ControlFlow::WaitUntil(next);
                }
            }
            _ => {}
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pacer_without_target_is_always_due() {
        let mut pacer = FramePacer::new(None);
        let now = Instant::now();
        pacer.mark_frame(now);
        assert!(pacer.is_due(now));
        assert_eq!(pacer.next_frame(), None);
    }

    #[test]
    fn pacer_waits_one_interval_between_frames() {
        let mut pacer = FramePacer::new(Some(50));
        let start = Instant::now();
        assert!(pacer.is_due(start));

        pacer.mark_frame(start);
        assert!(!pacer.is_due(start + Duration::from_millis(10)));
        assert!(pacer.is_due(start + Duration::from_millis(20)));
    }

    #[test]
    fn pacer_does_not_accumulate_debt_after_a_stall() {
        let mut pacer = FramePacer::new(Some(50));
        let start = Instant::now();
        pacer.mark_frame(start);

        let late = start + Duration::from_secs(2);
        pacer.mark_frame(late);
        assert_eq!(pacer.next_frame(), Some(late + Duration::from_millis(20)));
    }

    #[test]
    fn zero_fps_means_unthrottled() {
        assert_eq!(FramePacer::new(Some(0)).interval(), None);
    }
}
