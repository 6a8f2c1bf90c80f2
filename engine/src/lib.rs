pub mod app;
pub mod draw_list;
pub mod graphics;
pub mod pixels_renderer;
pub mod surface;
pub mod ui;

/// A fixed-tick simulation: one call to `tick` per rendered frame.
pub trait Simulation {
    type Input;

    fn tick(&mut self, input: Self::Input);
}

/// Drives a `Simulation` without a window, counting frames.
#[derive(Debug)]
pub struct HeadlessRunner<S: Simulation> {
    sim: S,
    frame: usize,
}

impl<S: Simulation> HeadlessRunner<S> {
    pub fn new(sim: S) -> Self {
        Self { sim, frame: 0 }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn sim(&self) -> &S {
        &self.sim
    }

    pub fn sim_mut(&mut self) -> &mut S {
        &mut self.sim
    }

    pub fn into_inner(self) -> S {
        self.sim
    }

    pub fn step(&mut self, input: S::Input) -> usize {
        self.sim.tick(input);
        self.frame += 1;
        self.frame
    }

    pub fn run<I>(&mut self, inputs: I) -> usize
    where
        I: IntoIterator<Item = S::Input>,
    {
        for input in inputs {
            self.step(input);
        }
        self.frame
    }

    /// Steps `frames` times with no input.
    pub fn idle(&mut self, frames: usize) -> usize
    where
        S::Input: Default,
    {
        for _ in 0..frames {
            self.step(S::Input::default());
        }
        self.frame
    }
}
