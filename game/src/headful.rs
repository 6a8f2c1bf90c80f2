//! Windowed front end: winit keys and a MIDI port in, pixels out.

pub mod app;
pub mod input_adapter;
