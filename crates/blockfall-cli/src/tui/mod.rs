//! Minimal terminal runtime: an event loop that interleaves game ticks,
//! renders and crossterm input, and a trait for the applications it drives.

pub use self::{app::*, event_loop::RenderMode, runtime::*};

mod app;
mod event;
mod event_loop;
mod runtime;
