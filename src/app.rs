//! Application module: the view model the TUI draws and the transport
//! reports into.
//!
//! `App` implements `PresentationSink`, so every timeline, play-state and
//! mute change lands here synchronously; the UI only ever reads it.

mod model;
mod timecode;

pub use model::*;
pub use timecode::{format_mmss, format_timecode};

#[cfg(test)]
mod tests;
