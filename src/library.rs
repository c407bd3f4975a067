//! Session media slots: turns command-line or configured paths into the
//! ordered list of files the transport will load.

mod model;
mod scan;

pub use model::TrackSource;
pub use scan::resolve_sources;
