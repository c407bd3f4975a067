//! rodio-backed tracks and the background metadata probe.

mod error;
mod output;
mod probe;
mod sink;
mod track;

pub use error::LoadError;
pub use output::open_output;
pub use probe::{MediaEvent, ProbeInfo, probe_file, spawn_probe};
pub use track::RodioTrack;
