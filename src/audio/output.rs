use anyhow::Context;
use rodio::{OutputStream, OutputStreamBuilder};

/// Open the default output device.
///
/// The returned stream must outlive every sink connected to its mixer.
pub fn open_output() -> anyhow::Result<OutputStream> {
    let mut stream =
        OutputStreamBuilder::open_default_stream().context("no audio output device")?;
    // rodio prints to stderr when the stream is dropped, which tears the TUI.
    stream.log_on_drop(false);
    Ok(stream)
}
