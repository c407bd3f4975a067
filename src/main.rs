mod app;
mod audio;
mod config;
mod library;
mod logging;
mod mpris;
mod runtime;
mod transport;
mod ui;

fn main() -> anyhow::Result<()> {
    runtime::run()
}
