use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::Context;
use clap::Parser;
use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::audio::{self, MediaEvent, RodioTrack};
use crate::library;
use crate::logging;
use crate::mpris::ControlCmd;
use crate::transport::PlayableTrack;

mod event_loop;
mod input;
mod mpris_sync;
mod settings;
mod startup;

#[derive(Parser, Debug)]
#[command(name = "syncdeck")]
#[command(about = "Play several audio files in lockstep on one timeline")]
#[command(version)]
pub struct Args {
    /// Audio files or directories. The first file is the timing reference.
    pub paths: Vec<PathBuf>,

    /// Config file (wins over SYNCDECK_CONFIG_PATH and the XDG default)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the effective settings as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

pub fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    let (settings, config_warning) = settings::load_settings(args.config.as_deref());

    if args.print_config {
        print!("{}", settings.to_toml().context("cannot render settings")?);
        return Ok(());
    }

    match logging::init(&settings.log) {
        Ok(path) => info!(log = %path.display(), "syncdeck starting"),
        Err(e) => eprintln!("syncdeck: logging disabled: {e:#}"),
    }
    if let Some(msg) = config_warning {
        warn!("{msg}");
    }

    let sources = library::resolve_sources(&args.paths, &settings.session, &settings.library);
    let stream = audio::open_output()?;
    let mut transport =
        startup::build_transport(&settings, &sources, |source| -> Box<dyn PlayableTrack> {
            Box::new(RodioTrack::open(&source.path, stream.mixer()))
        });

    let (media_tx, media_rx) = mpsc::channel::<MediaEvent>();
    audio::spawn_probe(sources, media_tx);

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);

    enable_raw_mode().context("cannot enable raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut transport,
        &media_rx,
        &control_rx,
        &mpris,
    );

    transport.pause();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    info!("syncdeck exiting");

    run_result
}
