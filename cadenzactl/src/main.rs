use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use cadenza_model::ViewKind;
use cadenzactl::cli::{
    self, OutputFormat, SimulateOptions, ViewAction, open_store,
};
use clap::{Parser, Subcommand};
use env_logger::{Builder, Target};
use log::LevelFilter;

#[derive(Parser)]
#[command(
    name = "cadenzactl",
    about = "Drive and inspect the Cadenza infinite carousel"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the carousel headlessly and print one record per frame
    Simulate {
        /// JSON array of {"id", "payload": {"width", "name"?}} items
        #[arg(long)]
        items: PathBuf,
        /// JSON array of scripted steps keyed by frame
        #[arg(long)]
        script: Option<PathBuf>,
        /// TOML runtime overrides (defaults to $CADENZA_CONFIG)
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = 120)]
        frames: u32,
        /// Viewport width in pixels
        #[arg(long, default_value_t = 1280.0)]
        viewport: f32,
        /// Stored view preference to start from (carousel or grid)
        #[arg(long)]
        initial_view: Option<ViewKind>,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Read or change the persisted carousel/grid preference
    View {
        /// Preferences file (defaults to the per-user config dir)
        #[arg(long, global = true)]
        store: Option<PathBuf>,
        #[command(subcommand)]
        action: ViewCommand,
    },
}

#[derive(Subcommand)]
enum ViewCommand {
    /// Persist a preferred view (carousel or grid)
    Set { view: ViewKind },
    /// Print the stored preference
    Get,
    /// Forget the stored preference
    Clear,
    /// Print the preferences file location
    Path,
}

impl From<ViewCommand> for ViewAction {
    fn from(cmd: ViewCommand) -> Self {
        match cmd {
            ViewCommand::Set { view } => ViewAction::Set(view),
            ViewCommand::Get => ViewAction::Get,
            ViewCommand::Clear => ViewAction::Clear,
            ViewCommand::Path => ViewAction::Path,
        }
    }
}

fn init_logger() {
    Builder::new()
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .filter_module("cadenzactl", LevelFilter::Info)
        .init();
}

fn main() -> Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Simulate {
            items,
            script,
            config,
            frames,
            viewport,
            initial_view,
            format,
        } => {
            let opts = SimulateOptions {
                items,
                script,
                config,
                frames,
                viewport,
                initial_view,
                format,
            };
            let summary = cli::simulate::run(&opts, &mut out)?;
            log::info!(
                "Simulation finished after {} frames",
                summary.frames_run
            );
        }
        Command::View { store, action } => {
            let mut store = open_store(store)?;
            match ViewAction::from(action) {
                ViewAction::Path => {
                    writeln!(out, "{}", store.path().display())?;
                }
                action => cli::view::run(&mut store, &action, &mut out)?,
            }
        }
    }

    out.flush()?;
    Ok(())
}
