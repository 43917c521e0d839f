use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use cadenza_core::{
    CarouselConfig, EngineMode, Frame, MemoryPreferenceStore, RuntimeConfig,
    Showcase, ViewOptions,
};
use cadenza_model::ViewKind;
use serde::Serialize;

use crate::script::{CardPayload, Script, ScriptStep, card_width, load_items};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct SimulateOptions {
    pub items: PathBuf,
    pub script: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub frames: u32,
    pub viewport: f32,
    pub initial_view: Option<ViewKind>,
    pub format: OutputFormat,
}

/// One line of simulator output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameRecord {
    pub frame: u32,
    pub elapsed_ms: f64,
    pub status: &'static str,
    pub offset_px: Option<f32>,
    pub mode: EngineMode,
    pub view: ViewKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationSummary {
    pub frames_run: u32,
    pub frames_advanced: u64,
    pub final_view: ViewKind,
}

fn status(frame: &Frame) -> &'static str {
    match frame {
        Frame::Advanced(_) => "advanced",
        Frame::Held(_) => "held",
        Frame::Unmeasured(_) => "unmeasured",
        Frame::Suspended => "suspended",
        Frame::Stopped => "stopped",
    }
}

fn runtime_config(path: Option<&PathBuf>) -> Result<RuntimeConfig> {
    match path {
        Some(path) => Ok(RuntimeConfig::load(path)?),
        None => Ok(RuntimeConfig::load_from_env()
            .context("loading config from CADENZA_CONFIG")?
            .unwrap_or_default()),
    }
}

/// Drive a showcase for `frames` frames with synthetic time
/// (`t0 + i * frame_interval`) and write one record per frame.
pub fn run<W: Write>(
    opts: &SimulateOptions,
    out: &mut W,
) -> Result<SimulationSummary> {
    let rc = runtime_config(opts.config.as_ref())?;
    let config = CarouselConfig::from_runtime_config(&rc);
    config.validate()?;
    let interval = rc.frame_interval();

    let items = load_items(&opts.items)?;
    let script = match &opts.script {
        Some(path) => Script::load(path)?,
        None => Script::default(),
    };
    log::debug!(
        "Simulating {} frames over {} items with {} scripted steps",
        opts.frames,
        items.len(),
        script.len()
    );

    let store = match opts.initial_view {
        Some(view) => MemoryPreferenceStore::with_view(view),
        None => MemoryPreferenceStore::new(),
    };
    let mut showcase = Showcase::new(
        items,
        opts.viewport,
        &card_width,
        config,
        store,
        ViewOptions::from_runtime_config(&rc),
    );

    let t0 = Instant::now();
    let mut frames_run = 0;
    for i in 0..opts.frames {
        let elapsed = interval.saturating_mul(i);
        let now = t0 + elapsed;
        for step in script.at(u64::from(i)) {
            apply(&mut showcase, step, now);
        }

        let frame = showcase.frame(now);
        frames_run = i + 1;
        let record = FrameRecord {
            frame: i,
            elapsed_ms: elapsed.as_secs_f64() * 1000.0,
            status: status(&frame),
            offset_px: frame.offset(),
            mode: showcase.carousel().mode(),
            view: showcase.current_view(),
        };
        write_record(out, opts.format, &record)?;
        if frame == Frame::Stopped {
            break;
        }
    }

    let summary = SimulationSummary {
        frames_run,
        frames_advanced: showcase.carousel().engine().frames_advanced(),
        final_view: showcase.current_view(),
    };
    if opts.format == OutputFormat::Text {
        writeln!(
            out,
            "ran {} frames ({} advanced), final view {}",
            summary.frames_run, summary.frames_advanced, summary.final_view
        )?;
    }
    Ok(summary)
}

fn apply(
    showcase: &mut Showcase<CardPayload, MemoryPreferenceStore>,
    step: &ScriptStep,
    now: Instant,
) {
    match step {
        ScriptStep::Input { event } => {
            let outcome = showcase.handle_input(*event, now);
            log::debug!("{event:?} -> {outcome:?}");
        }
        ScriptStep::Show { view } => {
            showcase.show(*view);
        }
        ScriptStep::Toggle => {
            showcase.toggle();
        }
        ScriptStep::Resize { viewport } => showcase.resize(*viewport),
        ScriptStep::Teardown => showcase.teardown(),
    }
}

fn write_record<W: Write>(
    out: &mut W,
    format: OutputFormat,
    record: &FrameRecord,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, record)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            let offset = record
                .offset_px
                .map(|px| format!("{px:.2}"))
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                out,
                "{:>5} {:>9.1}ms {:<10} {:>10} {:?} {}",
                record.frame,
                record.elapsed_ms,
                record.status,
                offset,
                record.mode,
                record.view
            )?;
        }
    }
    Ok(())
}

