use anyhow::{bail, Result};
use clap::Args;
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use xpick::config::SessionConfig;
use xpick::params::{Palette, Param};
use xpick::pipeline::{ImagePlacement, Stage, ViewRange};
use xpick::session::{Action, Session, StatusMessage};
use xpick::signal::synthetic::{demo_collection, SyntheticEvent, SyntheticLayout};
use xpick::signal::{DataNode, SignalSource};
use xpick::timefmt::{format_timestamp, seconds_to_duration};

/// Selection, processing and normalization inputs, entered as text
#[derive(Args, Debug, Clone, Default)]
pub struct PipelineArgs {
    /// Source code (dotted path); defaults to the configured or first code
    #[arg(long)]
    source: Option<String>,

    /// Inclusive start time
    #[arg(long)]
    start_time: Option<String>,

    /// Inclusive end time
    #[arg(long)]
    end_time: Option<String>,

    /// Inclusive start distance in meters
    #[arg(long)]
    start_distance: Option<String>,

    /// Inclusive end distance in meters
    #[arg(long)]
    end_distance: Option<String>,

    /// Integrate along distance
    #[arg(long)]
    integrate_space: bool,

    /// Distance decimation factor
    #[arg(long)]
    space_decimation: Option<String>,

    /// Sliding mean window along distance in meters
    #[arg(long)]
    space_highpass: Option<String>,

    /// Integrate along time
    #[arg(long)]
    integrate_time: bool,

    /// Time decimation factor
    #[arg(long)]
    time_decimation: Option<String>,

    /// Time highpass cutoff in Hz
    #[arg(long)]
    time_highpass: Option<String>,

    /// Palette index (0 viridis, 1 seismic)
    #[arg(long, default_value = "0")]
    palette: i64,

    /// Half-width of the linear region (auto when omitted)
    #[arg(long)]
    linear_threshold: Option<String>,

    /// Saturation limit (auto when omitted)
    #[arg(long)]
    value_limit: Option<String>,
}

impl PipelineArgs {
    fn actions(&self) -> Vec<Action> {
        let texts = [
            (Param::SourceId, &self.source),
            (Param::StartTime, &self.start_time),
            (Param::EndTime, &self.end_time),
            (Param::StartDistance, &self.start_distance),
            (Param::EndDistance, &self.end_distance),
            (Param::SpaceDecimation, &self.space_decimation),
            (Param::SpaceHighpass, &self.space_highpass),
            (Param::TimeDecimation, &self.time_decimation),
            (Param::TimeHighpass, &self.time_highpass),
            (Param::LinearThreshold, &self.linear_threshold),
            (Param::ValueLimit, &self.value_limit),
        ];
        let mut actions: Vec<Action> = texts
            .into_iter()
            .filter_map(|(param, text)| text.as_ref().map(|t| Action::set_text(param, t.clone())))
            .collect();
        actions.push(Action::set_flag(Param::SpaceIntegrate, self.integrate_space));
        actions.push(Action::set_flag(Param::TimeIntegrate, self.integrate_time));
        actions.push(Action::set_integer(Param::Palette, self.palette));
        actions
    }
}

/// Run one apply cycle over the demo collection and report the result
pub fn run(
    config: SessionConfig,
    args: PipelineArgs,
    picks_out: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    info!("xpick demo: synthetic DAS collection");
    let source = demo_collection()?;
    let codes = source.codes();
    info!("Available sources: {}", codes.join(", "));

    let mut session = Session::from_config(source, &config)?;
    if session.params().text(Param::SourceId).is_empty() {
        if let Some(first) = codes.first() {
            report(session.handle(Action::set_text(Param::SourceId, first.clone())));
        }
    }
    for action in args.actions() {
        report(session.handle(action));
    }

    let status = session.handle(Action::Apply).clone();
    report(&status);
    if status.is_error() {
        bail!("pipeline failed: {}", status.text);
    }

    if json {
        print_json(&session)?;
    } else {
        print_image(&session);
    }

    if let Some(path) = picks_out {
        place_demo_picks(&mut session)?;
        let status = session.handle(Action::SavePicks(path)).clone();
        report(&status);
        if status.is_error() {
            bail!("{}", status.text);
        }
    }
    Ok(())
}

fn report(status: &StatusMessage) {
    if status.is_error() {
        eprintln!("{}", status);
    } else {
        info!("{}", status);
    }
}

/// Machine-readable view of the rendered image
#[derive(Serialize)]
struct ImageSummary<'a> {
    source: &'a str,
    rows: usize,
    columns: usize,
    palette: Palette,
    value_limit: f64,
    linear_threshold: f64,
    placement: &'a ImagePlacement,
    view: ViewRange,
}

fn print_json(session: &Session<DataNode>) -> Result<()> {
    let Some(image) = session.image() else {
        return Ok(());
    };
    let (rows, columns) = image.shape();
    let summary = ImageSummary {
        source: session.params().text(Param::SourceId),
        rows,
        columns,
        palette: image.palette(),
        value_limit: image.value_limit(),
        linear_threshold: image.linear_threshold(),
        placement: image.placement(),
        view: image.placement().view_range(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn print_image(session: &Session<DataNode>) {
    let Some(image) = session.image() else {
        return;
    };
    let placement = image.placement();
    let view = placement.view_range();
    let (rows, cols) = image.shape();
    let (width, height) = session.canvas_size();

    println!("xpick Demo");
    println!("==========");
    println!("Source: {}", session.params().text(Param::SourceId));
    println!("Image: {} x {} samples on a {} x {} canvas", rows, cols, width, height);
    println!("Palette: {}", image.palette());
    println!(
        "Value limit: {:e} (linear threshold {:e})",
        image.value_limit(),
        image.linear_threshold()
    );
    println!("Distance range: {:.1} .. {:.1} m", view.x.0, view.x.1);
    println!(
        "Time range: {} .. {}",
        format_timestamp(&view.y.1),
        format_timestamp(&view.y.0)
    );
    println!(
        "Stage runs: load {}, process {}, normalize {}",
        session.run_count(Stage::Load),
        session.run_count(Stage::Process),
        session.run_count(Stage::Normalize)
    );
}

/// One stroke per phase along the modeled P and S arrivals of the first station
fn place_demo_picks(session: &mut Session<DataNode>) -> Result<()> {
    let layout = SyntheticLayout::default();
    let event = SyntheticEvent::default();
    let labels: Vec<String> = session.phases().labels().map(str::to_string).collect();

    for (label, arrival) in labels.iter().zip([
        SyntheticEvent::p_arrival as fn(&SyntheticEvent, f64) -> f64,
        SyntheticEvent::s_arrival,
    ]) {
        report(session.handle(Action::SelectPhase(label.clone())));
        for j in (0..layout.distances).step_by(25) {
            let distance = layout.s0 + j as f64 * layout.ds;
            let time = layout.start + seconds_to_duration(arrival(&event, distance));
            let status = session.handle(Action::AddPick { time, distance });
            if status.is_error() {
                bail!("{}", status.text);
            }
        }
        report(session.handle(Action::CommitStroke));
    }
    Ok(())
}
