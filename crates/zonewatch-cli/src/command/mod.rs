use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use zonewatch_analysis::{GameStateProcessor, heatmap::MapProjection, summary::TableSummary};
use zonewatch_core::GeometricBoundary;

use crate::{schema::boundary::BoundaryPreset, util};

use self::{
    entry_frequency::EntryFrequencyArg, entry_time::EntryTimeArg, heatmap::HeatmapArg,
    report::ReportArg, summary::SummaryArg,
};

mod entry_frequency;
mod entry_time;
mod heatmap;
mod report;
mod summary;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Analysis to run
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// List weapon classes and area names found in the frame data
    Summary(#[clap(flatten)] SummaryArg),
    /// Share of rounds in which a team entered the boundary
    EntryFrequency(#[clap(flatten)] EntryFrequencyArg),
    /// Average first-entry clock time into an area
    EntryTime(#[clap(flatten)] EntryTimeArg),
    /// Render a position heatmap over a map radar image
    Heatmap(#[clap(flatten)] HeatmapArg),
    /// Run the light blue choke point report
    Report(#[clap(flatten)] ReportArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Summary(arg) => summary::run(&arg)?,
        Mode::EntryFrequency(arg) => entry_frequency::run(&arg)?,
        Mode::EntryTime(arg) => entry_time::run(&arg)?,
        Mode::Heatmap(arg) => heatmap::run(&arg)?,
        Mode::Report(arg) => report::run(&arg)?,
    }
    Ok(())
}

/// Frame data and the boundary to classify it against.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DataArg {
    /// Frame data JSON file (one array per column)
    data: PathBuf,

    /// Boundary JSON file with `XY` vertices and a `Z` interval
    #[arg(long)]
    boundary: Option<PathBuf>,

    /// Built-in boundary used when no boundary file is given
    #[arg(long, default_value = "lightblue")]
    preset: BoundaryPreset,
}

impl DataArg {
    fn load_boundary(&self) -> anyhow::Result<GeometricBoundary> {
        match &self.boundary {
            Some(path) => util::read_boundary_file(path),
            None => self
                .preset
                .boundary()
                .with_context(|| format!("Invalid built-in boundary {:?}", self.preset)),
        }
    }

    /// Name of the boundary for report lines.
    pub(crate) fn boundary_label(&self) -> String {
        match &self.boundary {
            Some(path) => path.file_stem().map_or_else(
                || path.display().to_string(),
                |stem| stem.to_string_lossy().into_owned(),
            ),
            None => self.preset.label().to_owned(),
        }
    }

    /// Loads, cleans and classifies the frame data.
    pub(crate) fn process(&self) -> anyhow::Result<(GameStateProcessor, TableSummary)> {
        let boundary = self.load_boundary()?;
        let mut processor = GameStateProcessor::new(&self.data)
            .with_context(|| format!("Failed to open frame data: {}", self.data.display()))?;
        let summary = processor
            .process(&boundary)
            .with_context(|| format!("Failed to process frame data: {}", self.data.display()))?;
        Ok((processor, summary))
    }
}

/// Radar image and projection used for heatmaps.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct MapArg {
    /// Map profile JSON file (`extent`, `shift_x`, `shift_y`, `padding`)
    #[arg(long)]
    map_profile: Option<PathBuf>,

    /// Density grid cells per axis
    #[arg(long, default_value_t = 200)]
    grid_size: usize,
}

impl MapArg {
    pub(crate) fn projection(&self) -> anyhow::Result<MapProjection> {
        match &self.map_profile {
            Some(path) => util::read_map_profile(path),
            None => Ok(MapProjection::default()),
        }
    }
}
