use std::path::{Path, PathBuf};

use zonewatch_analysis::GameStateProcessor;
use zonewatch_core::Side;

use crate::{
    command::{DataArg, MapArg},
    render,
    schema::report::{self, HeatmapReport},
    util::Output,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct HeatmapArg {
    #[clap(flatten)]
    data: DataArg,

    #[clap(flatten)]
    map: MapArg,

    /// Radar image of the map
    #[arg(long)]
    map_image: PathBuf,

    /// Team name as recorded in the frame data
    #[arg(long, default_value = "Team2")]
    team: String,

    /// Side the team plays on (`T` or `CT`)
    #[arg(long, default_value = "CT")]
    side: Side,

    /// Area name to plot
    #[arg(long, default_value = "BombsiteB")]
    area: String,

    /// PNG file to write the heatmap to
    #[arg(long, default_value = "heatmap.png")]
    image_output: PathBuf,

    /// Write heatmap details as JSON to this path instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &HeatmapArg) -> anyhow::Result<()> {
    let (processor, _summary) = arg.data.process()?;
    let report = plot_heatmap_on_map(
        &processor,
        &arg.map,
        &arg.map_image,
        &arg.area,
        &arg.team,
        arg.side,
        &arg.image_output,
    )?;
    Output::save_json(&report, arg.output.clone())
}

/// Draws the density of one team/side/area selection over the radar image
/// and saves it as an image file.
pub(crate) fn plot_heatmap_on_map(
    processor: &GameStateProcessor,
    map: &MapArg,
    map_image: &Path,
    area_name: &str,
    team: &str,
    side: Side,
    image_output: &Path,
) -> anyhow::Result<HeatmapReport> {
    let projection = map.projection()?;
    let data = processor.heatmap_data(&projection, area_name, team, side)?;
    let background = render::load_background(map_image)?;
    let overlay = render::render(&background, &projection, &data, map.grid_size)?;
    render::save_image(&overlay.image, image_output)?;

    Ok(HeatmapReport {
        title: data.title,
        points: data.points.len(),
        viewport: data.viewport.map(report::bounds_array),
        level: overlay.level,
        image: image_output.to_owned(),
    })
}
