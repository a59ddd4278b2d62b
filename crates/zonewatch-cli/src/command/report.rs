//! Choke point report
//!
//! Prints how often a team entered the boundary on one side, the average time
//! it reached an area with enough players, and optionally renders a heatmap of
//! the opposing side in that area.

use std::{fmt::Display, path::PathBuf};

use zonewatch_core::Side;

use crate::command::{DataArg, MapArg, heatmap::plot_heatmap_on_map};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReportArg {
    #[clap(flatten)]
    data: DataArg,

    #[clap(flatten)]
    map: MapArg,

    /// Team name as recorded in the frame data
    #[arg(long, default_value = "Team2")]
    team: String,

    /// Side for the entry frequency and entry time
    #[arg(long, default_value = "T")]
    side: Side,

    /// Area name for the entry time and the heatmap
    #[arg(long, default_value = "BombsiteB")]
    area: String,

    /// Minimum number of distinct players observed at the same clock value
    #[arg(long, default_value_t = 2)]
    min_players: usize,

    /// Radar image; the heatmap is skipped without it
    #[arg(long)]
    map_image: Option<PathBuf>,

    /// Side plotted on the heatmap
    #[arg(long, default_value = "CT")]
    heatmap_side: Side,

    /// PNG file to write the heatmap to
    #[arg(long, default_value = "heatmap.png")]
    image_output: PathBuf,
}

pub(crate) fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let ReportArg {
        data,
        map,
        team,
        side,
        area,
        min_players,
        map_image,
        heatmap_side,
        image_output,
    } = arg;
    let label = data.boundary_label();

    let (processor, summary) = data.process()?;
    println!(
        "Found {} weapon classes: {}",
        summary.weapon_classes.len(),
        join(summary.weapon_classes.iter())
    );
    println!(
        "Found {} area names: {}",
        summary.area_names.len(),
        join(summary.area_names.iter())
    );

    let frequency = processor.entry_frequency(team, *side)?;
    println!(
        "Frequency of {team} entering {label} boundary on {side} side: {:.2}%",
        frequency * 100.0
    );

    let average_time = processor.average_entry_time(team, *side, area, *min_players)?;
    println!("Average timer for {team} entering {label} boundary on {side} side: {average_time}");

    if let Some(map_image) = map_image {
        let heatmap = plot_heatmap_on_map(
            &processor,
            map,
            map_image,
            area,
            team,
            *heatmap_side,
            image_output,
        )?;
        println!("{} saved to {}", heatmap.title, heatmap.image.display());
    }
    Ok(())
}

fn join<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    let items = items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{items}]")
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::*;
    use crate::{
        command::{CommandArgs, Mode},
        schema::boundary::BoundaryPreset,
    };

    #[test]
    fn test_report_defaults() {
        let args = CommandArgs::try_parse_from(["zonewatch", "report", "frames.json"]).unwrap();
        let Mode::Report(arg) = args.mode else {
            panic!("expected report mode");
        };
        assert_eq!(arg.data.preset, BoundaryPreset::LightBlue);
        assert_eq!(arg.data.boundary_label(), "light blue");
        assert_eq!(arg.map.grid_size, 200);
        assert_eq!(arg.team, "Team2");
        assert_eq!((arg.side, arg.heatmap_side), (Side::T, Side::CT));
        assert_eq!(arg.min_players, 2);
        assert!(arg.map_image.is_none());
    }

    #[test]
    fn test_join() {
        assert_eq!(join(["Rifle", "SMG"]), "[Rifle, SMG]");
        assert_eq!(join(Vec::<String>::new()), "[]");
    }
}
