use std::path::PathBuf;

use zonewatch_core::Side;

use crate::{command::DataArg, schema::report::EntryTimeReport, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EntryTimeArg {
    #[clap(flatten)]
    data: DataArg,

    /// Team name as recorded in the frame data
    #[arg(long, default_value = "Team2")]
    team: String,

    /// Side the team plays on (`T` or `CT`)
    #[arg(long, default_value = "T")]
    side: Side,

    /// Area name the team enters
    #[arg(long, default_value = "BombsiteB")]
    area: String,

    /// Minimum number of distinct players observed at the same clock value
    #[arg(long, default_value_t = 2)]
    min_players: usize,

    /// Write the result as JSON to this path instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &EntryTimeArg) -> anyhow::Result<()> {
    let EntryTimeArg {
        data,
        team,
        side,
        area,
        min_players,
        output,
    } = arg;
    let (processor, _summary) = data.process()?;
    let rounds = processor.entry_time_samples(team, *side, area, *min_players)?;
    let report = EntryTimeReport::new(team, *side, area, *min_players, rounds);
    Output::save_json(&report, output.clone())
}
