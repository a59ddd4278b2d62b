use std::path::PathBuf;

use zonewatch_core::Side;

use crate::{command::DataArg, schema::report::EntryFrequencyReport, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EntryFrequencyArg {
    #[clap(flatten)]
    data: DataArg,

    /// Team name as recorded in the frame data
    #[arg(long, default_value = "Team2")]
    team: String,

    /// Side the team plays on (`T` or `CT`)
    #[arg(long, default_value = "T")]
    side: Side,

    /// Write the result as JSON to this path instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &EntryFrequencyArg) -> anyhow::Result<()> {
    let EntryFrequencyArg {
        data,
        team,
        side,
        output,
    } = arg;
    let (processor, _summary) = data.process()?;
    let entries = processor.entry_rounds(team, *side)?;
    let frequency = processor.entry_frequency(team, *side)?;
    let report = EntryFrequencyReport::new(team, *side, entries, frequency);
    Output::save_json(&report, output.clone())
}
