use std::path::PathBuf;

use crate::{command::DataArg, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SummaryArg {
    #[clap(flatten)]
    data: DataArg,

    /// Write the summary as JSON to this path instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SummaryArg) -> anyhow::Result<()> {
    let (_processor, summary) = arg.data.process()?;
    Output::save_json(&summary, arg.output.clone())
}
