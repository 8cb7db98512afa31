//! Intent extraction debugging command

use crate::app::{ExtractArgs, OutputFormat};
use crate::output;
use anyhow::Result;
use shopscout_core::Config;

pub async fn run(args: ExtractArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let query = args.query.join(" ");
    let intent = super::search::build_intent(&query, config.recognizer.is_some(), config).await;
    output::print_intent(&intent, format)?;
    Ok(())
}
