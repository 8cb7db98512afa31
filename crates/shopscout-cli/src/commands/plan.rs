//! Query planning debugging command: print the backend body, don't execute

use crate::app::{OutputFormat, PlanArgs};
use anyhow::Result;
use shopscout_core::{build, extract, to_query_body, Pagination, SortHint};

pub async fn run(args: PlanArgs, _format: OutputFormat) -> Result<()> {
    let query = args.query.join(" ");
    let sort_hint: SortHint = args.sort.parse()?;

    let intent = extract(&query);
    let description = build(&intent, &query, Pagination::default(), sort_hint);
    let body = to_query_body(&description);

    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
