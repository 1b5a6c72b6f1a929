//! Check command implementation.
//!
//! Runs grouping, reachability, synthesis and root validation exactly like
//! `split`, then prints the plan instead of writing it.

use fob_split::Splitter;

use crate::cli::CheckArgs;
use crate::commands::utils;
use crate::config::ConfigOverrides;
use crate::error::Result;
use crate::ui;

/// Execute the check command.
pub async fn execute(args: CheckArgs) -> Result<()> {
    let overrides = ConfigOverrides::from(&args.graph);
    let utils::SplitInputs { config, graph, .. } = utils::prepare(&args.graph, &overrides).await?;

    let namer = config.namer()?;
    let outcome = Splitter::new(config.split_options()).split(&graph, &namer)?;
    let document = outcome.plan_document(&graph);

    for warning in &outcome.warnings {
        ui::warning(&warning.to_string());
    }

    if args.json {
        println!("{}", document.to_json()?);
    } else {
        ui::print_split_summary(&document);
    }

    let root = outcome
        .plan
        .root_package()
        .map_or(config.root_group.as_str(), |p| p.name.as_str());
    ui::success(&format!("No disallowed dependencies reach {root}"));
    Ok(())
}
