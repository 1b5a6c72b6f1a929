//! Schema command implementation.

use crate::cli::SchemaArgs;
use crate::commands::utils;
use crate::config::SplitConfig;
use crate::error::Result;
use crate::ui;

/// Print or write the JSON schema of fob-split.config.json.
pub async fn execute(args: SchemaArgs) -> Result<()> {
    let mut schema = serde_json::to_string_pretty(&SplitConfig::json_schema())?;
    schema.push('\n');

    match args.output {
        Some(path) => {
            utils::write_file(&path, &schema).await?;
            ui::success(&format!("Wrote schema to {}", path.display()));
        }
        None => print!("{schema}"),
    }
    Ok(())
}
