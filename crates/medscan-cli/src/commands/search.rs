//! Search command implementation.

use crate::cli::SearchArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use medscan_terminology::TerminologyIndex;

/// Execute the search command.
pub async fn execute_search(args: SearchArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let limit = args.limit.unwrap_or(config.settings.search_limit);
    if limit == 0 {
        return Err(CliError::InvalidInput("Limit must be greater than 0".to_string()));
    }

    let path = config.engine.terminology_path.clone();
    let index_config = config.engine.index.clone();
    let index = tokio::task::spawn_blocking(move || {
        TerminologyIndex::load_or_fallback(path.as_deref(), index_config)
    })
    .await
    .map_err(|e| CliError::Config(format!("Failed to load terminology: {}", e)))?;

    let candidates = index.search(&args.query, limit);
    println!("{}", formatter.format_candidates(&candidates)?);
    Ok(())
}
