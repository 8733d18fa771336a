//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::config::{Config, OutputFormat};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use medscan_worker::{EngineWorker, ExtractionSession};
use std::fs;
use std::io::{self, Read, Write};

/// Execute the analyze command.
pub async fn execute_analyze(args: AnalyzeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let show_progress =
        config.settings.progress && !args.no_progress && formatter.format() == OutputFormat::Table;
    let text = read_input(args)?;

    let mut session = ExtractionSession::new(EngineWorker::spawn(config.engine.clone()));
    session.init().await?;

    let result = session
        .analyze_to_end(text, |percent| {
            if show_progress {
                eprint!("\r{}", formatter.progress(percent));
                let _ = io::stderr().flush();
            }
        })
        .await;
    if show_progress {
        eprintln!();
    }

    session.shutdown().await?;
    let entities = result?;

    println!("{}", formatter.format_entities(&entities)?);
    Ok(())
}

/// Read the text to analyze from stdin, a file, or the positional argument.
fn read_input(args: AnalyzeArgs) -> Result<String> {
    if args.stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else if let Some(path) = args.file {
        Ok(fs::read_to_string(path)?)
    } else if let Some(text) = args.text {
        Ok(text)
    } else {
        Err(CliError::InvalidInput(
            "Provide TEXT, --file or --stdin".to_string(),
        ))
    }
}
