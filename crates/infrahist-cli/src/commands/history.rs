//! History command

use clap::Args;
use infrahist_core::{GraphDiffEngine, Granularity, PresentOptions, TextRenderer};
use infrahist_engine::commands::history::{execute_history, HistoryContext, HistoryOutcome};
use infrahist_engine::Home;
use std::io::Write;

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Show property changes as a table instead of resource trees
    #[arg(short, long)]
    pub properties: bool,
}

pub fn execute(
    args: HistoryArgs,
    home: &Home,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = home.revision_store();
    let ctx = HistoryContext {
        store: &store,
        regions: home,
        engine: &GraphDiffEngine,
        renderer: &TextRenderer,
    };
    let options = PresentOptions {
        granularity: if args.properties {
            Granularity::Properties
        } else {
            Granularity::Resources
        },
        verbose,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match execute_history(&mut out, &ctx, options)? {
        HistoryOutcome::Unavailable { reason } => writeln!(out, "{}", reason)?,
        HistoryOutcome::Completed(_) => {}
    }
    Ok(())
}
