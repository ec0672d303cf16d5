use anyhow::Result;
use clap::Parser;

use genfin::{
    app::get_config_dir,
    cli::Cli,
    constants::LOG_FILE_NAME,
    runtime::{NonInteractiveRunner, Orchestrator},
    utils::{init_logger, log_error},
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { "info" } else { "warn" };

    if let Some(prompt) = cli.prompt.clone() {
        init_logger(level, None)?;
        run_non_interactive(cli, prompt).await
    } else {
        // The TUI owns the terminal, so logs go to a file
        let log_path = get_config_dir()?.join(LOG_FILE_NAME);
        init_logger(level, Some(log_path.as_path()))?;

        let orchestrator = Orchestrator::new(cli)?;
        orchestrator.run().await
    }
}

/// Run in one-shot mode
async fn run_non_interactive(cli: Cli, prompt: String) -> Result<()> {
    let config = Orchestrator::resolve_config(&cli)?;
    let runner = NonInteractiveRunner::new(&config)?;

    let result = runner.execute(prompt).await?;
    println!("{}", runner.format_result(&result, cli.output_format));

    if result.warning {
        log_error("❌", "question was not answered");
        std::process::exit(1);
    }

    Ok(())
}
