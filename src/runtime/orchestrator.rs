use anyhow::Result;
use colored::Colorize;

use crate::{
    app::{load_config, load_config_from, Config},
    cli::{handle_command, Cli},
    models::ModelFactory,
    session::ConversationController,
    tui::{run_ui, App},
    utils::{log_info, log_warn},
};

/// Main runtime orchestrator
pub struct Orchestrator {
    cli: Cli,
    config: Config,
}

impl Orchestrator {
    /// Create a new orchestrator from CLI args
    pub fn new(cli: Cli) -> Result<Self> {
        let config = Self::resolve_config(&cli)?;
        Ok(Self { cli, config })
    }

    /// Configuration for this run, with the `--model` override applied
    pub fn resolve_config(cli: &Cli) -> Result<Config> {
        let mut config = if let Some(config_path) = &cli.config {
            load_config_from(config_path)?
        } else {
            match load_config() {
                Ok(cfg) => cfg,
                Err(e) => {
                    eprintln!("⚠️  Failed to load config: {}. Using defaults.", e);
                    Config::default()
                }
            }
        };

        if let Some(model) = &cli.model {
            config.model.name = model.clone();
        }

        Ok(config)
    }

    /// Run the orchestrator
    pub async fn run(self) -> Result<()> {
        if let Some(command) = &self.cli.command {
            if handle_command(command, &self.config)? {
                return Ok(());
            }
        }

        println!(
            "💰 Starting GenFin with model: {}",
            self.config.model.name.green()
        );

        if ModelFactory::resolve_api_key(&self.config.model).is_none() {
            log_warn(
                "🔑",
                format!("{} is not set", self.config.model.api_key_env),
            );
        }

        let generator = ModelFactory::create(&self.config)?;
        let app = App::new(&self.config, ConversationController::new(generator));

        log_info("🚀", "entering terminal UI");
        run_ui(app).await
    }
}
