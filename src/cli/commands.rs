use anyhow::Result;
use colored::Colorize;

use crate::{
    app::{get_config_dir, init_config, Config},
    constants::LOCAL_CONFIG_PATH,
    models::ModelFactory,
};

use super::Commands;

/// Handle CLI subcommands; returns false when the chat should start
pub fn handle_command(command: &Commands, config: &Config) -> Result<bool> {
    match command {
        Commands::Init => {
            println!("Initializing GenFin configuration...");
            let created = init_config()?;
            if created.is_empty() {
                println!("Configuration already present, nothing to do.");
            }
            for path in created {
                println!("  • Created {}", path.display().to_string().green());
            }
            Ok(true)
        }
        Commands::Version => {
            show_version();
            Ok(true)
        }
        Commands::Status => {
            show_status(config)?;
            Ok(true)
        }
        Commands::Chat => Ok(false),
    }
}

/// Show version information
pub fn show_version() {
    println!("GenFin v{}", env!("CARGO_PKG_VERSION"));
    println!("   Next-gen financial intelligence");
}

/// Show configuration and credential status
fn show_status(config: &Config) -> Result<()> {
    println!("GenFin Status:");
    println!();

    println!("  Model: {}", config.model.name.green());
    println!("  Endpoint: {}", config.model.base_url);

    let global = get_config_dir()?.join("config.toml");
    if global.exists() {
        println!("  [OK] Global configuration: {}", global.display());
    } else {
        println!("  [WARNING] Global configuration: Not found (using defaults)");
    }
    if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
        println!("  [OK] Project configuration: {}", LOCAL_CONFIG_PATH);
    }

    if ModelFactory::resolve_api_key(&config.model).is_some() {
        println!("  [OK] API key: Set");
    } else {
        println!(
            "  {} API key: Not set (export {})",
            "[ERROR]".red(),
            config.model.api_key_env
        );
    }

    println!();
    Ok(())
}
