use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "genfin")]
#[command(version)]
#[command(about = "Next-gen financial intelligence in your terminal", long_about = None)]
pub struct Cli {
    /// Gemini model to use (e.g., gemini-1.5-pro, gemini-1.5-flash)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Ask a single question and print the answer
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Output format for one-shot mode
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, requires = "prompt")]
    pub output_format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Initialize configuration
    Init,
    /// Start a chat session (default)
    Chat,
    /// Show version information
    Version,
    /// Check configuration and credentials
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Text,
    /// JSON structured output
    Json,
    /// Markdown formatted output
    Markdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_args() {
        let cli = Cli::try_parse_from([
            "genfin",
            "--prompt",
            "What is an ETF?",
            "--output-format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.prompt.as_deref(), Some("What is an ETF?"));
        assert_eq!(cli.output_format, OutputFormat::Json);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_output_format_requires_prompt() {
        assert!(Cli::try_parse_from(["genfin", "--output-format", "json"]).is_err());
    }

    #[test]
    fn test_subcommand() {
        let cli = Cli::try_parse_from(["genfin", "-m", "gemini-1.5-flash", "status"]).unwrap();
        assert_eq!(cli.model.as_deref(), Some("gemini-1.5-flash"));
        assert_eq!(cli.command, Some(Commands::Status));
    }
}
