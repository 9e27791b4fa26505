//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for plotmap using clap's derive macros.

use clap::{Parser, Subcommand};

/// plotmap - Serve land plots as GeoJSON on an interactive map
#[derive(Parser, Debug)]
#[command(name = "plotmap")]
#[command(version)]
#[command(about = "Serve land plots as GeoJSON on an interactive map", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Inspect plot data
    Plots {
        #[command(subcommand)]
        action: PlotsCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}

/// Plot data commands
#[derive(Subcommand, Debug)]
pub enum PlotsCommands {
    /// Parse the plots CSV and report the feature count
    Check {
        /// CSV path (default: plots.csv_path from config)
        path: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args_means_server() {
        let cli = Cli::try_parse_from(["plotmap"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["plotmap", "serve", "-c", "prod.toml"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Serve)));
        assert_eq!(cli.config.as_deref(), Some("prod.toml"));
    }

    #[test]
    fn test_config_generate_args() {
        let cli =
            Cli::try_parse_from(["plotmap", "config", "generate", "out.toml", "--force"]).unwrap();
        match cli.command {
            Some(Commands::Config {
                action: ConfigCommands::Generate { output_path, force },
            }) => {
                assert_eq!(output_path.as_deref(), Some("out.toml"));
                assert!(force);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_plots_check_without_path() {
        let cli = Cli::try_parse_from(["plotmap", "plots", "check"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Plots {
                action: PlotsCommands::Check { path: None }
            })
        ));
    }
}
