//! Config command implementation.
//!
//! Shows, validates and creates dashboard configuration files.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};

use tailrisk_config::{ConfigError, DashboardConfig};

use crate::cli::OutputFormat;
use crate::output::{print_header, print_output, print_success, print_warning, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Check a configuration file
    Validate(ValidateArgs),

    /// Write a configuration file with default values
    Init(InitArgs),
}

/// Arguments for validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// File to check. Defaults to the --config file.
    pub path: Option<PathBuf>,
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Destination file
    #[arg(default_value = "tailrisk.toml")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Execute the config command.
pub fn execute(
    args: ConfigArgs,
    config: DashboardConfig,
    config_path: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(&config, config_path, format),
        ConfigCommand::Validate(v) => {
            let path = v
                .path
                .or(config_path)
                .ok_or_else(|| anyhow!("no configuration file given"))?;
            validate(path)
        }
        ConfigCommand::Init(init) => write_default(init),
    }
}

fn show(config: &DashboardConfig, path: Option<PathBuf>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let source = path.map_or_else(|| "defaults".to_string(), |p| p.display().to_string());
            print_header(&format!("Configuration ({source})"));
            println!("{}", config.to_toml_string()?);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        OutputFormat::Csv => {
            let rows = vec![
                KeyValue::new("default_symbol", config.default_symbol.clone()),
                KeyValue::new(
                    "default_confidence_pct",
                    config.default_confidence_pct.to_string(),
                ),
                KeyValue::new("start", config.start.to_string()),
                KeyValue::new("end", config.end.to_string()),
                KeyValue::new("quantile_method", config.quantile_method.to_string()),
                KeyValue::new("data", config.data.kind()),
            ];
            print_output(&rows, format)?;
        }
    }
    Ok(())
}

fn validate(path: PathBuf) -> Result<()> {
    let contents = std::fs::read_to_string(&path)?;
    let problems: Vec<String> = match DashboardConfig::from_toml_str(&contents) {
        Ok(_) => Vec::new(),
        Err(ConfigError::MultipleValidationErrors(errors)) => errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect(),
        Err(e) => vec![e.to_string()],
    };
    if problems.is_empty() {
        print_success(&format!("{} is valid", path.display()));
        return Ok(());
    }
    for p in &problems {
        print_warning(p);
    }
    Err(anyhow!("{} has {} problem(s)", path.display(), problems.len()))
}

fn write_default(args: InitArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        return Err(anyhow!(
            "{} already exists; pass --force to overwrite",
            args.path.display()
        ));
    }
    std::fs::write(&args.path, DashboardConfig::default().to_toml_string()?)?;
    print_success(&format!("Wrote {}", args.path.display()));
    Ok(())
}
