//! Command-line interface for the codewalker utility
//!
//! Sanitizes Mermaid diagram source written by generative models, either
//! directly or pulled out of a markdown response.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::colorizer::colorize_output;
use codewalker::core::logging::{init_logging, LOG_FORMAT_ENV, LOG_LEVEL_ENV};
use codewalker::core::{extract_diagrams, SanitizeConfig, TokenFamily};
use codewalker::Sanitizer;

/// Codewalker - Repair AI-generated Mermaid diagram source
#[derive(Parser)]
#[command(name = "codewalker")]
#[command(about = "Repair AI-generated Mermaid diagram source before rendering")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sanitize a Mermaid diagram
    Sanitize {
        /// Input file containing the diagram (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the sanitized diagram (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Comma-separated passes to run (fences, edge-labels, node-labels,
        /// semicolons, all, none); defaults to CODEWALKER_PASSES or all
        #[arg(long)]
        passes: Option<String>,

        /// When to use colors in output
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,

        /// Print original, sanitized text and per-pass results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract and sanitize the mermaid blocks of a markdown document
    Extract {
        /// Input markdown file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the blocks as written, without sanitizing
        #[arg(long)]
        raw: bool,

        /// Print the blocks as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Report which passes would change a diagram
    Check {
        /// Input file to check (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Comma-separated passes to check; defaults to CODEWALKER_PASSES or all
        #[arg(long)]
        passes: Option<String>,
    },

    /// Show the node shape token families
    Families {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// When to colorize output
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Use colors if output is a terminal and NO_COLOR is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Main CLI application
#[derive(Default)]
pub struct CodewalkerApp;

impl CodewalkerApp {
    pub fn new() -> Self {
        Self
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level_str = std::env::var(LOG_LEVEL_ENV)
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| cli.log_level.as_str().to_string());

        let log_format_str = std::env::var(LOG_FORMAT_ENV)
            .ok()
            .unwrap_or_else(|| cli.log_format.as_str().to_string());

        if let Err(e) = init_logging(Some(&log_level_str), Some(&log_format_str)) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Codewalker v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Sanitize {
                input,
                output,
                passes,
                color,
                json,
            } => self.sanitize_command(input, output, passes, color, json, cli.verbose),
            Commands::Extract {
                input,
                output,
                raw,
                json,
            } => self.extract_command(input, output, raw, json, cli.verbose),
            Commands::Check { input, passes } => self.check_command(input, passes, cli.verbose),
            Commands::Families { json } => self.families_command(json, cli.verbose),
        }
    }

    /// Resolve the pass list from the flag, then the environment
    fn resolve_config(passes: Option<&str>) -> Result<SanitizeConfig> {
        let config: SanitizeConfig = match passes {
            Some(list) => list.parse()?,
            None => SanitizeConfig::from_env()?,
        };
        Ok(config)
    }

    /// Handle the sanitize command
    fn sanitize_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        passes: Option<String>,
        color: ColorChoice,
        json: bool,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;
        let config = Self::resolve_config(passes.as_deref())?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
            eprintln!("Running passes: {}", config);
        }

        debug!(passes = %config, input_len = content.len(), "Sanitizing input");
        let diagram = Sanitizer::with_config(&config).sanitize_diagram(&content);

        if verbose {
            for outcome in diagram.outcomes() {
                if outcome.changed {
                    eprintln!("  {} changed the diagram", outcome.pass);
                }
            }
        }

        if json {
            let rendered = serde_json::to_string_pretty(&diagram)?;
            return self.write_output(output, &rendered);
        }

        let final_output = if self.should_colorize(&output, color) {
            colorize_output(diagram.sanitized())
        } else {
            diagram.into_sanitized()
        };
        self.write_output(output, &final_output)
    }

    /// Handle the extract command
    fn extract_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        raw: bool,
        json: bool,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;
        let blocks = extract_diagrams(&content);
        info!(block_count = blocks.len(), "Extracted mermaid blocks");

        if verbose {
            eprintln!("Found {} mermaid block(s)", blocks.len());
        }

        let sanitizer = Sanitizer::new();

        if json {
            let entries: Vec<serde_json::Value> = blocks
                .iter()
                .map(|block| {
                    let mut entry = serde_json::json!({
                        "language": block.language,
                        "offset": block.offset,
                        "source": block.source,
                    });
                    if !raw {
                        entry["sanitized"] = sanitizer.run(&block.source).into();
                    }
                    entry
                })
                .collect();
            let rendered = serde_json::to_string_pretty(&entries)?;
            return self.write_output(output, &rendered);
        }

        let diagrams: Vec<String> = blocks
            .iter()
            .map(|block| {
                if raw {
                    block.source.clone()
                } else {
                    sanitizer.run(&block.source).trim_end().to_string()
                }
            })
            .collect();

        self.write_output(output, &diagrams.join("\n\n"))
    }

    /// Handle the check command
    fn check_command(
        &self,
        input: Option<PathBuf>,
        passes: Option<String>,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;
        let config = Self::resolve_config(passes.as_deref())?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let diagram = Sanitizer::with_config(&config).sanitize_diagram(&content);
        for outcome in diagram.outcomes() {
            if outcome.changed {
                println!("✗ {}: would change", outcome.pass);
            } else {
                println!("✓ {}: unchanged", outcome.pass);
            }
        }

        let changed = diagram.outcomes().iter().filter(|o| o.changed).count();
        if changed > 0 {
            return Err(anyhow!(
                "{} of {} passes would change the diagram",
                changed,
                diagram.outcomes().len()
            ));
        }
        Ok(())
    }

    /// Handle the families command
    fn families_command(&self, json: bool, verbose: bool) -> Result<()> {
        if verbose {
            eprintln!("Listing token families in match order");
        }

        if json {
            let families: Vec<serde_json::Value> = TokenFamily::ALL
                .iter()
                .map(|family| {
                    serde_json::json!({
                        "name": family.to_string(),
                        "open": family.open(),
                        "close": family.close(),
                    })
                })
                .collect();
            let listing = serde_json::json!({
                "families": families,
                "total": TokenFamily::ALL.len(),
            });
            println!("{}", serde_json::to_string_pretty(&listing)?);
        } else {
            println!("Token families (longest match first):");
            for family in TokenFamily::ALL {
                println!(
                    "  {:<4} {:<4} {}",
                    family.open(),
                    family.close(),
                    family
                );
            }
        }

        Ok(())
    }

    /// Determine if we should colorize the output based on color choice and output destination
    ///
    /// Output written to a file is never colorized.
    fn should_colorize(&self, output: &Option<PathBuf>, color: ColorChoice) -> bool {
        let to_stdout = match output {
            None => true,
            Some(p) => p.to_str() == Some("-"),
        };
        if !to_stdout {
            return false;
        }

        match color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                std::env::var("NO_COLOR").is_err()
                    && crossterm::tty::IsTty::is_tty(&std::io::stdout())
            }
        }
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .with_context(|| format!("Failed to read input file '{}'", path.display())),
            _ => {
                let mut content = String::new();
                io::stdin()
                    .read_to_string(&mut content)
                    .context("Failed to read stdin")?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        let stdout_content = if content.is_empty() || content.ends_with('\n') {
            content.to_string()
        } else {
            format!("{}\n", content)
        };

        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content)
                    .with_context(|| format!("Failed to write output file '{}'", path.display()))?;
            }
            _ => {
                print!("{}", stdout_content);
                io::stdout().flush()?;
            }
        }
        Ok(())
    }
}
