use anyhow::{Context, Result, bail};
use cardstmt_ingest::StatementParser;
use cardstmt_ingest::export::{write_csv, write_json};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

mod batch;
mod config;
mod logging;
mod state;

use config::{Config, OutputFormat};

#[derive(Parser, Debug)]
#[command(
    name = "cardstmt",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CARDSTMT_BUILD_SHA"), ")"),
    about = "Extract transactions from credit-card statement PDFs"
)]
struct Cli {
    /// Config file (default: ~/.cardstmt/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level (RUST_LOG still takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse statements (.pdf, or .txt holding already-extracted text) into one table
    Parse {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format (default: from config, else csv)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Write the table here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,

        /// Print per-file section counts to stderr
        #[arg(long)]
        summary: bool,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config (never overwrites)
    Init,
    /// Print the effective config as TOML
    Show,
    /// Print the default config path
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(cli.config.as_deref())?;

    let level = if cli.verbose { "debug" } else { cfg.logging.level.as_str() };
    logging::setup_logging(level);

    match cli.command {
        Command::Parse {
            files,
            format,
            out,
            summary,
        } => {
            let format = format.unwrap_or(cfg.output.format);
            parse(&cfg, &files, format, out.as_deref(), summary)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(cli.config.as_deref())?,
            ConfigCommand::Show => {
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
            ConfigCommand::Path => {
                let p = config::config_path().context("HOME is not set")?;
                println!("{}", p.display());
            }
        },
    }

    Ok(())
}

fn parse(
    cfg: &Config,
    files: &[PathBuf],
    format: OutputFormat,
    out: Option<&Path>,
    summary: bool,
) -> Result<()> {
    let parser = StatementParser::new(&cfg.layout).context("compile statement layout")?;
    let report = batch::process_files(&parser, files);

    for (path, e) in &report.failed {
        eprintln!("error: {}: {e:#}", path.display());
    }
    if report.all_failed() {
        bail!("no statement could be parsed ({} failed)", report.failed.len());
    }

    if summary {
        for s in &report.parsed {
            eprintln!(
                "{} | rows={} (credits={} debits={} interest={}) | net=${:.2} | months={}",
                s.path.display(),
                s.rows(),
                s.credits,
                s.debits,
                s.interest,
                s.net_amount,
                s.year_months.join(",")
            );
        }
        eprintln!(
            "Parsed {} of {} files, {} transactions",
            report.parsed.len(),
            files.len(),
            report.table.len()
        );
    }

    match out {
        Some(p) => {
            let file = File::create(p).with_context(|| format!("create {}", p.display()))?;
            write_table(&report.table, format, BufWriter::new(file))?;
        }
        None => write_table(&report.table, format, std::io::stdout().lock())?,
    }

    Ok(())
}

fn write_table<W: Write>(
    table: &cardstmt_ingest::StatementTable,
    format: OutputFormat,
    mut writer: W,
) -> Result<()> {
    match format {
        OutputFormat::Csv => write_csv(table, &mut writer)?,
        OutputFormat::Json => {
            write_json(table, &mut writer)?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}
