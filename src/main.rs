use anyhow::Context;
use clap::{Parser, Subcommand};
use modsdesc::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Maps MODS descriptive metadata to a normalized Description
///
/// The `map` command prints the Description of a MODS document as JSON.
/// Data quality warnings are logged to stderr, or embedded in the output
/// with **--warnings**. The `normalize` command prints the document rewritten
/// into the canonical shape used for round-trip comparison.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Turn on debugging output
    #[clap(short, long, global = true)]
    debug: bool,

    /// Log only errors
    #[clap(short, long, global = true)]
    quiet: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Map a MODS document to a Description
    Map {
        /// MODS XML file
        #[clap(value_name = "FILE")]
        file: PathBuf,

        /// Object identifier used to choose the canonical PURL, with or
        /// without the "druid:" prefix
        #[clap(long, value_name = "id")]
        druid: Option<String>,

        /// Map records without a title instead of failing
        #[clap(long)]
        no_require_title: bool,

        /// Output format
        #[clap(long, value_name = "json|json-pretty", default_value_t)]
        format: OutputFormat,

        /// Embed warnings in the output next to the description
        #[clap(long)]
        warnings: bool,
    },

    /// Normalize a MODS document for round-trip comparison
    Normalize {
        /// MODS XML file
        #[clap(value_name = "FILE")]
        file: PathBuf,

        /// Object identifier preferred when marking the primary PURL
        #[clap(long, value_name = "id")]
        druid: Option<String>,
    },
}

#[derive(Serialize)]
struct Report<'a> {
    description: &'a Description,
    warnings: Vec<Warning>,
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Cannot read '{}'", path.display()))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.debug {
        log::LevelFilter::Debug
    } else if args.quiet {
        log::LevelFilter::Error
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();

    match args.command {
        Command::Map { file, druid, no_require_title, format, warnings } => {
            let xml = read(&file)?;
            let config = MapperConfig {
                require_title: !no_require_title,
                druid,
                ..MapperConfig::default()
            };
            let context = || format!("Cannot map '{}'", file.display());
            let out = if warnings {
                let log = WarningLog::new();
                let description = map_str(&xml, &config, &log).with_context(context)?;
                format.render(&Report { description: &description, warnings: log.into_warnings() })?
            } else {
                let description = map_str(&xml, &config, &LogNotifier).with_context(context)?;
                format.render(&description)?
            };
            println!("{out}");
        }
        Command::Normalize { file, druid } => {
            let xml = read(&file)?;
            let config = NormalizerConfig { druid, ..NormalizerConfig::default() };
            let out = normalize_str(&xml, &config)
                .with_context(|| format!("Cannot normalize '{}'", file.display()))?;
            println!("{out}");
        }
    }
    Ok(())
}
