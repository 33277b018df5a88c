use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use libquwei::{
    create_keyboard, render_detail, render_grid, zone_label, PositionCodec, QuweiConfig,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quwei")]
#[command(about = "GB 2312 position code (区位码) lookup and keyboard")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, overrides the config (RUST_LOG takes precedence over both)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the character for a four-digit code
    Lookup {
        /// Code such as 1601
        code: String,
    },
    /// Print every character of a zone
    Zone {
        /// Zone number (1-94); defaults to the configured zone
        zone: Option<u32>,
        /// Characters per row
        #[arg(long)]
        columns: Option<usize>,
    },
    /// Search codes by prefix (1-3 digits) or exactly (4 digits)
    Search {
        query: String,
    },
    /// Print the codes of the given characters
    Locate {
        text: String,
    },
    /// Interactive keyboard: type digits and press Enter
    Type,
}

fn init_tracing(filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    // A subscriber may already be installed when embedded; keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .try_init();
}

fn load_config(path: Option<&PathBuf>) -> Result<QuweiConfig> {
    match path {
        Some(path) => QuweiConfig::load_toml(path),
        None => Ok(QuweiConfig::default()),
    }
}

fn run_lookup(codec: &PositionCodec, code: &str) -> Result<()> {
    let entry = codec
        .resolve_str(code.trim())
        .with_context(|| format!("looking up {}", code.trim()))?;
    println!("{}", render_detail(&entry));
    Ok(())
}

fn run_zone(codec: &PositionCodec, zone: u32, columns: usize) -> Result<()> {
    let entries = codec.entries_in_zone(zone)?;
    println!("{} ({} characters)", zone_label(zone as u8), entries.len());
    println!("{}", render_grid(&entries, columns));
    Ok(())
}

fn run_search(codec: &PositionCodec, query: &str, columns: usize) -> Result<()> {
    if let Some(zone) = PositionCodec::zone_hint(query) {
        println!("{}", zone_label(zone));
    }
    let entries = codec.search(query);
    if entries.is_empty() {
        println!("  (no matches)");
    } else {
        println!("{}", render_grid(&entries, columns));
    }
    Ok(())
}

fn run_locate(codec: &PositionCodec, text: &str) {
    for ch in text.chars() {
        match codec.locate(ch) {
            Some(entry) => println!("{}  {}  {}", ch, entry.code, entry.code_description()),
            None => println!("{}  (not in the position code table)", ch),
        }
    }
}

fn run_keyboard(config: &QuweiConfig) -> Result<()> {
    let mut keyboard = create_keyboard(config);

    println!("{}", libquwei::keyboard::HELP);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        keyboard.type_str(&line);
        println!("{}", keyboard.status_line());
        println!("文本: {}", keyboard.document());
        io::stdout().flush()?;
    }

    println!();
    println!("{}", keyboard.take_document());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    init_tracing(cli.log_level.as_deref().unwrap_or(&config.log_filter));

    let codec = config.base().codec();
    match cli.command {
        Some(Commands::Lookup { code }) => run_lookup(&codec, &code),
        Some(Commands::Zone { zone, columns }) => {
            let zone = zone.unwrap_or(config.base().default_zone as u32);
            run_zone(&codec, zone, columns.unwrap_or(config.grid_columns))
        }
        Some(Commands::Search { query }) => run_search(&codec, &query, config.grid_columns),
        Some(Commands::Locate { text }) => {
            run_locate(&codec, &text);
            Ok(())
        }
        Some(Commands::Type) | None => run_keyboard(&config),
    }
}
