//! Export the position code table to JSON or CSV format
//!
//! Usage:
//!   cargo run -p export_table -- --format json
//!   cargo run -p export_table -- --zone 16 --format csv --output zone16.csv
//!   cargo run -p export_table -- --charset gb2312 --output gb2312.json

use anyhow::Context;
use clap::{Parser, ValueEnum};
use libquwei_core::{CharacterEntry, Charset, PositionCodec};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Json,
    Csv,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CharsetArg {
    Gb18030,
    Gb2312,
}

impl From<CharsetArg> for Charset {
    fn from(arg: CharsetArg) -> Self {
        match arg {
            CharsetArg::Gb18030 => Charset::Gb18030,
            CharsetArg::Gb2312 => Charset::Gb2312,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "export_table")]
#[command(about = "Export the GB 2312 position code table to JSON or CSV format")]
struct Args {
    /// Export a single zone (1-94) instead of the whole table
    #[arg(short, long)]
    zone: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Which cells count as characters
    #[arg(long, value_enum, default_value_t = CharsetArg::Gb18030)]
    charset: CharsetArg,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let codec = PositionCodec::with_charset(args.charset.into());

    let entries = match args.zone {
        Some(zone) => codec
            .entries_in_zone(zone)
            .with_context(|| format!("exporting zone {}", zone))?,
        None => codec.all_entries(),
    };
    info!(count = entries.len(), format = ?args.format, "exporting entries");

    let output = match args.format {
        Format::Json => export_json(&entries)?,
        Format::Csv => export_csv(&entries),
    };

    if let Some(path) = args.output {
        std::fs::write(&path, output)
            .with_context(|| format!("writing {}", path.display()))?;
    } else {
        print!("{}", output);
    }

    Ok(())
}

fn export_json(entries: &[CharacterEntry]) -> anyhow::Result<String> {
    let json = serde_json::to_string_pretty(entries)?;
    Ok(json)
}

fn export_csv(entries: &[CharacterEntry]) -> String {
    let mut output = String::from("code,zone,position,character\n");
    for entry in entries {
        // Codes stay quoted so spreadsheets keep the leading zero
        let escaped = entry.character.replace('"', "\"\"");
        output.push_str(&format!(
            "\"{}\",{},{},\"{}\"\n",
            entry.code, entry.zone, entry.position, escaped
        ));
    }
    output
}
