//! Tilevim - A vim-style modal editor for tile maps.
//!
//! # Usage
//!
//! ```bash
//! tilevim maps/meadow.map
//! tilevim --replace-key down --replace-glyph : maps/meadow.map
//! tilevim --log-file tilevim.log
//! ```

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;

use tilevim::app::App;
use tilevim::config::{
    ConfigFlags, ReplaceKey, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use tilevim::map::{self, Map};

/// A vim-style modal editor for tile maps
#[derive(Parser, Debug)]
#[command(name = "tilevim", version, about, long_about = None)]
struct Cli {
    /// Map file to edit (a built-in demo map when omitted)
    #[arg(value_name = "FILE")]
    map: Option<PathBuf>,

    /// Milliseconds between editor ticks
    #[arg(long, value_name = "MS")]
    tick_ms: Option<u64>,

    /// Direction key that replaces the tile in insert mode
    #[arg(long, value_enum)]
    replace_key: Option<ReplaceKey>,

    /// Character written by the replace key
    #[arg(long, value_name = "CHAR")]
    replace_glyph: Option<char>,

    /// Hide the status line
    #[arg(long)]
    no_status: bool,

    /// Write tracing output to a file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive(tracing::Level::WARN.into()),
            )
            .with_writer(std::io::stderr)
            .init();
        return Ok(());
    };

    // The terminal belongs to the UI, so a log file gets everything at debug
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tilevim=debug")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_map(path: Option<&PathBuf>) -> Result<(String, Map)> {
    let Some(path) = path else {
        let map = Map::parse(map::DEMO).context("Built-in demo map is invalid")?;
        return Ok(("demo".to_string(), map));
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read map {}", path.display()))?;
    let map = Map::parse(&text).with_context(|| format!("Invalid map {}", path.display()))?;
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    Ok((name, map))
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_ref())?;
    tracing::debug!(?effective, "effective flags");

    let options = effective.editor_options()?;
    let (map_name, map) = load_map(cli.map.as_ref())?;
    tracing::info!(
        map = %map_name,
        width = map.width(),
        height = map.height(),
        "map loaded"
    );

    // Run the application
    let mut app = App::new(map_name, map)
        .with_options(options)
        .with_tick_interval(effective.tick_interval())
        .with_status_visible(!effective.no_status)
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    app.run().context("Application error")
}
