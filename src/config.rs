use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::editor::{Direction, EditorOptions};

pub const DEFAULT_TICK_MS: u64 = 16;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceKey {
    Left,
    Down,
    Up,
    Right,
}

impl From<ReplaceKey> for Direction {
    fn from(key: ReplaceKey) -> Self {
        match key {
            ReplaceKey::Left => Self::Left,
            ReplaceKey::Down => Self::Down,
            ReplaceKey::Up => Self::Up,
            ReplaceKey::Right => Self::Right,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub no_status: bool,
    pub tick_ms: Option<u64>,
    pub replace_key: Option<ReplaceKey>,
    pub replace_glyph: Option<char>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            no_status: self.no_status || other.no_status,
            tick_ms: other.tick_ms.or(self.tick_ms),
            replace_key: other.replace_key.or(self.replace_key),
            replace_glyph: other.replace_glyph.or(self.replace_glyph),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }

    /// Tick interval, never shorter than one millisecond.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.unwrap_or(DEFAULT_TICK_MS).max(1))
    }

    /// Editor options with any replace overrides applied.
    pub fn editor_options(&self) -> Result<EditorOptions> {
        let mut options = EditorOptions::default();
        if let Some(key) = self.replace_key {
            options = options.with_replace_direction(key.into());
        }
        if let Some(glyph) = self.replace_glyph {
            options = options
                .with_replace_char(glyph)
                .with_context(|| format!("Invalid --replace-glyph {glyph:?}"))?;
        }
        Ok(options)
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("tilevim").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("tilevim")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("tilevim").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("tilevim").join("config");
        }
    }

    PathBuf::from(".tilevimrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".tilevimrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# tilevim defaults (saved with --save)".to_string());
    if flags.no_status {
        lines.push("--no-status".to_string());
    }
    if let Some(ms) = flags.tick_ms {
        lines.push(format!("--tick-ms {ms}"));
    }
    if let Some(key) = flags.replace_key {
        let key_str = match key {
            ReplaceKey::Left => "left",
            ReplaceKey::Down => "down",
            ReplaceKey::Up => "up",
            ReplaceKey::Right => "right",
        };
        lines.push(format!("--replace-key {key_str}"));
    }
    if let Some(glyph) = flags.replace_glyph {
        lines.push(format!("--replace-glyph {glyph}"));
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file {}", path.display()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--no-status" {
            flags.no_status = true;
        } else if token == "--tick-ms" {
            if let Some(next) = tokens.get(i + 1) {
                flags.tick_ms = next.parse().ok();
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--tick-ms=") {
            flags.tick_ms = value.parse().ok();
        } else if token == "--replace-key" {
            if let Some(next) = tokens.get(i + 1) {
                flags.replace_key = parse_replace_key(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--replace-key=") {
            flags.replace_key = parse_replace_key(value);
        } else if token == "--replace-glyph" {
            if let Some(next) = tokens.get(i + 1) {
                flags.replace_glyph = parse_glyph(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--replace-glyph=") {
            flags.replace_glyph = parse_glyph(value);
        } else if token == "--log-file" {
            if let Some(next) = tokens.get(i + 1) {
                flags.log_file = Some(PathBuf::from(next));
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--log-file=") {
            flags.log_file = Some(PathBuf::from(value));
        }
        i += 1;
    }
    flags
}

fn parse_replace_key(s: &str) -> Option<ReplaceKey> {
    match s {
        "left" => Some(ReplaceKey::Left),
        "down" => Some(ReplaceKey::Down),
        "up" => Some(ReplaceKey::Up),
        "right" => Some(ReplaceKey::Right),
        _ => None,
    }
}

/// A glyph flag takes exactly one character.
fn parse_glyph(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
