//! User configuration loading from `~/.exposed-dropdown/config.toml`.

use crate::fixtures;
use crate::ui::theme::ThemePalette;
use anyhow::{Context, Result, anyhow};
use ratatui::style::Color;
use serde::Deserialize;
use simplelog::LevelFilter;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const CONFIG_DIR: &str = ".exposed-dropdown";
const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "exposed-dropdown.log";

const DEFAULT_CONFIG_TOML: &str = r##"# exposed-dropdown configuration
# Colors accept `#RRGGBB` or named ANSI colors (e.g. "yellow", "dark_gray").

[theme]
border = "#78787f"
focused_border = "#6750a4"
title = "#d0bcff"
label = "#aaaab4"
text = "#e6e1e5"
dim = "dark_gray"
disabled = "#5a5a60"
toggle = "#cac4d0"
field_bg = "#24222a"
popup_border = "#938f99"
selected_fg = "black"
selected_bg = "#d0bcff"
info = "cyan"
error = "red"
hint_key = "yellow"

[menu]
label = "Fruit"
# items = ["Apple", "Banana", "Cherry"]
default_item = ""
enabled = true
max_visible_rows = 6

[log]
# off, error, warn, info, debug, trace
level = "info"
# file = "/tmp/exposed-dropdown.log"
"##;

/// Application configuration loaded from disk.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub theme: ThemePalette,
    pub menu: MenuConfig,
    pub log: LogConfig,
}

/// Contents of the demo dropdowns.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuConfig {
    pub label: String,
    pub items: Vec<String>,
    pub default_item: String,
    pub enabled: bool,
    pub max_visible_rows: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    pub level: LevelFilter,
    pub file: PathBuf,
}

/// Returns the config file path and creates default config if missing.
pub fn ensure_config_file() -> Result<PathBuf> {
    let path = config_path()?;
    ensure_default_config(&path)?;
    Ok(path)
}

/// Loads configuration from `~/.exposed-dropdown/config.toml`, creating defaults if missing.
pub fn load_or_create() -> Result<AppConfig> {
    let path = ensure_config_file()?;
    let content = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;

    let dir = path
        .parent()
        .ok_or_else(|| anyhow!("invalid config path: {}", path.display()))?;
    parse(&content, dir).with_context(|| format!("failed to load {}", path.display()))
}

fn parse(content: &str, dir: &Path) -> Result<AppConfig> {
    let raw: RawConfig = toml::from_str(content).context("failed to parse TOML")?;

    Ok(AppConfig {
        theme: raw.theme.into_theme()?,
        menu: raw.menu.into_menu(),
        log: raw.log.into_log(dir)?,
    })
}

fn config_path() -> Result<PathBuf> {
    let home =
        env::var_os("HOME").ok_or_else(|| anyhow!("HOME environment variable is not set"))?;
    Ok(PathBuf::from(home).join(CONFIG_DIR).join(CONFIG_FILE))
}

fn ensure_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }

    let dir = path
        .parent()
        .ok_or_else(|| anyhow!("invalid config path: {}", path.display()))?;
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    fs::write(path, DEFAULT_CONFIG_TOML)
        .with_context(|| format!("failed to write default config file {}", path.display()))?;
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawConfig {
    theme: RawTheme,
    menu: RawMenu,
    log: RawLog,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawTheme {
    border: Option<String>,
    focused_border: Option<String>,
    title: Option<String>,
    label: Option<String>,
    text: Option<String>,
    dim: Option<String>,
    disabled: Option<String>,
    toggle: Option<String>,
    field_bg: Option<String>,
    popup_border: Option<String>,
    selected_fg: Option<String>,
    selected_bg: Option<String>,
    info: Option<String>,
    error: Option<String>,
    hint_key: Option<String>,
}

impl RawTheme {
    fn into_theme(self) -> Result<ThemePalette> {
        let defaults = ThemePalette::default();

        Ok(ThemePalette {
            border: parse_or_default(self.border, defaults.border, "theme.border")?,
            focused_border: parse_or_default(
                self.focused_border,
                defaults.focused_border,
                "theme.focused_border",
            )?,
            title: parse_or_default(self.title, defaults.title, "theme.title")?,
            label: parse_or_default(self.label, defaults.label, "theme.label")?,
            text: parse_or_default(self.text, defaults.text, "theme.text")?,
            dim: parse_or_default(self.dim, defaults.dim, "theme.dim")?,
            disabled: parse_or_default(self.disabled, defaults.disabled, "theme.disabled")?,
            toggle: parse_or_default(self.toggle, defaults.toggle, "theme.toggle")?,
            field_bg: parse_or_default(self.field_bg, defaults.field_bg, "theme.field_bg")?,
            popup_border: parse_or_default(
                self.popup_border,
                defaults.popup_border,
                "theme.popup_border",
            )?,
            selected_fg: parse_or_default(
                self.selected_fg,
                defaults.selected_fg,
                "theme.selected_fg",
            )?,
            selected_bg: parse_or_default(
                self.selected_bg,
                defaults.selected_bg,
                "theme.selected_bg",
            )?,
            info: parse_or_default(self.info, defaults.info, "theme.info")?,
            error: parse_or_default(self.error, defaults.error, "theme.error")?,
            hint_key: parse_or_default(self.hint_key, defaults.hint_key, "theme.hint_key")?,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawMenu {
    label: Option<String>,
    items: Option<Vec<String>>,
    default_item: Option<String>,
    enabled: Option<bool>,
    max_visible_rows: Option<usize>,
}

impl RawMenu {
    fn into_menu(self) -> MenuConfig {
        MenuConfig {
            label: self.label.unwrap_or_else(|| "Fruit".to_owned()),
            items: self.items.unwrap_or_else(fixtures::demo_items),
            default_item: self.default_item.unwrap_or_default(),
            enabled: self.enabled.unwrap_or(true),
            max_visible_rows: self
                .max_visible_rows
                .unwrap_or(crate::dropdown::DEFAULT_MAX_VISIBLE_ROWS),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLog {
    level: Option<String>,
    file: Option<PathBuf>,
}

impl RawLog {
    fn into_log(self, config_dir: &Path) -> Result<LogConfig> {
        let level = match self.level {
            Some(raw) => parse_level(&raw)?,
            None => LevelFilter::Info,
        };
        let file = self.file.unwrap_or_else(|| config_dir.join(LOG_FILE));
        Ok(LogConfig { level, file })
    }
}

/// Parses a log level name such as `debug` or `off`.
pub fn parse_level(raw: &str) -> Result<LevelFilter> {
    LevelFilter::from_str(raw.trim())
        .map_err(|_| anyhow!("invalid value for `log.level`: {raw}"))
}

fn parse_or_default(value: Option<String>, default: Color, field: &str) -> Result<Color> {
    match value {
        Some(raw) => parse_color(raw.trim())
            .with_context(|| format!("invalid color value for `{field}`: {raw}")),
        None => Ok(default),
    }
}

fn parse_color(raw: &str) -> Result<Color> {
    if let Some(hex) = raw.strip_prefix('#') {
        if hex.len() != 6 {
            return Err(anyhow!("hex colors must be in #RRGGBB format"));
        }
        let red = u8::from_str_radix(&hex[0..2], 16).context("invalid red hex channel")?;
        let green = u8::from_str_radix(&hex[2..4], 16).context("invalid green hex channel")?;
        let blue = u8::from_str_radix(&hex[4..6], 16).context("invalid blue hex channel")?;
        return Ok(Color::Rgb(red, green, blue));
    }

    let normalized = raw.trim().to_ascii_lowercase().replace(['-', ' '], "_");
    let color = match normalized.as_str() {
        "reset" => Color::Reset,
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "dark_gray" | "dark_grey" => Color::DarkGray,
        "light_red" => Color::LightRed,
        "light_green" => Color::LightGreen,
        "light_yellow" => Color::LightYellow,
        "light_blue" => Color::LightBlue,
        "light_magenta" => Color::LightMagenta,
        "light_cyan" => Color::LightCyan,
        "white" => Color::White,
        _ => return Err(anyhow!("unsupported color format")),
    };

    Ok(color)
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_CONFIG_TOML, parse, parse_color, parse_level};
    use crate::fixtures;
    use ratatui::style::Color;
    use simplelog::LevelFilter;
    use std::path::Path;

    #[test]
    fn parse_color_supports_hex() {
        assert_eq!(
            parse_color("#112233").unwrap(),
            Color::Rgb(0x11, 0x22, 0x33)
        );
    }

    #[test]
    fn parse_color_supports_named_values() {
        assert_eq!(parse_color("light_yellow").unwrap(), Color::LightYellow);
        assert_eq!(parse_color("dark-gray").unwrap(), Color::DarkGray);
        assert!(parse_color("#12345").is_err());
    }

    #[test]
    fn default_config_parses() {
        let config = parse(DEFAULT_CONFIG_TOML, Path::new("/cfg")).unwrap();
        assert_eq!(config.menu.label, "Fruit");
        assert_eq!(config.menu.items, fixtures::demo_items());
        assert!(config.menu.enabled);
        assert_eq!(config.menu.max_visible_rows, 6);
        assert_eq!(config.log.level, LevelFilter::Info);
        assert_eq!(config.log.file, Path::new("/cfg/exposed-dropdown.log"));
        assert_eq!(config.theme.selected_bg, Color::Rgb(0xd0, 0xbc, 0xff));
    }

    #[test]
    fn menu_section_overrides_items() {
        let config = parse(
            "[menu]\nitems = [\"Abb\", \"Abc\"]\ndefault_item = \"Abc\"\nenabled = false\n",
            Path::new("/cfg"),
        )
        .unwrap();
        assert_eq!(config.menu.items, vec!["Abb", "Abc"]);
        assert_eq!(config.menu.default_item, "Abc");
        assert!(!config.menu.enabled);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(parse("[theme]\nborder = \"plaid\"\n", Path::new("/cfg")).is_err());
        assert!(parse("[log]\nlevel = \"loud\"\n", Path::new("/cfg")).is_err());
        assert_eq!(parse_level("DEBUG").unwrap(), LevelFilter::Debug);
    }
}
