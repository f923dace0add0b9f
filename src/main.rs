use clap::{ArgGroup, Args, Parser, Subcommand};
use exposed_dropdown::app::{self, editor};
use exposed_dropdown::config::{self, MenuConfig};
#[cfg(feature = "harness")]
use exposed_dropdown::harness;
use exposed_dropdown::logging;
use exposed_dropdown::ui::theme;

/// Terminal demo of an exposed dropdown menu with type-to-filter.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Item to offer in the dropdowns. Repeat to build the list; replaces `menu.items`.
    #[arg(long = "item", value_name = "TEXT")]
    items: Vec<String>,

    /// Text shown in the fields on startup.
    #[arg(long)]
    default_item: Option<String>,

    /// Start with both dropdowns disabled.
    #[arg(long, default_value_t = false)]
    disabled: bool,

    /// Floating label of the fields.
    #[arg(long)]
    label: Option<String>,

    /// Log level override (off, error, warn, info, debug, trace).
    #[arg(long)]
    log_level: Option<String>,

    #[cfg(feature = "harness")]
    /// Render deterministic frames to stdout without entering interactive mode.
    #[arg(long, default_value_t = false)]
    harness_dump: bool,

    #[cfg(feature = "harness")]
    /// Harness frame width.
    #[arg(long, default_value_t = 60)]
    harness_width: u16,

    #[cfg(feature = "harness")]
    /// Harness frame height.
    #[arg(long, default_value_t = 24)]
    harness_height: u16,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Inspect or edit exposed-dropdown configuration.
    Config(ConfigCommand),
}

#[derive(Debug, Args)]
#[command(group(
    ArgGroup::new("config_action")
        .required(true)
        .multiple(false)
        .args(["edit", "path"])
))]
struct ConfigCommand {
    /// Open the config file in $VISUAL/$EDITOR/nvim/vim/vi.
    #[arg(long)]
    edit: bool,

    /// Print the config file path.
    #[arg(long)]
    path: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Command::Config(command)) = cli.command {
        return handle_config_command(command);
    }

    let config = config::load_or_create()?;
    theme::apply(config.theme);

    #[cfg(feature = "harness")]
    if cli.harness_dump {
        let dump = harness::render_demo_dump(cli.harness_width, cli.harness_height)?;
        println!("{dump}");
        return Ok(());
    }

    let level = match cli.log_level.as_deref() {
        Some(raw) => config::parse_level(raw)?,
        None => config.log.level,
    };
    logging::init(&config.log.file, level)?;

    let menu = apply_overrides(
        config.menu,
        cli.items,
        cli.default_item,
        cli.label,
        cli.disabled,
    );
    app::run(menu)
}

fn apply_overrides(
    mut menu: MenuConfig,
    items: Vec<String>,
    default_item: Option<String>,
    label: Option<String>,
    disabled: bool,
) -> MenuConfig {
    if !items.is_empty() {
        menu.items = items;
    }
    if let Some(default_item) = default_item {
        menu.default_item = default_item;
    }
    if let Some(label) = label {
        menu.label = label;
    }
    if disabled {
        menu.enabled = false;
    }
    menu
}

fn handle_config_command(command: ConfigCommand) -> anyhow::Result<()> {
    let path = config::ensure_config_file()?;

    if command.path {
        println!("{}", path.display());
        return Ok(());
    }

    if command.edit {
        editor::edit_file_with_system_editor(path.as_path())?;
        return Ok(());
    }

    Ok(())
}
