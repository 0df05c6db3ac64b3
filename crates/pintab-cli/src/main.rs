//! pintab CLI: icon rules for pinned note tabs
//!
//! Commands: init, resolve, rules, set-icon, conflicts, promote, preview,
//! presets, recent, settings, watch, completions

mod commands;

use std::path::PathBuf;
use std::str::FromStr;

use clap::{CommandFactory, Parser};
use pintab_core::RuleKind;
use pintab_engine::OutputFormat;

#[derive(Parser)]
#[command(name = "pintab")]
#[command(version)]
#[command(about = "Icon rules for pinned note tabs")]
struct Cli {
    /// Settings file holding rules and options
    #[arg(long, global = true, default_value = "pintab.json")]
    settings: PathBuf,

    /// Vault root directory
    #[arg(long, global = true, default_value = ".")]
    vault: PathBuf,

    /// Output format: json, table, or markdown
    #[arg(long, global = true, default_value = "json")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Write a default settings file
    Init,
    /// Resolve the icon for notes (all notes when no path is given)
    #[command(alias = "r")]
    Resolve {
        /// Vault-relative note paths
        paths: Vec<PathBuf>,
    },
    /// Inspect and edit the ordered rule list
    #[command(subcommand)]
    Rules(RulesCommand),
    /// Assign an icon to a note by exact name (an empty icon removes it)
    SetIcon { basename: String, icon: String },
    /// Report rules shadowed by earlier rules
    Conflicts {
        /// Only analyze this rule
        #[arg(long)]
        rule: Option<usize>,
    },
    /// Move a rule above the earliest rule that shadows it
    Promote { index: usize },
    /// List the notes a pattern would match
    Preview {
        #[arg(long = "type", value_parser = RuleKind::from_str)]
        kind: RuleKind,
        #[arg(long)]
        pattern: String,
    },
    /// Built-in pattern presets
    #[command(subcommand)]
    Presets(PresetsCommand),
    /// Recently used icons
    #[command(subcommand)]
    Recent(RecentCommand),
    /// Show or change options
    #[command(subcommand)]
    Settings(SettingsCommand),
    /// Re-resolve every note whenever the vault or settings change
    Watch,
    /// Print shell completions
    Completions { shell: clap_complete::Shell },
}

#[derive(clap::Subcommand)]
enum RulesCommand {
    /// List rules in priority order
    List,
    /// Add a rule at the highest priority
    Add {
        #[arg(long = "type", value_parser = RuleKind::from_str)]
        kind: RuleKind,
        #[arg(long)]
        pattern: String,
        #[arg(long)]
        icon: String,
    },
    /// Edit a rule in place
    Edit {
        index: usize,
        #[arg(long = "type", value_parser = RuleKind::from_str)]
        kind: Option<RuleKind>,
        #[arg(long)]
        pattern: Option<String>,
        #[arg(long)]
        icon: Option<String>,
    },
    /// Delete a rule
    Rm { index: usize },
    /// Move a rule to another position
    Mv { from: usize, to: usize },
    /// Raise a rule by one position
    Up { index: usize },
    /// Lower a rule by one position
    Down { index: usize },
    /// Duplicate a rule right below itself
    Dup { index: usize },
}

#[derive(clap::Subcommand)]
enum PresetsCommand {
    /// List built-in presets
    List,
    /// Add a preset as a rule at the highest priority
    Apply { name: String },
}

#[derive(clap::Subcommand)]
enum RecentCommand {
    /// List recently used icons, most recent first
    List,
    /// Record an icon as just used
    Record { icon: String },
}

#[derive(clap::Subcommand)]
enum SettingsCommand {
    /// Print the current settings
    Show,
    /// Change one option
    Set {
        /// shrink-pinned-tabs, pinned-tab-width, show-default-icon,
        /// default-icon, enable-frontmatter, or frontmatter-property
        key: String,
        value: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = commands::Ctx {
        settings_path: cli.settings,
        vault: cli.vault,
        format: cli.format,
    };

    match cli.command {
        Some(Commands::Init) => commands::init(&ctx),
        Some(Commands::Resolve { paths }) => commands::resolve(&ctx, &paths),
        Some(Commands::Rules(cmd)) => match cmd {
            RulesCommand::List => commands::rules_list(&ctx),
            RulesCommand::Add {
                kind,
                pattern,
                icon,
            } => commands::rules_add(&ctx, kind, pattern, icon),
            RulesCommand::Edit {
                index,
                kind,
                pattern,
                icon,
            } => commands::rules_edit(&ctx, index, kind, pattern, icon),
            RulesCommand::Rm { index } => commands::rules_rm(&ctx, index),
            RulesCommand::Mv { from, to } => commands::rules_mv(&ctx, from, to),
            RulesCommand::Up { index } => commands::rules_up(&ctx, index),
            RulesCommand::Down { index } => commands::rules_down(&ctx, index),
            RulesCommand::Dup { index } => commands::rules_dup(&ctx, index),
        },
        Some(Commands::SetIcon { basename, icon }) => commands::set_icon(&ctx, &basename, &icon),
        Some(Commands::Conflicts { rule }) => commands::conflicts(&ctx, rule),
        Some(Commands::Promote { index }) => commands::promote(&ctx, index),
        Some(Commands::Preview { kind, pattern }) => commands::preview(&ctx, &kind, &pattern),
        Some(Commands::Presets(PresetsCommand::List)) => commands::presets_list(&ctx),
        Some(Commands::Presets(PresetsCommand::Apply { name })) => {
            commands::presets_apply(&ctx, &name)
        }
        Some(Commands::Recent(RecentCommand::List)) => commands::recent_list(&ctx),
        Some(Commands::Recent(RecentCommand::Record { icon })) => {
            commands::recent_record(&ctx, &icon)
        }
        Some(Commands::Settings(SettingsCommand::Show)) => commands::settings_show(&ctx),
        Some(Commands::Settings(SettingsCommand::Set { key, value })) => {
            commands::settings_set(&ctx, &key, &value)
        }
        Some(Commands::Watch) => commands::watch(&ctx),
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "pintab", &mut std::io::stdout());
            Ok(())
        }
        None => {
            println!(
                "pintab v{} — icon rules for pinned note tabs",
                env!("CARGO_PKG_VERSION")
            );
            println!("Run `pintab --help` for usage.");
            Ok(())
        }
    }
}
