//! Command handlers. Each loads the settings, runs one engine operation,
//! saves after a mutation, and prints the result.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context};
use serde::Serialize;
use tracing::{info, warn};

use pintab_core::{presets, Entity, Rule, RuleKind, Settings};
use pintab_engine::{format_records, OutputFormat};
use pintab_vault::{load_entity, load_settings, save_settings, scan_vault, VaultEvent, VaultWatcher};

pub struct Ctx {
    pub settings_path: PathBuf,
    pub vault: PathBuf,
    pub format: OutputFormat,
}

impl Ctx {
    fn load(&self) -> anyhow::Result<Settings> {
        load_settings(&self.settings_path)
            .with_context(|| format!("loading settings from {}", self.settings_path.display()))
    }

    fn save(&self, settings: &Settings) -> anyhow::Result<()> {
        save_settings(&self.settings_path, settings)
            .with_context(|| format!("saving settings to {}", self.settings_path.display()))
    }

    fn entities(&self) -> anyhow::Result<Vec<Entity>> {
        scan_vault(&self.vault).with_context(|| format!("scanning vault {}", self.vault.display()))
    }

    fn print<T: Serialize>(&self, records: &[T], columns: &[&str]) {
        println!("{}", format_records(records, columns, self.format));
    }
}

#[derive(Serialize)]
struct RuleRow<'a> {
    index: usize,
    #[serde(rename = "type")]
    kind: &'a str,
    #[serde(rename = "match")]
    pattern: &'a str,
    icon: &'a str,
    icon_kind: &'static str,
}

const RULE_COLUMNS: &[&str] = &["index", "type", "match", "icon", "icon_kind"];

fn rule_rows(settings: &Settings) -> Vec<RuleRow<'_>> {
    settings
        .icon_mappings
        .iter()
        .enumerate()
        .map(|(index, rule)| RuleRow {
            index,
            kind: rule.kind.as_str(),
            pattern: &rule.pattern,
            icon: &rule.icon,
            icon_kind: rule.icon_token().kind(),
        })
        .collect()
}

/// Rule mutations all end the same way: save, then show the new order.
fn save_and_list(ctx: &Ctx, settings: &Settings) -> anyhow::Result<()> {
    ctx.save(settings)?;
    ctx.print(&rule_rows(settings), RULE_COLUMNS);
    Ok(())
}

pub fn init(ctx: &Ctx) -> anyhow::Result<()> {
    if ctx.settings_path.exists() {
        println!("Settings already exist at {}", ctx.settings_path.display());
        return Ok(());
    }
    ctx.save(&Settings::default())?;
    println!("Initialized pintab settings at {}", ctx.settings_path.display());
    Ok(())
}

pub fn resolve(ctx: &Ctx, paths: &[PathBuf]) -> anyhow::Result<()> {
    let settings = ctx.load()?;
    let entities = if paths.is_empty() {
        ctx.entities()?
    } else {
        paths
            .iter()
            .map(|p| {
                load_entity(&ctx.vault, p).with_context(|| format!("loading note {}", p.display()))
            })
            .collect::<anyhow::Result<Vec<_>>>()?
    };

    let resolutions = pintab_engine::reevaluate(&entities, &settings);
    ctx.print(&resolutions, &["path", "icon", "source.kind", "source.index"]);
    Ok(())
}

pub fn rules_list(ctx: &Ctx) -> anyhow::Result<()> {
    let settings = ctx.load()?;
    ctx.print(&rule_rows(&settings), RULE_COLUMNS);
    Ok(())
}

pub fn rules_add(ctx: &Ctx, kind: RuleKind, pattern: String, icon: String) -> anyhow::Result<()> {
    let mut settings = ctx.load()?;
    settings.recent_icons.record_use(&icon);
    settings
        .icon_mappings
        .insert_at_highest_priority(Rule::new(kind, pattern, icon));
    save_and_list(ctx, &settings)
}

pub fn rules_edit(
    ctx: &Ctx,
    index: usize,
    kind: Option<RuleKind>,
    pattern: Option<String>,
    icon: Option<String>,
) -> anyhow::Result<()> {
    let mut settings = ctx.load()?;
    let rule = settings.icon_mappings.get_mut(index)?;
    if let Some(kind) = kind {
        rule.kind = kind;
    }
    if let Some(pattern) = pattern {
        rule.pattern = pattern;
    }
    if let Some(icon) = icon {
        rule.icon = icon.clone();
        settings.recent_icons.record_use(&icon);
    }
    save_and_list(ctx, &settings)
}

pub fn rules_rm(ctx: &Ctx, index: usize) -> anyhow::Result<()> {
    let mut settings = ctx.load()?;
    settings.icon_mappings.remove_at(index)?;
    save_and_list(ctx, &settings)
}

pub fn rules_mv(ctx: &Ctx, from: usize, to: usize) -> anyhow::Result<()> {
    let mut settings = ctx.load()?;
    settings.icon_mappings.move_to(from, to)?;
    save_and_list(ctx, &settings)
}

pub fn rules_up(ctx: &Ctx, index: usize) -> anyhow::Result<()> {
    let mut settings = ctx.load()?;
    settings.icon_mappings.move_up(index)?;
    save_and_list(ctx, &settings)
}

pub fn rules_down(ctx: &Ctx, index: usize) -> anyhow::Result<()> {
    let mut settings = ctx.load()?;
    settings.icon_mappings.move_down(index)?;
    save_and_list(ctx, &settings)
}

pub fn rules_dup(ctx: &Ctx, index: usize) -> anyhow::Result<()> {
    let mut settings = ctx.load()?;
    settings.icon_mappings.duplicate_at(index)?;
    save_and_list(ctx, &settings)
}

pub fn set_icon(ctx: &Ctx, basename: &str, icon: &str) -> anyhow::Result<()> {
    let mut settings = ctx.load()?;
    settings.icon_mappings.set_exact_icon(basename, icon);
    settings.recent_icons.record_use(icon);
    save_and_list(ctx, &settings)
}

#[derive(Serialize)]
struct ConflictRow<'a> {
    rule_index: usize,
    entity: &'a str,
    shadowing_rule_index: usize,
}

pub fn conflicts(ctx: &Ctx, rule: Option<usize>) -> anyhow::Result<()> {
    let settings = ctx.load()?;
    let entities = ctx.entities()?;
    let store = &settings.icon_mappings;

    match rule {
        Some(rule_index) => {
            let rows: Vec<ConflictRow<'_>> =
                pintab_engine::find_conflicts(store, rule_index, &entities)?
                    .into_iter()
                    .map(|c| ConflictRow {
                        rule_index,
                        entity: &c.entity.path,
                        shadowing_rule_index: c.shadowing_rule_index,
                    })
                    .collect();
            ctx.print(&rows, &["rule_index", "entity", "shadowing_rule_index"]);
        }
        None => {
            let reports = pintab_engine::analyze(store, &entities);
            ctx.print(&reports, &["rule_index", "matched", "unreachable"]);
        }
    }
    Ok(())
}

pub fn promote(ctx: &Ctx, index: usize) -> anyhow::Result<()> {
    let mut settings = ctx.load()?;
    let entities = ctx.entities()?;

    // Moving above the earliest shadowing rule clears every conflict at once.
    let target = pintab_engine::find_conflicts(&settings.icon_mappings, index, &entities)?
        .iter()
        .map(|c| c.shadowing_rule_index)
        .min();

    match target {
        Some(target) => {
            pintab_engine::promote(&mut settings.icon_mappings, index, target)?;
            info!(from = index, to = target, "rule promoted above shadowing rule");
            save_and_list(ctx, &settings)
        }
        None => bail!("rule {index} is not shadowed by any earlier rule"),
    }
}

pub fn preview(ctx: &Ctx, kind: &RuleKind, pattern: &str) -> anyhow::Result<()> {
    let entities = ctx.entities()?;
    let hits = pintab_engine::preview(kind, pattern, &entities);
    ctx.print(&hits, &["path", "basename"]);
    Ok(())
}

#[derive(Serialize)]
struct PresetRow {
    name: &'static str,
    description: &'static str,
    #[serde(rename = "type")]
    kind: String,
    pattern: &'static str,
    icon: &'static str,
}

pub fn presets_list(ctx: &Ctx) -> anyhow::Result<()> {
    let rows: Vec<PresetRow> = presets::builtin()
        .into_iter()
        .map(|p| PresetRow {
            name: p.name,
            description: p.description,
            kind: p.kind.to_string(),
            pattern: p.pattern,
            icon: p.icon,
        })
        .collect();
    ctx.print(&rows, &["name", "type", "pattern", "icon"]);
    Ok(())
}

pub fn presets_apply(ctx: &Ctx, name: &str) -> anyhow::Result<()> {
    let preset = presets::find(name)?;
    let mut settings = ctx.load()?;
    settings.recent_icons.record_use(preset.icon);
    settings
        .icon_mappings
        .insert_at_highest_priority(preset.to_rule());
    save_and_list(ctx, &settings)
}

pub fn recent_list(ctx: &Ctx) -> anyhow::Result<()> {
    let settings = ctx.load()?;
    print_recent(ctx, &settings);
    Ok(())
}

pub fn recent_record(ctx: &Ctx, icon: &str) -> anyhow::Result<()> {
    let mut settings = ctx.load()?;
    settings.recent_icons.record_use(icon);
    ctx.save(&settings)?;
    print_recent(ctx, &settings);
    Ok(())
}

fn print_recent(ctx: &Ctx, settings: &Settings) {
    #[derive(Serialize)]
    struct RecentRow<'a> {
        icon: &'a str,
    }
    let rows: Vec<RecentRow<'_>> = settings
        .recent_icons
        .list()
        .iter()
        .map(|icon| RecentRow { icon })
        .collect();
    ctx.print(&rows, &["icon"]);
}

pub fn settings_show(ctx: &Ctx) -> anyhow::Result<()> {
    let settings = ctx.load()?;
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}

fn parse_bool(key: &str, value: &str) -> anyhow::Result<bool> {
    match value {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => bail!("{key} expects true or false, got '{value}'"),
    }
}

pub fn settings_set(ctx: &Ctx, key: &str, value: &str) -> anyhow::Result<()> {
    let mut settings = ctx.load()?;
    match key {
        "shrink-pinned-tabs" => settings.shrink_pinned_tabs = parse_bool(key, value)?,
        "pinned-tab-width" => {
            settings.pinned_tab_width = value
                .parse()
                .with_context(|| format!("{key} expects a pixel width, got '{value}'"))?;
        }
        "show-default-icon" => settings.show_default_icon = parse_bool(key, value)?,
        "default-icon" => settings.default_icon = value.to_string(),
        "enable-frontmatter" => settings.enable_frontmatter = parse_bool(key, value)?,
        "frontmatter-property" => {
            if value.is_empty() {
                bail!("{key} cannot be empty");
            }
            settings.frontmatter_property = value.to_string();
        }
        other => bail!("unknown setting '{other}'"),
    }
    ctx.save(&settings)?;
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Absolute form of a settings path that may not exist yet: the parent
/// directory is canonicalized and the file name joined back on.
fn canonical_file(path: &Path) -> PathBuf {
    if let Ok(full) = path.canonicalize() {
        return full;
    }
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    match path.file_name() {
        Some(name) => canonical(parent).join(name),
        None => path.to_path_buf(),
    }
}

/// Print one resolution batch per change, as newline-delimited JSON when
/// the output format is JSON.
pub fn watch(ctx: &Ctx) -> anyhow::Result<()> {
    let vault = canonical(&ctx.vault);
    let settings_path = canonical_file(&ctx.settings_path);
    let watcher = VaultWatcher::start(&vault, Some(&settings_path))
        .with_context(|| format!("watching {}", vault.display()))?;

    let rerun = |reason: &str| -> anyhow::Result<()> {
        let settings = ctx.load()?;
        let entities = ctx.entities()?;
        let resolutions = pintab_engine::reevaluate(&entities, &settings);
        info!(reason, notes = resolutions.len(), "re-evaluated");
        match ctx.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(&resolutions)?),
            format => println!(
                "{}",
                format_records(&resolutions, &["path", "icon", "source.kind"], format)
            ),
        }
        Ok(())
    };

    rerun("startup")?;
    loop {
        let Some(first) = watcher.recv_timeout(Duration::from_secs(1)) else {
            continue;
        };
        // Editors write in bursts; settle, then evaluate once per burst.
        std::thread::sleep(Duration::from_millis(100));
        let mut events = watcher.drain();
        events.insert(0, first);
        let reason = if events.contains(&VaultEvent::SettingsChanged) {
            "settings changed"
        } else {
            "vault changed"
        };
        // A half-written settings file or a note removed mid-scan clears
        // up on the next event.
        if let Err(e) = rerun(reason) {
            warn!(error = %format!("{e:#}"), reason, "re-evaluation failed");
        }
    }
}
