use anyhow::Result;
use console::style;
use skillset_core::{
    CatalogItem, CatalogSource, Category, Editor, ProjectConfig, ScratchExtraction, archive,
    catalog, config, install,
};
use std::path::{Path, PathBuf};

use crate::error::CliError;
use crate::ui::{self, Spinner};

const DESCRIPTION_WIDTH: usize = 35;

/// Where a command runs and where it takes its catalog from.
#[derive(Debug, Clone)]
pub struct Context {
    pub project_root: PathBuf,
    /// Local catalog tarball used instead of downloading one.
    pub archive: Option<PathBuf>,
}

impl Context {
    pub fn require_config(&self) -> Result<ProjectConfig> {
        config::read(&self.project_root).ok_or_else(|| CliError::NotInitialized.into())
    }

    pub fn items_dir(&self, config: &ProjectConfig, category: Category) -> PathBuf {
        self.project_root.join(&config.items(category).directory)
    }
}

pub async fn fetch_catalog(ctx: &Context, source: &CatalogSource) -> Result<ScratchExtraction> {
    tracing::debug!(
        project = %ctx.project_root.display(),
        repo = %source.repo,
        branch = %source.branch,
        archive = ?ctx.archive,
        "Fetching catalog"
    );
    let spinner = Spinner::start("Fetching skills catalog...");

    let result = match &ctx.archive {
        Some(path) => archive::acquire_local(path).await,
        None => archive::acquire(source).await,
    };

    match result {
        Ok(scratch) => {
            tracing::debug!(
                container = %scratch.container().display(),
                root = %scratch.root().display(),
                "Catalog extracted"
            );
            spinner.succeed("Skills catalog loaded");
            Ok(scratch)
        }
        Err(source) => {
            spinner.fail("Failed to fetch skills catalog");
            Err(CliError::Network { source }.into())
        }
    }
}

pub async fn add(ctx: &Context, id: &str, category: Category) -> Result<()> {
    let config = ctx.require_config()?;
    let kind = category.singular();

    if config.is_active(category, id) {
        ui::warning(format!("The {kind} \"{id}\" is already installed."));
        return Ok(());
    }

    let scratch = fetch_catalog(ctx, &config.source()).await?;
    let items = catalog::enumerate(scratch.root(), category)?;
    let item = items
        .iter()
        .find(|item| item.id == id)
        .ok_or_else(|| CliError::ItemNotFound {
            category,
            id: id.to_string(),
        })?;

    let spinner = Spinner::start(format!("Installing {id}..."));
    let target = ctx.items_dir(&config, category);
    install_for(config.editor, item, &target)?;
    spinner.succeed(format!("Installed {id}"));

    scratch.release();

    record_install(ctx, category, id)?;

    println!();
    ui::success(format!("The {kind} \"{id}\" was added successfully!"));
    Ok(())
}

/// Mark an already copied item active. A failed write is reported as
/// [`CliError::ConfigWrite`]; the installed files are left in place.
fn record_install(ctx: &Context, category: Category, id: &str) -> Result<()> {
    match config::add_item(category, id, &ctx.project_root) {
        Ok(true) => Ok(()),
        Ok(false) => {
            ui::warning(format!(
                "{} disappeared; \"{id}\" was installed but not recorded.",
                config::CONFIG_FILE_NAME
            ));
            Ok(())
        }
        Err(source) => Err(CliError::ConfigWrite {
            id: id.to_string(),
            source,
        }
        .into()),
    }
}

/// Install with the layout `editor` expects: agents are flattened for
/// editors that read them as single files.
pub fn install_for(editor: Editor, item: &CatalogItem, target: &Path) -> skillset_core::Result<PathBuf> {
    match item.category {
        Category::Agents if editor.flat_agents() => install::install_agent(item, target),
        _ => install::install_item(item, target),
    }
}

pub fn remove(ctx: &Context, id: &str, category: Category) -> Result<()> {
    let config = ctx.require_config()?;
    let kind = category.singular();

    if !config.is_active(category, id) {
        ui::warning(format!("The {kind} \"{id}\" is not installed."));
        return Ok(());
    }

    let dir = ctx.items_dir(&config, category);
    if !install::remove_item(id, &dir) {
        ui::warning(format!(
            "Could not find {kind} \"{id}\" on disk, but removing it from the config."
        ));
    }

    config::remove_item(category, id, &ctx.project_root)?;

    ui::success(format!("The {kind} \"{id}\" was removed successfully!"));
    Ok(())
}

pub async fn list(ctx: &Context, local: bool, category: Category) -> Result<()> {
    if local {
        let config = ctx.require_config()?;
        list_installed(&ctx.items_dir(&config, category), &config, category);
        return Ok(());
    }

    let config = config::read(&ctx.project_root);
    let source = config.as_ref().map(ProjectConfig::source).unwrap_or_default();

    let scratch = fetch_catalog(ctx, &source).await?;
    let mut items = catalog::enumerate(scratch.root(), category)?;
    scratch.release();

    if let Some(config) = &config {
        catalog::mark_installed(&mut items, &config.items(category).active);
    }

    let title = capitalize(category.as_str());
    println!();
    println!("  {}", style(format!("Available {title}")).white().bold());
    println!();
    println!("  {:<6}  {:<20}  Description", "Status", "ID");
    println!("  {}  {}  {}", "─".repeat(6), "─".repeat(20), "─".repeat(DESCRIPTION_WIDTH));

    for item in &items {
        println!(
            "  {}       {:<20}  {}",
            status_marker(item.installed),
            item.id,
            truncate(&item.metadata.description, DESCRIPTION_WIDTH)
        );
    }

    println!();
    println!(
        "  {} = installed   {} = available",
        status_marker(true),
        status_marker(false)
    );
    println!();
    Ok(())
}

fn list_installed(dir: &Path, config: &ProjectConfig, category: Category) {
    let installed = install::installed_items(dir);
    let kind = category.singular();

    if installed.is_empty() {
        ui::info(format!(
            "No {category} installed. Run 'skills add <{kind}>' to add one."
        ));
        return;
    }

    println!();
    println!(
        "  {} ({})",
        style(format!("Installed {}", capitalize(category.as_str())))
            .white()
            .bold(),
        installed.len()
    );
    println!();
    for id in installed {
        println!(
            "  {} {}",
            status_marker(config.is_active(category, &id)),
            id
        );
    }
    println!();
}

fn status_marker(installed: bool) -> console::StyledObject<&'static str> {
    if installed {
        style("✓").green()
    } else {
        style("•").dim()
    }
}

fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
