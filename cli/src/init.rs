use anyhow::{Context as _, Result};
use console::style;
use dialoguer::{Confirm, MultiSelect, Select};
use skillset_core::{
    CatalogItem, Category, DetectedStack, Editor, Preset, ProjectConfig, Technology, catalog,
    config, detect, preset, scaffold,
};

use crate::commands::{self, Context};
use crate::error::CliError;
use crate::ui::{self, Spinner};

const BANNER: &str = r"
    -------------------------------------

     ___ _  _____ _    _    ___
    / __| |/ /_ _| |  | |  / __|
    \__ \ ' < | || |__| |__\__ \
    |___/_|\_\___|____|____|___/

    -------------------------------------
";

const TOTAL_STEPS: usize = 5;

/// Flags accepted by `skills init`.
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    pub editor: Option<Editor>,
    pub preset: Option<String>,
    pub yes: bool,
    pub no_memory: bool,
}

fn print_step(step: usize, title: &str) {
    println!();
    println!(
        "{}",
        style(format!("[{}/{}] {}", step, TOTAL_STEPS, title))
            .cyan()
            .bold()
    );
    println!();
}

pub async fn run_init(ctx: &Context, opts: InitOptions) -> Result<()> {
    if config::exists(&ctx.project_root) {
        return Err(CliError::AlreadyInitialized.into());
    }

    println!("{}", style(BANNER).cyan().bold());
    println!("  {}", style("Welcome to skills!").white().bold());
    println!(
        "  {}",
        style("This wizard sets up AI coding skills and agents for this project.").dim()
    );

    print_step(1, "Project Detection");
    let stack = detect::detect_stack(&ctx.project_root);
    print_detected(&stack);
    let recommended = stack.recommended_skills();

    print_step(2, "Editor");
    let editor = match opts.editor {
        Some(editor) => editor,
        None if opts.yes => Editor::Claude,
        None => select_editor()?,
    };
    println!("  {} {}", style("✓").green(), editor.display_name());

    let mut project_config = ProjectConfig::new_default(editor, Vec::new(), Vec::new());
    project_config.memory.enabled = !opts.no_memory;

    let scratch = commands::fetch_catalog(ctx, &project_config.source()).await?;
    let available_skills = catalog::enumerate(scratch.root(), Category::Skills)?;
    let available_agents = catalog::enumerate(scratch.root(), Category::Agents)?;

    print_step(3, "Skills");
    let requested = opts.preset.as_deref();
    let preset = requested.and_then(preset::find);
    if let (Some(id), None) = (requested, preset) {
        ui::warning(format!("Unknown preset \"{id}\"."));
    }
    let skills = match skill_choice(requested, preset, opts.yes, &recommended) {
        SkillChoice::Ids(ids) => ids,
        SkillChoice::Picker => select_skills(&available_skills, &recommended)?,
        SkillChoice::Custom => select_custom_skills(&available_skills, &recommended)?,
    };

    print_step(4, "Agents");
    let agents = if opts.yes {
        preset.map(|p| p.agent_ids()).unwrap_or_else(|| {
            preset::DEFAULT_AGENTS.iter().map(|s| s.to_string()).collect()
        })
    } else {
        select_agents(&available_agents)?
    };

    print_summary(editor, &skills, &agents);
    if !opts.yes && !confirm()? {
        scratch.release();
        ui::info("Initialization cancelled.");
        return Ok(());
    }

    print_step(5, "Installation");
    let skills_dir = ctx.items_dir(&project_config, Category::Skills);
    let agents_dir = ctx.items_dir(&project_config, Category::Agents);
    std::fs::create_dir_all(&skills_dir)
        .with_context(|| format!("Failed to create {}", skills_dir.display()))?;
    std::fs::create_dir_all(&agents_dir)
        .with_context(|| format!("Failed to create {}", agents_dir.display()))?;

    project_config.skills.active = install_selected(editor, &available_skills, &skills, &skills_dir)?;
    project_config.agents.active = install_selected(editor, &available_agents, &agents, &agents_dir)?;

    config::write(&project_config, &ctx.project_root)
        .with_context(|| format!("Failed to write {}", config::CONFIG_FILE_NAME))?;

    let memory_dir = project_config.memory.directory.to_string_lossy().into_owned();
    let scaffold_ctx = scaffold::ScaffoldContext {
        editor,
        skills: &project_config.skills.active,
        agents: &project_config.agents.active,
        memory_dir: project_config.memory.enabled.then_some(memory_dir.as_str()),
    };
    let written = scaffold::generate(&ctx.project_root, &scaffold_ctx)?;

    scratch.release();

    println!();
    println!("  {} Project initialized!", style("✓").green().bold());
    println!(
        "  {} Config saved to {}",
        style("→").green(),
        style(config::CONFIG_FILE_NAME).cyan()
    );
    for path in written {
        let shown = path.strip_prefix(&ctx.project_root).unwrap_or(&path);
        println!("  {} - {}", style("  ").dim(), shown.display());
    }
    println!();
    println!(
        "  {} Add more with: {}",
        style("→").green(),
        style("skills add <skill>").cyan().bold()
    );
    println!(
        "  {} Browse the catalog: {}",
        style("→").green(),
        style("skills list").cyan().bold()
    );
    println!();

    Ok(())
}

fn print_detected(stack: &DetectedStack) {
    if stack.technologies.is_empty() {
        println!("  {}", style("No known technologies detected.").dim());
    } else {
        let labels: Vec<&str> = Technology::ALL
            .into_iter()
            .filter(|&t| stack.has(t))
            .map(Technology::label)
            .collect();
        println!("  {} Detected: {}", style("✓").green(), labels.join(", "));
    }
    if let Some(pm) = stack.package_manager {
        println!("  {} Package manager: {}", style("✓").green(), pm);
    }
}

/// How the skill list gets decided.
#[derive(Debug, PartialEq, Eq)]
enum SkillChoice {
    Ids(Vec<String>),
    /// Offer recommendations, presets and custom selection.
    Picker,
    /// Straight to the multi-select.
    Custom,
}

fn skill_choice(
    requested: Option<&str>,
    preset: Option<&Preset>,
    yes: bool,
    recommended: &[String],
) -> SkillChoice {
    match (preset, requested) {
        (Some(preset), _) => SkillChoice::Ids(preset.skill_ids()),
        _ if yes => SkillChoice::Ids(default_skills(recommended)),
        (None, Some(_)) => SkillChoice::Custom,
        (None, None) => SkillChoice::Picker,
    }
}

/// Skills picked by `--yes`: the stack recommendations, or the default
/// preset when nothing was recognized.
fn default_skills(recommended: &[String]) -> Vec<String> {
    if !recommended.is_empty() {
        return recommended.to_vec();
    }
    preset::find(preset::DEFAULT_PRESET)
        .map(|p| p.skill_ids())
        .unwrap_or_default()
}

fn select_editor() -> Result<Editor> {
    let labels: Vec<&str> = Editor::ALL.iter().map(|e| e.display_name()).collect();
    let selection = Select::new()
        .with_prompt("Which editor do you use?")
        .items(&labels)
        .default(0)
        .interact()
        .context("Failed to select editor")?;
    Ok(Editor::ALL[selection])
}

fn select_skills(available: &[CatalogItem], recommended: &[String]) -> Result<Vec<String>> {
    let mut labels: Vec<String> = Vec::new();
    if !recommended.is_empty() {
        labels.push("Recommended for this project".to_string());
    }
    labels.extend(
        preset::PRESETS
            .iter()
            .map(|p| format!("{} ({} skills)", p.name, p.skills.len())),
    );
    labels.push("Custom selection".to_string());

    let selection = Select::new()
        .with_prompt("Choose a skill set")
        .items(&labels)
        .default(0)
        .interact()
        .context("Failed to select skill set")?;

    let offset = usize::from(!recommended.is_empty());
    if offset == 1 && selection == 0 {
        return Ok(recommended.to_vec());
    }
    if let Some(preset) = preset::PRESETS.get(selection - offset) {
        return Ok(preset.skill_ids());
    }

    select_custom_skills(available, recommended)
}

fn select_custom_skills(available: &[CatalogItem], recommended: &[String]) -> Result<Vec<String>> {
    let labels: Vec<String> = available.iter().map(item_label).collect();
    let checked = precheck(available, recommended);

    loop {
        let picked = MultiSelect::new()
            .with_prompt("Select skills (space to toggle, enter to confirm)")
            .items(&labels)
            .defaults(&checked)
            .interact()
            .context("Failed to select skills")?;

        if !picked.is_empty() {
            return Ok(picked.into_iter().map(|i| available[i].id.clone()).collect());
        }
        ui::warning("Select at least one skill.");
    }
}

fn select_agents(available: &[CatalogItem]) -> Result<Vec<String>> {
    if available.is_empty() {
        println!("  {}", style("No agents available in the catalog.").dim());
        return Ok(Vec::new());
    }

    let labels: Vec<String> = available.iter().map(item_label).collect();
    let checked = vec![true; available.len()];
    let picked = MultiSelect::new()
        .with_prompt("Select agents (space to toggle, enter to confirm)")
        .items(&labels)
        .defaults(&checked)
        .interact()
        .context("Failed to select agents")?;

    Ok(picked.into_iter().map(|i| available[i].id.clone()).collect())
}

fn confirm() -> Result<bool> {
    Confirm::new()
        .with_prompt("Proceed with installation?")
        .default(true)
        .interact()
        .context("Failed to read confirmation")
}

fn print_summary(editor: Editor, skills: &[String], agents: &[String]) {
    println!();
    println!("  {}", style("Summary").white().bold());
    println!("  Editor: {}", style(editor.display_name()).cyan());
    println!("  Skills: {}", style(join_or_none(skills)).cyan());
    println!("  Agents: {}", style(join_or_none(agents)).cyan());
    println!();
}

fn join_or_none(ids: &[String]) -> String {
    if ids.is_empty() {
        "none".to_string()
    } else {
        ids.join(", ")
    }
}

fn item_label(item: &CatalogItem) -> String {
    if item.metadata.description.is_empty() {
        item.id.clone()
    } else {
        format!("{} - {}", item.id, item.metadata.description)
    }
}

fn precheck(available: &[CatalogItem], recommended: &[String]) -> Vec<bool> {
    available
        .iter()
        .map(|item| recommended.contains(&item.id))
        .collect()
}

/// Install every selected id found in the catalog; returns the ids that
/// made it to disk. Ids missing from the catalog are skipped with a warning.
fn install_selected(
    editor: Editor,
    available: &[CatalogItem],
    selected: &[String],
    target: &std::path::Path,
) -> Result<Vec<String>> {
    let mut installed = Vec::new();
    for id in selected {
        let Some(item) = available.iter().find(|item| &item.id == id) else {
            ui::warning(format!("\"{id}\" is not in the catalog, skipping."));
            continue;
        };

        let spinner = Spinner::start(format!("Installing {id}..."));
        commands::install_for(editor, item, target)
            .with_context(|| format!("Failed to install \"{id}\""))?;
        spinner.succeed(format!("Installed {id}"));
        installed.push(id.clone());
    }
    Ok(installed)
}
