use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::catalog::Category;
use crate::editor::Editor;
use crate::error::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".skillsrc.json";
pub const CONFIG_VERSION: &str = "1.0.0";
pub const DEFAULT_MEMORY_DIR: &str = "docs/agent";
pub const DEFAULT_REPO: &str = "gpolanco/skills-as-context";
pub const DEFAULT_BRANCH: &str = "main";

/// The persisted `.skillsrc.json` record of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default = "default_version")]
    pub version: String,
    pub editor: Editor,
    pub skills: ItemsConfig,
    pub agents: ItemsConfig,
    #[serde(default)]
    pub memory: MemoryConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<CatalogSource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsConfig {
    pub directory: PathBuf,
    pub active: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    pub enabled: bool,
    pub directory: PathBuf,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: PathBuf::from(DEFAULT_MEMORY_DIR),
        }
    }
}

/// Repository and branch the catalog archive is fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSource {
    pub repo: String,
    pub branch: String,
}

impl Default for CatalogSource {
    fn default() -> Self {
        Self {
            repo: DEFAULT_REPO.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
        }
    }
}

fn default_version() -> String {
    CONFIG_VERSION.to_string()
}

impl ProjectConfig {
    /// Initial config for a freshly initialized project.
    pub fn new_default(editor: Editor, skills: Vec<String>, agents: Vec<String>) -> Self {
        Self {
            version: default_version(),
            editor,
            skills: ItemsConfig {
                directory: PathBuf::from(editor.skills_path()),
                active: skills,
            },
            agents: ItemsConfig {
                directory: PathBuf::from(editor.agents_path()),
                active: agents,
            },
            memory: MemoryConfig::default(),
            source: Some(CatalogSource::default()),
        }
    }

    pub fn items(&self, category: Category) -> &ItemsConfig {
        match category {
            Category::Skills => &self.skills,
            Category::Agents => &self.agents,
        }
    }

    pub fn items_mut(&mut self, category: Category) -> &mut ItemsConfig {
        match category {
            Category::Skills => &mut self.skills,
            Category::Agents => &mut self.agents,
        }
    }

    pub fn is_active(&self, category: Category, id: &str) -> bool {
        self.items(category).active.iter().any(|a| a == id)
    }

    /// Append `id` to the active list unless it is already there.
    /// Returns whether the list changed.
    pub fn activate(&mut self, category: Category, id: &str) -> bool {
        if self.is_active(category, id) {
            return false;
        }
        self.items_mut(category).active.push(id.to_string());
        true
    }

    /// Drop `id` from the active list. Returns whether the list changed.
    pub fn deactivate(&mut self, category: Category, id: &str) -> bool {
        let active = &mut self.items_mut(category).active;
        let before = active.len();
        active.retain(|a| a != id);
        active.len() != before
    }

    pub fn source(&self) -> CatalogSource {
        self.source.clone().unwrap_or_default()
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("skills.directory", &self.skills.directory),
            ("agents.directory", &self.agents.directory),
            ("memory.directory", &self.memory.directory),
        ];
        for (field, dir) in required {
            if dir.as_os_str().is_empty() {
                return Err(Error::ConfigValidation(format!("{field} must not be empty")));
            }
        }

        if let Some(source) = &self.source
            && (source.repo.trim().is_empty() || source.branch.trim().is_empty())
        {
            return Err(Error::ConfigValidation(
                "source.repo and source.branch must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

pub fn config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_FILE_NAME)
}

pub fn exists(project_root: &Path) -> bool {
    config_path(project_root).exists()
}

/// Parse and validate config JSON.
pub fn parse(content: &str) -> Result<ProjectConfig> {
    let config: ProjectConfig =
        serde_json::from_str(content).map_err(|e| Error::ConfigValidation(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Load the project config. A missing, malformed or invalid file all read
/// as "not initialized".
pub fn read(project_root: &Path) -> Option<ProjectConfig> {
    let path = config_path(project_root);

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!("No readable config at {}: {}", path.display(), e);
            return None;
        }
    };

    match parse(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::debug!("Ignoring config at {}: {}", path.display(), e);
            None
        }
    }
}

/// Validate and save `config`. The file is written to a sibling temp file
/// and renamed into place, so readers never see a partial config.
pub fn write(config: &ProjectConfig, project_root: &Path) -> Result<()> {
    config.validate()?;

    let mut content = serde_json::to_string_pretty(config)?;
    content.push('\n');

    let path = config_path(project_root);
    let temp_path = project_root.join(format!("{CONFIG_FILE_NAME}.tmp"));
    {
        let mut file = std::fs::File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    if let Err(e) = std::fs::rename(&temp_path, &path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e.into());
    }
    tracing::debug!(path = %path.display(), "Saved project config");
    Ok(())
}

/// Record `id` as active. Returns `Ok(false)` when the project has no config.
pub fn add_item(category: Category, id: &str, project_root: &Path) -> Result<bool> {
    let Some(mut config) = read(project_root) else {
        return Ok(false);
    };

    if config.activate(category, id) {
        write(&config, project_root)?;
    }
    Ok(true)
}

/// Forget `id`. Returns `Ok(false)` when the project has no config.
pub fn remove_item(category: Category, id: &str, project_root: &Path) -> Result<bool> {
    let Some(mut config) = read(project_root) else {
        return Ok(false);
    };

    if config.deactivate(category, id) {
        write(&config, project_root)?;
    }
    Ok(true)
}
