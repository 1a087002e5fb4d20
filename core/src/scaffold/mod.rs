//! Files generated into the project on init: the `AGENTS.md` summary,
//! editor instruction documents, and the agent memory directory.

pub mod templates;

use std::fs;
use std::path::{Path, PathBuf};

use crate::editor::Editor;
use crate::error::Result;

pub const AGENTS_MD: &str = "AGENTS.md";

/// What the generated documents describe.
#[derive(Debug, Clone, Copy)]
pub struct ScaffoldContext<'a> {
    pub editor: Editor,
    pub skills: &'a [String],
    pub agents: &'a [String],
    /// Memory directory relative to the project root; `None` when disabled.
    pub memory_dir: Option<&'a str>,
}

/// Write every file init produces. Returns the paths written.
pub fn generate(project_root: &Path, ctx: &ScaffoldContext<'_>) -> Result<Vec<PathBuf>> {
    let mut written = vec![write_agents_md(project_root, ctx)?];

    if let Some(path) = write_editor_instructions(project_root, ctx)? {
        written.push(path);
    }

    if let Some(memory) = ctx.memory_dir {
        written.extend(init_memory(project_root, Path::new(memory))?);
    }

    Ok(written)
}

pub fn write_agents_md(project_root: &Path, ctx: &ScaffoldContext<'_>) -> Result<PathBuf> {
    let path = project_root.join(AGENTS_MD);
    fs::write(&path, templates::render_agents_md(ctx))?;
    Ok(path)
}

/// Write the editor's instructions file, if it has one
/// (see [`Editor::instructions_file`]).
pub fn write_editor_instructions(
    project_root: &Path,
    ctx: &ScaffoldContext<'_>,
) -> Result<Option<PathBuf>> {
    let Some(relative) = ctx.editor.instructions_file() else {
        return Ok(None);
    };
    let content = match ctx.editor {
        Editor::Cursor => templates::render_cursor_rules(ctx),
        Editor::Copilot => templates::render_copilot_instructions(ctx),
        Editor::Claude | Editor::Antigravity => return Ok(None),
    };

    let path = project_root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, content)?;
    Ok(Some(path))
}

/// Create `state.md`, `decisions.md` and `plans/` under the memory
/// directory. Existing documents are kept. Returns the files created.
pub fn init_memory(project_root: &Path, memory_dir: &Path) -> Result<Vec<PathBuf>> {
    let memory = project_root.join(memory_dir);
    fs::create_dir_all(memory.join("plans"))?;

    let mut created = Vec::new();
    for (name, content) in [
        ("state.md", templates::STATE_TEMPLATE),
        ("decisions.md", templates::DECISIONS_TEMPLATE),
    ] {
        let path = memory.join(name);
        if ensure_file(&path, content)? {
            created.push(path);
        }
    }
    Ok(created)
}

fn ensure_file(path: &Path, content: &str) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    fs::write(path, content)?;
    Ok(true)
}
