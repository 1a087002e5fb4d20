pub mod frontmatter;
pub mod loader;

pub use frontmatter::{ItemMetadata, parse_frontmatter, parse_metadata};
pub use loader::{enumerate, mark_installed};

use std::fmt;
use std::path::PathBuf;

/// Directory inside the catalog archive that holds installable content.
pub const CONTENT_DIR: &str = "content";
/// Metadata document every skill directory must carry.
pub const SKILL_FILE: &str = "SKILL.md";
/// Summary document inside an agent directory.
pub const AGENT_FILE: &str = "AGENT.md";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Skills,
    Agents,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Skills => "skills",
            Self::Agents => "agents",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            Self::Skills => "skill",
            Self::Agents => "agent",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An installable skill or agent found in an extracted catalog.
#[derive(Debug, Clone)]
pub struct CatalogItem {
    pub id: String,
    pub category: Category,
    pub metadata: ItemMetadata,
    pub source_path: PathBuf,
    /// Advisory only; derived from the project's active list for display.
    pub installed: bool,
}

/// Item ids are directory names and must stay inside the directory they are
/// joined onto.
pub fn is_valid_item_id(id: &str) -> bool {
    !(id.trim().is_empty()
        || id == "."
        || id.contains("..")
        || id.contains('/')
        || id.contains('\\')
        || id.contains('\0'))
}
