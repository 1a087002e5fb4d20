use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// AI coding editors that content can be installed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Editor {
    Claude,
    Cursor,
    Copilot,
    Antigravity,
}

impl Editor {
    pub const ALL: [Editor; 4] = [
        Editor::Claude,
        Editor::Cursor,
        Editor::Copilot,
        Editor::Antigravity,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Cursor => "cursor",
            Self::Copilot => "copilot",
            Self::Antigravity => "antigravity",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Claude => "Claude Code",
            Self::Cursor => "Cursor",
            Self::Copilot => "GitHub Copilot",
            Self::Antigravity => "Antigravity (Gemini)",
        }
    }

    pub fn skills_path(self) -> &'static str {
        match self {
            Self::Claude => ".claude/skills",
            Self::Cursor => ".cursor/skills",
            Self::Copilot => ".github/skills",
            Self::Antigravity => ".gemini/skills",
        }
    }

    pub fn agents_path(self) -> &'static str {
        match self {
            Self::Claude => ".claude/agents",
            Self::Cursor => ".cursor/agents",
            Self::Copilot => ".github/agents",
            Self::Antigravity => ".gemini/agents",
        }
    }

    /// Instructions document written next to `AGENTS.md` on init, relative
    /// to the project root. Claude and Antigravity read skill directories
    /// natively and get none.
    pub fn instructions_file(self) -> Option<&'static str> {
        match self {
            Self::Claude | Self::Antigravity => None,
            Self::Cursor => Some(".cursorrules"),
            Self::Copilot => Some(".github/copilot-instructions.md"),
        }
    }

    /// Whether the editor reads agents as `<agents>/<id>.md` files rather
    /// than as directories.
    pub fn flat_agents(self) -> bool {
        matches!(self, Self::Claude)
    }
}

impl fmt::Display for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Editor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|editor| editor.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownEditor(s.to_string()))
    }
}
