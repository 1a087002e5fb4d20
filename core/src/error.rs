use thiserror::Error;

/// Failures raised by the catalog, install and config layers.
///
/// Per-item problems (a skill without frontmatter, an unreadable `SKILL.md`)
/// are contained by the catalog loader and never reach the caller. Only
/// acquisition failures and config writes are meant to abort a command.
#[derive(Debug, Error)]
pub enum Error {
    #[error("document has no frontmatter block")]
    NoFrontmatter,

    #[error("could not fetch catalog: {0}")]
    Acquisition(String),

    #[error("invalid project config: {0}")]
    ConfigValidation(String),

    #[error("unknown editor '{0}' (expected one of: claude, cursor, copilot, antigravity)")]
    UnknownEditor(String),

    #[error("invalid item id '{0}'")]
    InvalidItemId(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
