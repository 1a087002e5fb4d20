use console::style;
use skillset_core::config::CONFIG_FILE_NAME;
use skillset_core::{Category, Error};

/// Command failures that come with advice for the user.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("This project is not initialized")]
    NotInitialized,

    #[error("This project is already initialized ({} exists)", CONFIG_FILE_NAME)]
    AlreadyInitialized,

    #[error("{} \"{id}\" not found", item_label(.category))]
    ItemNotFound { category: Category, id: String },

    #[error("Could not fetch the skills catalog: {source}")]
    Network {
        #[source]
        source: Error,
    },

    #[error("Installed \"{id}\" but could not update {}: {source}", CONFIG_FILE_NAME)]
    ConfigWrite {
        id: String,
        #[source]
        source: Error,
    },
}

impl CliError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NotInitialized => vec!["Run \"skills init\" first to initialize your project".into()],
            Self::AlreadyInitialized => vec![
                "Run \"skills add <skill>\" to add more skills".into(),
                "Run \"skills list\" to see available skills".into(),
                format!("Delete {CONFIG_FILE_NAME} to reinitialize"),
            ],
            Self::ItemNotFound { category, .. } => vec![
                match category {
                    Category::Skills => "Run \"skills list\" to see available skills".into(),
                    Category::Agents => "Run \"skills list --agents\" to see available agents".into(),
                },
                "Check the name for typos".into(),
            ],
            Self::Network { .. } => vec![
                "Check your internet connection".into(),
                "Try again in a few moments".into(),
            ],
            Self::ConfigWrite { id, .. } => vec![
                format!("The files for \"{id}\" are in place; fix the config and run \"skills add {id}\" again"),
            ],
        }
    }
}

fn item_label(category: &Category) -> String {
    let mut chars = category.singular().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Print a command failure: one error line, then any suggestions.
pub fn report(error: &anyhow::Error) {
    eprintln!();
    match error.downcast_ref::<CliError>() {
        Some(cli_error) => {
            eprintln!("{} {}", style("Error:").red().bold(), cli_error);
            let suggestions = cli_error.suggestions();
            if !suggestions.is_empty() {
                eprintln!();
                eprintln!("{}", style("Suggestions:").dim());
                for suggestion in suggestions {
                    eprintln!("{}", style(format!("  • {suggestion}")).dim());
                }
            }
        }
        None => {
            eprintln!("{} {:#}", style("Unexpected error:").red().bold(), error);
        }
    }
    eprintln!();
}
