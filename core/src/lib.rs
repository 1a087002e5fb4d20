pub mod archive;
pub mod catalog;
pub mod config;
pub mod detect;
pub mod editor;
pub mod error;
pub mod install;
pub mod preset;
pub mod scaffold;

pub use archive::ScratchExtraction;
pub use catalog::{CatalogItem, Category, ItemMetadata};
pub use config::{CatalogSource, ProjectConfig};
pub use detect::{DetectedStack, PackageManager, Technology};
pub use editor::Editor;
pub use error::{Error, Result};
pub use preset::Preset;
