use std::fs;
use std::path::Path;

use super::{
    CONTENT_DIR, CatalogItem, Category, ItemMetadata, SKILL_FILE, is_valid_item_id, parse_metadata,
};
use crate::error::Result;

const README: &str = "README.md";

/// List the installable items of one category in an extracted catalog.
///
/// Enumeration is best effort per item: a skill whose `SKILL.md` is missing,
/// unreadable or has no frontmatter is left out of the result instead of
/// failing the listing. Only an unreadable `content/<category>` directory
/// is an error. Result order follows the filesystem.
pub fn enumerate(catalog_root: &Path, category: Category) -> Result<Vec<CatalogItem>> {
    let category_dir = catalog_root.join(CONTENT_DIR).join(category.as_str());
    let entries = fs::read_dir(&category_dir)?;

    let mut items = Vec::new();
    let mut skipped = 0;

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("Unreadable catalog entry in {}: {}", category_dir.display(), e);
                skipped += 1;
                continue;
            }
        };

        if !entry.file_type().is_ok_and(|t| t.is_dir()) {
            continue;
        }

        let Some(id) = entry.file_name().to_str().map(str::to_owned) else {
            skipped += 1;
            continue;
        };

        if id == README {
            continue;
        }

        if !is_valid_item_id(&id) {
            tracing::warn!("Skipping unsafe catalog entry: {}", id);
            skipped += 1;
            continue;
        }

        let source_path = entry.path();
        let metadata = match category {
            Category::Skills => match load_skill_metadata(&source_path) {
                Ok(metadata) => metadata,
                Err(e) => {
                    tracing::debug!("Skipping skill '{}': {}", id, e);
                    skipped += 1;
                    continue;
                }
            },
            Category::Agents => agent_metadata(&id),
        };

        items.push(CatalogItem {
            id,
            category,
            metadata,
            source_path,
            installed: false,
        });
    }

    tracing::info!(
        loaded = items.len(),
        skipped,
        category = %category,
        path = %category_dir.display(),
        "Catalog enumerated"
    );

    Ok(items)
}

/// Flag the items whose ids appear in `active`.
pub fn mark_installed(items: &mut [CatalogItem], active: &[String]) {
    for item in items {
        item.installed = active.iter().any(|id| id == &item.id);
    }
}

fn load_skill_metadata(skill_dir: &Path) -> Result<ItemMetadata> {
    let content = fs::read_to_string(skill_dir.join(SKILL_FILE))?;
    parse_metadata(&content)
}

fn agent_metadata(id: &str) -> ItemMetadata {
    ItemMetadata {
        name: capitalize(id),
        description: format!("{id} agent"),
        ..Default::default()
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    fn write_skill(root: &Path, id: &str, skill_md: Option<&str>) {
        let dir = root.join("content/skills").join(id);
        fs::create_dir_all(&dir).unwrap();
        if let Some(content) = skill_md {
            fs::write(dir.join(SKILL_FILE), content).unwrap();
        }
    }

    fn ids(items: &[CatalogItem]) -> Vec<String> {
        let mut ids: Vec<_> = items.iter().map(|i| i.id.clone()).collect();
        ids.sort();
        ids
    }

    #[test]
    fn enumerates_skills_with_frontmatter() {
        let tmp = TempDir::new().unwrap();
        write_skill(
            tmp.path(),
            "react-19",
            Some("---\nname: react-19\ndescription: React 19 patterns\nversion: \"1.0.0\"\n---\n# React 19"),
        );
        write_skill(
            tmp.path(),
            "nextjs",
            Some("---\nname: nextjs\ndescription: Next.js App Router\nversion: \"1.0.0\"\n---\n# Next.js"),
        );

        let items = enumerate(tmp.path(), Category::Skills).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(ids(&items), vec!["nextjs", "react-19"]);
        let react = items.iter().find(|i| i.id == "react-19").unwrap();
        assert_eq!(react.metadata.description, "React 19 patterns");
        assert_eq!(react.category, Category::Skills);
        assert_eq!(react.source_path, tmp.path().join("content/skills/react-19"));
        assert!(!react.installed);
    }

    #[test]
    fn broken_entries_do_not_affect_valid_ones() {
        let tmp = TempDir::new().unwrap();
        write_skill(tmp.path(), "good", Some("---\nname: good\n---\n"));
        write_skill(tmp.path(), "no-skill-file", None);
        write_skill(tmp.path(), "no-frontmatter", Some("# Just markdown\n"));
        write_skill(tmp.path(), "unclosed", Some("---\nname: x\n"));
        fs::write(tmp.path().join("content/skills/README.md"), "# Skills").unwrap();
        fs::write(tmp.path().join("content/skills/notes.txt"), "loose file").unwrap();

        let items = enumerate(tmp.path(), Category::Skills).unwrap();

        assert_eq!(ids(&items), vec!["good"]);
    }

    #[test]
    fn readme_directory_is_excluded() {
        let tmp = TempDir::new().unwrap();
        write_skill(tmp.path(), "README.md", Some("---\nname: readme\n---\n"));
        write_skill(tmp.path(), "zod-4", Some("---\nname: zod-4\n---\n"));

        let items = enumerate(tmp.path(), Category::Skills).unwrap();
        assert_eq!(ids(&items), vec!["zod-4"]);
    }

    #[test]
    fn agents_need_no_metadata_document() {
        let tmp = TempDir::new().unwrap();
        let agents = tmp.path().join("content/agents");
        fs::create_dir_all(agents.join("planner")).unwrap();
        fs::create_dir_all(agents.join("reviewer")).unwrap();
        fs::write(agents.join("README.md"), "# Agents").unwrap();

        let items = enumerate(tmp.path(), Category::Agents).unwrap();

        assert_eq!(ids(&items), vec!["planner", "reviewer"]);
        let planner = items.iter().find(|i| i.id == "planner").unwrap();
        assert_eq!(planner.metadata.name, "Planner");
        assert_eq!(planner.metadata.description, "planner agent");
        assert_eq!(planner.category, Category::Agents);
    }

    #[test]
    fn missing_category_directory_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = enumerate(tmp.path(), Category::Agents).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn marks_active_items() {
        let tmp = TempDir::new().unwrap();
        write_skill(tmp.path(), "a", Some("---\nname: a\n---\n"));
        write_skill(tmp.path(), "b", Some("---\nname: b\n---\n"));

        let mut items = enumerate(tmp.path(), Category::Skills).unwrap();
        mark_installed(&mut items, &["b".to_string()]);

        for item in &items {
            assert_eq!(item.installed, item.id == "b");
        }
    }

    #[test]
    fn capitalizes_first_character() {
        assert_eq!(capitalize("planner"), "Planner");
        assert_eq!(capitalize("x"), "X");
        assert_eq!(capitalize(""), "");
    }
}
