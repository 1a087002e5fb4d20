use assert_cmd::Command;
use flate2::Compression;
use flate2::write::GzEncoder;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SKILLS: &[&str] = &["react-19", "nextjs", "typescript", "forms"];
const AGENTS: &[&str] = &["planner", "reviewer"];

/// Builds a catalog tarball shaped like a GitHub branch archive.
fn catalog_archive(dir: &Path) -> PathBuf {
    let path = dir.join("catalog.tar.gz");
    let file = fs::File::create(&path).unwrap();
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));

    let mut add = |name: String, content: String| {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, name, content.as_bytes())
            .unwrap();
    };

    for id in SKILLS {
        add(
            format!("catalog-main/content/skills/{id}/SKILL.md"),
            format!("---\nname: {id}\ndescription: The {id} skill\n---\n# {id}\n"),
        );
    }
    add(
        "catalog-main/content/skills/README.md".into(),
        "# Skills\n".into(),
    );
    for id in AGENTS {
        add(
            format!("catalog-main/content/agents/{id}/AGENT.md"),
            format!("# {id}\n"),
        );
        add(
            format!("catalog-main/content/agents/{id}/notes/checklist.md"),
            "- [ ] done\n".into(),
        );
    }

    builder.into_inner().unwrap().finish().unwrap();
    path
}

struct Fixture {
    project: TempDir,
    _catalog_dir: TempDir,
    archive: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let catalog_dir = TempDir::new().unwrap();
        let archive = catalog_archive(catalog_dir.path());
        Self {
            project: TempDir::new().unwrap(),
            _catalog_dir: catalog_dir,
            archive,
        }
    }

    fn skills(&self) -> Command {
        let mut cmd = Command::cargo_bin("skills").unwrap();
        cmd.current_dir(self.project.path())
            .env_remove("RUST_LOG")
            .arg("--archive")
            .arg(&self.archive);
        cmd
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.project.path().join(relative)
    }

    fn config(&self) -> serde_json::Value {
        let content = fs::read_to_string(self.path(".skillsrc.json")).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    fn active(&self, category: &str) -> Vec<String> {
        self.config()[category]["active"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect()
    }

    fn init(&self, editor: &str) {
        self.skills()
            .args(["init", "--yes", "--editor", editor])
            .assert()
            .success();
    }
}

#[test]
fn commands_require_init() {
    let fx = Fixture::new();

    fx.skills()
        .args(["add", "nextjs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"))
        .stderr(predicate::str::contains("skills init"));

    fx.skills()
        .args(["remove", "nextjs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));

    fx.skills()
        .args(["list", "--local"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

#[test]
fn init_for_cursor_writes_everything() {
    let fx = Fixture::new();
    fx.init("cursor");

    let config = fx.config();
    assert_eq!(config["editor"], "cursor");
    assert_eq!(config["skills"]["directory"], ".cursor/skills");
    // nextjs preset, minus the skills this catalog does not have
    assert_eq!(fx.active("skills"), vec!["react-19", "nextjs", "typescript"]);
    assert_eq!(fx.active("agents"), vec!["planner", "reviewer"]);

    assert!(fx.path(".cursor/skills/react-19/SKILL.md").is_file());
    assert!(fx.path(".cursor/agents/planner/AGENT.md").is_file());
    assert!(fx.path(".cursor/agents/planner/notes/checklist.md").is_file());
    assert!(!fx.path(".cursor/skills/forms").exists());
    assert!(fx.path(".cursorrules").is_file());
    assert!(fx.path("AGENTS.md").is_file());
    assert!(fx.path("docs/agent/state.md").is_file());
    assert!(fx.path("docs/agent/plans").is_dir());
}

#[test]
fn init_uses_detected_stack() {
    let fx = Fixture::new();
    fs::write(
        fx.path("package.json"),
        r#"{"dependencies": {"react": "19.0.0"}, "devDependencies": {"typescript": "5.0.0"}}"#,
    )
    .unwrap();

    fx.skills()
        .args(["init", "--yes", "--editor", "copilot", "--no-memory"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TypeScript"));

    assert_eq!(fx.active("skills"), vec!["typescript", "react-19"]);
    assert_eq!(fx.config()["memory"]["enabled"], false);
    assert!(fx.path(".github/copilot-instructions.md").is_file());
    assert!(!fx.path("docs/agent").exists());
}

#[test]
fn init_twice_fails() {
    let fx = Fixture::new();
    fx.init("claude");

    fx.skills()
        .args(["init", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn claude_agents_are_flattened() {
    let fx = Fixture::new();
    fx.init("claude");

    assert!(fx.path(".claude/agents/planner.md").is_file());
    assert!(!fx.path(".claude/agents/planner/AGENT.md").exists());
    assert!(fx.path(".claude/agents/planner/notes/checklist.md").is_file());
    assert!(!fx.path(".cursorrules").exists());
}

#[test]
fn add_is_idempotent() {
    let fx = Fixture::new();
    fx.init("cursor");

    fx.skills()
        .args(["add", "forms"])
        .assert()
        .success()
        .stdout(predicate::str::contains("added successfully"));
    assert!(fx.path(".cursor/skills/forms/SKILL.md").is_file());
    assert_eq!(fx.active("skills").iter().filter(|s| *s == "forms").count(), 1);

    fx.skills()
        .args(["add", "forms"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already installed"));
    assert_eq!(fx.active("skills").iter().filter(|s| *s == "forms").count(), 1);
}

#[test]
fn add_unknown_item_fails() {
    let fx = Fixture::new();
    fx.init("cursor");

    fx.skills()
        .args(["add", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Skill \"ghost\" not found"));

    fx.skills()
        .args(["add", "ghost", "--agent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Agent \"ghost\" not found"))
        .stderr(predicate::str::contains("skills list --agents"));
}

#[test]
fn remove_deletes_files_and_config_entry() {
    let fx = Fixture::new();
    fx.init("cursor");

    fx.skills()
        .args(["remove", "nextjs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("removed successfully"));
    assert!(!fx.path(".cursor/skills/nextjs").exists());
    assert!(!fx.active("skills").contains(&"nextjs".to_string()));

    fx.skills()
        .args(["remove", "nextjs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not installed"));
}

#[test]
fn remove_missing_directory_still_updates_config() {
    let fx = Fixture::new();
    fx.init("cursor");
    fs::remove_dir_all(fx.path(".cursor/skills/typescript")).unwrap();

    fx.skills()
        .args(["remove", "typescript"])
        .assert()
        .success()
        .stdout(predicate::str::contains("on disk"));
    assert!(!fx.active("skills").contains(&"typescript".to_string()));
}

#[test]
fn remove_flattened_agent() {
    let fx = Fixture::new();
    fx.init("claude");

    fx.skills()
        .args(["remove", "planner", "--agent"])
        .assert()
        .success();

    assert!(!fx.path(".claude/agents/planner.md").exists());
    assert!(!fx.path(".claude/agents/planner").exists());
    assert_eq!(fx.active("agents"), vec!["reviewer"]);
}

#[test]
fn list_catalog_marks_nothing_before_init() {
    let fx = Fixture::new();

    fx.skills()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available Skills"))
        .stdout(predicate::str::contains("react-19"))
        .stdout(predicate::str::contains("The forms skill"))
        .stdout(predicate::str::contains("README").not());

    fx.skills()
        .args(["list", "--agents"])
        .assert()
        .success()
        .stdout(predicate::str::contains("planner agent"));
}

#[test]
fn list_local_shows_installed() {
    let fx = Fixture::new();
    fx.init("cursor");

    fx.skills()
        .args(["list", "--local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed Skills (3)"))
        .stdout(predicate::str::contains("typescript"));
}

#[test]
fn missing_archive_reports_fetch_failure() {
    let fx = Fixture::new();

    Command::cargo_bin("skills")
        .unwrap()
        .current_dir(fx.project.path())
        .args(["--archive", "does-not-exist.tar.gz", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not fetch the skills catalog"))
        .stderr(predicate::str::contains("internet connection"));
}

#[test]
fn unknown_editor_is_rejected() {
    let fx = Fixture::new();

    fx.skills()
        .args(["init", "--yes", "--editor", "vim"])
        .assert()
        .failure();
    assert!(!fx.path(".skillsrc.json").exists());
}

#[test]
fn verbose_logs_catalog_fetch() {
    let fx = Fixture::new();

    fx.skills()
        .args(["--verbose", "list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Fetching catalog"))
        .stderr(predicate::str::contains("Catalog extracted"));

    fx.skills()
        .arg("list")
        .assert()
        .success()
        .stderr(predicate::str::contains("Fetching catalog").not());
}
