use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Technologies recognised from a project's `package.json`, in the order
/// their skills are recommended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Technology {
    TypeScript,
    React,
    Next,
    Tailwind,
    Zod,
    Supabase,
    Vitest,
    ReactHookForm,
}

impl Technology {
    pub const ALL: [Technology; 8] = [
        Technology::TypeScript,
        Technology::React,
        Technology::Next,
        Technology::Tailwind,
        Technology::Zod,
        Technology::Supabase,
        Technology::Vitest,
        Technology::ReactHookForm,
    ];

    /// npm packages whose presence signals the technology.
    pub fn packages(self) -> &'static [&'static str] {
        match self {
            Self::TypeScript => &["typescript"],
            Self::React => &["react", "react-dom"],
            Self::Next => &["next"],
            Self::Tailwind => &["tailwindcss"],
            Self::Zod => &["zod"],
            Self::Supabase => &["@supabase/supabase-js", "@supabase/ssr"],
            Self::Vitest => &["vitest"],
            Self::ReactHookForm => &["react-hook-form"],
        }
    }

    pub fn skill(self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::React => "react-19",
            Self::Next => "nextjs",
            Self::Tailwind => "tailwind-4",
            Self::Zod => "zod-4",
            Self::Supabase => "supabase",
            Self::Vitest => "testing-vitest",
            Self::ReactHookForm => "forms",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::TypeScript => "TypeScript",
            Self::React => "React",
            Self::Next => "Next.js",
            Self::Tailwind => "Tailwind",
            Self::Zod => "Zod",
            Self::Supabase => "Supabase",
            Self::Vitest => "Vitest",
            Self::ReactHookForm => "React Hook Form",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl PackageManager {
    fn from_field(value: &str) -> Option<Self> {
        // Checked in this order so "pnpm@9" is not mistaken for npm.
        [Self::Pnpm, Self::Yarn, Self::Bun, Self::Npm]
            .into_iter()
            .find(|pm| value.starts_with(pm.as_str()))
    }

    fn from_lockfiles(project_root: &Path) -> Option<Self> {
        const LOCKFILES: &[(&str, PackageManager)] = &[
            ("pnpm-lock.yaml", PackageManager::Pnpm),
            ("yarn.lock", PackageManager::Yarn),
            ("bun.lockb", PackageManager::Bun),
            ("bun.lock", PackageManager::Bun),
            ("package-lock.json", PackageManager::Npm),
        ];
        LOCKFILES
            .iter()
            .find(|(file, _)| project_root.join(file).is_file())
            .map(|(_, pm)| *pm)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
            Self::Bun => "bun",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectedStack {
    pub technologies: Vec<Technology>,
    pub package_manager: Option<PackageManager>,
}

impl DetectedStack {
    pub fn has(&self, technology: Technology) -> bool {
        self.technologies.contains(&technology)
    }

    /// Skill ids to pre-select for this stack.
    pub fn recommended_skills(&self) -> Vec<String> {
        let mut skills: Vec<String> = self
            .technologies
            .iter()
            .map(|t| t.skill().to_string())
            .collect();

        if !skills.is_empty() {
            skills.push("structuring-projects".to_string());
        }
        skills
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageJson {
    #[serde(default)]
    dependencies: Option<HashMap<String, serde_json::Value>>,
    #[serde(default)]
    dev_dependencies: Option<HashMap<String, serde_json::Value>>,
    #[serde(default)]
    package_manager: Option<String>,
}

/// Inspect `package.json` under `project_root`. A missing or unparsable
/// manifest yields an empty stack.
pub fn detect_stack(project_root: &Path) -> DetectedStack {
    let path = project_root.join("package.json");
    let pkg: PackageJson = match std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|content| serde_json::from_str(&content).map_err(|e| e.to_string()))
    {
        Ok(pkg) => pkg,
        Err(e) => {
            tracing::debug!("No usable package.json at {}: {}", path.display(), e);
            return DetectedStack::default();
        }
    };

    let has_package = |name: &str| {
        pkg.dependencies
            .as_ref()
            .is_some_and(|deps| deps.contains_key(name))
            || pkg
                .dev_dependencies
                .as_ref()
                .is_some_and(|deps| deps.contains_key(name))
    };

    let technologies = Technology::ALL
        .into_iter()
        .filter(|t| t.packages().iter().any(|&p| has_package(p)))
        .collect();

    let package_manager = pkg
        .package_manager
        .as_deref()
        .and_then(PackageManager::from_field)
        .or_else(|| PackageManager::from_lockfiles(project_root))
        .or(Some(PackageManager::Npm));

    DetectedStack {
        technologies,
        package_manager,
    }
}
