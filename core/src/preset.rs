/// A named bundle of skills and agents offered during init.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub id: &'static str,
    pub name: &'static str,
    pub skills: &'static [&'static str],
    pub agents: &'static [&'static str],
}

pub const DEFAULT_AGENTS: &[&str] = &["planner", "reviewer"];
pub const DEFAULT_PRESET: &str = "nextjs";

pub const PRESETS: &[Preset] = &[
    Preset {
        id: "nextjs",
        name: "Next.js Full Stack",
        skills: &[
            "react-19",
            "nextjs",
            "typescript",
            "tailwind-4",
            "zod-4",
            "structuring-projects",
        ],
        agents: DEFAULT_AGENTS,
    },
    Preset {
        id: "react",
        name: "React SPA",
        skills: &[
            "react-19",
            "typescript",
            "tailwind-4",
            "zod-4",
            "structuring-projects",
        ],
        agents: DEFAULT_AGENTS,
    },
    Preset {
        id: "node",
        name: "Node.js Backend",
        skills: &["typescript", "zod-4", "structuring-projects"],
        agents: DEFAULT_AGENTS,
    },
    Preset {
        id: "full",
        name: "All Skills",
        skills: &[
            "react-19",
            "nextjs",
            "typescript",
            "tailwind-4",
            "zod-4",
            "forms",
            "supabase",
            "testing-vitest",
            "structuring-projects",
            "skill-creator",
            "skill-integrator",
        ],
        agents: DEFAULT_AGENTS,
    },
];

pub fn find(id: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.id.eq_ignore_ascii_case(id.trim()))
}

impl Preset {
    pub fn skill_ids(&self) -> Vec<String> {
        self.skills.iter().map(|s| s.to_string()).collect()
    }

    pub fn agent_ids(&self) -> Vec<String> {
        self.agents.iter().map(|s| s.to_string()).collect()
    }
}
