use std::fmt::Write;

use super::ScaffoldContext;

pub const STATE_TEMPLATE: &str = r#"# State

## Now
- ...

## Next
- ...

## Blockers
- ...
"#;

pub const DECISIONS_TEMPLATE: &str = r#"# Decisions

## YYYY-MM-DD: <decision title>
- **Decision**: ...
- **Why**: ...
- **Impact**: ...
"#;

pub fn render_agents_md(ctx: &ScaffoldContext<'_>) -> String {
    let editor = ctx.editor;
    let mut out = String::new();

    let _ = writeln!(out, "# AGENTS.md\n");
    let _ = writeln!(out, "## Editor\n{}\n", editor.display_name());
    let _ = writeln!(out, "## Skills Location\n`{}/`\n", editor.skills_path());
    let _ = writeln!(out, "## Active Skills");
    push_list(&mut out, ctx.skills.iter().map(|s| s.to_string()));
    let _ = writeln!(out);
    let _ = writeln!(out, "## Agents Location\n`{}/`\n", editor.agents_path());

    if let Some(memory) = ctx.memory_dir {
        let _ = writeln!(out, "## Agent Memory\n`{memory}/`\n");
    }

    out.push_str("---\n\n*Generated by the skills CLI*\n");
    out
}

pub fn render_cursor_rules(ctx: &ScaffoldContext<'_>) -> String {
    let skills_path = ctx.editor.skills_path();
    let agents_path = ctx.editor.agents_path();
    let mut out = String::new();

    out.push_str("# Cursor Rules\n\n## Skills\n");
    let _ = writeln!(
        out,
        "This project uses AI agent skills located in `{skills_path}/`.\n"
    );
    out.push_str("Before starting any task, read the relevant skill files:\n");
    push_skill_files(&mut out, ctx);
    out.push_str(
        "\nEach skill contains patterns, best practices, and code examples. Follow them strictly.\n\n",
    );

    out.push_str("## Agents\n");
    let _ = writeln!(out, "Available agents in `{agents_path}/`:");
    push_agent_files(&mut out, ctx);

    if let Some(memory) = ctx.memory_dir {
        let _ = writeln!(out, "\n## Memory\nUse `{memory}/` to maintain context across sessions:");
        push_memory_docs(&mut out);
        out.push_str("\n## Workflow\n1. Read relevant skills before writing code\n");
        let _ = writeln!(out, "2. Check `{memory}/state.md` for current context");
        out.push_str("3. Follow patterns from skill files\n");
        let _ = writeln!(out, "4. Document decisions in `{memory}/decisions.md`");
    } else {
        out.push_str("\n## Workflow\n1. Read relevant skills before writing code\n");
        out.push_str("2. Follow patterns from skill files\n");
    }

    out
}

pub fn render_copilot_instructions(ctx: &ScaffoldContext<'_>) -> String {
    let mut out = String::new();

    out.push_str("# Copilot Instructions\n\n## Skills\n");
    out.push_str("This project uses AI agent skills. Before coding, read the relevant skill files:\n\n");
    push_skill_files(&mut out, ctx);
    out.push_str("\nEach skill contains patterns and best practices. Follow them strictly.\n\n");

    out.push_str("## Agents\nAvailable agents:\n");
    push_agent_files(&mut out, ctx);

    if let Some(memory) = ctx.memory_dir {
        let _ = writeln!(out, "\n## Memory\nMaintain context using `{memory}/`:");
        push_memory_docs(&mut out);
        out.push_str("\n## Workflow\n1. Read relevant skills before implementing\n");
        let _ = writeln!(out, "2. Check current state in `{memory}/state.md`");
        out.push_str("3. Follow skill patterns\n");
        let _ = writeln!(out, "4. Document decisions in `{memory}/decisions.md`");
    } else {
        out.push_str("\n## Workflow\n1. Read relevant skills before implementing\n");
        out.push_str("2. Follow skill patterns\n");
    }

    out
}

fn push_list(out: &mut String, items: impl Iterator<Item = String>) {
    for item in items {
        let _ = writeln!(out, "- {item}");
    }
}

fn push_skill_files(out: &mut String, ctx: &ScaffoldContext<'_>) {
    let skills_path = ctx.editor.skills_path();
    push_list(
        out,
        ctx.skills
            .iter()
            .map(|s| format!("`{skills_path}/{s}/SKILL.md`")),
    );
}

fn push_agent_files(out: &mut String, ctx: &ScaffoldContext<'_>) {
    let agents_path = ctx.editor.agents_path();
    push_list(
        out,
        ctx.agents
            .iter()
            .map(|a| format!("`{agents_path}/{a}/AGENT.md`")),
    );
}

fn push_memory_docs(out: &mut String) {
    out.push_str("- `state.md` - Current progress and blockers\n");
    out.push_str("- `decisions.md` - Key technical decisions\n");
    out.push_str("- `plans/` - Implementation plans\n");
}
