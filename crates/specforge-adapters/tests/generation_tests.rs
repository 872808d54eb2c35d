//! End-to-end pipeline tests over the in-memory filesystem and the
//! scripted command runner.

use std::path::Path;

use specforge_adapters::{
    BundledTemplates, MemoryFilesystem, ScriptedCommandRunner, ScriptedOutcome,
};
use specforge_core::{
    application::{
        ports::Filesystem,
        services::{GenerationService, compute_total_size},
    },
    domain::{AiAssistant, GenerationConfig, ScriptDialect, WorkflowMode},
    error::ErrorCategory,
};

const NPM_ROOT: &str = "/npm/lib/node_modules";
const PACKAGE_ROOT: &str = "/npm/lib/node_modules/specforge-templates";

fn service_on(fs: &MemoryFilesystem, runner: &ScriptedCommandRunner) -> GenerationService {
    GenerationService::new(
        Box::new(fs.clone()),
        Box::new(runner.clone()),
        Box::new(BundledTemplates::new()),
    )
}

fn config(assistant: AiAssistant, dialect: ScriptDialect) -> GenerationConfig {
    GenerationConfig::builder()
        .ai_assistant(assistant)
        .script_dialect(dialect)
        .project_name("demo")
        .project_path("/work/demo")
        .build()
        .unwrap()
}

fn npm_root_available(runner: &ScriptedCommandRunner) {
    runner.on(
        &["root", "-g"],
        ScriptedOutcome::Success {
            stdout: format!("{NPM_ROOT}\n"),
        },
    );
}

#[test]
fn default_path_gemini_roadmap_produces_full_layout() {
    let fs = MemoryFilesystem::new();
    let runner = ScriptedCommandRunner::new();
    let service = service_on(&fs, &runner);

    let config = GenerationConfig::builder()
        .ai_assistant(AiAssistant::Gemini)
        .script_dialect(ScriptDialect::Posix)
        .workflow_mode(WorkflowMode::Roadmap)
        .project_name("demo")
        .project_path("/work/demo")
        .build()
        .unwrap();

    let result = service.generate(&config);
    assert!(result.success, "errors: {:?}", result.errors);

    // Gemini commands are TOML, one per bundled source command.
    for name in ["analyze", "clarify", "implement", "plan", "specify", "tasks"] {
        let path = format!("/work/demo/.gemini/commands/{name}.toml");
        let content = fs.read_file(Path::new(&path)).expect(&path);
        assert!(content.starts_with("description = \""));
        assert!(content.contains("prompt = \"\"\"\n"));
    }

    // Script resolution happened and paths were rewritten.
    let plan = fs
        .read_file(Path::new("/work/demo/.gemini/commands/plan.toml"))
        .unwrap();
    assert!(plan.contains(".specify/scripts/bash/setup-plan.sh --json"));
    assert!(!plan.contains("{SCRIPT}"));
    assert!(plan.contains("{{args}}"));
    assert!(!plan.contains("$ARGUMENTS"));

    // Sidecar at the project root.
    let sidecar = fs
        .read_file(Path::new("/work/demo/.gemini-config.json"))
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&sidecar).unwrap();
    assert_eq!(value["project"], "demo");

    // Support tree: memory, templates, dialect-filtered scripts.
    assert!(
        fs.read_file(Path::new("/work/demo/.specify/memory/constitution.md"))
            .is_some()
    );
    assert!(
        fs.read_file(Path::new("/work/demo/.specify/templates/spec-template.md"))
            .is_some()
    );
    let bash_script = Path::new("/work/demo/.specify/scripts/bash/setup-plan.sh");
    assert!(fs.read_file(bash_script).is_some());
    assert!(fs.is_executable(bash_script));
    assert!(
        fs.read_file(Path::new(
            "/work/demo/.specify/scripts/powershell/setup-plan.ps1"
        ))
        .is_none(),
        "powershell scripts must be filtered out for the posix dialect"
    );

    // Roadmap extras with the project name substituted.
    let roadmap = fs.read_file(Path::new("/work/demo/specs/roadmap.md")).unwrap();
    assert!(roadmap.contains("# demo Roadmap"));
    assert!(!roadmap.contains("[Project Name]"));
    assert!(!roadmap.contains("[项目名称]"));
    assert!(
        fs.read_file(Path::new("/work/demo/specs/modules/README.md"))
            .is_some()
    );

    // Accounting.
    assert_eq!(result.total_files, result.files_created.len());
    assert!(result.total_size > 0);
    assert!(runner.calls().is_empty(), "default path must not touch npm");
}

#[test]
fn legacy_mode_skips_roadmap_extras() {
    let fs = MemoryFilesystem::new();
    let runner = ScriptedCommandRunner::new();
    let service = service_on(&fs, &runner);

    let result = service.generate(&config(AiAssistant::Claude, ScriptDialect::Posix));
    assert!(result.success);
    assert!(fs.read_file(Path::new("/work/demo/specs/roadmap.md")).is_none());
}

#[test]
fn claude_default_path_writes_markdown_and_sidecar() {
    let fs = MemoryFilesystem::new();
    let runner = ScriptedCommandRunner::new();
    let service = service_on(&fs, &runner);

    let result = service.generate(&config(AiAssistant::Claude, ScriptDialect::PowerShell));
    assert!(result.success);

    let specify = fs
        .read_file(Path::new("/work/demo/.claude/commands/specify.md"))
        .unwrap();
    assert!(specify.contains("description: Create or update the feature specification"));
    assert!(!specify.contains("scripts:"));
    assert!(specify.contains(".specify/scripts/powershell/create-new-feature.ps1"));

    assert!(
        fs.read_file(Path::new("/work/demo/.claude-config.json"))
            .is_some()
    );
    // PowerShell dialect selects the other script tree.
    assert!(
        fs.read_file(Path::new(
            "/work/demo/.specify/scripts/powershell/check-prerequisites.ps1"
        ))
        .is_some()
    );
}

#[test]
fn copilot_prompts_use_input_args_syntax() {
    let fs = MemoryFilesystem::new();
    let runner = ScriptedCommandRunner::new();
    let service = service_on(&fs, &runner);

    let result = service.generate(&config(AiAssistant::Copilot, ScriptDialect::Posix));
    assert!(result.success);

    let tasks = fs
        .read_file(Path::new("/work/demo/.github/prompts/tasks.prompt.md"))
        .unwrap();
    assert!(tasks.starts_with("---\nmode: agent\n"));
    assert!(tasks.contains("${input:args}"));
    assert!(!tasks.contains("$ARGUMENTS"));
}

#[test]
fn validation_failure_writes_nothing() {
    let fs = MemoryFilesystem::new();
    let runner = ScriptedCommandRunner::new();
    let service = service_on(&fs, &runner);

    let config = GenerationConfig {
        ai_assistant: AiAssistant::Claude,
        script_dialect: ScriptDialect::Posix,
        workflow_mode: WorkflowMode::Legacy,
        project_path: "relative/path".into(),
        project_name: "demo".into(),
        template_name: None,
    };

    let result = service.generate(&config);
    assert!(!result.success);
    assert!(result.files_created.is_empty());
    assert!(fs.list_files().is_empty());
}

#[test]
fn external_template_drives_the_layout() {
    let fs = MemoryFilesystem::new();
    let runner = ScriptedCommandRunner::new();
    npm_root_available(&runner);

    // Installed package with a `web` template.
    let web = format!("{PACKAGE_ROOT}/web");
    fs.add_dir(PACKAGE_ROOT);
    fs.add_file(format!("{web}/README.md"), "# Web Template\n");
    fs.add_file(format!("{web}/.mcp.json"), "{\"servers\":{}}\n");
    fs.add_file(format!("{web}/src/index.ts"), "export {};\n");
    fs.add_file(format!("{web}/node_modules/junk.js"), "junk\n");
    fs.add_file(format!("{web}/rules/style.md"), "rules\n");
    fs.add_file(
        format!("{web}/memory/constitution.md"),
        "# Web Constitution\n",
    );
    fs.add_file(
        format!("{web}/commands/deploy.md"),
        "---\ndescription: Deploy the site.\n---\nDeploy with {ARGS}.\n",
    );

    // Pre-existing project README that must survive the merge.
    fs.add_dir("/work/demo");
    fs.add_file("/work/demo/README.md", "# My Project\n");

    let service = service_on(&fs, &runner);
    let mut config = config(AiAssistant::Claude, ScriptDialect::Posix);
    config.template_name = Some("web".into());

    let result = service.generate(&config);
    assert!(result.success, "errors: {:?}", result.errors);

    // Verbatim copy, minus exclusions.
    assert!(fs.read_file(Path::new("/work/demo/src/index.ts")).is_some());
    assert!(
        fs.read_file(Path::new("/work/demo/node_modules/junk.js"))
            .is_none()
    );
    assert!(
        fs.read_file(Path::new("/work/demo/rules/style.md")).is_none(),
        "reserved directories are not copied verbatim"
    );

    // README merge keeps existing content first.
    let readme = fs.read_file(Path::new("/work/demo/README.md")).unwrap();
    assert_eq!(readme, "# My Project\n\n---\n\n# Web Template\n");

    // Optional MCP config travels along.
    assert!(fs.read_file(Path::new("/work/demo/.mcp.json")).is_some());

    // Template memory wins over the bundled constitution.
    assert_eq!(
        fs.read_file(Path::new("/work/demo/.specify/memory/constitution.md")),
        Some("# Web Constitution\n".into())
    );
    // Bundled templates fill the section the template omitted.
    assert!(
        fs.read_file(Path::new("/work/demo/.specify/templates/plan-template.md"))
            .is_some()
    );
    // Missing scripts dir falls back to the bundled dialect scripts.
    assert!(
        fs.read_file(Path::new("/work/demo/.specify/scripts/bash/setup-plan.sh"))
            .is_some()
    );

    // Template commands replace the bundled set.
    let deploy = fs
        .read_file(Path::new("/work/demo/.claude/commands/deploy.md"))
        .unwrap();
    assert!(deploy.contains("Deploy with $ARGUMENTS."));
    assert!(
        fs.read_file(Path::new("/work/demo/.claude/commands/plan.md"))
            .is_none()
    );
}

#[test]
fn nested_readme_and_mcp_config_copy_verbatim() {
    let fs = MemoryFilesystem::new();
    let runner = ScriptedCommandRunner::new();
    npm_root_available(&runner);

    // Only the root README/.mcp.json belong to the merge and optional-copy
    // steps; the same names nested deeper are ordinary template files.
    let web = format!("{PACKAGE_ROOT}/web");
    fs.add_dir(PACKAGE_ROOT);
    fs.add_file(format!("{web}/README.md"), "# Web Template\n");
    fs.add_file(format!("{web}/docs/README.md"), "# Docs\n");
    fs.add_file(format!("{web}/docs/guide.md"), "guide\n");
    fs.add_file(format!("{web}/fixtures/.mcp.json"), "{}\n");

    let service = service_on(&fs, &runner);
    let mut config = config(AiAssistant::Claude, ScriptDialect::Posix);
    config.template_name = Some("web".into());

    let result = service.generate(&config);
    assert!(result.success, "errors: {:?}", result.errors);

    assert!(fs.read_file(Path::new("/work/demo/docs/guide.md")).is_some());
    assert_eq!(
        fs.read_file(Path::new("/work/demo/docs/README.md")),
        Some("# Docs\n".into())
    );
    assert_eq!(
        fs.read_file(Path::new("/work/demo/fixtures/.mcp.json")),
        Some("{}\n".into())
    );
    // The root README still goes through the merge path exactly once.
    assert_eq!(
        fs.read_file(Path::new("/work/demo/README.md")),
        Some("# Web Template\n".into())
    );
}

#[test]
fn external_template_without_commands_falls_back_to_bundled() {
    let fs = MemoryFilesystem::new();
    let runner = ScriptedCommandRunner::new();
    npm_root_available(&runner);

    let bare = format!("{PACKAGE_ROOT}/bare");
    fs.add_dir(PACKAGE_ROOT);
    fs.add_file(format!("{bare}/README.md"), "# Bare\n");

    let service = service_on(&fs, &runner);
    let mut config = config(AiAssistant::Cursor, ScriptDialect::Posix);
    config.template_name = Some("bare".into());

    let result = service.generate(&config);
    assert!(result.success, "errors: {:?}", result.errors);
    assert!(
        fs.read_file(Path::new("/work/demo/.cursor/commands/plan.md"))
            .is_some()
    );
}

#[test]
fn unknown_template_fails_before_creating_the_project() {
    let fs = MemoryFilesystem::new();
    let runner = ScriptedCommandRunner::new();
    npm_root_available(&runner);

    fs.add_dir(format!("{PACKAGE_ROOT}/web"));
    fs.add_dir(format!("{PACKAGE_ROOT}/xdc"));

    let service = service_on(&fs, &runner);
    let mut config = config(AiAssistant::Claude, ScriptDialect::Posix);
    config.template_name = Some("pui".into());

    let result = service.generate(&config);
    assert!(!result.success);
    assert!(result.files_created.is_empty());
    assert!(!fs.exists(Path::new("/work/demo")));
    assert_eq!(result.failure_category, Some(ErrorCategory::NotFound));

    let error = &result.errors[0];
    assert!(error.contains("pui"));
    assert!(error.contains("web, xdc"), "got: {error}");
}

#[test]
fn size_accounting_tolerates_vanished_files() {
    let fs = MemoryFilesystem::new();
    fs.add_file("/p/kept.md", "12345");

    let (total, warnings) = compute_total_size(
        &fs,
        &["/p/kept.md".into(), "/p/vanished.md".into()],
    );
    assert_eq!(total, 5);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("/p/vanished.md"));
}
