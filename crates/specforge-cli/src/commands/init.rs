//! Implementation of the `specforge init` command.
//!
//! Responsibility: translate CLI arguments into a `GenerationConfig`, call
//! the core generation service, and display results.  No business logic
//! lives here.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use specforge_adapters::{BundledTemplates, LocalFilesystem, SystemCommandRunner};
use specforge_core::{
    application::services::{GenerationService, ResolverOptions},
    domain::{AiAssistant, GenerationConfig, ScriptDialect, WorkflowMode},
};

use crate::{
    cli::{InitArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult, CoreCategory},
    output::OutputManager,
};

/// Execute the `specforge init` command.
///
/// Dispatch sequence:
/// 1. Parse and validate the project name / output path
/// 2. Convert CLI args to a core `GenerationConfig`
/// 3. Confirm with user unless `--yes` or `--quiet`
/// 4. Check for an existing non-empty directory
/// 5. Execute generation via `GenerationService`
/// 6. Print warnings, summary, and next-steps guidance
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: InitArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Resolve project path
    let (project_name, project_path) = resolve_project_path(&args.name)?;
    validate_project_name(&project_name)?;

    // 2. Build the generation config; flags win over config-file defaults
    let (assistant, dialect, workflow) = resolve_choices(&args, &config)?;
    let mut builder = GenerationConfig::builder()
        .ai_assistant(assistant)
        .script_dialect(dialect)
        .workflow_mode(workflow)
        .project_name(&project_name)
        .project_path(&project_path);
    if let Some(template) = &args.template {
        builder = builder.template_name(template.clone());
    }
    let generation_config = builder.build().map_err(|e| CliError::Core(e.into()))?;

    debug!(
        assistant = %generation_config.ai_assistant,
        dialect = %generation_config.script_dialect,
        workflow = %generation_config.workflow_mode,
        template = generation_config.template_name.as_deref().unwrap_or("bundled"),
        "Generation config resolved"
    );

    // 3. Show configuration and confirm
    if !global.quiet && !args.yes {
        output.show_configuration(&generation_config)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    // 4. Refuse a non-empty existing directory without --force
    if directory_is_nonempty(&project_path) && !args.force {
        return Err(CliError::ProjectExists { path: project_path });
    }

    // 5. Create adapters and generate
    let service = GenerationService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(SystemCommandRunner::new()),
        Box::new(BundledTemplates::new()),
    )
    .with_resolver_options(ResolverOptions {
        registry_url: args.registry.or(config.templates.registry_url),
        version: args.template_version,
    });
    let service = match config.templates.package {
        Some(package) => service.with_template_package(package),
        None => service,
    };

    output.header(&format!("Scaffolding '{project_name}'..."))?;
    info!(project = %project_name, path = %project_path.display(), "Generation started");

    let result = service.generate(&generation_config);

    // 6. Report
    for warning in &result.warnings {
        output.warning(warning)?;
    }

    if !result.success {
        for error in &result.errors {
            output.error(error)?;
        }
        return Err(CliError::GenerationFailed {
            errors: result.errors.clone(),
            category: result.failure_category.unwrap_or(CoreCategory::Internal),
        });
    }

    info!(
        files = result.total_files,
        bytes = result.total_size,
        "Generation completed"
    );
    output.generation_summary(&result, &generation_config, &project_name)?;

    Ok(())
}

/// Ask `Proceed? [y/N]` on stdin.  Anything but `y`/`yes` declines.
fn confirm() -> CliResult<bool> {
    print!("Proceed? [y/N] ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn directory_is_nonempty(path: &Path) -> bool {
    std::fs::read_dir(path)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}

// ── Choice resolution ─────────────────────────────────────────────────────────

/// Resolve assistant, dialect and workflow: CLI flag, then the config
/// file's `[defaults]` section, then the built-in default.  The assistant
/// has no built-in default and must come from one of the first two.
fn resolve_choices(
    args: &InitArgs,
    config: &AppConfig,
) -> CliResult<(AiAssistant, ScriptDialect, WorkflowMode)> {
    let assistant = match args.assistant {
        Some(a) => a.into(),
        None => match &config.defaults.assistant {
            Some(name) => from_config_value::<crate::cli::Assistant>("assistant", name)?.into(),
            None => {
                return Err(CliError::InvalidInput {
                    message: "no assistant selected; pass --ai or set defaults.assistant \
                              in the config file"
                        .into(),
                });
            }
        },
    };

    let dialect = match args.script {
        Some(d) => d.into(),
        None => match &config.defaults.script {
            Some(name) => from_config_value::<crate::cli::Dialect>("script", name)?.into(),
            None => ScriptDialect::Posix,
        },
    };

    let workflow = match args.workflow {
        Some(w) => w.into(),
        None => match &config.defaults.workflow {
            Some(name) => from_config_value::<crate::cli::Workflow>("workflow", name)?.into(),
            None => WorkflowMode::Legacy,
        },
    };

    Ok((assistant, dialect, workflow))
}

/// Parse a config-file string through the same value enum the CLI uses, so
/// config and flags accept exactly the same spellings (aliases included).
fn from_config_value<T: clap::ValueEnum>(field: &str, value: &str) -> CliResult<T> {
    T::from_str(value, true).map_err(|_| CliError::ConfigError {
        message: format!("invalid defaults.{field} value '{value}'"),
    })
}

// ── Path resolution ───────────────────────────────────────────────────────────

/// Split a name-or-path argument into the project name and the absolute
/// project directory.
pub fn resolve_project_path(name: &str) -> CliResult<(String, PathBuf)> {
    let path = Path::new(name);

    let project_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::InvalidProjectName {
            name: name.into(),
            reason: "cannot extract valid project name".into(),
        })?
        .to_string();

    // The core requires an absolute path; anchor relative input at the CWD.
    let project_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    Ok((project_name, project_path))
}

fn validate_project_name(name: &str) -> CliResult<()> {
    if name.is_empty() {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot be empty".into(),
        });
    }
    if name.starts_with('.') {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot start with '.'".into(),
        });
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "only alphanumerics, hyphens and underscores are allowed".into(),
        });
    }
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────
