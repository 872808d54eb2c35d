//! Implementation of the `specforge templates` command.

use tracing::instrument;

use specforge_adapters::{BundledTemplates, LocalFilesystem, SystemCommandRunner};
use specforge_core::application::{
    ports::{TemplateAssets, TemplateSection},
    services::PackageResolver,
};

use crate::{
    cli::TemplatesArgs,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute the `specforge templates` command.
///
/// Always lists the bundled pack.  With `--external` the installed template
/// package is queried as well; an uninstalled package is reported, not an
/// error.
#[instrument(skip_all)]
pub fn execute(args: TemplatesArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    output.header("Bundled template")?;
    output.print("  default (compiled in)")?;

    let assets = BundledTemplates::new();
    let commands: Vec<String> = assets
        .section(TemplateSection::Commands)
        .iter()
        .filter_map(|a| a.relative_path.strip_suffix(".md").map(str::to_string))
        .collect();
    output.print(&format!("    commands: {}", commands.join(", ")))?;

    if !args.external {
        return Ok(());
    }

    let fs = LocalFilesystem::new();
    let runner = SystemCommandRunner::new();
    let resolver = match &config.templates.package {
        Some(package) => PackageResolver::with_package(&runner, &fs, package),
        None => PackageResolver::new(&runner, &fs),
    };

    output.print("")?;
    output.header("External templates")?;

    if !resolver.is_package_installed() {
        output.info("template package not installed; it is fetched on first use")?;
        return Ok(());
    }

    let names = resolver
        .list_available_templates()
        .map_err(crate::error::CliError::Core)?;
    if names.is_empty() {
        output.info("installed package contains no templates")?;
    } else {
        for name in names {
            output.print(&format!("  {name}"))?;
        }
    }

    Ok(())
}
