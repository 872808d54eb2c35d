//! Generation orchestrator: the single entry point of the pipeline.
//!
//! [`GenerationService::generate`] drives one scaffold run end to end:
//! validate the configuration, resolve an external template when one was
//! requested, materialize the project tree, render assistant command files,
//! write sidecars and workflow extras, then account totals.
//!
//! ## Failure semantics
//!
//! `generate` never returns `Err`. Internal steps propagate
//! [`SpecforgeResult`] and the orchestrator folds the first unrecoverable
//! failure into the returned [`GenerationResult`]: `success` flips to
//! `false`, the message lands in `errors`, and `files_created` keeps every
//! file written before the failure. Nothing is rolled back. Warnings never
//! flip `success`.

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::{
    application::{
        assistants::{AssistantAdapter, adapter_for},
        ports::{CommandRunner, Filesystem, TemplateAssets, TemplateSection},
        services::{
            materializer::{DirectoryMaterializer, RESERVED_TEMPLATE_DIRS},
            package_resolver::{DEFAULT_TEMPLATE_PACKAGE, PackageResolver},
        },
    },
    domain::{
        CommandFile, ExternalPackageDescriptor, GenerationConfig, GenerationResult, WorkflowMode,
    },
    error::{SpecforgeError, SpecforgeResult},
};

/// Root directory of scaffold support files inside a generated project.
pub const SPECIFY_DIR: &str = ".specify";

/// Placeholder tokens a roadmap template carries for the project name.
const PROJECT_NAME_TOKENS: [&str; 2] = ["[Project Name]", "[项目名称]"];

/// Options for resolving the external template package, carried separately
/// from [`GenerationConfig`] because they configure the resolver, not the
/// generated output.
#[derive(Debug, Clone, Default)]
pub struct ResolverOptions {
    /// Alternative npm registry URL.
    pub registry_url: Option<String>,
    /// Exact package version instead of `latest`.
    pub version: Option<String>,
}

/// Orchestrates a full generation run over the three driven ports.
pub struct GenerationService {
    fs: Box<dyn Filesystem>,
    runner: Box<dyn CommandRunner>,
    assets: Box<dyn TemplateAssets>,
    template_package: String,
    resolver_options: ResolverOptions,
}

impl GenerationService {
    pub fn new(
        fs: Box<dyn Filesystem>,
        runner: Box<dyn CommandRunner>,
        assets: Box<dyn TemplateAssets>,
    ) -> Self {
        Self {
            fs,
            runner,
            assets,
            template_package: DEFAULT_TEMPLATE_PACKAGE.to_string(),
            resolver_options: ResolverOptions::default(),
        }
    }

    /// Override the npm package external templates are fetched from.
    pub fn with_template_package(mut self, package: impl Into<String>) -> Self {
        self.template_package = package.into();
        self
    }

    pub fn with_resolver_options(mut self, options: ResolverOptions) -> Self {
        self.resolver_options = options;
        self
    }

    /// Run one generation end to end. Infallible by contract; see the
    /// module docs for how failures are reported.
    #[instrument(skip_all, fields(
        project = %config.project_name,
        assistant = %config.ai_assistant,
        workflow = %config.workflow_mode,
    ))]
    pub fn generate(&self, config: &GenerationConfig) -> GenerationResult {
        let mut result = GenerationResult::new();

        // Validation failures must leave the filesystem untouched.
        if let Err(e) = config.validate() {
            let e = SpecforgeError::from(e);
            result.fail_with(e.category(), e.to_string());
            return result;
        }

        if let Err(e) = self.run_pipeline(config, &mut result) {
            result.fail_with(e.category(), e.to_string());
        }

        let (total, warnings) = compute_total_size(self.fs.as_ref(), &result.files_created);
        for w in warnings {
            result.warn(w);
        }
        result.total_size = total;
        result.finalize_counts();

        info!(
            files = result.total_files,
            bytes = result.total_size,
            success = result.success,
            "generation finished"
        );
        result
    }

    fn run_pipeline(
        &self,
        config: &GenerationConfig,
        result: &mut GenerationResult,
    ) -> SpecforgeResult<()> {
        let adapter = adapter_for(config.ai_assistant);

        // Resolve the external template before the first write: a failed
        // resolution must not leave an empty project directory behind.
        let external_root = match &config.template_name {
            Some(name) => {
                let resolver = PackageResolver::with_package(
                    self.runner.as_ref(),
                    self.fs.as_ref(),
                    &self.template_package,
                );
                let descriptor = self.descriptor_for(name);
                Some(resolver.ensure(&descriptor)?)
            }
            None => None,
        };

        self.fs.create_dir_all(&config.project_path)?;

        match &external_root {
            Some(root) => self.generate_from_external(config, adapter.as_ref(), root, result)?,
            None => self.generate_from_bundled(config, adapter.as_ref(), result)?,
        }

        if let Some(sidecar) = adapter.config_sidecar(config) {
            let path = config.project_path.join(sidecar.file_name);
            self.fs.write_file(&path, &sidecar.content)?;
            result.record_file(path);
        }

        // Roadmap extras come from the bundled pack only; an external
        // template brings its own workflow layout.
        if config.workflow_mode == WorkflowMode::Roadmap && external_root.is_none() {
            self.write_roadmap_extras(config, result)?;
        }

        Ok(())
    }

    fn descriptor_for(&self, template_name: &str) -> ExternalPackageDescriptor {
        let mut descriptor = ExternalPackageDescriptor::new(template_name);
        if let Some(url) = &self.resolver_options.registry_url {
            descriptor = descriptor.with_registry(url);
        }
        if let Some(version) = &self.resolver_options.version {
            descriptor = descriptor.with_version(version);
        }
        descriptor
    }

    /// Default path: everything comes from the compiled-in template pack.
    fn generate_from_bundled(
        &self,
        config: &GenerationConfig,
        adapter: &dyn AssistantAdapter,
        result: &mut GenerationResult,
    ) -> SpecforgeResult<()> {
        let specify_root = config.project_path.join(SPECIFY_DIR);

        self.write_bundled_section(TemplateSection::Memory, &specify_root, result)?;
        self.write_bundled_section(TemplateSection::Templates, &specify_root, result)?;
        self.write_bundled_scripts(config, &specify_root, result)?;

        let sources = self.bundled_command_sources();
        self.write_commands(config, adapter, sources, result)
    }

    /// External path: the resolved template tree drives the layout, with
    /// bundled sections filling any hole the template leaves.
    fn generate_from_external(
        &self,
        config: &GenerationConfig,
        adapter: &dyn AssistantAdapter,
        template_root: &Path,
        result: &mut GenerationResult,
    ) -> SpecforgeResult<()> {
        let materializer = DirectoryMaterializer::new(self.fs.as_ref());

        // Reserved directories need substitution or per-assistant branching,
        // so the verbatim copy skips them. The root README.md and .mcp.json
        // are owned by the merge and optional-copy steps below; nested
        // files with those names still copy verbatim.
        let mut exclude: Vec<&str> = RESERVED_TEMPLATE_DIRS.to_vec();
        exclude.push("node_modules");
        materializer.copy_tree(
            template_root,
            &config.project_path,
            &exclude,
            &["README.md", ".mcp.json"],
            &mut result.files_created,
        )?;

        materializer.merge_readme(
            template_root,
            &config.project_path,
            &mut result.files_created,
        )?;
        materializer.copy_optional_file(
            template_root,
            &config.project_path,
            ".mcp.json",
            &mut result.files_created,
        )?;

        let specify_root = config.project_path.join(SPECIFY_DIR);
        for section in [TemplateSection::Memory, TemplateSection::Templates] {
            let external_dir = template_root.join(section.dir_name());
            if self.fs.is_dir(&external_dir) {
                let dest = specify_root.join(section.dir_name());
                materializer.copy_tree(&external_dir, &dest, &[], &[], &mut result.files_created)?;
            } else {
                self.write_bundled_section(section, &specify_root, result)?;
            }
        }

        let external_scripts = template_root
            .join(TemplateSection::Scripts.dir_name())
            .join(config.script_dialect.dir_name());
        if self.fs.is_dir(&external_scripts) {
            let dest = specify_root
                .join(TemplateSection::Scripts.dir_name())
                .join(config.script_dialect.dir_name());
            let before = result.files_created.len();
            materializer.copy_tree(&external_scripts, &dest, &[], &[], &mut result.files_created)?;
            for path in result.files_created[before..].to_vec() {
                self.fs.set_permissions(&path, true)?;
            }
        } else {
            self.write_bundled_scripts(config, &specify_root, result)?;
        }

        let sources = self.external_command_sources(template_root)?;
        let sources = if sources.is_empty() {
            warn!("external template ships no commands; falling back to bundled set");
            self.bundled_command_sources()
        } else {
            sources
        };
        self.write_commands(config, adapter, sources, result)
    }

    /// Write one bundled section verbatim under `.specify/<section>/`.
    fn write_bundled_section(
        &self,
        section: TemplateSection,
        specify_root: &Path,
        result: &mut GenerationResult,
    ) -> SpecforgeResult<()> {
        let section_root = specify_root.join(section.dir_name());
        for asset in self.assets.section(section) {
            let path = section_root.join(asset.relative_path);
            if let Some(parent) = path.parent() {
                self.fs.create_dir_all(parent)?;
            }
            self.fs.write_file(&path, asset.content)?;
            if asset.executable {
                self.fs.set_permissions(&path, true)?;
            }
            result.record_file(path);
        }
        Ok(())
    }

    /// Write bundled scripts, filtered to the configured dialect directory.
    fn write_bundled_scripts(
        &self,
        config: &GenerationConfig,
        specify_root: &Path,
        result: &mut GenerationResult,
    ) -> SpecforgeResult<()> {
        let dialect_prefix = format!("{}/", config.script_dialect.dir_name());
        let scripts_root = specify_root.join(TemplateSection::Scripts.dir_name());

        for asset in self.assets.section(TemplateSection::Scripts) {
            if !asset.relative_path.starts_with(&dialect_prefix) {
                continue;
            }
            let path = scripts_root.join(asset.relative_path);
            if let Some(parent) = path.parent() {
                self.fs.create_dir_all(parent)?;
            }
            self.fs.write_file(&path, asset.content)?;
            self.fs.set_permissions(&path, true)?;
            result.record_file(path);
        }
        Ok(())
    }

    fn bundled_command_sources(&self) -> Vec<(String, String)> {
        self.assets
            .section(TemplateSection::Commands)
            .into_iter()
            .filter_map(|asset| {
                let name = asset.relative_path.strip_suffix(".md")?;
                Some((name.to_string(), asset.content.to_string()))
            })
            .collect()
    }

    /// `.md` files directly under the external template's `commands/` dir.
    fn external_command_sources(
        &self,
        template_root: &Path,
    ) -> SpecforgeResult<Vec<(String, String)>> {
        let commands_dir = template_root.join(TemplateSection::Commands.dir_name());
        if !self.fs.is_dir(&commands_dir) {
            return Ok(Vec::new());
        }

        let mut sources = Vec::new();
        for entry in self.fs.read_dir(&commands_dir)? {
            if entry.is_dir {
                continue;
            }
            let Some(name) = entry.file_name.strip_suffix(".md") else {
                continue;
            };
            let raw = self.fs.read_to_string(&entry.path)?;
            sources.push((name.to_string(), raw));
        }
        sources.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(sources)
    }

    /// Shared command driver: parse, substitute, render, write. Exactly one
    /// output file per source command.
    fn write_commands(
        &self,
        config: &GenerationConfig,
        adapter: &dyn AssistantAdapter,
        sources: Vec<(String, String)>,
        result: &mut GenerationResult,
    ) -> SpecforgeResult<()> {
        let commands_dir = config.project_path.join(adapter.directory_name());
        self.fs.create_dir_all(&commands_dir)?;

        for (name, raw) in sources {
            let mut command = CommandFile::parse(&name, &raw);
            if command.header.is_empty() {
                result.warn(format!(
                    "command '{name}' has no parseable header; emitted as-is"
                ));
            }
            command.apply_placeholders(config.script_dialect, config.ai_assistant);

            let rendered = adapter.render_command(&command, config);
            let path = commands_dir.join(format!("{name}.{}", adapter.command_extension()));
            self.fs.write_file(&path, &rendered)?;
            result.record_file(path);
        }
        Ok(())
    }

    /// Roadmap workflow extras: `specs/roadmap.md` and the empty modules
    /// registry, rendered from bundled templates with the project name
    /// substituted.
    fn write_roadmap_extras(
        &self,
        config: &GenerationConfig,
        result: &mut GenerationResult,
    ) -> SpecforgeResult<()> {
        let specs_root = config.project_path.join("specs");

        if let Some(asset) = self
            .assets
            .asset(TemplateSection::Templates, "roadmap-template.md")
        {
            let path = specs_root.join("roadmap.md");
            self.fs.create_dir_all(&specs_root)?;
            self.fs
                .write_file(&path, &substitute_project_name(asset.content, config))?;
            result.record_file(path);
        } else {
            result.warn("roadmap template missing from bundled pack; skipped".to_string());
        }

        if let Some(asset) = self
            .assets
            .asset(TemplateSection::Templates, "modules-readme-template.md")
        {
            let modules_root = specs_root.join("modules");
            self.fs.create_dir_all(&modules_root)?;
            let path = modules_root.join("README.md");
            self.fs
                .write_file(&path, &substitute_project_name(asset.content, config))?;
            result.record_file(path);
        }

        Ok(())
    }
}

fn substitute_project_name(template: &str, config: &GenerationConfig) -> String {
    let mut out = template.to_string();
    for token in PROJECT_NAME_TOKENS {
        out = out.replace(token, &config.project_name);
    }
    out
}

/// Sum the sizes of created files, tolerating paths that have vanished.
///
/// A file deleted between creation and accounting contributes zero bytes
/// and one warning; accounting never fails the run.
pub fn compute_total_size(fs: &dyn Filesystem, paths: &[PathBuf]) -> (u64, Vec<String>) {
    let mut total = 0u64;
    let mut warnings = Vec::new();

    for path in paths {
        match fs.file_size(path) {
            Ok(size) => total += size,
            Err(e) => warnings.push(format!(
                "could not stat '{}' while accounting sizes: {e}",
                path.display()
            )),
        }
    }

    (total, warnings)
}

// Pipeline tests exercise real port implementations and live in the
// adapters crate (`tests/generation_tests.rs`).
