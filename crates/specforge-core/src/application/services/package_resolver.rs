//! External template package resolution.
//!
//! Named templates live in a separately distributed npm package installed
//! into the global module cache. This service locates that cache, checks
//! what is installed, installs on demand, and enumerates the sub-templates
//! a package contains.
//!
//! ## Caching
//!
//! The global cache-root lookup (`npm root -g`) is an external-command call
//! memoized in an owned cell on the resolver value — computed at most once
//! per resolver, read-only afterwards, with no invalidation. Nothing else
//! is cached: resolution outcomes are returned once and never persisted
//! across process runs.
//!
//! ## Failure semantics
//!
//! Every resolver failure is terminal for the current generation run.
//! There is no fallback to the bundled template when an explicit external
//! template name was requested, and no retry anywhere.

use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandRunner, Filesystem},
    },
    domain::{ExternalPackageDescriptor, InstallReport},
    error::SpecforgeResult,
};

/// npm package that carries the external templates.
pub const DEFAULT_TEMPLATE_PACKAGE: &str = "specforge-templates";

/// Hard deadline for `npm install`. No retry on expiry.
const INSTALL_TIMEOUT: Duration = Duration::from_secs(60);

/// Deadline for cheap queries like `npm root -g`.
const QUERY_TIMEOUT: Duration = Duration::from_secs(15);

const NPM: &str = "npm";

/// Resolves external template packages through npm.
pub struct PackageResolver<'a> {
    runner: &'a dyn CommandRunner,
    fs: &'a dyn Filesystem,
    package: String,
    /// Memoized result of the global-root lookup.
    global_root: OnceLock<SpecforgeResult<PathBuf>>,
}

impl<'a> PackageResolver<'a> {
    pub fn new(runner: &'a dyn CommandRunner, fs: &'a dyn Filesystem) -> Self {
        Self::with_package(runner, fs, DEFAULT_TEMPLATE_PACKAGE)
    }

    /// Use a non-default package name (tests, forks of the template pack).
    pub fn with_package(
        runner: &'a dyn CommandRunner,
        fs: &'a dyn Filesystem,
        package: impl Into<String>,
    ) -> Self {
        Self {
            runner,
            fs,
            package: package.into(),
            global_root: OnceLock::new(),
        }
    }

    /// Root of the global npm module cache (`npm root -g`), memoized.
    pub fn global_root(&self) -> SpecforgeResult<PathBuf> {
        self.global_root
            .get_or_init(|| {
                let output = self.runner.run(NPM, &["root", "-g"], QUERY_TIMEOUT)?;
                if !output.success {
                    return Err(ApplicationError::CommandFailed {
                        command: "npm root -g".into(),
                        reason: output.raw_text(),
                    }
                    .into());
                }
                let root = output.stdout.trim();
                debug!(root, "resolved global npm root");
                Ok(PathBuf::from(root))
            })
            .clone()
    }

    /// Directory the template package occupies when installed.
    pub fn package_root(&self) -> SpecforgeResult<PathBuf> {
        Ok(self.global_root()?.join(&self.package))
    }

    /// Whether the template package is present in the global cache.
    pub fn is_package_installed(&self) -> bool {
        self.package_root()
            .map(|root| self.fs.is_dir(&root))
            .unwrap_or(false)
    }

    /// Whether a named sub-template exists under the installed package.
    pub fn is_template_available(&self, name: &str) -> bool {
        self.package_root()
            .map(|root| self.fs.is_dir(&root.join(name)))
            .unwrap_or(false)
    }

    /// Enumerate sub-template names under the package root, sorted.
    ///
    /// Dotfiles, `node_modules` and non-directory entries are excluded.
    pub fn list_available_templates(&self) -> SpecforgeResult<Vec<String>> {
        let root = self.package_root()?;
        let mut names: Vec<String> = self
            .fs
            .read_dir(&root)?
            .into_iter()
            .filter(|e| e.is_dir)
            .filter(|e| !e.file_name.starts_with('.') && e.file_name != "node_modules")
            .map(|e| e.file_name)
            .collect();
        names.sort();
        Ok(names)
    }

    /// Install the template package globally.
    ///
    /// Bounded by a hard 60-second timeout with no retry. On success the
    /// installed package's manifest is re-read to report the *actual*
    /// resolved version — "latest" is symbolic. On failure the underlying
    /// tool's raw output is passed through unmodified.
    #[instrument(skip_all, fields(package = %self.package, version = descriptor.version_or_latest()))]
    pub fn install(
        &self,
        descriptor: &ExternalPackageDescriptor,
    ) -> SpecforgeResult<InstallReport> {
        let spec = format!("{}@{}", self.package, descriptor.version_or_latest());
        let mut args = vec!["install", "-g", spec.as_str()];
        if let Some(url) = &descriptor.registry_url {
            args.push("--registry");
            args.push(url);
        }

        info!(spec = %spec, "installing template package");
        let output = self
            .runner
            .run(NPM, &args, INSTALL_TIMEOUT)
            .map_err(|e| ApplicationError::PackageInstallFailed {
                output: e.to_string(),
            })?;

        if !output.success {
            return Err(ApplicationError::PackageInstallFailed {
                output: output.raw_text(),
            }
            .into());
        }

        let install_path = self.package_root()?;
        let version = self.installed_version().unwrap_or_else(|| {
            warn!("installed manifest unreadable; reporting requested version");
            descriptor.version_or_latest().to_string()
        });

        info!(version = %version, path = %install_path.display(), "package installed");
        Ok(InstallReport {
            install_path,
            version,
        })
    }

    /// Composite: return the path of a named sub-template, installing the
    /// package first when needed.
    ///
    /// Installed + sub-template present: returns immediately, no network
    /// call. Installed but sub-template missing: fails with an error that
    /// enumerates every currently available sub-template name. Not
    /// installed: delegates to [`install`](Self::install) first.
    #[instrument(skip_all, fields(template = %descriptor.template_name))]
    pub fn ensure(&self, descriptor: &ExternalPackageDescriptor) -> SpecforgeResult<PathBuf> {
        if !self.is_package_installed() {
            self.install(descriptor)?;
        }

        let name = &descriptor.template_name;
        if self.is_template_available(name) {
            return Ok(self.package_root()?.join(name));
        }

        Err(self.template_not_found(name).into())
    }

    /// Version string from the installed package manifest, if readable.
    fn installed_version(&self) -> Option<String> {
        let manifest = self.package_root().ok()?.join("package.json");
        let text = self.fs.read_to_string(&manifest).ok()?;
        let value: serde_json::Value = serde_json::from_str(&text).ok()?;
        value
            .get("version")
            .and_then(|v| v.as_str())
            .map(str::to_string)
    }

    fn template_not_found(&self, requested: &str) -> ApplicationError {
        ApplicationError::TemplateNotFound {
            requested: requested.to_string(),
            available: self.list_available_templates().unwrap_or_default(),
        }
    }
}

// Resolver tests live in the adapters crate
// (`tests/package_resolver_tests.rs`), driven by the scripted command
// runner and the in-memory filesystem.
