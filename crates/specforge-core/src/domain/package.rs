//! External template package descriptors.
//!
//! An external template package is a separately distributed, globally
//! installed npm package exposing one directory per template name. The
//! descriptor is constructed per invocation and never persisted; the
//! resolution outcome is returned once and not cached across process runs.

use std::path::PathBuf;

/// A request for a named template from the external package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalPackageDescriptor {
    /// Sub-template name inside the package (one directory per template).
    pub template_name: String,
    /// Registry to install from, or `None` for the npm default.
    pub registry_url: Option<String>,
    /// Requested package version; `None` means "latest".
    pub version: Option<String>,
}

impl ExternalPackageDescriptor {
    pub fn new(template_name: impl Into<String>) -> Self {
        Self {
            template_name: template_name.into(),
            registry_url: None,
            version: None,
        }
    }

    pub fn with_registry(mut self, url: impl Into<String>) -> Self {
        self.registry_url = Some(url.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// The version spec to hand to the installer. "latest" is symbolic —
    /// the resolver re-reads the installed manifest to learn what it
    /// actually resolved to.
    pub fn version_or_latest(&self) -> &str {
        self.version.as_deref().unwrap_or("latest")
    }
}

/// Outcome of a successful package installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// Directory the package was installed into.
    pub install_path: PathBuf,
    /// The *actual* version resolved by the installer, read back from the
    /// installed package manifest (not the requested symbolic version).
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_defaults_to_latest() {
        let descriptor = ExternalPackageDescriptor::new("xdc");
        assert_eq!(descriptor.version_or_latest(), "latest");
    }

    #[test]
    fn explicit_version_wins() {
        let descriptor = ExternalPackageDescriptor::new("xdc").with_version("1.2.3");
        assert_eq!(descriptor.version_or_latest(), "1.2.3");
    }
}
