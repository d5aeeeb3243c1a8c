//! Configuration types and validation for the pruning pipeline

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Uploads subtree, relative to the export root
pub const DEFAULT_UPLOADS_DIR: &str = "wp-content/uploads";

/// Prefix a normalized reference must carry to count against the uploads subtree
pub const DEFAULT_REFERENCE_PREFIX: &str = "wp-content/uploads/";

pub const DEFAULT_DOCUMENT_EXTENSIONS: &[&str] = &["html", "css", "js", "xml"];

pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] =
    &["png", "jpg", "jpeg", "webp", "svg", "ico", "avif", "gif"];

/// Global pipeline execution config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PruneConfig {
    /// Root of the static export
    pub root: PathBuf,
    /// Uploads subtree relative to `root`
    pub uploads_dir: PathBuf,
    /// Literal prefix selecting relevant references
    pub reference_prefix: String,
    /// Extensions (without dot, matched case-insensitively) of scanned documents
    pub document_extensions: Vec<String>,
    /// Extensions of candidate images
    pub image_extensions: Vec<String>,
    /// Plan and report only, never delete
    pub dry_run: bool,
    /// Sweep directories left empty after deletion
    pub remove_empty_dirs: bool,
}

impl Default for PruneConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            uploads_dir: PathBuf::from(DEFAULT_UPLOADS_DIR),
            reference_prefix: DEFAULT_REFERENCE_PREFIX.to_string(),
            document_extensions: DEFAULT_DOCUMENT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            image_extensions: DEFAULT_IMAGE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            dry_run: false,
            remove_empty_dirs: true,
        }
    }
}

impl PruneConfig {
    /// Default configuration rooted at `root`
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Load a configuration file, trying JSON first and then YAML
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::ConfigError(format!("Failed to read config file {}: {}", path.display(), e)))?;

        serde_json::from_str(&content)
            .or_else(|_| serde_yaml::from_str(&content))
            .map_err(|e| Error::ConfigError(format!("Config parsing error: {}", e)))
    }

    /// Absolute-or-relative path of the uploads subtree
    pub fn uploads_path(&self) -> PathBuf {
        self.root.join(&self.uploads_dir)
    }

    pub fn validate(&self) -> Result<()> {
        if self.document_extensions.is_empty() {
            return Err(Error::InvalidConfiguration("No document extensions configured".into()));
        }
        if self.image_extensions.is_empty() {
            return Err(Error::InvalidConfiguration("No image extensions configured".into()));
        }
        if self.uploads_dir.as_os_str().is_empty() || self.uploads_dir.is_absolute() {
            return Err(Error::InvalidConfiguration(format!(
                "Uploads directory must be a relative path below the root, got {:?}",
                self.uploads_dir
            )));
        }
        if !self.reference_prefix.ends_with('/') || self.reference_prefix.starts_with('/') {
            return Err(Error::InvalidConfiguration(format!(
                "Reference prefix must be root-relative and end with '/', got {:?}",
                self.reference_prefix
            )));
        }
        let has_dotted = self
            .document_extensions
            .iter()
            .chain(&self.image_extensions)
            .any(|ext| ext.starts_with('.'));
        if has_dotted {
            return Err(Error::InvalidConfiguration("Extensions are given without a leading dot".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PruneConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.uploads_path(), PathBuf::from("./wp-content/uploads"));
        assert!(!config.dry_run);
        assert!(config.remove_empty_dirs);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = PruneConfig::default();
        config.image_extensions.clear();
        assert!(matches!(config.validate(), Err(Error::InvalidConfiguration(_))));

        let mut config = PruneConfig::default();
        config.reference_prefix = "wp-content/uploads".into();
        assert!(config.validate().is_err());

        let mut config = PruneConfig::default();
        config.uploads_dir = PathBuf::from("/var/www/uploads");
        assert!(config.validate().is_err());

        let mut config = PruneConfig::default();
        config.document_extensions = vec![".html".into()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_json_and_yaml() {
        let dir = tempfile::tempdir().unwrap();

        let json = dir.path().join("prune.json");
        fs::write(&json, r#"{"root": "site", "dry_run": true}"#).unwrap();
        let config = PruneConfig::from_file(&json).unwrap();
        assert_eq!(config.root, PathBuf::from("site"));
        assert!(config.dry_run);
        assert_eq!(config.reference_prefix, DEFAULT_REFERENCE_PREFIX);

        let yaml = dir.path().join("prune.yaml");
        fs::write(&yaml, "remove_empty_dirs: false\nimage_extensions: [png]\n").unwrap();
        let config = PruneConfig::from_file(&yaml).unwrap();
        assert!(!config.remove_empty_dirs);
        assert_eq!(config.image_extensions, vec!["png".to_string()]);
        assert_eq!(config.root, PathBuf::from("."));
    }

    #[test]
    fn test_from_file_missing() {
        let err = PruneConfig::from_file(Path::new("/nonexistent/prune.json")).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }
}
