//! Configuration for the `sfguide` binary.
//!
//! [`StagingConfig`] is loaded from TOML files, environment variables, and
//! defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `SFGUIDE_CONFIG` environment variable
//! 3. XDG default: `~/.config/sfguide/config.toml`
//! 4. Built-in defaults
//!
//! `SFGUIDE_<SECTION>_<KEY>` variables overlay file values, e.g.
//! `SFGUIDE_IMAGES_BASE_URL`.

use std::path::PathBuf;

use confyg::{Confygery, env};
use serde::{Deserialize, Serialize};
use sfguide_content::{DEFAULT_BASE_IMAGE_URL, DocumentParser};
use sfguide_core::{Error, LinkTemplate, Result, Taxonomy};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "SFGUIDE";

// ============================================================================
// Configuration structs
// ============================================================================

/// Staging conventions: where images live, the tag taxonomy, and link
/// templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StagingConfig {
    /// Image hosting.
    pub images: ImagesConfig,

    /// Tag taxonomy.
    pub taxonomy: Taxonomy,

    /// Link templates.
    pub links: LinksConfig,
}

/// Image hosting configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    /// Base URL relative image references are rewritten against.
    pub base_url: String,
}

/// Link template configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Template for the "fork this repo" link; `{id}` is the quickstart id.
    pub fork_repo_template: LinkTemplate,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_IMAGE_URL.to_string(),
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl StagingConfig {
    /// Load configuration from file, environment, and defaults.
    ///
    /// A resolved path that does not exist is skipped.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                log::debug!("Loading config from {}", path.display());
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level(ENV_PREFIX);
        env_opts.add_section("images");
        env_opts.add_section("taxonomy");
        env_opts.add_section("links");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var("SFGUIDE_CONFIG") {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("sfguide").join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Reject settings that would make every document fail.
    pub fn validate(&self) -> Result<()> {
        if self.taxonomy.root.trim().is_empty() {
            return Err(Error::config("taxonomy.root must not be empty"));
        }
        if self.taxonomy.category_namespace.trim().is_empty() {
            return Err(Error::config("taxonomy.category_namespace must not be empty"));
        }
        Ok(())
    }

    /// A stage-one parser using these conventions.
    ///
    /// `base_image_url` overrides `images.base_url` when given.
    pub fn document_parser(&self, base_image_url: Option<&str>) -> DocumentParser {
        let base = base_image_url.unwrap_or(&self.images.base_url);
        DocumentParser::new(base).with_conventions(
            self.taxonomy.clone(),
            self.links.fork_repo_template.clone(),
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Default tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_staging_config_default() {
        let config = StagingConfig::default();
        assert_eq!(config.images.base_url, DEFAULT_BASE_IMAGE_URL);
        assert_eq!(config.taxonomy.root, "snowflake-site:taxonomy");
        assert_eq!(config.taxonomy.category_namespace, "guide-category");
        assert!(
            config
                .links
                .fork_repo_template
                .as_str()
                .ends_with("/site/sfguides/src/{id}")
        );
    }

    // ------------------------------------------------------------------------
    // Serialization tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_staging_config_from_partial_toml() {
        let toml_str = r#"
            [taxonomy]
            root = "acme:tags"
        "#;
        let config: StagingConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.taxonomy.root, "acme:tags");
        assert_eq!(config.taxonomy.category_namespace, "guide-category");
        assert_eq!(config.images.base_url, DEFAULT_BASE_IMAGE_URL);
    }

    #[test]
    fn test_staging_config_toml_roundtrip() {
        let config = StagingConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("[images]"));
        assert!(toml_str.contains("fork_repo_template"));
        let parsed: StagingConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    // ------------------------------------------------------------------------
    // Loading tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_staging_config_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
                [images]
                base_url = "https://cdn.example.com/guides"

                [links]
                fork_repo_template = "https://git.example.com/{id}"
            "#,
        )
        .unwrap();

        let config = StagingConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.images.base_url, "https://cdn.example.com/guides");
        assert_eq!(
            config.links.fork_repo_template.render("demo"),
            "https://git.example.com/demo"
        );
        assert_eq!(config.taxonomy, Taxonomy::default());
    }

    #[test]
    fn test_staging_config_load_defaults() {
        let config = StagingConfig::load(Some("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.images.base_url, DEFAULT_BASE_IMAGE_URL);
        assert_eq!(config.taxonomy, Taxonomy::default());
    }

    #[test]
    fn test_staging_config_rejects_empty_root() {
        let mut config = StagingConfig::default();
        config.taxonomy.root = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("taxonomy.root"));
    }

    // ------------------------------------------------------------------------
    // resolve_config_path tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_resolve_config_path_explicit() {
        let path = StagingConfig::resolve_config_path(Some("/explicit/config.toml"));
        assert_eq!(path, Some(PathBuf::from("/explicit/config.toml")));
    }

    #[test]
    fn test_default_config_path_under_sfguide() {
        if let Some(path) = StagingConfig::default_config_path() {
            assert!(path.ends_with("sfguide/config.toml"));
        }
    }

    // ------------------------------------------------------------------------
    // Document parser tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_document_parser_base_url_override() {
        let config = StagingConfig::default();
        assert_eq!(
            config.document_parser(Some("https://x")).base_image_url(),
            "https://x"
        );
        assert_eq!(
            config.document_parser(None).base_image_url(),
            DEFAULT_BASE_IMAGE_URL
        );
    }
}
