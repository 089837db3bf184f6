//! Configuration management for Quill.
//!
//! Parses `quill.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.url`
//! - `diagrams.plantuml`
//! - `diagrams.tikz`
//! - `diagrams.ditaa`

mod expand;

use quill_summary::{DEFAULT_BEGIN_MARKER, DEFAULT_END_MARKER, SummaryMarkers};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content source directory.
    pub source_dir: Option<PathBuf>,
    /// Override generated site directory.
    pub output_dir: Option<PathBuf>,
    /// Override site URL.
    pub site_url: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "quill.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site configuration (paths are relative strings from TOML).
    site: SiteConfigRaw,
    /// Summary marker configuration.
    pub summary: SummaryConfig,
    /// Diagram rendering configuration.
    diagrams: DiagramsConfigRaw,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Resolved diagrams configuration (set after loading).
    #[serde(skip)]
    pub diagrams_resolved: DiagramsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw site configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    url: Option<String>,
    source_dir: Option<String>,
    output_dir: Option<String>,
}

/// Resolved site configuration with absolute paths.
#[derive(Debug, Default)]
pub struct SiteConfig {
    /// Site URL as configured (may be empty for relative URLs).
    pub url: String,
    /// Directory holding the markdown documents.
    pub source_dir: PathBuf,
    /// Directory receiving generated pages.
    pub output_dir: PathBuf,
}

impl SiteConfig {
    /// Base URL for generated assets.
    ///
    /// Subsites publish under a path of the main site, while rendered
    /// assets live at the site root, so a trailing path segment is dropped.
    #[must_use]
    pub fn asset_base_url(&self) -> &str {
        trim_subsite(&self.url)
    }
}

/// Drop the last path segment of a site URL.
///
/// The scheme separator is skipped first, so `http://example.com` is kept
/// as is while `http://example.com/blog` becomes `http://example.com`.
/// URLs without a scheme skip their first two characters instead.
#[must_use]
pub fn trim_subsite(url: &str) -> &str {
    let skip = url
        .find("://")
        .map_or_else(|| url.char_indices().nth(2).map_or(url.len(), |(i, _)| i), |i| i + 3);

    match url[skip..].rfind('/') {
        Some(pos) => &url[..skip + pos],
        None => url,
    }
}

/// Summary extraction markers.
///
/// An empty marker disables searching for it.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SummaryConfig {
    /// Marker opening the summary region.
    pub begin_marker: String,
    /// Marker closing the summary region.
    pub end_marker: String,
}

impl SummaryConfig {
    /// Markers for the extractor.
    #[must_use]
    pub fn markers(&self) -> SummaryMarkers {
        SummaryMarkers::new(&self.begin_marker, &self.end_marker)
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            begin_marker: DEFAULT_BEGIN_MARKER.to_owned(),
            end_marker: DEFAULT_END_MARKER.to_owned(),
        }
    }
}

/// Raw diagrams configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DiagramsConfigRaw {
    output_dir: Option<String>,
    url_path: Option<String>,
    reuse_existing: Option<bool>,
    plantuml: Option<String>,
    tikz: Option<String>,
    ditaa: Option<String>,
}

/// Resolved diagram rendering configuration with absolute paths.
#[derive(Debug)]
pub struct DiagramsConfig {
    /// Directory receiving rendered diagram images.
    pub output_dir: PathBuf,
    /// URL path segment under which rendered images are served.
    pub url_path: String,
    /// Skip rendering when an image with the same content hash exists.
    pub reuse_existing: bool,
    /// `PlantUML` executable.
    pub plantuml: String,
    /// `TikZ` to SVG converter executable.
    pub tikz: String,
    /// Ditaa executable.
    pub ditaa: String,
}

impl DiagramsConfig {
    fn with_base(base: &Path) -> Self {
        Self {
            output_dir: base.join("content").join("uml"),
            url_path: "uml".to_owned(),
            reuse_existing: false,
            plantuml: "plantuml".to_owned(),
            tikz: "tikz2svg".to_owned(),
            ditaa: "ditaa".to_owned(),
        }
    }
}

impl Default for DiagramsConfig {
    fn default() -> Self {
        Self::with_base(Path::new("."))
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.url`").
        field: String,
        /// Error message (e.g., "${`SITE_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `quill.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.site_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.site_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(site_url) = &settings.site_url {
            self.site_resolved.url.clone_from(site_url);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfigRaw::default(),
            summary: SummaryConfig::default(),
            diagrams: DiagramsConfigRaw::default(),
            site_resolved: SiteConfig {
                url: String::new(),
                source_dir: base.join("content"),
                output_dir: base.join("output"),
            },
            diagrams_resolved: DiagramsConfig::with_base(base),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after applying CLI
    /// settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_diagrams()?;
        Ok(())
    }

    /// Validate site configuration.
    fn validate_site(&self) -> Result<(), ConfigError> {
        let url = &self.site_resolved.url;
        if !url.is_empty()
            && !url.starts_with("http://")
            && !url.starts_with("https://")
            && !url.starts_with('/')
        {
            return Err(ConfigError::Validation(
                "site.url must be empty, absolute (http:// or https://) or start with /"
                    .to_owned(),
            ));
        }
        Ok(())
    }

    /// Validate diagrams configuration.
    fn validate_diagrams(&self) -> Result<(), ConfigError> {
        let diagrams = &self.diagrams_resolved;
        require_non_empty(&diagrams.url_path, "diagrams.url_path")?;
        require_non_empty(&diagrams.plantuml, "diagrams.plantuml")?;
        require_non_empty(&diagrams.tikz, "diagrams.tikz")?;
        require_non_empty(&diagrams.ditaa, "diagrams.ditaa")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref url) = self.site.url {
            self.site.url = Some(expand::expand_env(url, "site.url")?);
        }

        let diagrams = &mut self.diagrams;
        for (value, field) in [
            (&mut diagrams.plantuml, "diagrams.plantuml"),
            (&mut diagrams.tikz, "diagrams.tikz"),
            (&mut diagrams.ditaa, "diagrams.ditaa"),
        ] {
            if let Some(command) = value.as_deref() {
                *value = Some(expand::expand_env(command, field)?);
            }
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.site_resolved = SiteConfig {
            url: self.site.url.clone().unwrap_or_default(),
            source_dir: resolve(self.site.source_dir.as_deref(), "content"),
            output_dir: resolve(self.site.output_dir.as_deref(), "output"),
        };

        let defaults = DiagramsConfig::with_base(config_dir);
        let raw = &self.diagrams;
        self.diagrams_resolved = DiagramsConfig {
            output_dir: raw
                .output_dir
                .as_deref()
                .map_or(defaults.output_dir, |dir| config_dir.join(dir)),
            url_path: raw
                .url_path
                .as_deref()
                .map_or(defaults.url_path, |p| p.trim_matches('/').to_owned()),
            reuse_existing: raw.reuse_existing.unwrap_or(defaults.reuse_existing),
            plantuml: raw.plantuml.clone().unwrap_or(defaults.plantuml),
            tikz: raw.tikz.clone().unwrap_or(defaults.tikz),
            ditaa: raw.ditaa.clone().unwrap_or(defaults.ditaa),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.site_resolved.url, "");
        assert_eq!(
            config.site_resolved.source_dir,
            PathBuf::from("/test/content")
        );
        assert_eq!(
            config.site_resolved.output_dir,
            PathBuf::from("/test/output")
        );
        assert_eq!(
            config.diagrams_resolved.output_dir,
            PathBuf::from("/test/content/uml")
        );
        assert_eq!(config.diagrams_resolved.url_path, "uml");
        assert!(!config.diagrams_resolved.reuse_existing);
        assert_eq!(config.summary.begin_marker, DEFAULT_BEGIN_MARKER);
        assert_eq!(config.summary.end_marker, DEFAULT_END_MARKER);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.summary, SummaryConfig::default());
        assert!(config.site.url.is_none());
    }

    #[test]
    fn test_parse_summary_markers() {
        let toml = r#"
[summary]
begin_marker = "<!-- more -->"
end_marker = ""
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.summary.begin_marker, "<!-- more -->");
        assert_eq!(config.summary.end_marker, "");

        let markers = config.summary.markers();
        assert_eq!(markers.begin(), Some("<!-- more -->"));
        assert_eq!(markers.end(), None);
    }

    #[test]
    fn test_default_markers_match_extractor() {
        assert_eq!(SummaryConfig::default().markers(), SummaryMarkers::default());
    }

    #[test]
    fn test_partial_summary_keeps_other_default() {
        let toml = r#"
[summary]
begin_marker = "<!-- more -->"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.summary.end_marker, DEFAULT_END_MARKER);
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[site]
url = "https://example.com"
source_dir = "articles"
output_dir = "public"

[diagrams]
output_dir = "articles/images"
url_path = "/images/"
reuse_existing = true
plantuml = "/opt/plantuml/bin/plantuml"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.site_resolved.url, "https://example.com");
        assert_eq!(
            config.site_resolved.source_dir,
            PathBuf::from("/project/articles")
        );
        assert_eq!(
            config.site_resolved.output_dir,
            PathBuf::from("/project/public")
        );
        assert_eq!(
            config.diagrams_resolved.output_dir,
            PathBuf::from("/project/articles/images")
        );
        assert_eq!(config.diagrams_resolved.url_path, "images");
        assert!(config.diagrams_resolved.reuse_existing);
        assert_eq!(config.diagrams_resolved.plantuml, "/opt/plantuml/bin/plantuml");
        assert_eq!(config.diagrams_resolved.tikz, "tikz2svg");
        assert_eq!(config.diagrams_resolved.ditaa, "ditaa");
    }

    #[test]
    fn test_trim_subsite() {
        assert_eq!(trim_subsite(""), "");
        assert_eq!(trim_subsite("http://example.com"), "http://example.com");
        assert_eq!(trim_subsite("https://example.com/"), "https://example.com");
        assert_eq!(trim_subsite("http://example.com/de"), "http://example.com");
        assert_eq!(
            trim_subsite("http://example.com/blog/de"),
            "http://example.com/blog"
        );
        assert_eq!(trim_subsite("/blog"), "/blog");
        assert_eq!(trim_subsite("/blog/de"), "/blog");
    }

    #[test]
    fn test_asset_base_url() {
        let site = SiteConfig {
            url: "https://example.com/zh".to_owned(),
            ..SiteConfig::default()
        };
        assert_eq!(site.asset_base_url(), "https://example.com");
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/custom/content")),
            site_url: Some("https://override.example".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.site_resolved.source_dir,
            PathBuf::from("/custom/content")
        );
        assert_eq!(config.site_resolved.url, "https://override.example");
        // Unchanged
        assert_eq!(
            config.site_resolved.output_dir,
            PathBuf::from("/test/output")
        );
    }

    #[test]
    fn test_validate_rejects_bad_site_url() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site_resolved.url = "example.com".to_owned();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("site.url"));
    }

    #[test]
    fn test_validate_accepts_relative_site_url() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site_resolved.url = "/blog".to_owned();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_tool() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.diagrams_resolved.ditaa = "  ".to_owned();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("diagrams.ditaa"));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let result = Config::load(Some(Path::new("/nonexistent/quill.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path();
        let path = dir.join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "[site]\nurl = \"https://example.com/blog\"\nsource_dir = \"posts\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.site_resolved.source_dir, dir.join("posts"));
        assert_eq!(config.site_resolved.asset_base_url(), "https://example.com");
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_parse_error() {
        let result: Result<Config, _> = toml::from_str("[site\nurl = 1");
        assert!(result.is_err());
    }
}
