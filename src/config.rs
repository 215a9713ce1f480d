//! Catalog configuration module.
//!
//! Handles loading, validating, and merging `catalog.toml`. Stock defaults
//! reproduce the original workshop catalog; a user file in the source
//! directory overrides any subset of them.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "王叔叔3D打印工坊产品介绍"   # Heading of the markdown index
//! base_url = "https://3d.lich.tech"    # Host serving images and pages
//! snapshot = "README.md"               # Markdown index file name
//! page_title_prefix = "3D模型"         # <title> is "{prefix} - {name}"
//! lang = "zh-CN"
//!
//! [products]
//! default_size = "未知尺寸"
//! description_template = "这是一个{name}3D打印模型"
//!
//! [scan]
//! extensions = ["jpg"]
//! order = "plain"                      # or "natural"
//!
//! [layout]
//! page_height = 29.7
//! overhead = 5.0                       # title, description and navigation
//! min_image_height = 5.0
//! unit = "cm"
//!
//! [labels]
//! description = "描述："
//! size = "尺寸："
//! prev = "上一页"
//! next = "下一页"
//!
//! [theme]
//! font_family = "\"Microsoft YaHei\", Arial, sans-serif"
//! background = "#f4f4f4"
//! link = "#007bff"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the source directory.
pub const CONFIG_FILENAME: &str = "catalog.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Catalog configuration loaded from `catalog.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub site: SiteConfig,
    pub products: ProductsConfig,
    pub scan: ScanConfig,
    pub layout: LayoutConfig,
    pub labels: LabelsConfig,
    pub theme: ThemeConfig,
}

impl CatalogConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.base_url.trim_end_matches('/').is_empty() {
            return Err(ConfigError::Validation(
                "site.base_url must not be empty".into(),
            ));
        }
        if self.site.snapshot.is_empty() || self.site.snapshot.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "site.snapshot must be a plain file name".into(),
            ));
        }
        if self.scan.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "scan.extensions must not be empty".into(),
            ));
        }
        if !self.products.description_template.contains("{name}") {
            return Err(ConfigError::Validation(
                "products.description_template must contain {name}".into(),
            ));
        }
        if self.layout.page_height <= self.layout.overhead {
            return Err(ConfigError::Validation(
                "layout.page_height must be greater than layout.overhead".into(),
            ));
        }
        if self.layout.min_image_height <= 0.0 {
            return Err(ConfigError::Validation(
                "layout.min_image_height must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Site-wide settings shared by the markdown index and the HTML pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Heading of the markdown index.
    pub title: String,
    /// Public host that serves both the images and the generated pages.
    pub base_url: String,
    /// File name of the markdown index (the snapshot).
    pub snapshot: String,
    /// Prefix of every product page `<title>`.
    pub page_title_prefix: String,
    /// `lang` attribute of the generated HTML.
    pub lang: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "王叔叔3D打印工坊产品介绍".to_string(),
            base_url: "https://3d.lich.tech".to_string(),
            snapshot: "README.md".to_string(),
            page_title_prefix: "3D模型".to_string(),
            lang: "zh-CN".to_string(),
        }
    }
}

impl SiteConfig {
    /// Absolute URL of a file published next to the pages.
    pub fn url_for(&self, file: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), file)
    }

    /// Absolute URL of a product page.
    pub fn page_url(&self, index: u32) -> String {
        self.url_for(&format!("{index}.html"))
    }
}

/// Placeholders for products first seen in a scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProductsConfig {
    pub default_size: String,
    /// `{name}` is replaced with the product name.
    pub description_template: String,
}

impl Default for ProductsConfig {
    fn default() -> Self {
        Self {
            default_size: "未知尺寸".to_string(),
            description_template: "这是一个{name}3D打印模型".to_string(),
        }
    }
}

impl ProductsConfig {
    pub fn describe(&self, name: &str) -> String {
        self.description_template.replace("{name}", name)
    }
}

/// Order in which directory entries are visited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanOrder {
    /// Byte-wise filename order.
    #[default]
    Plain,
    /// Digit runs compared numerically (`2-a.jpg` before `10-a.jpg`).
    Natural,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Image extensions without the dot, matched case-insensitively.
    pub extensions: Vec<String>,
    pub order: ScanOrder,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["jpg".to_string()],
            order: ScanOrder::Plain,
        }
    }
}

/// Print layout of a product page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Total page height (A4 portrait by default).
    pub page_height: f64,
    /// Space reserved for title, description and navigation.
    pub overhead: f64,
    /// Lower bound of the per-image height.
    pub min_image_height: f64,
    /// CSS unit of all three values above.
    pub unit: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_height: 29.7,
            overhead: 5.0,
            min_image_height: 5.0,
            unit: "cm".to_string(),
        }
    }
}

impl LayoutConfig {
    /// Vertical space shared by all images of a page.
    pub fn image_budget(&self) -> f64 {
        self.page_height - self.overhead
    }
}

/// Fixed strings of the product page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelsConfig {
    pub description: String,
    pub size: String,
    pub prev: String,
    pub next: String,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            description: "描述：".to_string(),
            size: "尺寸：".to_string(),
            prev: "上一页".to_string(),
            next: "下一页".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    pub font_family: String,
    pub background: String,
    pub link: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            font_family: "\"Microsoft YaHei\", Arial, sans-serif".to_string(),
            background: "#f4f4f4".to_string(),
            link: "#007bff".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(CatalogConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `catalog.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config for a source directory: stock defaults, overridden by the
/// directory's `catalog.toml` if present, then validated.
pub fn load_config(dir: &Path) -> Result<CatalogConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match load_raw_config(dir)? {
        Some(overlay) => merge_toml(base, overlay),
        None => base,
    };
    let config: CatalogConfig = merged.try_into()?;
    config.validate()?;
    tracing::debug!(base_url = %config.site.base_url, "loaded catalog config");
    Ok(config)
}

/// Returns a fully-commented stock `catalog.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Catalog Pages Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
# Heading of the markdown index.
title = "王叔叔3D打印工坊产品介绍"
# Public host serving the images and the generated pages.
base_url = "https://3d.lich.tech"
# Markdown index, also read back as the seed of the next run.
snapshot = "README.md"
# Every product page is titled "<prefix> - <product name>".
page_title_prefix = "3D模型"
lang = "zh-CN"

# ---------------------------------------------------------------------------
# Placeholders for products first seen in a scan
# ---------------------------------------------------------------------------
[products]
default_size = "未知尺寸"
# {name} is replaced with the product name.
description_template = "这是一个{name}3D打印模型"

# ---------------------------------------------------------------------------
# Scanning
# ---------------------------------------------------------------------------
[scan]
# Image extensions (without the dot), matched case-insensitively.
extensions = ["jpg"]
# "plain" sorts filenames byte-wise, "natural" compares numbers numerically.
order = "plain"

# ---------------------------------------------------------------------------
# Page layout
# ---------------------------------------------------------------------------
[layout]
# Images share page_height - overhead; each gets at least min_image_height.
page_height = 29.7
overhead = 5.0
min_image_height = 5.0
unit = "cm"

# ---------------------------------------------------------------------------
# Page labels
# ---------------------------------------------------------------------------
[labels]
description = "描述："
size = "尺寸："
prev = "上一页"
next = "下一页"

# ---------------------------------------------------------------------------
# Theme
# ---------------------------------------------------------------------------
[theme]
font_family = "\"Microsoft YaHei\", Arial, sans-serif"
background = "#f4f4f4"
link = "#007bff"
"##
}

/// Generate CSS custom properties from the theme config.
pub fn generate_theme_css(theme: &ThemeConfig) -> String {
    format!(
        r#":root {{
    --font-family: {font_family};
    --color-bg: {background};
    --color-link: {link};
}}"#,
        font_family = theme.font_family,
        background = theme.background,
        link = theme.link,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_matches_workshop_catalog() {
        let config = CatalogConfig::default();
        assert_eq!(config.site.base_url, "https://3d.lich.tech");
        assert_eq!(config.site.snapshot, "README.md");
        assert_eq!(config.products.default_size, "未知尺寸");
        assert_eq!(config.scan.extensions, vec!["jpg"]);
        assert_eq!(config.scan.order, ScanOrder::Plain);
    }

    #[test]
    fn describe_fills_template() {
        let products = ProductsConfig::default();
        assert_eq!(products.describe("Cat"), "这是一个Cat3D打印模型");
    }

    #[test]
    fn urls_ignore_trailing_slash() {
        let site = SiteConfig {
            base_url: "https://example.com/".to_string(),
            ..SiteConfig::default()
        };
        assert_eq!(site.url_for("1-Cat.jpg"), "https://example.com/1-Cat.jpg");
        assert_eq!(site.page_url(12), "https://example.com/12.html");
    }

    #[test]
    fn parse_partial_config() {
        let config: CatalogConfig = toml::from_str(
            r#"
[scan]
order = "natural"
"#,
        )
        .unwrap();
        assert_eq!(config.scan.order, ScanOrder::Natural);
        assert_eq!(config.scan.extensions, vec!["jpg"]);
        assert_eq!(config.site.lang, "zh-CN");
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.base_url, "https://3d.lich.tech");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            r#"
[site]
base_url = "https://shop.example"

[layout]
min_image_height = 4.0
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.base_url, "https://shop.example");
        assert_eq!(config.layout.min_image_height, 4.0);
        assert_eq!(config.layout.page_height, 29.7);
        assert_eq!(config.site.snapshot, "README.md");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "not valid toml [[[").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn unknown_key_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            "[site]\nbase_ulr = \"typo\"\n",
        )
        .unwrap();
        assert!(load_config(tmp.path()).is_err());
    }

    #[test]
    fn unknown_scan_order_rejected() {
        let result: Result<CatalogConfig, _> = toml::from_str("[scan]\norder = \"random\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["b"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_deep_nested() {
        let base: toml::Value = toml::from_str("[x.y]\na = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("[x.y]\nb = 5").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["x"]["y"]["a"].as_integer(), Some(1));
        assert_eq!(merged["x"]["y"]["b"].as_integer(), Some(5));
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(CatalogConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_empty_extensions() {
        let mut config = CatalogConfig::default();
        config.scan.extensions.clear();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_overhead_exceeds_page() {
        let mut config = CatalogConfig::default();
        config.layout.overhead = 30.0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_template_without_placeholder() {
        let mut config = CatalogConfig::default();
        config.products.description_template = "A model".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_snapshot_path_rejected() {
        let mut config = CatalogConfig::default();
        config.site.snapshot = "docs/README.md".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            "[scan]\nextensions = []\n",
        )
        .unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let parsed: CatalogConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = CatalogConfig::default();
        assert_eq!(parsed.site.title, defaults.site.title);
        assert_eq!(parsed.site.base_url, defaults.site.base_url);
        assert_eq!(parsed.products.description_template, defaults.products.description_template);
        assert_eq!(parsed.scan.extensions, defaults.scan.extensions);
        assert_eq!(parsed.layout.page_height, defaults.layout.page_height);
        assert_eq!(parsed.labels.next, defaults.labels.next);
        assert_eq!(parsed.theme.font_family, defaults.theme.font_family);
    }

    #[test]
    fn generate_theme_css_includes_variables() {
        let css = generate_theme_css(&ThemeConfig::default());
        assert!(css.contains("--color-bg: #f4f4f4"));
        assert!(css.contains("--color-link: #007bff"));
        assert!(css.contains("Microsoft YaHei"));
    }
}
