//! HTML page generation.
//!
//! Every product with at least one image gets a standalone page named after
//! its index:
//!
//! ```text
//! out/
//! ├── README.md      # markdown index (written by the pipeline)
//! ├── 1.html         # product 1
//! ├── 2.html
//! └── 10.html
//! ```
//!
//! A page shows the product name, its images stacked vertically, the
//! description and size, and links to the previous and next product. It is
//! laid out as one printed A4 sheet; the navigation links are hidden when
//! printing.
//!
//! ## Output decision
//!
//! - product has images → render and write `<index>.html`
//! - product has no images and `<index>.html` exists → delete it
//!
//! Writes are skipped when the file already holds the exact bytes, so
//! re-running on unchanged input leaves the output directory untouched.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! All interpolated product data is escaped.

use crate::catalog::{Catalog, Product};
use crate::config::{self, CatalogConfig};
use crate::layout;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// What happened to one product's page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageAction {
    Written,
    Unchanged,
    Deleted,
    /// No images and no stale page to remove.
    Skipped,
}

/// Per-product outcome of [`generate`], in catalog order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerateReport {
    pub pages: Vec<(u32, PageAction)>,
}

impl GenerateReport {
    pub fn count(&self, action: PageAction) -> usize {
        self.pages.iter().filter(|(_, a)| *a == action).count()
    }

    pub fn indices(&self, action: PageAction) -> Vec<u32> {
        self.pages
            .iter()
            .filter(|(_, a)| *a == action)
            .map(|(index, _)| *index)
            .collect()
    }
}

/// File name of a product page.
pub fn page_filename(index: u32) -> String {
    format!("{index}.html")
}

/// Write or delete every product page under `output_dir`.
pub fn generate(
    catalog: &Catalog,
    output_dir: &Path,
    config: &CatalogConfig,
) -> Result<GenerateReport, GenerateError> {
    fs::create_dir_all(output_dir).map_err(|source| GenerateError::Io {
        path: output_dir.display().to_string(),
        source,
    })?;

    let css = format!(
        "{}\n\n{}",
        config::generate_theme_css(&config.theme),
        CSS_STATIC
    );

    let mut report = GenerateReport::default();
    for product in &catalog.products {
        let path = output_dir.join(page_filename(product.index));
        let io_err = |source| GenerateError::Io {
            path: path.display().to_string(),
            source,
        };

        let action = if product.has_images() {
            let page = render_product_page(product, config, &css).into_string();
            if write_if_changed(&path, &page).map_err(io_err)? {
                tracing::info!(index = product.index, "wrote page");
                PageAction::Written
            } else {
                PageAction::Unchanged
            }
        } else if path.is_file() {
            fs::remove_file(&path).map_err(io_err)?;
            tracing::info!(index = product.index, "deleted page of product without images");
            PageAction::Deleted
        } else {
            PageAction::Skipped
        };
        report.pages.push((product.index, action));
    }

    Ok(report)
}

/// Write `contents` to `path` unless the file already holds exactly these
/// bytes. Returns whether a write happened.
pub fn write_if_changed(path: &Path, contents: &str) -> io::Result<bool> {
    match fs::read(path) {
        Ok(existing) if existing == contents.as_bytes() => return Ok(false),
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    fs::write(path, contents)?;
    Ok(true)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, lang: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the prev/next links of a product page.
fn navigation(product: &Product, config: &CatalogConfig) -> Markup {
    html! {
        div.navigation {
            @if let Some(prev) = product.prev_index {
                a href=(config.site.page_url(prev)) { (config.labels.prev) }
            }
            @if let Some(next) = product.next_index {
                a href=(config.site.page_url(next)) { (config.labels.next) }
            }
        }
    }
}

/// Renders one product page.
pub fn render_product_page(product: &Product, config: &CatalogConfig, css: &str) -> Markup {
    let labels = &config.labels;
    let max_height = layout::max_image_height(product.images.len(), &config.layout);
    let image_style = format!(
        "--image-max-height: {};",
        layout::css_length(max_height, &config.layout)
    );
    let title = format!("{} - {}", config.site.page_title_prefix, product.name);

    let content = html! {
        div.page-content {
            h1 { (product.name) }
            div.image-container style=(image_style) {
                @for image in &product.images {
                    img src=(image) alt=(product.name);
                }
            }
            div.product-info {
                p { strong { (labels.description) } " " (product.description) }
                p { strong { (labels.size) } " " (product.size) }
            }
        }
        (navigation(product, config))
    };

    base_document(&title, &config.site.lang, css, content)
}

// ============================================================================
// Tests
// ============================================================================
