//! Product grouping, merging and pagination.
//!
//! A catalog is rebuilt from scratch on every run:
//!
//! ```text
//! snapshot rows ──► seed: BTreeMap<index, Product>   (images empty)
//!                              │
//! scanned files ──► merge ─────┤  append image URLs, create new products
//!                              ▼
//!                   sorted by index, prev/next linked ──► Catalog
//! ```
//!
//! [`build_catalog`] is a pure function of the seed, the directory listing
//! and the config. It never touches the filesystem.
//!
//! Merging is append-only: a product known from the snapshot stays in the
//! catalog even when none of its images are found anymore. It just ends up
//! with an empty `images` list, which the generate stage turns into a page
//! deletion.

use crate::config::CatalogConfig;
use crate::naming::{self, NameError};
use crate::snapshot;
use serde::Serialize;
use std::collections::BTreeMap;

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub index: u32,
    pub name: String,
    pub size: String,
    pub description: String,
    /// Absolute image URLs in scan order.
    pub images: Vec<String>,
    /// Index of the previous product in catalog order.
    pub prev_index: Option<u32>,
    /// Index of the next product in catalog order.
    pub next_index: Option<u32>,
}

impl Product {
    /// A product known only by its snapshot row, before any image is merged.
    pub fn from_row(index: u32, name: &str, size: &str, description: &str) -> Self {
        Self {
            index,
            name: name.to_string(),
            size: size.to_string(),
            description: description.to_string(),
            images: Vec::new(),
            prev_index: None,
            next_index: None,
        }
    }

    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }
}

/// A filename with an image extension that does not follow the naming grammar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedFile {
    pub filename: String,
    pub reason: String,
}

/// Result of one catalog build.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    /// All products, ascending by index, with navigation links set.
    pub products: Vec<Product>,
    /// Indices of products created by this run's scan (not in the seed).
    pub new_entries: Vec<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedFile>,
}

impl Catalog {
    pub fn get(&self, index: u32) -> Option<&Product> {
        self.products
            .binary_search_by_key(&index, |p| p.index)
            .ok()
            .map(|pos| &self.products[pos])
    }

    pub fn image_count(&self) -> usize {
        self.products.iter().map(|p| p.images.len()).sum()
    }
}

/// Merge a directory listing into the snapshot seed and link the result.
///
/// `listing` must already be in scan order; image URLs keep that order
/// within each product.
pub fn build_catalog(
    mut seed: BTreeMap<u32, Product>,
    listing: &[String],
    config: &CatalogConfig,
) -> Catalog {
    let mut new_entries = Vec::new();
    let mut skipped = Vec::new();

    for filename in listing {
        let parsed = match naming::parse_image_filename(filename, &config.scan.extensions) {
            Ok(parsed) => parsed,
            Err(NameError::NotAnImage) => continue,
            Err(err) => {
                tracing::warn!(file = %filename, "skipping image: {err}");
                skipped.push(SkippedFile {
                    filename: filename.clone(),
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let url = config.site.url_for(filename);
        match seed.get_mut(&parsed.index) {
            Some(product) => product.images.push(url),
            None => {
                // same text the index reads back on the next run
                let name = snapshot::cell_text(&parsed.name);
                tracing::debug!(index = parsed.index, name = %name, "new product");
                let mut product = Product::from_row(
                    parsed.index,
                    &name,
                    &snapshot::cell_text(&config.products.default_size),
                    &snapshot::cell_text(&config.products.describe(&name)),
                );
                product.images.push(url);
                seed.insert(parsed.index, product);
                new_entries.push(parsed.index);
            }
        }
    }

    let mut products: Vec<Product> = seed.into_values().collect();
    link_products(&mut products);

    Catalog {
        products,
        new_entries,
        skipped,
    }
}

/// Set `prev_index`/`next_index` by adjacency. `products` must be sorted.
pub fn link_products(products: &mut [Product]) {
    let indices: Vec<u32> = products.iter().map(|p| p.index).collect();
    for (pos, product) in products.iter_mut().enumerate() {
        product.prev_index = pos.checked_sub(1).map(|prev| indices[prev]);
        product.next_index = indices.get(pos + 1).copied();
    }
}
