//! One complete catalog run.
//!
//! ```text
//! 1. Config    source/catalog.toml  →  CatalogConfig   (stock defaults if absent)
//! 2. Seed      output/README.md     →  BTreeMap<index, Product>
//! 3. Scan      source/*.jpg         →  filenames in scan order
//! 4. Merge     seed + filenames     →  Catalog          (sorted, linked)
//! 5. Write     Catalog              →  README.md, <index>.html
//! ```
//!
//! Steps 1–4 are shared by `check` (which stops there) and `build`.

use crate::catalog::{self, Catalog};
use crate::config::{self, CatalogConfig, ConfigError};
use crate::generate::{self, GenerateError, GenerateReport};
use crate::scan::{self, ScanError};
use crate::snapshot;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("Generate error: {0}")]
    Generate(#[from] GenerateError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// What happened to the markdown index during a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotAction {
    Written,
    Unchanged,
    /// No new products, so an existing index was left as is.
    Kept,
}

#[derive(Debug)]
pub struct BuildReport {
    pub config: CatalogConfig,
    pub catalog: Catalog,
    pub snapshot: SnapshotAction,
    pub pages: GenerateReport,
}

/// Load config and merge the previous index with a fresh scan.
pub fn load_catalog(source: &Path, output: &Path) -> Result<(Catalog, CatalogConfig), BuildError> {
    let config = config::load_config(source)?;
    let seed = read_snapshot(&output.join(&config.site.snapshot))?;
    let listing = scan::scan(source, &config.scan)?;
    let catalog = catalog::build_catalog(seed, &listing, &config);
    tracing::debug!(
        products = catalog.products.len(),
        new = catalog.new_entries.len(),
        skipped = catalog.skipped.len(),
        "catalog merged"
    );
    Ok((catalog, config))
}

/// Read the previous index, or an empty seed when there is none yet.
pub fn read_snapshot(path: &Path) -> Result<BTreeMap<u32, catalog::Product>, BuildError> {
    match fs::read_to_string(path) {
        Ok(markdown) => Ok(snapshot::parse_snapshot(&markdown)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(e) => Err(e.into()),
    }
}

/// Run the full pipeline and write the site into `output`.
pub fn build(source: &Path, output: &Path) -> Result<BuildReport, BuildError> {
    let (catalog, config) = load_catalog(source, output)?;
    fs::create_dir_all(output)?;

    let snapshot_path = output.join(&config.site.snapshot);
    // Without a previous index every product is new, so this also covers
    // the first run
    let snapshot = if !catalog.new_entries.is_empty() {
        let markdown = snapshot::render_snapshot(&catalog.products, &config);
        if generate::write_if_changed(&snapshot_path, &markdown)? {
            tracing::info!(path = %snapshot_path.display(), "wrote index");
            SnapshotAction::Written
        } else {
            SnapshotAction::Unchanged
        }
    } else {
        SnapshotAction::Kept
    };

    let pages = generate::generate(&catalog, output, &config)?;

    Ok(BuildReport {
        config,
        catalog,
        snapshot,
        pages,
    })
}
