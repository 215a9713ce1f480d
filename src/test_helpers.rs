//! Shared test utilities for the catalog-pages test suite.
//!
//! Provides fixture builders, lookup helpers and catalog assertions.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! touch_images(tmp.path(), &["1-Cat.jpg", "2-Dog.jpg"]);
//! let report = build(tmp.path(), tmp.path()).unwrap();
//!
//! assert_eq!(product_indices(&report.catalog), vec![1, 2]);
//! assert_linked(&report.catalog);
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use crate::catalog::{self, Catalog, Product};

// =========================================================================
// Fixture setup
// =========================================================================

/// Create placeholder image files. Only names matter to the scanner.
pub fn touch_images(dir: &Path, names: &[&str]) {
    for name in names {
        std::fs::write(dir.join(name), "fake image").unwrap();
    }
}

/// Every regular file in `dir` with its bytes, for before/after comparisons.
pub fn snapshot_dir(dir: &Path) -> BTreeMap<String, Vec<u8>> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.is_file())
        .map(|p| {
            let name = p.file_name().unwrap().to_string_lossy().to_string();
            (name, std::fs::read(&p).unwrap())
        })
        .collect()
}

/// A product with `count` images named `<index>-<name>-<n>.jpg`.
pub fn product_with_images(index: u32, name: &str, count: usize) -> Product {
    let mut product = Product::from_row(index, name, "未知尺寸", "desc");
    product.images = (1..=count)
        .map(|n| format!("https://3d.lich.tech/{index}-{name}-{n}.jpg"))
        .collect();
    product
}

/// Sort and link `products` into a catalog, as the merge step would.
pub fn catalog_of(mut products: Vec<Product>) -> Catalog {
    products.sort_by_key(|p| p.index);
    catalog::link_products(&mut products);
    Catalog {
        products,
        ..Catalog::default()
    }
}

// =========================================================================
// Catalog lookups — panics with a clear message on miss
// =========================================================================

/// Find a product by index. Panics if not found.
pub fn find_product(catalog: &Catalog, index: u32) -> &Product {
    catalog.get(index).unwrap_or_else(|| {
        panic!(
            "product {index} not found. Available: {:?}",
            product_indices(catalog)
        )
    })
}

pub fn product_indices(catalog: &Catalog) -> Vec<u32> {
    catalog.products.iter().map(|p| p.index).collect()
}

// =========================================================================
// Assertions
// =========================================================================

/// Assert products are strictly increasing and prev/next follow adjacency.
pub fn assert_linked(catalog: &Catalog) {
    let products = &catalog.products;
    for pair in products.windows(2) {
        assert!(
            pair[0].index < pair[1].index,
            "products out of order: {} before {}",
            pair[0].index,
            pair[1].index
        );
        assert_eq!(pair[0].next_index, Some(pair[1].index));
        assert_eq!(pair[1].prev_index, Some(pair[0].index));
    }
    if let Some(first) = products.first() {
        assert_eq!(first.prev_index, None, "first product has a prev link");
    }
    if let Some(last) = products.last() {
        assert_eq!(last.next_index, None, "last product has a next link");
    }
}
