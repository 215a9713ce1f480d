//! CLI output formatting.
//!
//! Output is information-centric: each product leads with its index and
//! name, with images and metadata as indented context lines.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Products
//! 001 Cat (1 image)
//!     Size: 未知尺寸
//!     1-Cat.jpg
//! 002 Dog (2 images) [new]
//!     Size: 未知尺寸
//!     2-Dog.jpg
//!     2-Dog2.jpg
//! 003 Vase (no images)
//!     Size: 12cm
//!
//! Skipped
//!     Cat.jpg: missing '-' between index and name
//! ```
//!
//! ## Build
//!
//! The check inventory, followed by:
//!
//! ```text
//! Output
//! README.md (written)
//! 001 Cat → 1.html (unchanged)
//! 002 Dog → 2.html (written)
//! 003 Vase → 3.html (deleted)
//!
//! 3 products: 1 written, 1 unchanged, 1 deleted
//! ```
//!
//! Each section has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::catalog::{Catalog, Product};
use crate::generate::{self, PageAction};
use crate::pipeline::{BuildReport, SnapshotAction};

/// Format a product index as 3-digit zero-padded.
fn format_index(index: u32) -> String {
    format!("{:0>3}", index)
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Last path segment of an image URL.
fn image_file(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

fn product_header(product: &Product, is_new: bool) -> String {
    let images = match product.images.len() {
        0 => "no images".to_string(),
        1 => "1 image".to_string(),
        n => format!("{n} images"),
    };
    let marker = if is_new { " [new]" } else { "" };
    format!(
        "{} {} ({}){}",
        format_index(product.index),
        product.name,
        images,
        marker
    )
}

fn action_label(action: PageAction) -> &'static str {
    match action {
        PageAction::Written => "written",
        PageAction::Unchanged => "unchanged",
        PageAction::Deleted => "deleted",
        PageAction::Skipped => "no page",
    }
}

/// Format the merged catalog: one block per product, then skipped files.
pub fn format_catalog(catalog: &Catalog) -> Vec<String> {
    let mut lines = vec!["Products".to_string()];

    if catalog.products.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for product in &catalog.products {
        let is_new = catalog.new_entries.contains(&product.index);
        lines.push(product_header(product, is_new));
        lines.push(format!("{}Size: {}", indent(1), product.size));
        for url in &product.images {
            lines.push(format!("{}{}", indent(1), image_file(url)));
        }
    }

    if !catalog.skipped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped".to_string());
        for skipped in &catalog.skipped {
            lines.push(format!(
                "{}{}: {}",
                indent(1),
                skipped.filename,
                skipped.reason
            ));
        }
    }
    lines
}

/// Format what a build did to the output directory.
pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = vec!["Output".to_string()];

    let snapshot = match report.snapshot {
        SnapshotAction::Written => "written",
        SnapshotAction::Unchanged => "unchanged",
        SnapshotAction::Kept => "kept",
    };
    lines.push(format!("{} ({snapshot})", report.config.site.snapshot));

    for (index, action) in &report.pages.pages {
        let name = report
            .catalog
            .get(*index)
            .map(|p| p.name.as_str())
            .unwrap_or_default();
        lines.push(format!(
            "{} {} → {} ({})",
            format_index(*index),
            name,
            generate::page_filename(*index),
            action_label(*action)
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "{} products: {} written, {} unchanged, {} deleted",
        report.catalog.products.len(),
        report.pages.count(PageAction::Written),
        report.pages.count(PageAction::Unchanged),
        report.pages.count(PageAction::Deleted),
    ));
    lines
}

pub fn print_catalog(catalog: &Catalog) {
    for line in format_catalog(catalog) {
        println!("{}", line);
    }
}

pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}
